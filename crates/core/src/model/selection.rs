use serde::{Deserialize, Serialize};
use thiserror::Error;

//
// ─── CONSTANTS ─────────────────────────────────────────────────────────────────
//

/// Smallest multiplication table on offer.
pub const MIN_TABLE: u8 = 1;

/// Largest multiplication table on offer.
pub const MAX_TABLE: u8 = 12;

/// Tables enabled when a player has made no choice yet.
pub const DEFAULT_TABLES: [u8; 3] = [2, 5, 10];

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

/// Errors raised for table selections.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SelectionError {
    #[error("table {0} is outside {MIN_TABLE}..={MAX_TABLE}")]
    OutOfRange(u8),

    #[error("no tables selected")]
    Empty,
}

//
// ─── TABLE SELECTION ───────────────────────────────────────────────────────────
//

/// The set of multiplication tables a session draws questions from.
///
/// Kept sorted and free of duplicates. Toggling tables off one by one can
/// leave the selection empty; starting a session with an empty selection is
/// rejected there, not here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableSelection {
    tables: Vec<u8>,
}

impl TableSelection {
    /// Builds a selection from the given tables, sorting and deduplicating.
    ///
    /// # Errors
    ///
    /// Returns `SelectionError::OutOfRange` if any table falls outside
    /// `1..=12`.
    pub fn new(tables: impl IntoIterator<Item = u8>) -> Result<Self, SelectionError> {
        let mut tables: Vec<u8> = tables.into_iter().collect();
        for &table in &tables {
            if !(MIN_TABLE..=MAX_TABLE).contains(&table) {
                return Err(SelectionError::OutOfRange(table));
            }
        }
        tables.sort_unstable();
        tables.dedup();

        Ok(Self { tables })
    }

    /// A selection with nothing enabled.
    #[must_use]
    pub fn empty() -> Self {
        Self { tables: Vec::new() }
    }

    /// Adds `table` if absent, removes it if present.
    ///
    /// # Errors
    ///
    /// Returns `SelectionError::OutOfRange` if the table is outside `1..=12`.
    pub fn toggle(&mut self, table: u8) -> Result<(), SelectionError> {
        if self.contains(table) {
            self.remove(table);
            Ok(())
        } else {
            self.insert(table)
        }
    }

    /// Adds `table` to the selection. Adding a table twice is a no-op.
    ///
    /// # Errors
    ///
    /// Returns `SelectionError::OutOfRange` if the table is outside `1..=12`.
    pub fn insert(&mut self, table: u8) -> Result<(), SelectionError> {
        if !(MIN_TABLE..=MAX_TABLE).contains(&table) {
            return Err(SelectionError::OutOfRange(table));
        }
        if let Err(pos) = self.tables.binary_search(&table) {
            self.tables.insert(pos, table);
        }

        Ok(())
    }

    /// Removes `table` from the selection. Removing an absent table is a
    /// no-op.
    pub fn remove(&mut self, table: u8) {
        if let Ok(pos) = self.tables.binary_search(&table) {
            self.tables.remove(pos);
        }
    }

    #[must_use]
    pub fn contains(&self, table: u8) -> bool {
        self.tables.binary_search(&table).is_ok()
    }

    /// The selected tables in ascending order.
    #[must_use]
    pub fn tables(&self) -> &[u8] {
        &self.tables
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.tables.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }
}

impl Default for TableSelection {
    fn default() -> Self {
        Self {
            tables: DEFAULT_TABLES.to_vec(),
        }
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
