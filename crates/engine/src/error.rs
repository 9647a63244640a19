//! Shared error types for the engine crate.

use thiserror::Error;

use quiz_core::model::SelectionError;

/// Errors emitted by `SessionController`.
///
/// Out-of-phase calls such as a second submit for the same question are not
/// errors; the controller absorbs them as no-ops and reports them through
/// return values.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum EngineError {
    #[error("invalid session configuration: {0}")]
    InvalidConfiguration(#[from] SelectionError),
}
