use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::selection::{MAX_TABLE, MIN_TABLE};

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

/// Errors that can occur when constructing a question by hand.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuestionError {
    #[error("multiplicand {0} is outside {MIN_TABLE}..={MAX_TABLE}")]
    MultiplicandOutOfRange(u8),

    #[error("multiplier {0} is outside {MIN_TABLE}..={MAX_TABLE}")]
    MultiplierOutOfRange(u8),
}

/// Errors that can occur when assembling a multiple-choice answer set.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum AnswerSetError {
    #[error("answer choices must be positive")]
    NonPositive,

    #[error("duplicate answer choice {0}")]
    Duplicate(u32),

    #[error("no choice equals the correct answer {0}")]
    MissingCorrect(u32),
}

//
// ─── QUESTION ──────────────────────────────────────────────────────────────────
//

/// A single multiplication question.
///
/// The answer is always the product of the two factors. Immutable once
/// created.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Question {
    multiplicand: u8,
    multiplier: u8,
    answer: u32,
}

impl Question {
    /// Creates a question from its two factors.
    ///
    /// # Errors
    ///
    /// Returns `QuestionError` if either factor is outside `1..=12`.
    pub fn new(multiplicand: u8, multiplier: u8) -> Result<Self, QuestionError> {
        if !(MIN_TABLE..=MAX_TABLE).contains(&multiplicand) {
            return Err(QuestionError::MultiplicandOutOfRange(multiplicand));
        }
        if !(MIN_TABLE..=MAX_TABLE).contains(&multiplier) {
            return Err(QuestionError::MultiplierOutOfRange(multiplier));
        }

        Ok(Self {
            multiplicand,
            multiplier,
            answer: u32::from(multiplicand) * u32::from(multiplier),
        })
    }

    /// Crate-internal constructor for factors already known to be in range.
    pub(crate) fn from_parts(multiplicand: u8, multiplier: u8) -> Self {
        Self {
            multiplicand,
            multiplier,
            answer: u32::from(multiplicand) * u32::from(multiplier),
        }
    }

    /// The table the question was drawn from.
    #[must_use]
    pub fn multiplicand(&self) -> u8 {
        self.multiplicand
    }

    #[must_use]
    pub fn multiplier(&self) -> u8 {
        self.multiplier
    }

    #[must_use]
    pub fn answer(&self) -> u32 {
        self.answer
    }
}

impl fmt::Display for Question {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} × {} = ?", self.multiplicand, self.multiplier)
    }
}

//
// ─── ANSWER SET ────────────────────────────────────────────────────────────────
//

/// The four multiple-choice answers offered for one question.
///
/// Always four distinct positive values in randomized order, exactly one of
/// which equals the correct product. Built per question and discarded once
/// the question resolves.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerSet {
    choices: [u32; 4],
    correct: u32,
}

impl AnswerSet {
    /// Number of choices in every answer set.
    pub const SIZE: usize = 4;

    /// Creates an answer set from already-ordered choices.
    ///
    /// # Errors
    ///
    /// Returns `AnswerSetError` if any choice is zero, any choice repeats, or
    /// no choice equals `correct`.
    pub fn new(choices: [u32; 4], correct: u32) -> Result<Self, AnswerSetError> {
        for (i, &choice) in choices.iter().enumerate() {
            if choice == 0 {
                return Err(AnswerSetError::NonPositive);
            }
            if choices[..i].contains(&choice) {
                return Err(AnswerSetError::Duplicate(choice));
            }
        }
        if !choices.contains(&correct) {
            return Err(AnswerSetError::MissingCorrect(correct));
        }

        Ok(Self { choices, correct })
    }

    /// Crate-internal constructor for choices already known to be valid.
    pub(crate) fn from_parts(choices: [u32; 4], correct: u32) -> Self {
        Self { choices, correct }
    }

    /// The choices in presentation order.
    #[must_use]
    pub fn choices(&self) -> [u32; 4] {
        self.choices
    }

    #[must_use]
    pub fn correct(&self) -> u32 {
        self.correct
    }

    #[must_use]
    pub fn contains(&self, value: u32) -> bool {
        self.choices.contains(&value)
    }

    #[must_use]
    pub fn is_correct(&self, value: u32) -> bool {
        value == self.correct
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
