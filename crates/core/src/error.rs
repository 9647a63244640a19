use thiserror::Error;

use crate::model::{AnswerSetError, QuestionError, SelectionError};

/// Any error the core crate can produce.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum CoreError {
    #[error(transparent)]
    Question(#[from] QuestionError),

    #[error(transparent)]
    AnswerSet(#[from] AnswerSetError),

    #[error(transparent)]
    Selection(#[from] SelectionError),
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
