#![forbid(unsafe_code)]

pub mod error;
pub mod generator;
pub mod model;
pub mod rng;
pub mod scoring;
pub mod time;

pub use error::CoreError;
pub use generator::{DistractorGenerator, MAX_OFFSET, QuestionGenerator};
pub use model::{
    AnswerSet, AnswerSetError, DEFAULT_TABLES, MAX_TABLE, MIN_TABLE, Mode, ModeConfig, Question,
    QuestionError, ResultTier, ResultsSummary, SelectionError, TableSelection,
};
pub use rng::{RandomSource, ScriptedRandom, SeededRandom, ThreadRandom};
pub use scoring::{Resolution, STREAK_BONUS_CAP, STREAK_BONUS_STEP, ScoringPolicy};
pub use time::Clock;
