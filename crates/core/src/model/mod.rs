mod mode;
mod question;
mod selection;
mod summary;

pub use mode::{Mode, ModeConfig};
pub use question::{AnswerSet, AnswerSetError, Question, QuestionError};
pub use selection::{DEFAULT_TABLES, MAX_TABLE, MIN_TABLE, SelectionError, TableSelection};
pub use summary::{ResultTier, ResultsSummary};
