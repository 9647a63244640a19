use serde::{Deserialize, Serialize};

use quiz_core::model::{AnswerSet, Question, ResultsSummary};

/// Everything the presentation layer can observe from a running session.
///
/// Events queue up inside the controller and are drained in order through
/// [`crate::SessionController::poll_event`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EngineEvent {
    /// A new question is live and awaiting an answer.
    QuestionPresented {
        index: u32,
        question: Question,
        answers: AnswerSet,
    },

    /// The active question resolved, by answer or by timeout.
    AnswerResolved {
        is_correct: bool,
        correct_answer: u32,
        points_awarded: u32,
        streak: u32,
    },

    /// The session is over; no further events follow until the next start.
    SessionFinished { summary: ResultsSummary },

    /// A falling target should appear. Ninja only.
    NinjaTargetSpawned { id: u64, value: u32, is_correct: bool },

    /// One second elapsed on the session clock. Ninja only.
    NinjaTick { seconds_left: u32 },

    /// A life was lost to a wrong click or a missed target. Ninja only.
    NinjaLifeLost { lives_remaining: u32 },
}
