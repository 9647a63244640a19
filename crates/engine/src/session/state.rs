use quiz_core::model::{AnswerSet, Mode, Question, ResultsSummary, TableSelection};
use quiz_core::scoring::Resolution;

//
// ─── PUBLIC STATE VIEWS ────────────────────────────────────────────────────────
//

/// Where a session currently stands.
///
/// Fixed-count modes hold in `Resolving` after each answer until the host
/// calls advance, which keeps feedback pacing in the presentation layer's
/// hands. Ninja resolves and moves on in one step, so it is only ever
/// observed `InProgress` or `Finished`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SessionPhase {
    NotStarted,
    InProgress,
    Resolving,
    Finished,
}

/// Aggregated view of session progress, useful for UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionProgress {
    /// Questions resolved so far, timeouts and misses included.
    pub answered: u32,
    /// Configured question count, `None` for endless modes.
    pub total: Option<u32>,
    /// Questions still to come, `None` for endless modes.
    pub remaining: Option<u32>,
    pub is_complete: bool,
}

/// Hit counters for a Boss fight: landing a hit means answering correctly,
/// taking one means answering wrong or timing out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BossMeter {
    pub hits_landed: u32,
    pub hits_taken: u32,
}

//
// ─── INTERNAL SESSION STATE ────────────────────────────────────────────────────
//

/// The live question together with its multiple-choice answers.
#[derive(Debug, Clone)]
pub(crate) struct CurrentQuestion {
    pub(crate) question: Question,
    pub(crate) answers: AnswerSet,
}

/// Mutable aggregate for one play-through. Owned by the controller and
/// discarded on exit.
#[derive(Debug)]
pub(crate) struct SessionState {
    pub(crate) mode: Mode,
    pub(crate) phase: SessionPhase,
    /// Tables snapshotted at start; mid-session menu edits apply to the
    /// next session only.
    pub(crate) tables: TableSelection,
    /// Pre-generated sequence for fixed-count modes, empty for Ninja.
    pub(crate) questions: Vec<Question>,
    /// Index of the question currently presented, starting at 0.
    pub(crate) index: u32,
    pub(crate) current: Option<CurrentQuestion>,
    pub(crate) score: u32,
    pub(crate) streak: u32,
    pub(crate) best_streak: u32,
    pub(crate) correct: u32,
    pub(crate) wrong: u32,
    pub(crate) lives: Option<u32>,
    /// Seconds left on the active countdown: per question in Race and Boss,
    /// session-wide in Ninja.
    pub(crate) time_left: Option<u32>,
    pub(crate) boss: Option<BossMeter>,
    pub(crate) next_target_id: u64,
}

impl SessionState {
    pub(crate) fn new(mode: Mode, tables: TableSelection, questions: Vec<Question>) -> Self {
        let config = mode.config();
        Self {
            mode,
            phase: SessionPhase::InProgress,
            tables,
            questions,
            index: 0,
            current: None,
            score: 0,
            streak: 0,
            best_streak: 0,
            correct: 0,
            wrong: 0,
            lives: config.lives,
            time_left: config.session_seconds,
            boss: (mode == Mode::Boss).then(BossMeter::default),
            next_target_id: 1,
        }
    }

    /// Folds one scoring outcome into the counters.
    pub(crate) fn apply_resolution(&mut self, resolution: Resolution, is_correct: bool) {
        self.score += resolution.points_awarded;
        self.streak = resolution.streak_after;
        self.best_streak = self.best_streak.max(self.streak);
        if is_correct {
            self.correct += 1;
        } else {
            self.wrong += 1;
        }
        if let Some(meter) = &mut self.boss {
            if is_correct {
                meter.hits_landed += 1;
            } else {
                meter.hits_taken += 1;
            }
        }
    }

    pub(crate) fn resolved_count(&self) -> u32 {
        self.correct + self.wrong
    }

    pub(crate) fn progress(&self) -> SessionProgress {
        let answered = self.resolved_count();
        let total = self.mode.config().question_count;
        SessionProgress {
            answered,
            total,
            remaining: total.map(|t| t.saturating_sub(answered)),
            is_complete: self.phase == SessionPhase::Finished,
        }
    }

    /// End-of-session summary. The total it reports is correct plus wrong,
    /// which for a fixed-count mode that ran to the end equals the
    /// configured count.
    pub(crate) fn summary(&self) -> ResultsSummary {
        ResultsSummary::from_counts(
            self.mode,
            self.score,
            self.correct,
            self.wrong,
            self.best_streak,
        )
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
