use std::collections::VecDeque;
use std::fmt;

use chrono::Duration;

use quiz_core::generator::{DistractorGenerator, QuestionGenerator};
use quiz_core::model::{AnswerSet, Mode, Question, SelectionError, TableSelection};
use quiz_core::rng::{RandomSource, ThreadRandom};
use quiz_core::scoring::ScoringPolicy;
use quiz_core::time::Clock;

use crate::error::EngineError;
use crate::event::EngineEvent;
use crate::timer::{TimerKind, TimerService};

use super::state::{BossMeter, CurrentQuestion, SessionPhase, SessionProgress, SessionState};

//
// ─── SUBMIT OUTCOME ────────────────────────────────────────────────────────────
//

/// What a submit call did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The submission resolved the active question.
    Resolved,
    /// Nothing happened: no active question, or it was already resolved.
    /// Covers double-clicks and a click racing a timeout.
    Ignored,
}

//
// ─── SESSION CONTROLLER ────────────────────────────────────────────────────────
//

/// Runs one quiz session at a time and queues events for the presentation
/// layer.
///
/// The controller owns the table selection between sessions, a clock, and a
/// random source. The host drives it: user actions come in through
/// [`start`](Self::start), [`submit_answer`](Self::submit_answer),
/// [`advance`](Self::advance) and [`exit`](Self::exit), elapsed time comes
/// in through [`tick`](Self::tick), and everything observable comes back
/// out through [`poll_event`](Self::poll_event).
///
/// All methods are synchronous and re-entrancy is handled by phase guards,
/// so a timeout firing while an answer is being processed can never score a
/// question twice.
pub struct SessionController {
    clock: Clock,
    rng: Box<dyn RandomSource>,
    selection: TableSelection,
    timers: TimerService,
    events: VecDeque<EngineEvent>,
    session: Option<SessionState>,
}

impl SessionController {
    #[must_use]
    pub fn new() -> Self {
        Self {
            clock: Clock::default_clock(),
            rng: Box::new(ThreadRandom),
            selection: TableSelection::default(),
            timers: TimerService::new(),
            events: VecDeque::new(),
            session: None,
        }
    }

    /// Replaces the clock. Use a fixed clock to drive timers from tests.
    #[must_use]
    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    /// Replaces the random source.
    #[must_use]
    pub fn with_random(mut self, rng: Box<dyn RandomSource>) -> Self {
        self.rng = rng;
        self
    }

    /// Replaces the table selection.
    #[must_use]
    pub fn with_selection(mut self, selection: TableSelection) -> Self {
        self.selection = selection;
        self
    }

    //
    // ─── MENU STATE ────────────────────────────────────────────────────────
    //

    #[must_use]
    pub fn selection(&self) -> &TableSelection {
        &self.selection
    }

    pub fn set_selection(&mut self, selection: TableSelection) {
        self.selection = selection;
    }

    /// Toggles a table in the menu selection. Takes effect at the next
    /// start; the running session keeps its snapshot.
    ///
    /// # Errors
    ///
    /// Returns `EngineError::InvalidConfiguration` if the table is outside
    /// `1..=12`.
    pub fn toggle_table(&mut self, table: u8) -> Result<(), EngineError> {
        self.selection.toggle(table)?;
        Ok(())
    }

    //
    // ─── SESSION LIFECYCLE ─────────────────────────────────────────────────
    //

    /// Starts a session in `mode` from the current table selection,
    /// replacing any session in progress. Pending events are discarded and
    /// the first question is presented immediately.
    ///
    /// # Errors
    ///
    /// Returns `EngineError::InvalidConfiguration` if no tables are
    /// selected; nothing is started and no state changes.
    pub fn start(&mut self, mode: Mode) -> Result<(), EngineError> {
        if self.selection.is_empty() {
            return Err(EngineError::InvalidConfiguration(SelectionError::Empty));
        }

        let config = mode.config();
        let questions = match config.question_count {
            Some(count) => QuestionGenerator::generate(count, &self.selection, self.rng.as_mut())?,
            None => Vec::new(),
        };

        self.timers.cancel_all();
        self.events.clear();
        self.session = Some(SessionState::new(mode, self.selection.clone(), questions));

        let now = self.clock.now();
        if config.session_seconds.is_some() {
            self.timers.schedule_repeating(TimerKind::NinjaCountdown, now, Duration::seconds(1));
        }
        if let Some(interval) = config.spawn_interval() {
            self.timers.schedule_repeating(TimerKind::NinjaSpawn, now, interval);
        }

        self.present_current();
        Ok(())
    }

    /// Restarts the running or finished session's mode with the current
    /// selection. Does nothing when no session exists.
    ///
    /// # Errors
    ///
    /// Returns `EngineError::InvalidConfiguration` if the selection has
    /// been emptied since the last start.
    pub fn play_again(&mut self) -> Result<(), EngineError> {
        match self.session.as_ref().map(|state| state.mode) {
            Some(mode) => self.start(mode),
            None => Ok(()),
        }
    }

    /// Abandons the session: cancels timers, drops state and pending
    /// events, and returns to `NotStarted`. No summary is produced.
    pub fn exit(&mut self) {
        self.timers.cancel_all();
        self.events.clear();
        self.session = None;
    }

    /// Submits an answer for the active question; `None` is a timeout or a
    /// missed target. Out-of-phase submissions are ignored.
    pub fn submit_answer(&mut self, selected: Option<u32>) -> SubmitOutcome {
        let Some(state) = self.session.as_mut() else {
            return SubmitOutcome::Ignored;
        };
        if state.phase != SessionPhase::InProgress {
            return SubmitOutcome::Ignored;
        }
        let Some(current) = state.current.as_ref() else {
            return SubmitOutcome::Ignored;
        };

        self.timers.cancel(TimerKind::QuestionCountdown);

        let correct_answer = current.question.answer();
        let is_correct = selected == Some(correct_answer);
        let mode = state.mode;
        let resolution = ScoringPolicy::resolve(mode, state.streak, is_correct);
        state.apply_resolution(resolution, is_correct);
        state.phase = SessionPhase::Resolving;

        self.events.push_back(EngineEvent::AnswerResolved {
            is_correct,
            correct_answer,
            points_awarded: resolution.points_awarded,
            streak: resolution.streak_after,
        });

        if mode == Mode::Ninja {
            self.settle_ninja(is_correct);
        }

        SubmitOutcome::Resolved
    }

    /// Moves past a resolved question: presents the next one or finishes
    /// the session. The host calls this once its feedback delay has run,
    /// so pacing stays out of the engine. Does nothing unless the session
    /// is in `Resolving`.
    pub fn advance(&mut self) {
        let Some(state) = self.session.as_mut() else {
            return;
        };
        if state.phase != SessionPhase::Resolving {
            return;
        }

        let total = state.questions.len() as u32;
        if state.index + 1 >= total {
            self.finish();
        } else {
            state.index += 1;
            self.present_current();
        }
    }

    /// Processes every timer that has come due on this controller's clock.
    /// Hosts on a system clock call this from their frame or interval loop;
    /// tests drive a fixed clock and call it explicitly.
    pub fn tick(&mut self) {
        let now = self.clock.now();
        while let Some(fire) = self.timers.poll_next(now) {
            match fire.kind {
                TimerKind::QuestionCountdown => self.tick_question_countdown(),
                TimerKind::NinjaCountdown => self.tick_ninja_countdown(),
                TimerKind::NinjaSpawn => self.spawn_ninja_target(),
            }
        }
    }

    /// Advances a fixed clock by `delta` and processes the timers that came
    /// due. Test convenience; on a system clock this only processes timers.
    pub fn advance_clock(&mut self, delta: Duration) {
        self.clock.advance(delta);
        self.tick();
    }

    /// Next queued event, oldest first.
    pub fn poll_event(&mut self) -> Option<EngineEvent> {
        self.events.pop_front()
    }

    //
    // ─── ACCESSORS ─────────────────────────────────────────────────────────
    //

    #[must_use]
    pub fn phase(&self) -> SessionPhase {
        self.session
            .as_ref()
            .map_or(SessionPhase::NotStarted, |state| state.phase)
    }

    #[must_use]
    pub fn mode(&self) -> Option<Mode> {
        self.session.as_ref().map(|state| state.mode)
    }

    #[must_use]
    pub fn score(&self) -> u32 {
        self.session.as_ref().map_or(0, |state| state.score)
    }

    #[must_use]
    pub fn streak(&self) -> u32 {
        self.session.as_ref().map_or(0, |state| state.streak)
    }

    #[must_use]
    pub fn best_streak(&self) -> u32 {
        self.session.as_ref().map_or(0, |state| state.best_streak)
    }

    /// Index of the question currently presented, starting at 0.
    #[must_use]
    pub fn question_index(&self) -> Option<u32> {
        self.session.as_ref().map(|state| state.index)
    }

    #[must_use]
    pub fn current_question(&self) -> Option<Question> {
        self.session
            .as_ref()
            .and_then(|state| state.current.as_ref())
            .map(|current| current.question)
    }

    #[must_use]
    pub fn current_answers(&self) -> Option<&AnswerSet> {
        self.session
            .as_ref()
            .and_then(|state| state.current.as_ref())
            .map(|current| &current.answers)
    }

    /// Seconds left on the active countdown: per question in Race and
    /// Boss, session-wide in Ninja, `None` in Practice.
    #[must_use]
    pub fn time_left(&self) -> Option<u32> {
        self.session.as_ref().and_then(|state| state.time_left)
    }

    #[must_use]
    pub fn lives(&self) -> Option<u32> {
        self.session.as_ref().and_then(|state| state.lives)
    }

    #[must_use]
    pub fn boss_meter(&self) -> Option<BossMeter> {
        self.session.as_ref().and_then(|state| state.boss)
    }

    #[must_use]
    pub fn progress(&self) -> Option<SessionProgress> {
        self.session.as_ref().map(SessionState::progress)
    }

    //
    // ─── INTERNALS ─────────────────────────────────────────────────────────
    //

    /// Presents the question at the current index: fixed-count modes read
    /// their pre-generated sequence, Ninja draws on demand.
    fn present_current(&mut self) {
        let Some(state) = self.session.as_mut() else {
            return;
        };

        let question = match state.mode.config().question_count {
            Some(_) => {
                let Some(question) = state.questions.get(state.index as usize).copied() else {
                    return;
                };
                question
            }
            None => {
                // Selection was validated non-empty at start.
                let Ok(question) = QuestionGenerator::generate_one(&state.tables, self.rng.as_mut())
                else {
                    return;
                };
                question
            }
        };

        let answers = DistractorGenerator::generate_answers(question, self.rng.as_mut());
        let index = state.index;
        state.current = Some(CurrentQuestion {
            question,
            answers: answers.clone(),
        });
        state.phase = SessionPhase::InProgress;

        if let Some(seconds) = state.mode.config().question_seconds {
            state.time_left = Some(seconds);
            self.timers.schedule_repeating(
                TimerKind::QuestionCountdown,
                self.clock.now(),
                Duration::seconds(1),
            );
        }

        self.events.push_back(EngineEvent::QuestionPresented {
            index,
            question,
            answers,
        });
    }

    /// Ninja aftermath of a resolution: lives on a miss or wrong click,
    /// then straight to the next question. No settle phase.
    fn settle_ninja(&mut self, is_correct: bool) {
        if !is_correct {
            let lives = {
                let Some(state) = self.session.as_mut() else {
                    return;
                };
                let lives = state.lives.unwrap_or(1).saturating_sub(1);
                state.lives = Some(lives);
                lives
            };
            self.events.push_back(EngineEvent::NinjaLifeLost {
                lives_remaining: lives,
            });
            if lives == 0 {
                self.finish();
                return;
            }
        }

        if let Some(state) = self.session.as_mut() {
            state.index += 1;
        }
        self.present_current();
    }

    /// One second elapsed on a Race or Boss question. At zero, resolves
    /// the question as a timeout.
    fn tick_question_countdown(&mut self) {
        let timed_out = {
            let Some(state) = self.session.as_mut() else {
                return;
            };
            if state.phase != SessionPhase::InProgress {
                return;
            }
            let left = state.time_left.unwrap_or(0).saturating_sub(1);
            state.time_left = Some(left);
            left == 0
        };

        if timed_out {
            self.submit_answer(None);
        }
    }

    /// One second elapsed on the Ninja session clock. At zero, the run is
    /// over.
    fn tick_ninja_countdown(&mut self) {
        let seconds_left = {
            let Some(state) = self.session.as_mut() else {
                return;
            };
            if state.phase == SessionPhase::Finished {
                return;
            }
            let left = state.time_left.unwrap_or(0).saturating_sub(1);
            state.time_left = Some(left);
            left
        };

        self.events.push_back(EngineEvent::NinjaTick { seconds_left });
        if seconds_left == 0 {
            self.finish();
        }
    }

    /// Requests one falling target, valued from the current question's
    /// answer set.
    fn spawn_ninja_target(&mut self) {
        let Some(state) = self.session.as_mut() else {
            return;
        };
        if state.phase != SessionPhase::InProgress {
            return;
        }
        let Some(current) = state.current.as_ref() else {
            return;
        };

        let choices = current.answers.choices();
        let value = choices[self.rng.pick(choices.len())];
        let is_correct = current.answers.is_correct(value);
        let id = state.next_target_id;
        state.next_target_id += 1;

        self.events.push_back(EngineEvent::NinjaTargetSpawned { id, value, is_correct });
    }

    fn finish(&mut self) {
        self.timers.cancel_all();
        let Some(state) = self.session.as_mut() else {
            return;
        };
        state.phase = SessionPhase::Finished;
        state.current = None;
        state.time_left = None;

        let summary = state.summary();
        self.events.push_back(EngineEvent::SessionFinished { summary });
    }
}

impl Default for SessionController {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for SessionController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionController")
            .field("phase", &self.phase())
            .field("mode", &self.mode())
            .field("selection", &self.selection)
            .field("pending_events", &self.events.len())
            .finish_non_exhaustive()
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
