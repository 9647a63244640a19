use std::fmt;

use chrono::Duration;
use serde::{Deserialize, Serialize};

//
// ─── GAME MODE ─────────────────────────────────────────────────────────────────
//

/// The four ways a quiz session can be played.
///
/// Practice is untimed. Race and Boss put a countdown on every question.
/// Ninja replaces multiple choice with a stream of targets under a single
/// session-wide clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    Practice,
    Race,
    Boss,
    Ninja,
}

impl Mode {
    /// All modes, in menu order.
    pub const ALL: [Mode; 4] = [Mode::Practice, Mode::Race, Mode::Boss, Mode::Ninja];

    #[must_use]
    pub const fn config(self) -> ModeConfig {
        match self {
            Mode::Practice => ModeConfig {
                question_count: Some(10),
                question_seconds: None,
                base_points: 10,
                lives: None,
                session_seconds: None,
                spawn_millis: None,
            },
            Mode::Race => ModeConfig {
                question_count: Some(15),
                question_seconds: Some(10),
                base_points: 15,
                lives: None,
                session_seconds: None,
                spawn_millis: None,
            },
            Mode::Boss => ModeConfig {
                question_count: Some(20),
                question_seconds: Some(8),
                base_points: 20,
                lives: None,
                session_seconds: None,
                spawn_millis: None,
            },
            Mode::Ninja => ModeConfig {
                question_count: None,
                question_seconds: None,
                base_points: 15,
                lives: Some(3),
                session_seconds: Some(60),
                spawn_millis: Some(1800),
            },
        }
    }

    /// Whether every question carries its own countdown.
    #[must_use]
    pub const fn has_question_timer(self) -> bool {
        self.config().question_seconds.is_some()
    }

    /// Whether the session ends after a fixed number of questions.
    #[must_use]
    pub const fn is_fixed_count(self) -> bool {
        self.config().question_count.is_some()
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Mode::Practice => "Practice",
            Mode::Race => "Race",
            Mode::Boss => "Boss",
            Mode::Ninja => "Ninja",
        };
        f.write_str(label)
    }
}

//
// ─── MODE CONFIG ───────────────────────────────────────────────────────────────
//

/// Fixed rules for one mode.
///
/// Raw durations stay in whole seconds; the accessors convert to
/// `chrono::Duration` for callers that schedule against a clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModeConfig {
    /// Questions per session, `None` for endless modes.
    pub question_count: Option<u32>,
    /// Countdown per question, `None` for untimed modes.
    pub question_seconds: Option<u32>,
    /// Points for a correct answer before any streak bonus.
    pub base_points: u32,
    /// Lives granted at the start, `None` for modes without lives.
    pub lives: Option<u32>,
    /// Whole-session time limit, `None` for modes without one.
    pub session_seconds: Option<u32>,
    /// Interval between target spawns, `None` for modes without targets.
    pub spawn_millis: Option<u32>,
}

impl ModeConfig {
    /// Per-question countdown as a duration.
    #[must_use]
    pub fn question_time(&self) -> Option<Duration> {
        self.question_seconds.map(|s| Duration::seconds(i64::from(s)))
    }

    /// Whole-session time limit as a duration.
    #[must_use]
    pub fn session_time(&self) -> Option<Duration> {
        self.session_seconds.map(|s| Duration::seconds(i64::from(s)))
    }

    /// Target spawn interval as a duration.
    #[must_use]
    pub fn spawn_interval(&self) -> Option<Duration> {
        self.spawn_millis.map(|ms| Duration::milliseconds(i64::from(ms)))
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
