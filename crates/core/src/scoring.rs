//! Scoring rules shared by every mode.

use serde::{Deserialize, Serialize};

use crate::model::Mode;

/// Points added per streak level.
pub const STREAK_BONUS_STEP: u32 = 5;

/// Streak level beyond which the bonus stops growing.
pub const STREAK_BONUS_CAP: u32 = 5;

//
// ─── SCORING POLICY ────────────────────────────────────────────────────────────
//

/// Outcome of scoring one resolved question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resolution {
    /// Points the answer earned, zero when wrong.
    pub points_awarded: u32,
    /// Streak after the answer is applied.
    pub streak_after: u32,
}

/// Stateless scoring rules.
///
/// A correct answer extends the streak first and is then paid the mode's
/// base points plus a bonus of five per streak level, capped at level five.
/// A wrong answer or a timeout earns nothing and resets the streak.
pub struct ScoringPolicy;

impl ScoringPolicy {
    /// Scores one resolved question.
    #[must_use]
    pub fn resolve(mode: Mode, streak_before: u32, is_correct: bool) -> Resolution {
        if !is_correct {
            return Resolution {
                points_awarded: 0,
                streak_after: 0,
            };
        }

        let streak_after = streak_before.saturating_add(1);
        let points = mode.config().base_points + Self::streak_bonus(streak_after);

        Resolution {
            points_awarded: points,
            streak_after,
        }
    }

    /// Bonus paid at a given streak level.
    #[must_use]
    pub fn streak_bonus(streak: u32) -> u32 {
        streak.min(STREAK_BONUS_CAP) * STREAK_BONUS_STEP
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
