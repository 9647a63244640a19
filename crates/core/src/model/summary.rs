use std::fmt;

use serde::{Deserialize, Serialize};

use crate::model::mode::Mode;

//
// ─── RESULT TIER ───────────────────────────────────────────────────────────────
//

/// Qualitative band for a finished session, derived from accuracy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ResultTier {
    Excellent,
    Great,
    Good,
    TryAgain,
}

impl ResultTier {
    /// Maps an accuracy percentage onto its tier.
    ///
    /// 90 and above is excellent, 75 to 89 great, 50 to 74 good, everything
    /// below that a retry.
    #[must_use]
    pub const fn from_accuracy(percent: u32) -> Self {
        if percent >= 90 {
            ResultTier::Excellent
        } else if percent >= 75 {
            ResultTier::Great
        } else if percent >= 50 {
            ResultTier::Good
        } else {
            ResultTier::TryAgain
        }
    }
}

impl fmt::Display for ResultTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ResultTier::Excellent => "Excellent",
            ResultTier::Great => "Great",
            ResultTier::Good => "Good",
            ResultTier::TryAgain => "Try again",
        };
        f.write_str(label)
    }
}

//
// ─── RESULTS SUMMARY ───────────────────────────────────────────────────────────
//

/// Everything a results screen needs about a finished session.
///
/// The correct and wrong tallies are stored separately and the total is
/// derived from them, so the counts cannot disagree and accuracy stays
/// within 0 to 100. Accuracy and tier are computed at construction time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultsSummary {
    mode: Mode,
    score: u32,
    correct: u32,
    wrong: u32,
    best_streak: u32,
    accuracy_percent: u32,
    tier: ResultTier,
}

impl ResultsSummary {
    /// Builds a summary from the session's final counters.
    ///
    /// `wrong` counts incorrect answers together with timeouts and missed
    /// targets. A session with no resolved questions scores zero accuracy.
    #[must_use]
    pub fn from_counts(mode: Mode, score: u32, correct: u32, wrong: u32, best_streak: u32) -> Self {
        let accuracy_percent = accuracy(correct, wrong);

        Self {
            mode,
            score,
            correct,
            wrong,
            best_streak,
            accuracy_percent,
            tier: ResultTier::from_accuracy(accuracy_percent),
        }
    }

    #[must_use]
    pub fn mode(&self) -> Mode {
        self.mode
    }

    #[must_use]
    pub fn score(&self) -> u32 {
        self.score
    }

    #[must_use]
    pub fn correct(&self) -> u32 {
        self.correct
    }

    /// Questions resolved in the session, timeouts and misses included.
    #[must_use]
    pub fn total(&self) -> u32 {
        self.correct.saturating_add(self.wrong)
    }

    #[must_use]
    pub fn wrong(&self) -> u32 {
        self.wrong
    }

    #[must_use]
    pub fn best_streak(&self) -> u32 {
        self.best_streak
    }

    /// Share of resolved questions answered correctly, rounded to the
    /// nearest whole percent with halves rounding up.
    #[must_use]
    pub fn accuracy_percent(&self) -> u32 {
        self.accuracy_percent
    }

    #[must_use]
    pub fn tier(&self) -> ResultTier {
        self.tier
    }
}

fn accuracy(correct: u32, wrong: u32) -> u32 {
    let correct = u64::from(correct);
    let total = correct + u64::from(wrong);
    if total == 0 {
        return 0;
    }
    let percent = (correct * 100 * 2 + total) / (total * 2);
    percent as u32
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tier_bands_cover_the_scale() {
        assert_eq!(ResultTier::from_accuracy(100), ResultTier::Excellent);
        assert_eq!(ResultTier::from_accuracy(90), ResultTier::Excellent);
        assert_eq!(ResultTier::from_accuracy(89), ResultTier::Great);
        assert_eq!(ResultTier::from_accuracy(75), ResultTier::Great);
        assert_eq!(ResultTier::from_accuracy(74), ResultTier::Good);
        assert_eq!(ResultTier::from_accuracy(50), ResultTier::Good);
        assert_eq!(ResultTier::from_accuracy(49), ResultTier::TryAgain);
        assert_eq!(ResultTier::from_accuracy(0), ResultTier::TryAgain);
    }

    #[test]
    fn accuracy_rounds_half_up() {
        // 7 of 10 is exact, 5 of 8 is 62.5 and rounds to 63.
        let summary = ResultsSummary::from_counts(Mode::Practice, 70, 7, 3, 3);
        assert_eq!(summary.accuracy_percent(), 70);

        let summary = ResultsSummary::from_counts(Mode::Practice, 50, 5, 3, 2);
        assert_eq!(summary.accuracy_percent(), 63);
    }

    #[test]
    fn empty_session_scores_zero_accuracy() {
        let summary = ResultsSummary::from_counts(Mode::Ninja, 0, 0, 0, 0);
        assert_eq!(summary.accuracy_percent(), 0);
        assert_eq!(summary.tier(), ResultTier::TryAgain);
    }

    #[test]
    fn summary_derives_tier_from_accuracy() {
        let summary = ResultsSummary::from_counts(Mode::Race, 200, 14, 1, 9);
        assert_eq!(summary.accuracy_percent(), 93);
        assert_eq!(summary.tier(), ResultTier::Excellent);
        assert_eq!(summary.best_streak(), 9);
        assert_eq!(summary.wrong(), 1);
        assert_eq!(summary.mode(), Mode::Race);
    }

    #[test]
    fn twelve_of_twenty_lands_in_the_good_band() {
        let summary = ResultsSummary::from_counts(Mode::Boss, 300, 12, 8, 4);
        assert_eq!(summary.accuracy_percent(), 60);
        assert_eq!(summary.tier(), ResultTier::Good);
        assert_eq!(summary.wrong(), 8);
    }

    #[test]
    fn total_is_derived_from_the_counts() {
        // 5 correct and 3 wrong can only ever mean 8 resolved.
        let summary = ResultsSummary::from_counts(Mode::Practice, 50, 5, 3, 2);
        assert_eq!(summary.total(), 8);
        assert_eq!(summary.wrong(), 3);
        assert_eq!(summary.correct(), 5);
        assert_eq!(summary.accuracy_percent(), 63);

        let flawless = ResultsSummary::from_counts(Mode::Ninja, 900, 60, 0, 60);
        assert_eq!(flawless.accuracy_percent(), 100);
        assert_eq!(flawless.tier(), ResultTier::Excellent);
    }
}
