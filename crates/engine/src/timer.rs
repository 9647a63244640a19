//! Deadline scheduling for session timers.
//!
//! The service holds at most one pending deadline per timer kind:
//! scheduling a kind replaces whatever that kind had before, so a stale
//! countdown can never fire alongside its replacement. It stores deadlines
//! only; the controller decides what a fire means.

use chrono::{DateTime, Duration, Utc};

//
// ─── TIMER KINDS ───────────────────────────────────────────────────────────────
//

/// The timers a session can run. At most one of each is pending at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimerKind {
    /// Per-question countdown tick. Race and Boss.
    QuestionCountdown,
    /// Whole-session countdown tick. Ninja.
    NinjaCountdown,
    /// Falling-target spawn ticker. Ninja.
    NinjaSpawn,
}

impl TimerKind {
    /// Fire order when several deadlines land on the same instant.
    const ORDER: [TimerKind; 3] = [
        TimerKind::QuestionCountdown,
        TimerKind::NinjaCountdown,
        TimerKind::NinjaSpawn,
    ];

    fn slot(self) -> usize {
        match self {
            TimerKind::QuestionCountdown => 0,
            TimerKind::NinjaCountdown => 1,
            TimerKind::NinjaSpawn => 2,
        }
    }
}

/// A due timer returned by [`TimerService::poll_next`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimerFire {
    pub kind: TimerKind,
    /// The instant the fire was scheduled for, not the polling instant.
    pub deadline: DateTime<Utc>,
}

//
// ─── TIMER SERVICE ─────────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, Copy)]
struct TimerSlot {
    deadline: DateTime<Utc>,
    period: Option<Duration>,
}

/// Tracks pending deadlines for a session.
#[derive(Debug, Clone)]
pub struct TimerService {
    slots: [Option<TimerSlot>; 3],
}

impl TimerService {
    #[must_use]
    pub fn new() -> Self {
        Self { slots: [None; 3] }
    }

    /// Schedules a single fire at `deadline`, replacing any pending timer of
    /// the same kind.
    pub fn schedule_once(&mut self, kind: TimerKind, deadline: DateTime<Utc>) {
        self.slots[kind.slot()] = Some(TimerSlot {
            deadline,
            period: None,
        });
    }

    /// Schedules a repeating fire, replacing any pending timer of the same
    /// kind. The first fire lands one period after `now`.
    ///
    /// # Panics
    ///
    /// Panics if `period` is zero or negative. Rearming moves the deadline
    /// one period forward, so a non-positive period would leave the timer
    /// due on every poll.
    pub fn schedule_repeating(&mut self, kind: TimerKind, now: DateTime<Utc>, period: Duration) {
        assert!(
            period > Duration::zero(),
            "repeating period must be positive, got {period}"
        );
        self.slots[kind.slot()] = Some(TimerSlot {
            deadline: now + period,
            period: Some(period),
        });
    }

    pub fn cancel(&mut self, kind: TimerKind) {
        self.slots[kind.slot()] = None;
    }

    pub fn cancel_all(&mut self) {
        self.slots = [None; 3];
    }

    #[must_use]
    pub fn is_scheduled(&self, kind: TimerKind) -> bool {
        self.slots[kind.slot()].is_some()
    }

    /// Earliest pending deadline across all kinds.
    #[must_use]
    pub fn next_deadline(&self) -> Option<DateTime<Utc>> {
        self.slots.iter().flatten().map(|slot| slot.deadline).min()
    }

    /// Takes the next fire due at or before `now`, if any.
    ///
    /// Fires come out in deadline order; ties resolve in the fixed order
    /// question countdown, session countdown, spawn ticker. A repeating
    /// timer is rearmed one period past the fired deadline, so a caller
    /// that fell behind drains the backlog fire by fire. Draining one fire
    /// per call lets a fire that cancels other timers take effect before
    /// the next poll.
    pub fn poll_next(&mut self, now: DateTime<Utc>) -> Option<TimerFire> {
        let mut best: Option<(TimerKind, TimerSlot)> = None;
        for kind in TimerKind::ORDER {
            let Some(slot) = self.slots[kind.slot()] else {
                continue;
            };
            if slot.deadline > now {
                continue;
            }
            let is_earlier = match best {
                None => true,
                Some((_, current)) => slot.deadline < current.deadline,
            };
            if is_earlier {
                best = Some((kind, slot));
            }
        }

        let (kind, slot) = best?;
        self.slots[kind.slot()] = slot.period.map(|period| TimerSlot {
            deadline: slot.deadline + period,
            period: Some(period),
        });

        Some(TimerFire {
            kind,
            deadline: slot.deadline,
        })
    }
}

impl Default for TimerService {
    fn default() -> Self {
        Self::new()
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;
    use quiz_core::time::fixed_now;

    #[test]
    fn one_shot_fires_once_at_its_deadline() {
        let now = fixed_now();
        let mut timers = TimerService::new();
        timers.schedule_once(TimerKind::QuestionCountdown, now + Duration::seconds(3));

        assert_eq!(timers.poll_next(now + Duration::seconds(2)), None);

        let fire = timers.poll_next(now + Duration::seconds(3)).unwrap();
        assert_eq!(fire.kind, TimerKind::QuestionCountdown);
        assert_eq!(fire.deadline, now + Duration::seconds(3));

        assert_eq!(timers.poll_next(now + Duration::seconds(10)), None);
        assert!(!timers.is_scheduled(TimerKind::QuestionCountdown));
    }

    #[test]
    fn repeating_timer_rearms_one_period_later() {
        let now = fixed_now();
        let mut timers = TimerService::new();
        timers.schedule_repeating(TimerKind::NinjaCountdown, now, Duration::seconds(1));

        let fire = timers.poll_next(now + Duration::seconds(1)).unwrap();
        assert_eq!(fire.deadline, now + Duration::seconds(1));
        assert_eq!(timers.poll_next(now + Duration::seconds(1)), None);

        let fire = timers.poll_next(now + Duration::seconds(2)).unwrap();
        assert_eq!(fire.deadline, now + Duration::seconds(2));
    }

    #[test]
    fn late_poll_drains_the_backlog_fire_by_fire() {
        let now = fixed_now();
        let mut timers = TimerService::new();
        timers.schedule_repeating(TimerKind::NinjaSpawn, now, Duration::seconds(1));

        let late = now + Duration::seconds(3);
        for step in 1..=3 {
            let fire = timers.poll_next(late).unwrap();
            assert_eq!(fire.deadline, now + Duration::seconds(step));
        }
        assert_eq!(timers.poll_next(late), None);
    }

    #[test]
    #[should_panic(expected = "repeating period must be positive")]
    fn non_positive_repeat_period_is_rejected() {
        let mut timers = TimerService::new();
        timers.schedule_repeating(TimerKind::NinjaSpawn, fixed_now(), Duration::zero());
    }

    #[test]
    fn scheduling_replaces_the_pending_timer_of_that_kind() {
        let now = fixed_now();
        let mut timers = TimerService::new();
        timers.schedule_once(TimerKind::QuestionCountdown, now + Duration::seconds(5));
        timers.schedule_once(TimerKind::QuestionCountdown, now + Duration::seconds(9));

        assert_eq!(timers.poll_next(now + Duration::seconds(5)), None);
        let fire = timers.poll_next(now + Duration::seconds(9)).unwrap();
        assert_eq!(fire.deadline, now + Duration::seconds(9));
    }

    #[test]
    fn simultaneous_deadlines_fire_in_fixed_kind_order() {
        let now = fixed_now();
        let deadline = now + Duration::seconds(1);
        let mut timers = TimerService::new();
        timers.schedule_once(TimerKind::NinjaSpawn, deadline);
        timers.schedule_once(TimerKind::NinjaCountdown, deadline);
        timers.schedule_once(TimerKind::QuestionCountdown, deadline);

        let kinds: Vec<TimerKind> = std::iter::from_fn(|| timers.poll_next(deadline))
            .map(|fire| fire.kind)
            .collect();
        assert_eq!(
            kinds,
            vec![
                TimerKind::QuestionCountdown,
                TimerKind::NinjaCountdown,
                TimerKind::NinjaSpawn,
            ]
        );
    }

    #[test]
    fn cancel_all_clears_every_slot() {
        let now = fixed_now();
        let mut timers = TimerService::new();
        timers.schedule_once(TimerKind::QuestionCountdown, now + Duration::seconds(1));
        timers.schedule_repeating(TimerKind::NinjaSpawn, now, Duration::seconds(2));

        timers.cancel_all();

        assert_eq!(timers.next_deadline(), None);
        assert_eq!(timers.poll_next(now + Duration::seconds(60)), None);
    }

    #[test]
    fn earliest_deadline_wins_across_kinds() {
        let now = fixed_now();
        let mut timers = TimerService::new();
        timers.schedule_once(TimerKind::QuestionCountdown, now + Duration::seconds(5));
        timers.schedule_once(TimerKind::NinjaSpawn, now + Duration::seconds(2));

        assert_eq!(timers.next_deadline(), Some(now + Duration::seconds(2)));
        let fire = timers.poll_next(now + Duration::seconds(5)).unwrap();
        assert_eq!(fire.kind, TimerKind::NinjaSpawn);
    }
}
