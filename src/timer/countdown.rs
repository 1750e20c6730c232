//! Countdown state machine driven by tick events
//!
//! A [`Countdown`] does no scheduling of its own. The tick loop feeds it tick
//! timestamps and commands flip its pause flag; everything it reports is
//! derived from absolute instants, so a late or missing tick never skews the
//! remaining time.

use std::time::Duration;

use chrono::TimeDelta;
use serde::{Deserialize, Serialize};
use tokio::time::Instant;

/// Lifecycle phase of a timer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimerPhase {
    /// No countdown configured yet
    Idle,
    Running,
    /// Ticks keep arriving but are absorbed into the reference point
    Paused,
    /// Remaining time went negative; terminal for the session
    Expired,
}

/// What a single tick did to the countdown
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Tick arrived while paused and was folded into the reference point
    Absorbed,
    /// Regular tick with the time left until expiry
    Remaining(TimeDelta),
    /// The expiring tick; carries the (negative) remaining time to deliver
    Expired(TimeDelta),
}

/// Remaining-time accounting for one countdown session
#[derive(Debug, Clone)]
pub struct Countdown {
    target: Duration,
    reference: Instant,
    tick_interval: Duration,
    /// Tick grid position; advances in whole intervals
    last_tick: Instant,
    paused: bool,
    expired: bool,
}

impl Countdown {
    /// Create a running countdown of `target` that began at `started_at`
    pub fn new(target: Duration, started_at: Instant, tick_interval: Duration) -> Self {
        Self {
            target,
            reference: started_at,
            tick_interval,
            last_tick: started_at,
            paused: false,
            expired: false,
        }
    }

    pub fn target(&self) -> Duration {
        self.target
    }

    /// Instant the countdown is measured from, shifted by every paused tick
    pub fn reference_point(&self) -> Instant {
        self.reference
    }

    pub fn phase(&self) -> TimerPhase {
        if self.expired {
            TimerPhase::Expired
        } else if self.paused {
            TimerPhase::Paused
        } else {
            TimerPhase::Running
        }
    }

    /// Pause the countdown. Returns `false` if it was already paused.
    pub fn pause(&mut self) -> bool {
        !std::mem::replace(&mut self.paused, true)
    }

    /// Resume the countdown. Returns `false` if it was already running or
    /// has expired.
    pub fn resume(&mut self) -> bool {
        if self.expired || !self.paused {
            return false;
        }
        self.paused = false;
        true
    }

    /// Time left until expiry as seen at `at`
    pub fn remaining_at(&self, at: Instant) -> TimeDelta {
        match self.reference.checked_add(self.target) {
            Some(deadline) => signed_delta(deadline, at),
            None => TimeDelta::MAX,
        }
    }

    /// Process one tick event observed at `at`.
    ///
    /// A tick that arrives after a stall stands for every whole interval
    /// since the previous one. While paused, the reference point moves by
    /// all of them; a regular tick covers exactly one.
    pub fn on_tick(&mut self, at: Instant) -> TickOutcome {
        let covered = self.intervals_since_last_tick(at);

        if self.paused {
            if let Some(reference) = self.reference.checked_add(covered) {
                self.reference = reference;
            }
            return TickOutcome::Absorbed;
        }

        let remaining = self.remaining_at(at);
        if remaining < TimeDelta::zero() {
            self.paused = true;
            self.expired = true;
            return TickOutcome::Expired(remaining);
        }
        TickOutcome::Remaining(remaining)
    }

    /// Whole tick intervals between the tick grid and `at`, at least one.
    /// Moves the grid forward by the same amount.
    fn intervals_since_last_tick(&mut self, at: Instant) -> Duration {
        let elapsed = at.saturating_duration_since(self.last_tick);
        let count = (elapsed.as_nanos() / self.tick_interval.as_nanos().max(1)).max(1);
        let count = u32::try_from(count).unwrap_or(u32::MAX);

        let covered = self.tick_interval.saturating_mul(count);
        if let Some(last_tick) = self.last_tick.checked_add(covered) {
            self.last_tick = last_tick;
        }
        covered
    }
}

/// `deadline - at` as a signed delta
fn signed_delta(deadline: Instant, at: Instant) -> TimeDelta {
    match deadline.checked_duration_since(at) {
        Some(ahead) => TimeDelta::from_std(ahead).unwrap_or(TimeDelta::MAX),
        None => -TimeDelta::from_std(at - deadline).unwrap_or(TimeDelta::MAX),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TICK: Duration = Duration::from_secs(1);

    fn secs(n: u64) -> Duration {
        Duration::from_secs(n)
    }

    #[test]
    fn running_ticks_count_down_by_one_interval() {
        let t0 = Instant::now();
        let mut countdown = Countdown::new(secs(5), t0, TICK);

        let reported: Vec<_> = (1..=3).map(|n| countdown.on_tick(t0 + secs(n))).collect();

        assert_eq!(
            reported,
            vec![
                TickOutcome::Remaining(TimeDelta::seconds(4)),
                TickOutcome::Remaining(TimeDelta::seconds(3)),
                TickOutcome::Remaining(TimeDelta::seconds(2)),
            ]
        );
        assert_eq!(countdown.phase(), TimerPhase::Running);
    }

    #[test]
    fn paused_ticks_shift_reference_point_exactly() {
        let t0 = Instant::now();
        let mut countdown = Countdown::new(secs(5), t0, TICK);
        countdown.on_tick(t0 + secs(1));
        assert!(countdown.pause());

        for n in 2..=11 {
            assert_eq!(countdown.on_tick(t0 + secs(n)), TickOutcome::Absorbed);
        }
        assert_eq!(countdown.reference_point(), t0 + secs(10));

        assert!(countdown.resume());
        assert_eq!(
            countdown.on_tick(t0 + secs(12)),
            TickOutcome::Remaining(TimeDelta::seconds(3))
        );
    }

    #[test]
    fn pause_and_resume_are_idempotent() {
        let mut countdown = Countdown::new(secs(5), Instant::now(), TICK);

        assert!(!countdown.resume());
        assert!(countdown.pause());
        assert!(!countdown.pause());
        assert_eq!(countdown.phase(), TimerPhase::Paused);
        assert!(countdown.resume());
        assert!(!countdown.resume());
        assert_eq!(countdown.phase(), TimerPhase::Running);
    }

    #[test]
    fn zero_is_reported_before_expiry() {
        let t0 = Instant::now();
        let mut countdown = Countdown::new(secs(2), t0, TICK);

        assert_eq!(
            countdown.on_tick(t0 + secs(2)),
            TickOutcome::Remaining(TimeDelta::zero())
        );
        assert_eq!(countdown.phase(), TimerPhase::Running);

        assert_eq!(
            countdown.on_tick(t0 + secs(3)),
            TickOutcome::Expired(TimeDelta::seconds(-1))
        );
        assert_eq!(countdown.phase(), TimerPhase::Expired);
    }

    #[test]
    fn expired_countdown_ignores_resume_and_absorbs_ticks() {
        let t0 = Instant::now();
        let mut countdown = Countdown::new(secs(1), t0, TICK);
        countdown.on_tick(t0 + secs(2));

        assert!(!countdown.resume());
        assert_eq!(countdown.on_tick(t0 + secs(3)), TickOutcome::Absorbed);
        assert_eq!(countdown.phase(), TimerPhase::Expired);
    }

    #[test]
    fn late_paused_tick_absorbs_every_interval_it_covers() {
        let t0 = Instant::now();
        let mut countdown = Countdown::new(secs(60), t0, TICK);
        countdown.on_tick(t0 + secs(1));
        countdown.pause();

        assert_eq!(countdown.on_tick(t0 + secs(21)), TickOutcome::Absorbed);
        assert_eq!(countdown.reference_point(), t0 + secs(20));

        countdown.resume();
        assert_eq!(
            countdown.on_tick(t0 + secs(22)),
            TickOutcome::Remaining(TimeDelta::seconds(58))
        );
    }

    #[test]
    fn early_tick_still_counts_one_interval() {
        let t0 = Instant::now();
        let mut countdown = Countdown::new(secs(60), t0, TICK);
        countdown.pause();

        countdown.on_tick(t0 + Duration::from_millis(998));
        countdown.on_tick(t0 + Duration::from_millis(1_999));
        assert_eq!(countdown.reference_point(), t0 + secs(2));
    }

    #[test]
    fn unrepresentable_deadline_saturates() {
        let countdown = Countdown::new(Duration::MAX, Instant::now(), TICK);
        assert_eq!(countdown.remaining_at(Instant::now()), TimeDelta::MAX);
    }

    #[test]
    fn late_tick_reflects_true_elapsed_time() {
        let t0 = Instant::now();
        let mut countdown = Countdown::new(secs(60), t0, TICK);
        countdown.on_tick(t0 + secs(1));

        // the process was suspended for a while and the next tick is late
        assert_eq!(
            countdown.on_tick(t0 + Duration::from_millis(20_250)),
            TickOutcome::Remaining(TimeDelta::milliseconds(39_750))
        );
    }
}
