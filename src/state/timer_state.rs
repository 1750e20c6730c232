//! Timer snapshot published to the presentation side

use std::time::Duration;

use chrono::TimeDelta;
use serde::{Deserialize, Serialize};

use crate::{timer::TimerPhase, utils::format_title};

/// Snapshot of the countdown as the presentation side sees it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimerState {
    pub phase: TimerPhase,
    /// Last reported remaining time, truncated toward zero
    pub remaining_seconds: Option<i64>,
    pub title: String,
}

impl TimerState {
    /// Create an idle snapshot showing the full configured duration
    pub fn idle(duration: Duration) -> Self {
        Self {
            phase: TimerPhase::Idle,
            remaining_seconds: None,
            title: format_title(to_delta(duration)),
        }
    }

    /// Create a snapshot for a countdown that has just started
    pub fn started(duration: Duration) -> Self {
        let remaining = to_delta(duration);
        Self {
            phase: TimerPhase::Running,
            remaining_seconds: Some(remaining.num_seconds()),
            title: format_title(remaining),
        }
    }

    /// Record a tick notification. A negative remaining time means the
    /// countdown has expired.
    pub fn record_tick(&mut self, remaining: TimeDelta) {
        self.remaining_seconds = Some(remaining.num_seconds());
        self.title = format_title(remaining);
        if remaining < TimeDelta::zero() {
            self.phase = TimerPhase::Expired;
        }
    }

    /// Check if the countdown is currently advancing
    pub fn is_active(&self) -> bool {
        self.phase == TimerPhase::Running
    }
}

fn to_delta(duration: Duration) -> TimeDelta {
    TimeDelta::from_std(duration).unwrap_or(TimeDelta::MAX)
}
