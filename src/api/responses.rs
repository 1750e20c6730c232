//! API response structures

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{state::TimerState, timer::TimerPhase};

/// API response structure for timer command endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse {
    pub status: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    pub timer: TimerState,
}

impl ApiResponse {
    /// Create a new API response
    pub fn new(status: String, message: String, timer: TimerState) -> Self {
        Self {
            status,
            message,
            timestamp: Utc::now(),
            timer,
        }
    }

    /// Create a response whose status reflects whether the countdown advances
    pub fn for_timer(message: String, timer: TimerState) -> Self {
        let status = if timer.is_active() { "active" } else { "inactive" };
        Self::new(status.to_string(), message, timer)
    }
}

/// Status response with timer and server information
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusResponse {
    pub timer: TimerState,
    /// Commands a menu would offer in the current phase
    pub available_actions: Vec<String>,
    pub duration_seconds: u64,
    pub uptime: String,
    pub port: u16,
    pub host: String,
    pub last_action: Option<String>,
    pub last_action_time: Option<DateTime<Utc>>,
}

/// Commands that make sense in `phase`: restart is offered whenever the
/// countdown is not advancing, resume only after a pause.
pub fn available_actions(phase: TimerPhase) -> Vec<String> {
    let actions: &[&str] = match phase {
        TimerPhase::Idle | TimerPhase::Expired => &["start"],
        TimerPhase::Running => &["pause"],
        TimerPhase::Paused => &["start", "resume"],
    };
    actions.iter().map(|action| action.to_string()).collect()
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub version: String,
}

impl HealthResponse {
    /// Create a new health response
    pub fn ok() -> Self {
        Self {
            status: "ok".to_string(),
            timestamp: Utc::now(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}
