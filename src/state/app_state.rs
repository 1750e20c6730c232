//! Main application state management

use std::{
    sync::{Arc, Mutex},
    time::{Duration, Instant},
};
use chrono::{DateTime, Utc};
use tokio::sync::{watch, Mutex as AsyncMutex};
use tracing::info;

use crate::{
    error::TimerError,
    timer::{Timer, TimerPhase},
};
use super::TimerState;

/// Main application state that owns the timer and what the shell shows of it
pub struct AppState {
    /// The countdown timer driven by the HTTP commands
    pub timer: AsyncMutex<Timer>,
    /// Duration every (re)start counts down from
    pub duration: Duration,
    /// Server metadata
    pub start_time: Instant,
    pub port: u16,
    pub host: String,
    /// Last action tracking
    pub last_action: Mutex<Option<String>>,
    pub last_action_time: Mutex<Option<DateTime<Utc>>>,
    /// Channel for timer snapshots, fed by commands and tick callbacks
    pub timer_update_tx: Arc<watch::Sender<TimerState>>,
}

impl AppState {
    /// Create a new AppState with an idle timer
    pub fn new(port: u16, host: String, duration: Duration) -> Self {
        let (timer_update_tx, _) = watch::channel(TimerState::idle(duration));

        Self {
            timer: AsyncMutex::new(Timer::new()),
            duration,
            start_time: Instant::now(),
            port,
            host,
            last_action: Mutex::new(None),
            last_action_time: Mutex::new(None),
            timer_update_tx: Arc::new(timer_update_tx),
        }
    }

    /// Start (or restart) a countdown of the configured duration. The old
    /// tick loop is joined first so it cannot publish into the new snapshot.
    pub async fn start_timer(&self) -> Result<TimerState, TimerError> {
        let mut timer = self.timer.lock().await;

        let updates = Arc::clone(&self.timer_update_tx);
        timer
            .restart(self.duration, move |remaining| {
                updates.send_modify(|state| state.record_tick(remaining));
            })
            .await?;

        info!("Countdown (re)started");
        self.timer_update_tx.send_replace(TimerState::started(self.duration));
        self.record_action("start");
        Ok(self.snapshot(timer.phase()))
    }

    /// Pause the countdown in place
    pub async fn pause_timer(&self) -> TimerState {
        let timer = self.timer.lock().await;
        timer.stop();

        let phase = timer.phase();
        self.publish_phase(phase);
        self.record_action("pause");
        self.snapshot(phase)
    }

    /// Resume a paused countdown
    pub async fn resume_timer(&self) -> Result<TimerState, TimerError> {
        let mut timer = self.timer.lock().await;
        timer.resume()?;

        let phase = timer.phase();
        self.publish_phase(phase);
        self.record_action("resume");
        Ok(self.snapshot(phase))
    }

    /// Get the current timer snapshot, with the phase read from the timer
    pub async fn timer_state(&self) -> TimerState {
        let phase = self.timer.lock().await.phase();
        self.snapshot(phase)
    }

    /// Subscribe to timer snapshot updates
    pub fn subscribe(&self) -> watch::Receiver<TimerState> {
        self.timer_update_tx.subscribe()
    }

    /// Stop the tick loop and wait for it to finish
    pub async fn shutdown(&self) {
        self.timer.lock().await.shutdown().await;
        self.publish_phase(TimerPhase::Idle);
    }

    /// Calculate server uptime as a formatted string
    pub fn get_uptime(&self) -> String {
        let duration = self.start_time.elapsed();
        let hours = duration.as_secs() / 3600;
        let minutes = (duration.as_secs() % 3600) / 60;
        let seconds = duration.as_secs() % 60;

        if hours > 0 {
            format!("{}h {}m {}s", hours, minutes, seconds)
        } else if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}s", seconds)
        }
    }

    /// Get last action information
    pub fn get_last_action(&self) -> (Option<String>, Option<DateTime<Utc>>) {
        let last_action = self.last_action.lock().ok().and_then(|a| a.clone());
        let last_action_time = self.last_action_time.lock().ok().and_then(|t| *t);
        (last_action, last_action_time)
    }

    fn record_action(&self, action: &str) {
        if let Ok(mut last_action) = self.last_action.lock() {
            *last_action = Some(action.to_string());
        }
        if let Ok(mut last_time) = self.last_action_time.lock() {
            *last_time = Some(Utc::now());
        }
    }

    /// Only commands change the published phase; tick callbacks can race
    /// with them and merely record remaining time and expiry.
    fn publish_phase(&self, phase: TimerPhase) {
        self.timer_update_tx.send_if_modified(|state| {
            let changed = state.phase != phase;
            state.phase = phase;
            changed
        });
    }

    fn snapshot(&self, phase: TimerPhase) -> TimerState {
        let mut state = self.timer_update_tx.borrow().clone();
        state.phase = phase;
        state
    }
}
