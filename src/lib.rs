//! Pomodoro - A pausable countdown timer engine
//! 
//! This library provides a countdown timer that reports the remaining time
//! once per second and survives pause/resume without drift, plus a small
//! HTTP control surface around it.

pub mod config;
pub mod error;
pub mod timer;
pub mod state;
pub mod api;
pub mod tasks;
pub mod utils;

// Re-export commonly used types
pub use config::Config;
pub use error::TimerError;
pub use timer::{Timer, TimerPhase, TICK_INTERVAL};
pub use state::AppState;
pub use api::create_router;
pub use utils::signals::shutdown_signal;
