//! Error types for the timer engine

/// Errors returned by [`crate::timer::Timer`] commands.
///
/// Redundant commands (pausing a paused timer, resuming a running one) are
/// not errors and never produce one of these.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TimerError {
    #[error("countdown duration must be greater than zero")]
    InvalidDuration,
    #[error("timer commands must be issued from within a tokio runtime")]
    NoRuntime,
}
