//! Pausable countdown timer
//!
//! [`Timer`] is the handle the caller holds. Each `start` creates a session:
//! a [`Countdown`] shared with a background tick loop, plus the channel used
//! to tell that loop to exit. Commands only touch the countdown under its
//! lock, so the loop always observes them race-free on its next tick.

pub mod countdown;

use std::{
    sync::{Arc, Mutex, MutexGuard, PoisonError},
    time::Duration,
};

use chrono::TimeDelta;
use tokio::{
    runtime::Handle,
    sync::oneshot,
    task::JoinHandle,
    time::Instant,
};
use tracing::{debug, info, warn};

use crate::{error::TimerError, tasks::tick_loop_task};

pub use countdown::{Countdown, TickOutcome, TimerPhase};

/// Cadence of the tick source
pub const TICK_INTERVAL: Duration = Duration::from_secs(1);

/// Callback invoked with the remaining time on every unpaused tick
pub type TickCallback = Arc<dyn Fn(TimeDelta) + Send + Sync + 'static>;

/// Lock a countdown, recovering the guard if a previous holder panicked.
/// The countdown holds plain values, so it is never left half-updated.
pub(crate) fn lock_countdown(countdown: &Mutex<Countdown>) -> MutexGuard<'_, Countdown> {
    countdown.lock().unwrap_or_else(PoisonError::into_inner)
}

/// One started countdown together with its tick loop
struct Session {
    countdown: Arc<Mutex<Countdown>>,
    on_tick: TickCallback,
    worker: JoinHandle<()>,
    shutdown_tx: oneshot::Sender<()>,
}

impl Session {
    fn spawn(
        runtime: &Handle,
        countdown: Arc<Mutex<Countdown>>,
        on_tick: TickCallback,
        first_tick: Instant,
    ) -> Self {
        let (shutdown_tx, shutdown_rx) = oneshot::channel();
        let worker = runtime.spawn(tick_loop_task(
            Arc::clone(&countdown),
            Arc::clone(&on_tick),
            first_tick,
            shutdown_rx,
        ));

        Self {
            countdown,
            on_tick,
            worker,
            shutdown_tx,
        }
    }

    /// Replace a tick loop that exited on its own
    fn respawn_worker(&mut self, runtime: &Handle) {
        let countdown = Arc::clone(&self.countdown);
        let on_tick = Arc::clone(&self.on_tick);
        *self = Self::spawn(runtime, countdown, on_tick, Instant::now() + TICK_INTERVAL);
    }

    /// Ask the tick loop to exit and hand back its join handle
    fn close(self) -> JoinHandle<()> {
        // the loop may already be gone after expiry
        let _ = self.shutdown_tx.send(());
        self.worker
    }
}

/// A countdown timer driven by a one-second background tick loop.
///
/// Dropping the timer ends its session; the tick loop notices on its next
/// wake-up and exits without delivering further callbacks.
#[derive(Default)]
pub struct Timer {
    session: Option<Session>,
}

impl Timer {
    /// Create an idle timer
    pub fn new() -> Self {
        Self::default()
    }

    /// Begin a fresh countdown of `duration`, invoking `on_tick` once per
    /// unpaused tick with the remaining time.
    ///
    /// Starting an already started timer discards the previous session: its
    /// loop is told to stop and its callback is never invoked for a later
    /// tick. Use [`Timer::restart`] to also wait for a callback that may be
    /// running right now.
    pub fn start<F>(&mut self, duration: Duration, on_tick: F) -> Result<(), TimerError>
    where
        F: Fn(TimeDelta) + Send + Sync + 'static,
    {
        let runtime = Self::check_start(duration)?;

        if let Some(previous) = self.session.take() {
            info!("Discarding previous countdown session");
            drop(previous.close());
        }

        self.spawn_session(&runtime, duration, Arc::new(on_tick));
        Ok(())
    }

    /// Like [`Timer::start`], but joins the previous tick loop first so no
    /// callback of the old session runs after this returns.
    pub async fn restart<F>(&mut self, duration: Duration, on_tick: F) -> Result<(), TimerError>
    where
        F: Fn(TimeDelta) + Send + Sync + 'static,
    {
        let runtime = Self::check_start(duration)?;

        self.shutdown().await;
        self.spawn_session(&runtime, duration, Arc::new(on_tick));
        Ok(())
    }

    /// Validate a start request and find the runtime to spawn on
    fn check_start(duration: Duration) -> Result<Handle, TimerError> {
        if duration.is_zero() || Instant::now().checked_add(duration).is_none() {
            return Err(TimerError::InvalidDuration);
        }
        Handle::try_current().map_err(|_| TimerError::NoRuntime)
    }

    fn spawn_session(&mut self, runtime: &Handle, duration: Duration, on_tick: TickCallback) {
        let started_at = Instant::now();
        let countdown = Arc::new(Mutex::new(Countdown::new(duration, started_at, TICK_INTERVAL)));
        self.session = Some(Session::spawn(
            runtime,
            countdown,
            on_tick,
            started_at + TICK_INTERVAL,
        ));

        info!("Countdown started for {}s", duration.as_secs());
    }

    /// Pause in place. Ticks keep arriving but no longer count down.
    pub fn stop(&self) {
        let Some(session) = &self.session else {
            debug!("Stop ignored, timer is idle");
            return;
        };

        if lock_countdown(&session.countdown).pause() {
            info!("Countdown paused");
        } else {
            debug!("Stop ignored, countdown already paused");
        }
    }

    /// Continue a paused countdown from where it stopped.
    ///
    /// Restarts the tick loop if it is no longer running, unless the
    /// countdown has expired.
    pub fn resume(&mut self) -> Result<(), TimerError> {
        let Some(session) = self.session.as_mut() else {
            debug!("Resume ignored, timer is idle");
            return Ok(());
        };

        let (resumed, phase) = {
            let mut countdown = lock_countdown(&session.countdown);
            (countdown.resume(), countdown.phase())
        };

        match phase {
            TimerPhase::Expired => debug!("Resume ignored, countdown has expired"),
            _ if resumed => info!("Countdown resumed"),
            _ => debug!("Resume ignored, countdown already running"),
        }

        if phase != TimerPhase::Expired && session.worker.is_finished() {
            warn!("Tick loop is no longer running, restarting it");
            let runtime = Handle::try_current().map_err(|_| TimerError::NoRuntime)?;
            session.respawn_worker(&runtime);
        }

        Ok(())
    }

    pub fn phase(&self) -> TimerPhase {
        match &self.session {
            Some(session) => lock_countdown(&session.countdown).phase(),
            None => TimerPhase::Idle,
        }
    }

    /// Stop the tick loop and wait for it to finish, returning the timer to
    /// idle.
    pub async fn shutdown(&mut self) {
        let Some(session) = self.session.take() else {
            return;
        };

        if let Err(e) = session.close().await {
            warn!("Tick loop ended abnormally: {}", e);
        }
        info!("Timer shut down");
    }
}
