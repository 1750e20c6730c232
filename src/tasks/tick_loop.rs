//! Tick loop background task

use std::sync::{Arc, Mutex};
use tokio::{
    sync::oneshot,
    time::{interval_at, Instant, MissedTickBehavior},
};
use tracing::{debug, info, trace};

use crate::timer::{lock_countdown, Countdown, TickCallback, TickOutcome, TICK_INTERVAL};

/// Background task that feeds one-second ticks into a countdown and
/// delivers the remaining time to `on_tick`.
///
/// Ticks are stamped with the time they are observed, so the first tick
/// after a stall reports the true remaining time.
///
/// Callbacks run on this task only, one at a time and in tick order. The
/// countdown lock is released before a callback runs. The loop exits when
/// `shutdown_rx` fires or its sender is dropped, or right after delivering
/// the expiring tick.
pub async fn tick_loop_task(
    countdown: Arc<Mutex<Countdown>>,
    on_tick: TickCallback,
    first_tick: Instant,
    mut shutdown_rx: oneshot::Receiver<()>,
) {
    debug!("Starting tick loop");

    // A stalled loop gets one late tick, not a burst of stale ones
    let mut interval = interval_at(first_tick, TICK_INTERVAL);
    interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

    loop {
        tokio::select! {
            biased;

            // Session discarded or timer shut down
            _ = &mut shutdown_rx => {
                debug!("Tick loop received shutdown");
                break;
            }

            _ = interval.tick() => {
                let outcome = lock_countdown(&countdown).on_tick(Instant::now());

                match outcome {
                    TickOutcome::Absorbed => {
                        trace!("Tick absorbed while paused");
                    }
                    TickOutcome::Remaining(remaining) => {
                        trace!("Tick with {}ms remaining", remaining.num_milliseconds());
                        on_tick(remaining);
                    }
                    TickOutcome::Expired(remaining) => {
                        info!("Countdown expired");
                        on_tick(remaining);
                        break;
                    }
                }
            }
        }
    }

    debug!("Tick loop stopped");
}
