//! Background year stepper driving the playback animation.
//!
//! While playback runs, the stepper dispatches one
//! [`IntervalTick`](ginidash_core::controller::UiEvent::IntervalTick)
//! per tick interval and broadcasts the resulting year to all
//! `WebSocket` clients. While stopped it parks on the control block's
//! notify instead of polling, so an idle dashboard costs nothing.

use std::sync::Arc;
use std::time::Duration;

use ginidash_core::controller::UiEvent;
use tokio::task::JoinHandle;
use tracing::debug;

use crate::state::{AppState, YearBroadcast};

/// Spawn the year stepper on a background Tokio task.
///
/// The task runs until the Tokio runtime is shut down or the handle is
/// aborted.
pub fn spawn_year_stepper(state: Arc<AppState>) -> JoinHandle<()> {
    tokio::spawn(run_stepper(state))
}

/// The stepper loop: park until running, sleep one interval, dispatch
/// one tick, broadcast the new year.
async fn run_stepper(state: Arc<AppState>) {
    let mut ticks: u64 = 0;

    loop {
        state.playback.wait_until_running().await;

        let interval = Duration::from_millis(state.playback.tick_interval_ms());
        tokio::time::sleep(interval).await;

        // Playback may have been stopped during the sleep; the tick
        // dispatch checks the selection's mode again, so a late tick
        // is a no-op rather than a stray year advance.
        ticks = ticks.saturating_add(1);
        let (panels, selection) = state.apply(UiEvent::IntervalTick).await;
        if panels.is_empty() {
            continue;
        }

        let receivers = state.broadcast(&YearBroadcast {
            tick: ticks,
            year: selection.year,
            running: selection.playback.is_running(),
        });
        debug!(
            tick = ticks,
            year = selection.year,
            receivers,
            "playback advanced the year"
        );
    }
}
