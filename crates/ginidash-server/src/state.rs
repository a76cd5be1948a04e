//! Shared application state for the dashboard server.
//!
//! [`AppState`] holds the read-only [`GiniStore`], the mutable
//! [`SelectionState`] behind a write lock, the playback control block,
//! the broadcast channel for year changes, and the seedable sampler
//! used by the hover fallback. Every mutation funnels through
//! [`AppState::apply`], which holds the write lock for the duration of
//! one controller dispatch -- one event at a time, by construction.

use std::collections::BTreeSet;
use std::sync::Arc;

use ginidash_core::controller::{self, Panel, UiEvent};
use ginidash_core::playback::PlaybackControl;
use ginidash_data::GiniStore;
use ginidash_types::SelectionState;
use rand::SeedableRng;
use rand::rngs::SmallRng;
use serde::{Deserialize, Serialize};
use tokio::sync::{Mutex, RwLock, broadcast};

/// Capacity of the broadcast channel for year changes.
///
/// If a subscriber falls behind by more than this many messages it will
/// receive a [`broadcast::error::RecvError::Lagged`] and skip to the
/// newest message.
const BROADCAST_CAPACITY: usize = 256;

/// JSON-serializable year change pushed over the `WebSocket` while
/// playback runs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct YearBroadcast {
    /// Stepper tick counter since startup.
    pub tick: u64,
    /// The year the slider now shows.
    pub year: i32,
    /// Whether playback is still running.
    pub running: bool,
}

/// Shared state for the Axum application.
///
/// Wrapped in [`Arc`] and injected via Axum's `State` extractor.
#[derive(Clone)]
pub struct AppState {
    /// The loaded inequality dataset, read-only.
    pub store: Arc<GiniStore>,
    /// The dashboard selection state, mutated only through
    /// [`apply`](Self::apply).
    pub selection: Arc<RwLock<SelectionState>>,
    /// Playback control shared with the year stepper.
    pub playback: Arc<PlaybackControl>,
    /// Broadcast sender for year-change messages.
    pub tx: broadcast::Sender<YearBroadcast>,
    /// Sampler for the unset-hover random country pick.
    pub sampler: Arc<Mutex<SmallRng>>,
}

impl AppState {
    /// Create the application state over a loaded store.
    ///
    /// The selection starts at the dataset's first year with every
    /// party checked and playback stopped. `seed` makes the hover
    /// fallback reproducible; `None` seeds from the OS.
    pub fn new(store: GiniStore, tick_interval_ms: u64, seed: Option<u64>) -> Self {
        let (tx, _) = broadcast::channel(BROADCAST_CAPACITY);
        let initial = SelectionState::initial(store.year_range().min);
        let sampler = seed.map_or_else(SmallRng::from_os_rng, SmallRng::seed_from_u64);

        Self {
            store: Arc::new(store),
            selection: Arc::new(RwLock::new(initial)),
            playback: Arc::new(PlaybackControl::new(tick_interval_ms)),
            tx,
            sampler: Arc::new(Mutex::new(sampler)),
        }
    }

    /// Apply one UI event through the controller.
    ///
    /// Takes the selection write lock and the sampler lock for the
    /// whole dispatch, then returns the invalidated panels together
    /// with a snapshot of the updated selection.
    pub async fn apply(&self, event: UiEvent) -> (BTreeSet<Panel>, SelectionState) {
        let mut selection = self.selection.write().await;
        let mut sampler = self.sampler.lock().await;
        let panels = controller::dispatch(&self.store, &mut selection, event, &mut *sampler);
        (panels, selection.clone())
    }

    /// Subscribe to the year broadcast channel.
    ///
    /// Returns a receiver that will yield a [`YearBroadcast`] for every
    /// year the stepper advances.
    pub fn subscribe(&self) -> broadcast::Receiver<YearBroadcast> {
        self.tx.subscribe()
    }

    /// Publish a year change to all connected clients.
    ///
    /// Returns the number of receivers that got the message; 0 when no
    /// `WebSocket` clients are connected, which is not an error.
    pub fn broadcast(&self, change: &YearBroadcast) -> usize {
        // send returns Err only when there are zero receivers, which is
        // normal when no WebSocket clients are connected.
        self.tx.send(change.clone()).unwrap_or(0)
    }
}
