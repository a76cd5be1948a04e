//! Shared playback control state for the year stepper.
//!
//! The stepper task and the HTTP control handlers share this state.
//! Mutable control fields use [`std::sync::atomic`] types wrapped in
//! [`Arc`](std::sync::Arc) by the caller, so the stepper's hot path
//! reads nothing behind a lock. The [`SelectionState`] playback enum
//! remains the source of truth; this struct mirrors it for the loop
//! and adds the runtime-adjustable interval.
//!
//! [`SelectionState`]: ginidash_types::SelectionState

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

use chrono::{DateTime, Utc};
use ginidash_types::Playback;
use serde::{Deserialize, Serialize};
use tokio::sync::Notify;

/// Lowest accepted tick interval, preventing runaway stepping.
pub const MIN_TICK_INTERVAL_MS: u64 = 100;

/// Shared playback control state.
#[derive(Debug)]
pub struct PlaybackControl {
    /// Whether the year stepper is currently advancing.
    running: AtomicBool,

    /// Notification used to wake the stepper when playback starts.
    start_notify: Notify,

    /// Current tick interval in milliseconds (runtime-adjustable).
    tick_interval_ms: AtomicU64,

    /// Wall-clock time when the dashboard started.
    started_at: DateTime<Utc>,
}

impl PlaybackControl {
    /// Create a control block with playback stopped.
    ///
    /// `tick_interval_ms` below [`MIN_TICK_INTERVAL_MS`] is raised to
    /// the minimum.
    pub fn new(tick_interval_ms: u64) -> Self {
        Self {
            running: AtomicBool::new(false),
            start_notify: Notify::new(),
            tick_interval_ms: AtomicU64::new(tick_interval_ms.max(MIN_TICK_INTERVAL_MS)),
            started_at: Utc::now(),
        }
    }

    /// Whether the stepper should be advancing the year.
    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::Acquire)
    }

    /// Mirror the selection's playback mode into the control block,
    /// waking the stepper when playback starts.
    pub fn set_mode(&self, mode: Playback) {
        self.running.store(mode.is_running(), Ordering::Release);
        if mode.is_running() {
            self.start_notify.notify_one();
        }
    }

    /// Wait until playback is running.
    ///
    /// Returns immediately while running; otherwise parks until
    /// [`set_mode`](Self::set_mode) switches playback on.
    pub async fn wait_until_running(&self) {
        while !self.running.load(Ordering::Acquire) {
            self.start_notify.notified().await;
        }
    }

    /// Get the current tick interval in milliseconds.
    pub fn tick_interval_ms(&self) -> u64 {
        self.tick_interval_ms.load(Ordering::Acquire)
    }

    /// Set the tick interval in milliseconds.
    ///
    /// Returns the previous interval on success, or `None` if the value
    /// was rejected (below [`MIN_TICK_INTERVAL_MS`]).
    pub fn set_tick_interval_ms(&self, ms: u64) -> Option<u64> {
        if ms < MIN_TICK_INTERVAL_MS {
            return None;
        }
        let prev = self.tick_interval_ms.swap(ms, Ordering::AcqRel);
        Some(prev)
    }

    /// Wall-clock time the dashboard started.
    pub const fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    /// Elapsed seconds since the dashboard started.
    pub fn elapsed_seconds(&self) -> u64 {
        let elapsed = Utc::now()
            .signed_duration_since(self.started_at)
            .num_seconds();
        // num_seconds can be negative if clocks are weird; treat as 0.
        u64::try_from(elapsed.max(0)).unwrap_or(u64::MAX)
    }

    /// Snapshot of the control state for the status endpoint.
    pub fn status(&self, year: i32) -> PlaybackStatus {
        let mode = if self.is_running() {
            Playback::Running
        } else {
            Playback::Stopped
        };
        PlaybackStatus {
            running: mode.is_running(),
            button_label: mode.button_label().to_owned(),
            tick_interval_ms: self.tick_interval_ms(),
            year,
            elapsed_seconds: self.elapsed_seconds(),
            started_at: self.started_at.to_rfc3339(),
        }
    }
}

/// JSON-serializable playback status for the control API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaybackStatus {
    /// Whether the year animation is running.
    pub running: bool,
    /// Current Start/Stop button label (names the next action).
    pub button_label: String,
    /// Current tick interval in milliseconds.
    pub tick_interval_ms: u64,
    /// Year currently shown by the slider.
    pub year: i32,
    /// Elapsed wall-clock seconds since startup.
    pub elapsed_seconds: u64,
    /// Startup time, RFC 3339.
    pub started_at: String,
}
