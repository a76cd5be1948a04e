//! Reactive controller core for the Ginidash inequality dashboard.
//!
//! This crate owns the dashboard's state transitions: every user
//! interaction and playback tick flows through one dispatch function
//! over an explicit [`SelectionState`], so update ordering is
//! deterministic rather than delegated to a UI framework.
//!
//! # Modules
//!
//! - [`config`] -- Configuration loading from `ginidash.yaml` into
//!   strongly-typed structs.
//! - [`controller`] -- [`UiEvent`] dispatch, year advancement, filter
//!   and hover resolution.
//! - [`playback`] -- Shared atomic playback control for the year
//!   stepper.
//!
//! [`SelectionState`]: ginidash_types::SelectionState
//! [`UiEvent`]: controller::UiEvent

pub mod config;
pub mod controller;
pub mod playback;

// Re-export primary types for convenience.
pub use config::{ConfigError, DashboardConfig};
pub use controller::{Panel, UiEvent, advance_year, dispatch, filter_records, resolve_hovered_country};
pub use playback::{MIN_TICK_INTERVAL_MS, PlaybackControl, PlaybackStatus};
