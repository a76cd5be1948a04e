//! Dashboard HTTP server for the Ginidash inequality dashboard.
//!
//! This crate provides an Axum HTTP server that exposes:
//!
//! - **The dashboard page** (`GET /`): party checklist, year slider,
//!   Start/Stop playback button, and three plotly.js figures wired to
//!   the JSON API.
//! - **Figure endpoints** serving the derived data for the map, the
//!   per-country Gini evolution, and the mean Gini per party.
//! - **Control endpoints** dispatching selection and playback events
//!   through the controller.
//! - **`WebSocket` endpoint** (`/ws/years`) streaming year changes via
//!   [`tokio::sync::broadcast`] while playback runs.
//!
//! # Architecture
//!
//! The server reads from an in-memory [`AppState`]: a read-only
//! [`GiniStore`](ginidash_data::GiniStore) plus one
//! [`SelectionState`](ginidash_types::SelectionState) behind a write
//! lock. Every mutation is one controller dispatch under that lock, so
//! events are applied one at a time; the background year stepper is
//! just another event source.

pub mod control;
pub mod error;
pub mod handlers;
pub mod router;
pub mod server;
pub mod startup;
pub mod state;
pub mod stepper;
pub mod ws;

// Re-export primary types for convenience.
pub use router::build_router;
pub use server::{ServerConfig, ServerError, start_server};
pub use startup::{StartupError, spawn_dashboard};
pub use state::{AppState, YearBroadcast};
pub use stepper::spawn_year_stepper;
