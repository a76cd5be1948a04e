//! Shared type definitions for the Ginidash inequality dashboard.
//!
//! This crate is the single source of truth for the types used across
//! the Ginidash workspace. Types annotated with `#[ts(export)]` flow
//! downstream to `TypeScript` via `ts-rs` for dashboard frontend use.
//!
//! # Modules
//!
//! - [`enums`] -- The governing-party orientation enum.
//! - [`records`] -- Dataset record structs (Gini rows, education rows,
//!   year range).
//! - [`selection`] -- UI-observable selection state and playback mode.

pub mod enums;
pub mod records;
pub mod selection;

// Re-export all public types at crate root for convenience.
pub use enums::Party;
pub use records::{EducationMean, EducationRecord, GiniRecord, YearRange};
pub use selection::{Playback, SelectionState};
