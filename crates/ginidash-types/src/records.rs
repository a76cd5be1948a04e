//! Dataset record structs for the inequality dashboard.
//!
//! Covers the loaded Gini dataset rows, the raw and aggregated OECD
//! education rows, and the dataset year range.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::enums::Party;

/// One row of the inequality dataset: a country's Gini coefficient and
/// governing-party orientation for one year.
///
/// Records are immutable once loaded. `marker_size` is the
/// display-scaled radius for map markers, computed at load time so the
/// frontend never rescales.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct GiniRecord {
    /// Country display name.
    pub country: String,
    /// ISO 3166-1 alpha-3 code, used by the map projection.
    pub iso: String,
    /// Calendar year of the observation.
    pub year: i32,
    /// Political orientation of the governing party that year.
    pub party: Party,
    /// Gini coefficient in `[0, 1]`.
    #[ts(as = "String")]
    pub gini: Decimal,
    /// Display-scaled marker radius derived from `gini`.
    #[ts(as = "String")]
    pub marker_size: Decimal,
}

/// One raw OECD education-level row, keyed by alpha-3 location code
/// and year.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EducationRecord {
    /// ISO 3166-1 alpha-3 location code.
    pub location: String,
    /// Calendar year of the observation.
    pub year: i32,
    /// Education-level value for one population slice.
    pub value: Decimal,
}

/// Aggregated education output row: the mean value per
/// (location, year) within the configured year window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EducationMean {
    /// ISO 3166-1 alpha-3 location code, always present.
    pub location: String,
    /// Resolved display name; `None` when the code has no lookup
    /// entry (degraded, not an error).
    pub country: Option<String>,
    /// Calendar year of the aggregated observations.
    pub year: i32,
    /// Mean of all values for this (location, year).
    pub mean: Decimal,
}

/// Inclusive year span of a loaded dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct YearRange {
    /// Earliest year present in the dataset.
    pub min: i32,
    /// Latest year present in the dataset.
    pub max: i32,
}

impl YearRange {
    /// Whether `year` lies within the range, inclusive on both ends.
    pub const fn contains(self, year: i32) -> bool {
        year >= self.min && year <= self.max
    }

    /// Clamp `year` into the range.
    pub const fn clamp(self, year: i32) -> i32 {
        if year < self.min {
            self.min
        } else if year > self.max {
            self.max
        } else {
            year
        }
    }
}
