//! Dataset layer for the Ginidash inequality dashboard.
//!
//! Owns everything that touches the source tables: the one-time CSV
//! load and reshaping of the inequality dataset, the read-only
//! [`GiniStore`] the dashboard queries, the static country-code lookup,
//! and the standalone OECD education-level aggregation pipeline.
//!
//! # Modules
//!
//! - [`countries`] -- ISO 3166-1 alpha-3 to display-name lookup.
//! - [`gini`] -- Inequality CSV loader and row normalization.
//! - [`store`] -- Read-only store with filter/series/mean queries.
//! - [`education`] -- OECD education-level mean aggregation and CSV io.

pub mod countries;
pub mod education;
pub mod gini;
pub mod store;

// Re-export primary entry points for convenience.
pub use countries::country_name;
pub use education::{
    EducationError, aggregate_education, load_education_file, read_education_records,
    write_education_means,
};
pub use gini::{GiniLoadError, load_gini_file, load_gini_records};
pub use store::{GiniStore, StoreError};
