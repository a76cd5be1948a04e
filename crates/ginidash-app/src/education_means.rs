//! Education-means aggregation tool.
//!
//! Standalone binary, unrelated to the dashboard: loads the OECD
//! education-level CSV, restricts it to the configured year window,
//! averages the value per (location, year), resolves location codes to
//! country names, and writes the result as CSV.
//!
//! Paths and the year window come from `ginidash.yaml` (`data` and
//! `education` sections), with the same defaults and env overrides as
//! the dashboard binary.

use std::fs::File;
use std::path::Path;

use ginidash_core::config::DashboardConfig;
use ginidash_data::{aggregate_education, load_education_file, write_education_means};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Entry point: load, aggregate, write.
///
/// # Errors
///
/// Returns an error if configuration, the CSV read, the aggregation,
/// or the output write fails.
fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = load_config()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config.logging.level.clone())),
        )
        .with_target(true)
        .init();

    info!(
        education_csv = config.data.education_csv,
        min_year = config.education.min_year,
        max_year = config.education.max_year,
        "education-means starting"
    );

    let rows = load_education_file(Path::new(&config.data.education_csv))?;
    let means = aggregate_education(&rows, config.education.min_year, config.education.max_year)?;

    let out_path = Path::new(&config.data.education_means_out);
    let out = File::create(out_path)?;
    write_education_means(out, &means)?;

    info!(
        rows_in = rows.len(),
        rows_out = means.len(),
        out = %out_path.display(),
        "education means written"
    );
    Ok(())
}

/// Load the configuration from `ginidash.yaml`, falling back to
/// defaults (plus env overrides) when the file is absent.
fn load_config() -> Result<DashboardConfig, ginidash_core::config::ConfigError> {
    let config_path = Path::new("ginidash.yaml");
    if config_path.exists() {
        DashboardConfig::from_file(config_path)
    } else {
        let mut config = DashboardConfig::default();
        config.apply_env_overrides();
        Ok(config)
    }
}
