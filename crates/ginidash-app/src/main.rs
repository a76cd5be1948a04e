//! Dashboard binary for the Ginidash inequality dashboard.
//!
//! This is the entry point that wires together configuration, the
//! dataset load, the shared application state, the HTTP server, and the
//! playback year stepper.
//!
//! # Startup Sequence
//!
//! 1. Load configuration from `ginidash.yaml` (defaults when absent)
//! 2. Initialize structured logging (tracing)
//! 3. Load the inequality CSV and build the read-only store
//! 4. Assemble the shared application state
//! 5. Start the dashboard HTTP server on a background task
//! 6. Start the playback year stepper on a background task
//! 7. Run until Ctrl-C

mod error;

use std::path::Path;
use std::sync::Arc;

use ginidash_core::config::DashboardConfig;
use ginidash_data::{GiniStore, load_gini_file};
use ginidash_server::server::ServerConfig;
use ginidash_server::state::AppState;
use ginidash_server::{spawn_dashboard, spawn_year_stepper};
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::error::AppError;

/// Application entry point for the dashboard.
///
/// Initializes all subsystems and serves the dashboard until the
/// process receives Ctrl-C.
///
/// # Errors
///
/// Returns an error if configuration, the dataset load, or server
/// startup fails.
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. Load configuration (before logging so the level applies).
    let config = load_config()?;

    // 2. Initialize structured logging.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config.logging.level.clone())),
        )
        .with_target(true)
        .init();

    info!("ginidash starting");
    info!(
        host = config.server.host,
        port = config.server.port,
        tick_interval_ms = config.playback.tick_interval_ms,
        gini_csv = config.data.gini_csv,
        "Configuration loaded"
    );

    // 3. Load the inequality dataset and build the store.
    let records = load_gini_file(Path::new(&config.data.gini_csv)).map_err(AppError::from)?;
    let store = GiniStore::new(records).map_err(AppError::from)?;
    let range = store.year_range();
    info!(
        rows = store.records().len(),
        countries = store.countries().len(),
        min_year = range.min,
        max_year = range.max,
        "Gini store built"
    );

    // 4. Assemble the shared application state.
    let state = Arc::new(AppState::new(
        store,
        config.playback.tick_interval_ms,
        config.sampling.seed,
    ));

    // 5. Start the dashboard HTTP server.
    let server_config = ServerConfig {
        host: config.server.host.clone(),
        port: config.server.port,
    };
    let server_handle = spawn_dashboard(server_config, Arc::clone(&state))
        .await
        .map_err(AppError::from)?;
    info!(port = config.server.port, "Dashboard server started");

    // 6. Start the playback year stepper.
    let stepper_handle = spawn_year_stepper(Arc::clone(&state));
    info!("Year stepper started");

    // 7. Run until Ctrl-C.
    tokio::signal::ctrl_c().await?;
    info!("Ctrl-C received, shutting down");

    stepper_handle.abort();
    server_handle.abort();

    info!("ginidash shutdown complete");
    Ok(())
}

/// Load the dashboard configuration from `ginidash.yaml`.
///
/// Looks for the config file relative to the current working directory
/// and falls back to defaults (plus env overrides) when it is absent.
fn load_config() -> Result<DashboardConfig, AppError> {
    let config_path = Path::new("ginidash.yaml");
    if config_path.exists() {
        let config = DashboardConfig::from_file(config_path)?;
        Ok(config)
    } else {
        let mut config = DashboardConfig::default();
        config.apply_env_overrides();
        Ok(config)
    }
}
