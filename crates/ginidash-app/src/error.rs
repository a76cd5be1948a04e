//! Error types for the dashboard binary.
//!
//! [`AppError`] is the top-level error type that wraps all possible
//! failure modes during dashboard startup.

/// Top-level error for the dashboard binary.
///
/// Each variant wraps a specific subsystem error, providing a single
/// error type that `main` can propagate with `?`.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Configuration loading failed.
    #[error("config error: {source}")]
    Config {
        /// The underlying config error.
        #[from]
        source: ginidash_core::config::ConfigError,
    },

    /// The inequality dataset failed to load.
    #[error("data error: {source}")]
    Data {
        /// The underlying loader error.
        #[from]
        source: ginidash_data::GiniLoadError,
    },

    /// The store rejected the loaded dataset.
    #[error("store error: {source}")]
    Store {
        /// The underlying store error.
        #[from]
        source: ginidash_data::StoreError,
    },

    /// The dashboard server failed to start.
    #[error("server error: {source}")]
    Server {
        /// The underlying startup error.
        #[from]
        source: ginidash_server::StartupError,
    },
}
