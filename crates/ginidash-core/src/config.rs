//! Configuration loading and typed config structures for Ginidash.
//!
//! The canonical configuration lives in `ginidash.yaml` at the project
//! root. This module defines strongly-typed structs that mirror the YAML
//! structure and provides a loader that reads the file, falling back to
//! defaults for anything absent.

use std::path::Path;

use serde::Deserialize;

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse YAML content.
    #[error("failed to parse config YAML: {source}")]
    Yaml {
        /// The underlying YAML parse error.
        source: serde_yml::Error,
    },
}

impl From<serde_yml::Error> for ConfigError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}

/// Top-level dashboard configuration.
///
/// Mirrors the structure of `ginidash.yaml`. All fields have defaults,
/// so an absent or empty file yields a runnable configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct DashboardConfig {
    /// HTTP server settings (bind host and port).
    #[serde(default)]
    pub server: ServerSection,

    /// Year-slider playback settings.
    #[serde(default)]
    pub playback: PlaybackSection,

    /// Dataset file locations.
    #[serde(default)]
    pub data: DataSection,

    /// Education aggregation settings.
    #[serde(default)]
    pub education: EducationSection,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingSection,

    /// Randomness settings for the hover fallback.
    #[serde(default)]
    pub sampling: SamplingSection,
}

impl DashboardConfig {
    /// Load configuration from a YAML file at the given path.
    ///
    /// Environment variables override file values afterwards:
    /// - `GINIDASH_PORT` overrides `server.port`
    /// - `GINIDASH_GINI_CSV` overrides `data.gini_csv`
    /// - `GINIDASH_EDUCATION_CSV` overrides `data.education_csv`
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read, or
    /// [`ConfigError::Yaml`] if the content is not valid YAML.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let mut config: Self = serde_yml::from_str(&contents)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Parse configuration from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Yaml`] if the string is not valid YAML.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        let mut config: Self = serde_yml::from_str(yaml)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Override file values with environment variables when set.
    ///
    /// Lets deployments retarget the port and dataset files without
    /// editing the YAML.
    pub fn apply_env_overrides(&mut self) {
        if let Ok(val) = std::env::var("GINIDASH_PORT")
            && let Ok(port) = val.parse::<u16>()
        {
            self.server.port = port;
        }
        if let Ok(val) = std::env::var("GINIDASH_GINI_CSV") {
            self.data.gini_csv = val;
        }
        if let Ok(val) = std::env::var("GINIDASH_EDUCATION_CSV") {
            self.data.education_csv = val;
        }
    }
}

/// HTTP server configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ServerSection {
    /// The host address to bind to.
    #[serde(default = "default_host")]
    pub host: String,

    /// The TCP port to listen on.
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

/// Year-slider playback configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PlaybackSection {
    /// Milliseconds between automatic year advances (minimum 100).
    #[serde(default = "default_tick_interval_ms")]
    pub tick_interval_ms: u64,
}

impl Default for PlaybackSection {
    fn default() -> Self {
        Self {
            tick_interval_ms: default_tick_interval_ms(),
        }
    }
}

/// Dataset file locations.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DataSection {
    /// Path to the inequality CSV (`country,iso,year,party,gini`).
    #[serde(default = "default_gini_csv")]
    pub gini_csv: String,

    /// Path to the OECD education-level CSV.
    #[serde(default = "default_education_csv")]
    pub education_csv: String,

    /// Path the education-means tool writes its output to.
    #[serde(default = "default_education_means_out")]
    pub education_means_out: String,
}

impl Default for DataSection {
    fn default() -> Self {
        Self {
            gini_csv: default_gini_csv(),
            education_csv: default_education_csv(),
            education_means_out: default_education_means_out(),
        }
    }
}

/// Education aggregation year window.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct EducationSection {
    /// Earliest year kept by the aggregation, inclusive.
    #[serde(default = "default_education_min_year")]
    pub min_year: i32,

    /// Latest year kept by the aggregation, inclusive.
    #[serde(default = "default_education_max_year")]
    pub max_year: i32,
}

impl Default for EducationSection {
    fn default() -> Self {
        Self {
            min_year: default_education_min_year(),
            max_year: default_education_max_year(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoggingSection {
    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingSection {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

/// Randomness configuration for the hover fallback country pick.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct SamplingSection {
    /// Seed for the fallback sampler. `None` seeds from entropy;
    /// setting it makes the initial detail-figure country reproducible.
    #[serde(default)]
    pub seed: Option<u64>,
}

// ---------------------------------------------------------------------------
// Default value functions (serde default requires named functions)
// ---------------------------------------------------------------------------

fn default_host() -> String {
    "0.0.0.0".to_owned()
}

const fn default_port() -> u16 {
    8050
}

const fn default_tick_interval_ms() -> u64 {
    750
}

fn default_gini_csv() -> String {
    "data/gini.csv".to_owned()
}

fn default_education_csv() -> String {
    "data/education-level.csv".to_owned()
}

fn default_education_means_out() -> String {
    "data/education-means.csv".to_owned()
}

const fn default_education_min_year() -> i32 {
    2012
}

const fn default_education_max_year() -> i32 {
    2021
}

fn default_log_level() -> String {
    "info".to_owned()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = DashboardConfig::default();
        assert_eq!(config.server.port, 8050);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.playback.tick_interval_ms, 750);
        assert_eq!(config.education.min_year, 2012);
        assert_eq!(config.education.max_year, 2021);
        assert!(config.sampling.seed.is_none());
    }

    #[test]
    fn parse_full_yaml() {
        let yaml = r#"
server:
  host: "127.0.0.1"
  port: 8055

playback:
  tick_interval_ms: 500

data:
  gini_csv: "fixtures/gini.csv"
  education_csv: "fixtures/edu.csv"
  education_means_out: "out/means.csv"

education:
  min_year: 2010
  max_year: 2020

logging:
  level: "debug"

sampling:
  seed: 42
"#;

        let config = DashboardConfig::parse(yaml).unwrap();
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 8055);
        assert_eq!(config.playback.tick_interval_ms, 500);
        assert_eq!(config.data.gini_csv, "fixtures/gini.csv");
        assert_eq!(config.education.min_year, 2010);
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.sampling.seed, Some(42));
    }

    #[test]
    fn parse_minimal_yaml() {
        let yaml = "server:\n  port: 9000\n";
        let config = DashboardConfig::parse(yaml).unwrap();

        // Port is overridden.
        assert_eq!(config.server.port, 9000);
        // Everything else uses defaults.
        assert_eq!(config.playback.tick_interval_ms, 750);
        assert_eq!(config.data.gini_csv, "data/gini.csv");
    }

    #[test]
    fn parse_empty_yaml() {
        let config = DashboardConfig::parse("");
        assert!(config.is_ok());
    }
}
