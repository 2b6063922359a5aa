use clap::Parser;
use serde::Deserialize;
use std::path::Path;

use crate::error_handling::types::ConfigError;

/// Runtime configuration for the console itself.
///
/// Parsed from command-line flags via `clap`, or from a TOML file when
/// `--config-file` is given (the file then supplies every value, falling
/// back to the same defaults for keys it omits).
///
/// # Fields Overview
///
/// - `upstream_url`: base URL of the attack engine being controlled
/// - `dashboard_port`: port the local operator dashboard binds to
/// - `metrics_interval_ms` / `logs_interval_ms`: poll cadences per stream
/// - `metrics_capacity` / `logs_capacity`: sliding-window sizes per stream
/// - `request_timeout_secs`: per-request timeout for upstream calls
#[derive(Parser, Debug, Clone, Deserialize)]
#[command(name = "hornet")]
#[serde(default)]
pub struct Config {
    /// Path to a TOML configuration file; overrides every other flag.
    #[arg(long)]
    #[serde(skip)]
    pub config_file: Option<std::path::PathBuf>,

    /// Base URL of the upstream attack engine.
    #[arg(long, default_value = "http://localhost:8000")]
    pub upstream_url: String,

    /// Port for the operator dashboard and JSON API.
    #[arg(long, default_value_t = 8080)]
    pub dashboard_port: u16,

    /// Metrics poll cadence in milliseconds.
    #[arg(long, default_value_t = 1000)]
    pub metrics_interval_ms: u64,

    /// Log poll cadence in milliseconds.
    #[arg(long, default_value_t = 2000)]
    pub logs_interval_ms: u64,

    /// Sliding-window capacity for metric samples.
    #[arg(long, default_value_t = crate::telemetry::METRICS_CAPACITY)]
    pub metrics_capacity: usize,

    /// Sliding-window capacity for log entries.
    #[arg(long, default_value_t = crate::telemetry::LOGS_CAPACITY)]
    pub logs_capacity: usize,

    /// Timeout for individual upstream requests, in seconds.
    #[arg(long, default_value_t = 10)]
    pub request_timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            config_file: None,
            upstream_url: "http://localhost:8000".to_string(),
            dashboard_port: 8080,
            metrics_interval_ms: 1000,
            logs_interval_ms: 2000,
            metrics_capacity: crate::telemetry::METRICS_CAPACITY,
            logs_capacity: crate::telemetry::LOGS_CAPACITY,
            request_timeout_secs: 10,
        }
    }
}

impl Config {
    pub fn from_args() -> Self {
        Config::parse()
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path)?;
        let config: Config =
            toml::from_str(&raw).map_err(|e| ConfigError::TomlError(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.metrics_interval_ms == 0 || self.logs_interval_ms == 0 {
            return Err(ConfigError::NotInRange(
                "poll intervals must be at least 1ms".to_string(),
            ));
        }
        if self.metrics_capacity == 0 || self.logs_capacity == 0 {
            return Err(ConfigError::NotInRange(
                "buffer capacities must be at least 1".to_string(),
            ));
        }
        if self.upstream_url.is_empty() {
            return Err(ConfigError::NotInRange(
                "upstream URL must not be empty".to_string(),
            ));
        }
        Ok(())
    }

    #[cfg(test)]
    fn from_args_under_test(args: &[&str]) -> Result<Config, clap::Error> {
        Config::try_parse_from(args.iter().copied())
    }
}
