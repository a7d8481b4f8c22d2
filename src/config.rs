//! Configuration management for the `nordcast` pipeline
//!
//! Handles loading configuration from an optional TOML file and environment
//! variables, and provides validation for all configuration settings.

use crate::NordcastError;
use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration structure for the `nordcast` pipeline
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Upstream forecast API configuration
    pub api: ApiConfig,
    /// Fetch worker pool configuration
    pub fetch: FetchConfig,
    /// Output directory configuration
    pub output: OutputConfig,
    /// Logging configuration
    pub logging: LoggingConfig,
}

/// Upstream forecast API settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL for the SMHI open-data forecast API
    #[serde(default = "default_api_base_url")]
    pub base_url: String,
    /// Request timeout in seconds
    #[serde(default = "default_api_timeout")]
    pub timeout_seconds: u32,
}

/// Fetch worker pool settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FetchConfig {
    /// Number of concurrent fetch workers per country
    #[serde(default = "default_fetch_workers")]
    pub workers: usize,
    /// Delay in milliseconds between consuming completed fetches
    #[serde(default = "default_completion_delay")]
    pub completion_delay_ms: u64,
}

/// Output directory settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Base directory for forecast output (a dated subdirectory is created
    /// per run)
    #[serde(default = "default_output_base_dir")]
    pub base_dir: String,
}

/// Logging configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug, trace)
    #[serde(default = "default_log_level")]
    pub level: String,
}

// Default value functions
fn default_api_base_url() -> String {
    "https://opendata-download-metfcst.smhi.se".to_string()
}

fn default_api_timeout() -> u32 {
    10
}

fn default_fetch_workers() -> usize {
    10
}

fn default_completion_delay() -> u64 {
    100
}

fn default_output_base_dir() -> String {
    "weather_forecasts".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api: ApiConfig {
                base_url: default_api_base_url(),
                timeout_seconds: default_api_timeout(),
            },
            fetch: FetchConfig {
                workers: default_fetch_workers(),
                completion_delay_ms: default_completion_delay(),
            },
            output: OutputConfig {
                base_dir: default_output_base_dir(),
            },
            logging: LoggingConfig {
                level: default_log_level(),
            },
        }
    }
}

impl AppConfig {
    /// Load configuration from file and environment variables
    pub fn load() -> Result<Self> {
        Self::load_from_path(None)
    }

    /// Load configuration from a specific path, falling back to
    /// `nordcast.toml` in the working directory
    pub fn load_from_path(config_path: Option<PathBuf>) -> Result<Self> {
        let mut builder = Config::builder();

        let config_file = config_path.unwrap_or_else(|| PathBuf::from("nordcast.toml"));
        if config_file.exists() {
            builder = builder.add_source(
                File::from(config_file.clone())
                    .required(false)
                    .format(config::FileFormat::Toml),
            );
        }

        // Environment variable overrides with NORDCAST_ prefix, e.g.
        // NORDCAST_OUTPUT__BASE_DIR=/tmp/forecasts
        builder = builder.add_source(
            Environment::with_prefix("NORDCAST")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let settings = builder
            .build()
            .with_context(|| "Failed to build configuration")?;

        let config: AppConfig = settings
            .try_deserialize()
            .with_context(|| "Failed to deserialize configuration")?;

        config.validate()?;

        Ok(config)
    }

    /// Validate all configuration settings
    pub fn validate(&self) -> Result<()> {
        if !self.api.base_url.starts_with("http://") && !self.api.base_url.starts_with("https://") {
            return Err(
                NordcastError::config("API base URL must be a valid HTTP or HTTPS URL").into(),
            );
        }

        if self.api.timeout_seconds == 0 || self.api.timeout_seconds > 300 {
            return Err(
                NordcastError::config("API timeout must be between 1 and 300 seconds").into(),
            );
        }

        if self.fetch.workers == 0 || self.fetch.workers > 100 {
            return Err(NordcastError::config("Fetch workers must be between 1 and 100").into());
        }

        if self.output.base_dir.is_empty() {
            return Err(NordcastError::config("Output base directory cannot be empty").into());
        }

        let valid_log_levels = ["error", "warn", "info", "debug", "trace"];
        if !valid_log_levels.contains(&self.logging.level.as_str()) {
            return Err(NordcastError::config(format!(
                "Invalid log level '{}'. Must be one of: {}",
                self.logging.level,
                valid_log_levels.join(", ")
            ))
            .into());
        }

        Ok(())
    }
}
