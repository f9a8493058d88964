//! Configuration System
//!
//! Layered configuration: built-in defaults, then the global user config
//! file (~/.config/walksum/config.toml), then an explicit `--config` file.
//! CLI flags are merged on top by the binary.

use crate::error::RunError;
use crate::logging::LoggingConfig;
use crate::walk::walker::WalkerConfig;
use config::builder::DefaultState;
use config::{Config, ConfigBuilder, File};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WalksumConfig {
    /// Walker settings
    #[serde(default)]
    pub walker: WalkerConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Configuration validation errors
#[derive(Debug, Clone)]
pub enum ValidationError {
    Walker(String),
    Logging(String),
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationError::Walker(msg) => write!(f, "Walker: {}", msg),
            ValidationError::Logging(msg) => write!(f, "Logging: {}", msg),
        }
    }
}

impl std::error::Error for ValidationError {}

const LOG_LEVELS: [&str; 6] = ["trace", "debug", "info", "warn", "error", "off"];

impl WalksumConfig {
    /// Validate the entire configuration
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        if self.walker.read_buffer_size == 0 {
            errors.push(ValidationError::Walker(
                "read_buffer_size must be greater than zero".to_string(),
            ));
        }

        if !LOG_LEVELS.contains(&self.logging.level.as_str()) {
            errors.push(ValidationError::Logging(format!(
                "Unknown log level '{}'",
                self.logging.level
            )));
        }
        if self.logging.format != "text" && self.logging.format != "json" {
            errors.push(ValidationError::Logging(format!(
                "Unknown log format '{}'",
                self.logging.format
            )));
        }
        if self.logging.output != "stderr" && self.logging.output != "stdout" {
            errors.push(ValidationError::Logging(format!(
                "Unknown log output '{}'",
                self.logging.output
            )));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

/// Loader facade assembling the configuration from its sources.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from defaults plus the global user file when
    /// present.
    pub fn load() -> Result<WalksumConfig, RunError> {
        let builder = Self::with_global_source(Config::builder());
        Self::finish(builder)
    }

    /// Load configuration with an explicit file layered over the global
    /// one. A missing or invalid explicit file is an error.
    pub fn load_from_file(path: &Path) -> Result<WalksumConfig, RunError> {
        let mut builder = Self::with_global_source(Config::builder());
        builder = builder.add_source(File::from(path).required(true));
        Self::finish(builder)
    }

    /// Path to the global config file: $HOME/.config/walksum/config.toml.
    pub fn global_config_path() -> Option<PathBuf> {
        std::env::var("HOME").ok().map(|home| {
            PathBuf::from(home)
                .join(".config")
                .join("walksum")
                .join("config.toml")
        })
    }

    fn with_global_source(mut builder: ConfigBuilder<DefaultState>) -> ConfigBuilder<DefaultState> {
        if let Some(global) = Self::global_config_path() {
            if global.exists() {
                builder = builder.add_source(File::from(global.as_path()).required(false));
            } else {
                debug!(
                    config_path = %global.display(),
                    "Global configuration file not found, using defaults"
                );
            }
        }
        builder
    }

    fn finish(builder: ConfigBuilder<DefaultState>) -> Result<WalksumConfig, RunError> {
        let config = builder
            .build()
            .map_err(|e| RunError::Config(format!("Failed to load configuration: {}", e)))?;

        let config: WalksumConfig = config
            .try_deserialize()
            .map_err(|e| RunError::Config(format!("Failed to parse configuration: {}", e)))?;

        config.validate().map_err(|errors| {
            let messages: Vec<String> = errors.iter().map(|e| e.to_string()).collect();
            RunError::Config(format!(
                "Configuration validation failed:\n{}",
                messages.join("\n")
            ))
        })?;

        Ok(config)
    }
}
