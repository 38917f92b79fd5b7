/*
 * Copyright (c) 2025 Dylan Storey
 * Licensed under the Elastic License 2.0.
 * See LICENSE file in the project root for full license text.
 */

//! # Anvil Config Module
//! This module provides the configuration framework shared by the Anvil crates.
//!
//! # Variable Naming Convention
//!
//! - Struct fields use snake_case (e.g., `loader`, `components_path`)
//! - Environment variables use SCREAMING_SNAKE_CASE and are prefixed with "ANVIL__" (e.g., `ANVIL__LOADER__COMPONENTS_PATH`)
//! - Configuration file keys use snake_case (e.g., `loader.components_path`, `log.level`)
//!
//! # Configuration Overriding
//!
//! The configuration values are loaded and overridden in the following order (later sources take precedence):
//!
//! 1. Default values from the embedded `default.toml` file
//! 2. Values from an optional external configuration file (if provided)
//! 3. Environment variables
//!
//! # Available Environment Variables
//!
//! - `ANVIL__LOG__LEVEL`: Sets the log level for the application
//!   Default: "info"
//!   Possible values: "trace", "debug", "info", "warn", "error", "off"
//!
//! - `ANVIL__LOG__FORMAT`: Sets the log output format
//!   Default: "text"
//!   Possible values: "text", "json"
//!
//! - `ANVIL__LOADER__COMPONENTS_PATH`: Directory scanned for component definitions
//!   Default: "./components"
//!
//! - `ANVIL__LOADER__SEPARATOR`: Byte sequence that separates documents in a file
//!   Default: "\n---"
//!
//! - `ANVIL__LOADER__READ_BUFFER_SIZE`: Number of bytes read from a file per chunk
//!   Default: 4096

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

// Include the default settings file as a string constant
const DEFAULT_SETTINGS: &str = include_str!("../default.toml");

/// Represents the main settings structure for the application
#[derive(Debug, Deserialize, Clone)]
pub struct Settings {
    /// Logging configuration
    pub log: Log,
    /// Component loader configuration
    pub loader: Loader,
}

/// Represents the logging configuration
#[derive(Debug, Deserialize, Clone)]
pub struct Log {
    /// Log level (e.g., "info", "debug", "warn", "error")
    pub level: String,
    /// Log format: "text" for human-readable, "json" for structured JSON
    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_format() -> String {
    "text".to_string()
}

/// Represents the component loader configuration
#[derive(Debug, Deserialize, Clone)]
pub struct Loader {
    /// Directory holding the YAML component definitions
    pub components_path: String,
    /// Separator that starts a new document inside a file
    #[serde(default = "default_separator")]
    pub separator: String,
    /// Bytes requested from the file per read
    #[serde(default = "default_read_buffer_size")]
    pub read_buffer_size: usize,
}

fn default_separator() -> String {
    "\n---".to_string()
}

fn default_read_buffer_size() -> usize {
    4096
}

impl Settings {
    /// Creates a new `Settings` instance
    ///
    /// # Arguments
    ///
    /// * `file` - An optional path to a configuration file
    ///
    /// # Returns
    ///
    /// Returns a `Result` containing the `Settings` instance or a `ConfigError`
    pub fn new(file: Option<String>) -> Result<Self, ConfigError> {
        let mut s = Config::builder()
            .add_source(File::from_str(DEFAULT_SETTINGS, config::FileFormat::Toml));

        s = match file {
            Some(x) => s.add_source(File::with_name(x.as_str())),
            None => s,
        };

        s = s.add_source(Environment::with_prefix("ANVIL").separator("__"));

        let settings: Settings = s.build()?.try_deserialize()?;
        settings.validate()?;
        Ok(settings)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.loader.separator.is_empty() {
            return Err(ConfigError::Message(
                "loader.separator must not be empty".to_string(),
            ));
        }
        if self.loader.read_buffer_size == 0 {
            return Err(ConfigError::Message(
                "loader.read_buffer_size must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}
