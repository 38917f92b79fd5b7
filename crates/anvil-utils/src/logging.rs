/*
 * Copyright (c) 2025 Dylan Storey
 * Licensed under the Elastic License 2.0.
 * See LICENSE file in the project root for full license text.
 */

//! # Anvil Logging Module
//!
//! A small `log` backend shared by the Anvil binaries.
//!
//! ## Usage
//!
//! 1. Initialize the logger:
//!    ```
//!    anvil_utils::logging::init("info").expect("Failed to initialize logger");
//!    ```
//!
//! 2. Use the log macros throughout your code:
//!    ```
//!    use anvil_utils::logging::prelude::*;
//!
//!    info!("loaded {} components", 3);
//!    warn!("skipping unreadable file");
//!    ```
//!
//! 3. Update log level at runtime if needed:
//!    ```
//!    anvil_utils::logging::update_log_level("debug");
//!    ```
//!
//! ## Log Levels
//!
//! - "off": Turn off all logging
//! - "error": Log only errors
//! - "warn": Log warnings and errors
//! - "info": Log info, warnings, and errors (default)
//! - "debug": Log debug messages and all above
//! - "trace": Log trace messages and all above
//!
//! Unknown level names fall back to "info".
//!
//! ## Output
//!
//! Records go to stderr so that command output on stdout stays machine
//! readable. The "text" format is a single human-readable line, the "json"
//! format is one JSON object per line.

use log::{LevelFilter, Metadata, Record, SetLoggerError};
use once_cell::sync::OnceCell;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

pub use log::{debug, error, info, trace, warn};

static LOGGER: AnvilLogger = AnvilLogger;
static CURRENT_LEVEL: AtomicUsize = AtomicUsize::new(LevelFilter::Info as usize);
static JSON_FORMAT: AtomicBool = AtomicBool::new(false);
static INIT: OnceCell<()> = OnceCell::new();

/// Output format of emitted records
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Text,
    Json,
}

impl LogFormat {
    /// Parses a format name, anything but "json" selects text output.
    pub fn parse(format: &str) -> Self {
        if format.eq_ignore_ascii_case("json") {
            LogFormat::Json
        } else {
            LogFormat::Text
        }
    }
}

/// Logger backing the `log` facade for Anvil
pub struct AnvilLogger;

impl log::Log for AnvilLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= current_level()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        if JSON_FORMAT.load(Ordering::Relaxed) {
            let entry = serde_json::json!({
                "timestamp": chrono::Utc::now().to_rfc3339(),
                "level": record.level().to_string().to_lowercase(),
                "target": record.target(),
                "message": format!("{}", record.args()),
                "module": record.module_path(),
                "file": record.file(),
                "line": record.line()
            });
            eprintln!("{}", entry);
        } else {
            eprintln!(
                "{} - {}: {}",
                chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
                record.level(),
                record.args()
            );
        }
    }

    fn flush(&self) {}
}

/// Initializes the logging system with text output.
///
/// # Arguments
/// * `level` - String representation of the log level ("debug", "info", "warn", "error")
///
/// # Returns
/// * `Result<(), SetLoggerError>` - fails only when another logger was
///   registered with the `log` facade first
pub fn init(level: &str) -> Result<(), SetLoggerError> {
    init_with_format(level, "text")
}

/// Initializes the logging system with the specified log level and format.
///
/// Calling this more than once is allowed; later calls only change the
/// level and format.
///
/// # Arguments
/// * `level` - String representation of the log level
/// * `format` - Log output format ("text" or "json")
pub fn init_with_format(level: &str, format: &str) -> Result<(), SetLoggerError> {
    INIT.get_or_try_init(|| {
        log::set_logger(&LOGGER)?;
        log::set_max_level(LevelFilter::Trace);
        Ok::<(), SetLoggerError>(())
    })?;

    JSON_FORMAT.store(LogFormat::parse(format) == LogFormat::Json, Ordering::Relaxed);
    update_log_level(level);
    Ok(())
}

/// Updates the current log level.
///
/// # Arguments
///
/// * `level` - the new level name; unknown names select "info"
pub fn update_log_level(level: &str) {
    let new_level = str_to_level_filter(level);
    CURRENT_LEVEL.store(new_level as usize, Ordering::Relaxed);
    log::set_max_level(new_level);
}

/// Returns the level currently applied by the logger.
pub fn current_level() -> LevelFilter {
    level_filter_from_usize(CURRENT_LEVEL.load(Ordering::Relaxed))
}

fn str_to_level_filter(level: &str) -> LevelFilter {
    match level.to_lowercase().as_str() {
        "off" => LevelFilter::Off,
        "error" => LevelFilter::Error,
        "warn" => LevelFilter::Warn,
        "info" => LevelFilter::Info,
        "debug" => LevelFilter::Debug,
        "trace" => LevelFilter::Trace,
        _ => LevelFilter::Info,
    }
}

fn level_filter_from_usize(v: usize) -> LevelFilter {
    match v {
        0 => LevelFilter::Off,
        1 => LevelFilter::Error,
        2 => LevelFilter::Warn,
        3 => LevelFilter::Info,
        4 => LevelFilter::Debug,
        5 => LevelFilter::Trace,
        _ => LevelFilter::Off,
    }
}

pub mod prelude {
    pub use log::{debug, error, info, trace, warn};
}
