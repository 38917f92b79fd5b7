/*
 * Copyright (c) 2025 Dylan Storey
 * Licensed under the Elastic License 2.0.
 * See LICENSE file in the project root for full license text.
 */

//! # CLI Commands Module
//!
//! Both commands follow the same startup sequence:
//!
//! ```text
//!   Load Config -> Init Logger -> Build Loader -> Load Directory -> Write Output
//! ```
//!
//! `load` writes the accepted components to stdout. `check` writes one line
//! per problem and exits with a failure code when there is any. Logs always
//! go to stderr.

use super::OutputFormat;
use crate::loader::{ComponentLoader, LoadReport};
use anvil_models::Component;
use anvil_utils::logging::{self, prelude::*};
use anvil_utils::Settings;
use std::error::Error;
use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

pub fn load(
    config_file: Option<String>,
    path: Option<PathBuf>,
    format: OutputFormat,
) -> Result<ExitCode, Box<dyn Error>> {
    let report = prepare(config_file, path)?.load()?;
    let stdout = io::stdout();
    write_components(&mut stdout.lock(), &report.components, format)?;
    Ok(ExitCode::SUCCESS)
}

pub fn check(config_file: Option<String>, path: Option<PathBuf>) -> Result<ExitCode, Box<dyn Error>> {
    let report = prepare(config_file, path)?.load()?;
    let stdout = io::stdout();
    write_problems(&mut stdout.lock(), &report)?;
    if report.is_clean() {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::FAILURE)
    }
}

fn prepare(config_file: Option<String>, path: Option<PathBuf>) -> Result<ComponentLoader, Box<dyn Error>> {
    let settings = Settings::new(config_file)?;
    logging::init_with_format(&settings.log.level, &settings.log.format)?;

    let mut loader = ComponentLoader::from_settings(&settings)?;
    if let Some(path) = path {
        loader = loader.with_path(path);
    }
    info!("Loading components from {}", loader.path().display());
    Ok(loader)
}

/// Writes components as a multi-document YAML stream or a JSON array.
pub fn write_components<W: Write>(
    out: &mut W,
    components: &[Component],
    format: OutputFormat,
) -> Result<(), Box<dyn Error>> {
    match format {
        OutputFormat::Yaml => {
            for (index, component) in components.iter().enumerate() {
                if index > 0 {
                    writeln!(out, "---")?;
                }
                write!(out, "{}", serde_yaml::to_string(component)?)?;
            }
        }
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *out, components)?;
            writeln!(out)?;
        }
    }
    Ok(())
}

/// Writes one line per diagnostic and per unreadable file.
pub fn write_problems<W: Write>(out: &mut W, report: &LoadReport) -> io::Result<()> {
    for diagnostic in &report.diagnostics {
        writeln!(out, "error: {}", diagnostic)?;
    }
    for unavailable in &report.unavailable {
        writeln!(out, "unreadable: {}", unavailable)?;
    }
    writeln!(
        out,
        "{} components, {} invalid documents, {} unreadable files",
        report.components.len(),
        report.diagnostics.len(),
        report.unavailable.len()
    )
}
