/*
 * Copyright (c) 2025 Dylan Storey
 * Licensed under the Elastic License 2.0.
 * See LICENSE file in the project root for full license text.
 */

//! # Component Loader
//!
//! Loads every component defined in the YAML files of one directory.
//!
//! Files are visited in file name order. Subdirectories and files without a
//! `.yaml` / `.yml` extension (case-insensitive) are ignored. Each file is
//! streamed through the splitter in chunks of the configured read size.
//!
//! Failure handling:
//! - a document that does not decode is reported as a [`Diagnostic`]
//! - a file that cannot be read is reported as [`SourceUnavailable`] and
//!   contributes no components
//! - only a directory that cannot be enumerated fails the whole load

use crate::decoder::{DecodeOutcome, Diagnostic, ResourceDecoder};
use crate::error::{LoaderError, SourceUnavailable};
use crate::splitter::{DocumentReader, Separator, DEFAULT_READ_SIZE};
use anvil_models::Component;
use anvil_utils::logging::prelude::*;
use anvil_utils::Settings;
use std::fs::{self, File};
use std::io::Read;
use std::path::{Path, PathBuf};

/// Everything recovered from one load.
#[derive(Debug, Default)]
pub struct LoadReport {
    /// Accepted components, in file then document order
    pub components: Vec<Component>,
    /// Documents that failed to decode
    pub diagnostics: Vec<Diagnostic>,
    /// Files that could not be read
    pub unavailable: Vec<SourceUnavailable>,
}

impl LoadReport {
    /// True when every file was read and every document decoded.
    pub fn is_clean(&self) -> bool {
        self.diagnostics.is_empty() && self.unavailable.is_empty()
    }

    /// Adds the result of one file, logging what went wrong with it.
    fn record(&mut self, path: &Path, result: Result<DecodeOutcome, SourceUnavailable>) {
        match result {
            Ok(outcome) => {
                for diagnostic in &outcome.diagnostics {
                    warn!(
                        "load components error when parsing components yaml resource in {} : {}",
                        path.display(),
                        diagnostic.error
                    );
                }
                self.components.extend(outcome.resources);
                self.diagnostics.extend(outcome.diagnostics);
            }
            Err(unavailable) => {
                warn!(
                    "load components error when reading file {} : {}",
                    path.display(),
                    unavailable.source
                );
                self.unavailable.push(unavailable);
            }
        }
    }
}

/// Loads component definitions from a directory.
#[derive(Debug, Clone)]
pub struct ComponentLoader {
    path: PathBuf,
    separator: Separator,
    read_buffer_size: usize,
    decoder: ResourceDecoder,
}

impl ComponentLoader {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        ComponentLoader {
            path: path.into(),
            separator: Separator::default(),
            read_buffer_size: DEFAULT_READ_SIZE,
            decoder: ResourceDecoder::default(),
        }
    }

    /// Builds a loader from the `loader` section of the settings.
    pub fn from_settings(settings: &Settings) -> Result<Self, LoaderError> {
        let separator = Separator::new(settings.loader.separator.as_bytes())?;
        Ok(Self::new(&settings.loader.components_path)
            .with_separator(separator)
            .with_read_buffer_size(settings.loader.read_buffer_size))
    }

    pub fn with_separator(mut self, separator: Separator) -> Self {
        self.separator = separator;
        self
    }

    pub fn with_read_buffer_size(mut self, size: usize) -> Self {
        self.read_buffer_size = size.max(1);
        self
    }

    pub fn with_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.path = path.into();
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads all components of the directory.
    pub fn load(&self) -> Result<LoadReport, LoaderError> {
        let files = self.yaml_files()?;
        debug!(
            "found {} yaml files in {}",
            files.len(),
            self.path.display()
        );

        let mut report = LoadReport::default();
        for path in files {
            report.record(&path, self.load_file(&path));
        }

        info!(
            "loaded {} components from {}",
            report.components.len(),
            self.path.display()
        );
        Ok(report)
    }

    /// Loads the components of a single file.
    ///
    /// A read failure discards whatever the file produced before it.
    pub fn load_file(&self, path: &Path) -> Result<DecodeOutcome, SourceUnavailable> {
        let unavailable = |source| SourceUnavailable {
            path: path.to_path_buf(),
            source,
        };
        let file = File::open(path).map_err(unavailable)?;
        self.load_source(file, path)
    }

    /// Loads the components read from `source`, reported under `path`.
    pub fn load_source<R: Read>(&self, source: R, path: &Path) -> Result<DecodeOutcome, SourceUnavailable> {
        let reader = DocumentReader::with_separator(source, self.separator.clone(), self.read_buffer_size);
        self.decoder
            .decode_reader(reader, &path.display().to_string())
            .map_err(|source| SourceUnavailable {
                path: path.to_path_buf(),
                source,
            })
    }

    fn yaml_files(&self) -> Result<Vec<PathBuf>, LoaderError> {
        let unavailable = |source| LoaderError::DirectoryUnavailable {
            path: self.path.clone(),
            source,
        };

        let mut files = Vec::new();
        for entry in fs::read_dir(&self.path).map_err(unavailable)? {
            let entry = entry.map_err(unavailable)?;
            if entry.file_type().map_err(unavailable)?.is_dir() {
                continue;
            }
            if is_yaml(&entry.file_name().to_string_lossy()) {
                files.push(entry.path());
            }
        }
        files.sort();
        Ok(files)
    }
}

/// Checks whether a file name carries a YAML extension.
pub fn is_yaml(file_name: &str) -> bool {
    match file_name.rsplit_once('.') {
        Some((_, extension)) => {
            extension.eq_ignore_ascii_case("yaml") || extension.eq_ignore_ascii_case("yml")
        }
        None => false,
    }
}
