/*
 * Copyright (c) 2025 Dylan Storey
 * Licensed under the Elastic License 2.0.
 * See LICENSE file in the project root for full license text.
 */

//! Error types for splitting, decoding and loading component files.
//!
//! ```text
//!   SplitError          ← invalid separator, input pushed after end of stream
//!   DecodeError         ← one document failed to decode (recorded, never fatal)
//!   SourceUnavailable   ← one file could not be read (recorded, never fatal)
//!   LoaderError         ← the load as a whole could not run
//! ```

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised by the document splitter.
#[derive(Debug, Error)]
pub enum SplitError {
    /// A separator must contain at least one byte.
    #[error("document separator must not be empty")]
    EmptySeparator,

    /// Input was pushed after the stream was marked finished.
    #[error("cannot push input after the end of the stream")]
    Finished,
}

/// Failure to turn one raw document into a resource envelope.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// The document is not valid YAML.
    #[error("invalid yaml: {0}")]
    Syntax(#[source] serde_yaml::Error),

    /// The document is valid YAML but does not have the envelope shape.
    #[error("invalid resource envelope: {0}")]
    Envelope(#[source] serde_yaml::Error),
}

/// A source file whose content could not be read.
#[derive(Debug, Error)]
#[error("unable to read {}: {source}", .path.display())]
pub struct SourceUnavailable {
    pub path: PathBuf,
    #[source]
    pub source: io::Error,
}

/// Errors that abort a whole load.
#[derive(Debug, Error)]
pub enum LoaderError {
    /// The components directory could not be enumerated.
    #[error("unable to read components directory {}: {source}", .path.display())]
    DirectoryUnavailable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The configured separator is unusable.
    #[error(transparent)]
    Split(#[from] SplitError),
}
