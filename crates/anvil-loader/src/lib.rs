/*
 * Copyright (c) 2025 Dylan Storey
 * Licensed under the Elastic License 2.0.
 * See LICENSE file in the project root for full license text.
 */

//! # Anvil Loader
//!
//! Loads `Component` resources from directories of multi-document YAML files.
//!
//! ## Pipeline
//!
//! ```text
//!   directory ──> yaml files ──> splitter ──> decoder ──> LoadReport
//!                 (sorted)       (raw docs)   (kind filter)
//! ```
//!
//! ### Splitter Module
//! Cuts a byte stream into raw documents on the `\n---` separator line,
//! independently of how the bytes were chunked.
//!
//! ### Decoder Module
//! Decodes raw documents into envelopes, keeps the `Component` kind and
//! records one diagnostic per malformed document.
//!
//! ### Loader Module
//! Enumerates a directory, streams each YAML file through the pipeline and
//! logs what went wrong without aborting the load.
//!
//! ## Example
//!
//! ```
//! use anvil_loader::decoder::decode_all;
//!
//! let outcome = decode_all(b"kind: Component\n---\nkind: Other\n", "inline.yaml");
//! assert_eq!(outcome.resources.len(), 1);
//! assert!(outcome.diagnostics.is_empty());
//! ```

pub mod cli;
pub mod decoder;
pub mod error;
pub mod loader;
pub mod splitter;

pub use decoder::{decode_all, DecodeOutcome, Diagnostic, ResourceDecoder};
pub use error::{DecodeError, LoaderError, SourceUnavailable, SplitError};
pub use loader::{is_yaml, ComponentLoader, LoadReport};
pub use splitter::{DocumentReader, DocumentSplitter, Documents, Separator};
