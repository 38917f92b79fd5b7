/*
 * Copyright (c) 2025 Dylan Storey
 * Licensed under the Elastic License 2.0.
 * See LICENSE file in the project root for full license text.
 */

//! # Resource Decoder
//!
//! Pulls raw documents from the splitter, decodes each one into a
//! [`Component`] envelope and keeps the envelopes of the wanted kind.
//!
//! A document that fails to decode becomes a [`Diagnostic`] and the remaining
//! documents of the file are still decoded. Documents of another kind, and
//! blank documents, are dropped without a diagnostic.

use crate::error::DecodeError;
use crate::splitter::{DocumentReader, Documents, Separator};
use anvil_models::{Component, COMPONENT_KIND};
use std::fmt;
use std::io::{self, Read};

/// A document of a file that could not be decoded.
#[derive(Debug)]
pub struct Diagnostic {
    /// Identifier of the source file
    pub file: String,
    /// 1-based position of the document within the file
    pub document: usize,
    pub error: DecodeError,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (document {}): {}", self.file, self.document, self.error)
    }
}

/// Accepted resources and decode diagnostics, both in document order.
#[derive(Debug, Default)]
pub struct DecodeOutcome {
    pub resources: Vec<Component>,
    pub diagnostics: Vec<Diagnostic>,
}

impl DecodeOutcome {
    /// Appends another outcome, keeping the order of both.
    pub fn extend(&mut self, other: DecodeOutcome) {
        self.resources.extend(other.resources);
        self.diagnostics.extend(other.diagnostics);
    }

    pub fn is_clean(&self) -> bool {
        self.diagnostics.is_empty()
    }
}

/// Decodes documents and filters them on their `kind`.
#[derive(Debug, Clone)]
pub struct ResourceDecoder {
    kind: String,
}

impl Default for ResourceDecoder {
    fn default() -> Self {
        ResourceDecoder::for_kind(COMPONENT_KIND)
    }
}

impl ResourceDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn for_kind(kind: impl Into<String>) -> Self {
        ResourceDecoder { kind: kind.into() }
    }

    pub fn kind(&self) -> &str {
        &self.kind
    }

    /// Decodes one raw document.
    ///
    /// Returns `Ok(None)` for blank documents and for documents of another
    /// kind.
    pub fn decode_document(&self, raw: &[u8]) -> Result<Option<Component>, DecodeError> {
        if is_blank(raw) {
            return Ok(None);
        }
        let value: serde_yaml::Value = serde_yaml::from_slice(raw).map_err(DecodeError::Syntax)?;
        if value.is_null() {
            return Ok(None);
        }
        let component: Component = serde_yaml::from_value(value).map_err(DecodeError::Envelope)?;
        Ok(component.is_kind(&self.kind).then_some(component))
    }

    /// Splits `content` on the default separator and decodes every document.
    pub fn decode_all(&self, content: &[u8], file_id: &str) -> DecodeOutcome {
        self.decode_all_with(content, file_id, &Separator::default())
    }

    pub fn decode_all_with(
        &self,
        content: &[u8],
        file_id: &str,
        separator: &Separator,
    ) -> DecodeOutcome {
        let mut outcome = DecodeOutcome::default();
        for (index, raw) in Documents::new(content, separator.clone()).enumerate() {
            self.accept(&mut outcome, raw, file_id, index + 1);
        }
        outcome
    }

    /// Decodes every document pulled from `reader`.
    ///
    /// Read failures abort the file; decode failures never do.
    pub fn decode_reader<R: Read>(
        &self,
        reader: DocumentReader<R>,
        file_id: &str,
    ) -> io::Result<DecodeOutcome> {
        let mut outcome = DecodeOutcome::default();
        for (index, raw) in reader.enumerate() {
            self.accept(&mut outcome, &raw?, file_id, index + 1);
        }
        Ok(outcome)
    }

    fn accept(&self, outcome: &mut DecodeOutcome, raw: &[u8], file_id: &str, document: usize) {
        match self.decode_document(raw) {
            Ok(Some(component)) => outcome.resources.push(component),
            Ok(None) => {}
            Err(error) => outcome.diagnostics.push(Diagnostic {
                file: file_id.to_string(),
                document,
                error,
            }),
        }
    }
}

/// Decodes the components of one file's content.
pub fn decode_all(content: &[u8], file_id: &str) -> DecodeOutcome {
    ResourceDecoder::default().decode_all(content, file_id)
}

// Whitespace and comments only; the YAML parser reports such input as an
// unexpected end of stream rather than an empty document.
fn is_blank(raw: &[u8]) -> bool {
    raw.split(|&b| b == b'\n').all(|line| {
        let line = line.trim_ascii_start();
        line.is_empty() || line.starts_with(b"#")
    })
}
