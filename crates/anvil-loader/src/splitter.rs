/*
 * Copyright (c) 2025 Dylan Storey
 * Licensed under the Elastic License 2.0.
 * See LICENSE file in the project root for full license text.
 */

//! # Document Splitter
//!
//! Partitions a byte stream into YAML documents delimited by a separator
//! line (`\n---` by default).
//!
//! The splitting rule lives in [`scan`], a pure function of the bytes
//! buffered so far and whether more bytes can still arrive. Three drivers
//! share it:
//!
//! - [`Documents`]: zero-copy iterator over a complete in-memory buffer
//! - [`DocumentSplitter`]: owning push-based splitter for chunked input
//! - [`DocumentReader`]: pulls chunks from any [`std::io::Read`]
//!
//! ## State Machine
//!
//! ```text
//!   Scanning ──(token ready)──> emit ──> Scanning
//!   Scanning ──(input finished, buffer empty)──> Done
//! ```
//!
//! `Done` is terminal. Emission is not a resting state: a token is handed to
//! the caller by the call that found it.
//!
//! Every input byte ends up in exactly one emitted token or in the separator
//! line consumed between two tokens, and the token sequence does not depend
//! on how the input was chunked.

use crate::error::SplitError;
use std::borrow::Cow;
use std::io::{self, Read};

/// Separator used by YAML multi-document files.
pub const DEFAULT_SEPARATOR: &[u8] = b"\n---";

/// Default number of bytes requested per read by [`DocumentReader`].
pub const DEFAULT_READ_SIZE: usize = 4096;

/// A validated, non-empty document separator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Separator(Cow<'static, [u8]>);

impl Separator {
    /// Builds a separator from arbitrary bytes.
    pub fn new(bytes: impl Into<Vec<u8>>) -> Result<Self, SplitError> {
        let bytes = bytes.into();
        if bytes.is_empty() {
            return Err(SplitError::EmptySeparator);
        }
        Ok(Separator(Cow::Owned(bytes)))
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// A separator is never empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Default for Separator {
    fn default() -> Self {
        Separator(Cow::Borrowed(DEFAULT_SEPARATOR))
    }
}

/// Outcome of one scan over the buffered bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// `data[..len]` is a document; drop the first `advance` bytes.
    Emit { len: usize, advance: usize },
    /// No decision is possible until more bytes arrive.
    NeedMore,
    /// The stream is exhausted.
    End,
}

/// Decides what to do with the bytes buffered so far.
///
/// * `data` - bytes received and not yet consumed
/// * `at_eof` - true when no further bytes will arrive
///
/// A separator that is found ends the current document. Its line, up to and
/// including the next newline, is consumed. When the stream ends before that
/// newline shows up, the rest of the buffer is consumed instead.
pub fn scan(data: &[u8], at_eof: bool, separator: &Separator) -> Step {
    scan_from(data, at_eof, separator, 0).0
}

/// Same as [`scan`], with the separator search starting at `from`.
///
/// No separator may start before `from`. The second value is where the
/// next search of the same buffer, grown by later input, can resume after a
/// [`Step::NeedMore`].
fn scan_from(data: &[u8], at_eof: bool, separator: &Separator, from: usize) -> (Step, usize) {
    if data.is_empty() {
        return (if at_eof { Step::End } else { Step::NeedMore }, 0);
    }

    let sep = separator.as_bytes();
    let from = from.min(data.len());
    match find(&data[from..], sep).map(|offset| from + offset) {
        Some(start) => {
            let line_start = start + sep.len();
            match data[line_start..].iter().position(|&b| b == b'\n') {
                Some(newline) => (
                    Step::Emit {
                        len: start,
                        advance: line_start + newline + 1,
                    },
                    0,
                ),
                None if at_eof => (
                    Step::Emit {
                        len: start,
                        advance: data.len(),
                    },
                    0,
                ),
                // The separator line may continue, or be followed by another
                // separator, in bytes that have not arrived yet.
                None => (Step::NeedMore, start),
            }
        }
        None if at_eof => (
            Step::Emit {
                len: data.len(),
                advance: data.len(),
            },
            0,
        ),
        // A separator may still straddle the end of the buffer.
        None => (Step::NeedMore, data.len().saturating_sub(sep.len() - 1)),
    }
}

fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    if needle.len() > haystack.len() {
        return None;
    }
    haystack
        .windows(needle.len())
        .position(|window| window == needle)
}

/// Splits a complete buffer with the default separator.
pub fn split_documents(data: &[u8]) -> Documents<'_> {
    Documents::new(data, Separator::default())
}

/// Iterator over the documents of a complete in-memory buffer.
#[derive(Debug, Clone)]
pub struct Documents<'a> {
    rest: &'a [u8],
    separator: Separator,
}

impl<'a> Documents<'a> {
    pub fn new(data: &'a [u8], separator: Separator) -> Self {
        Documents {
            rest: data,
            separator,
        }
    }
}

impl<'a> Iterator for Documents<'a> {
    type Item = &'a [u8];

    fn next(&mut self) -> Option<Self::Item> {
        match scan(self.rest, true, &self.separator) {
            Step::Emit { len, advance } => {
                let token = &self.rest[..len];
                self.rest = &self.rest[advance..];
                Some(token)
            }
            Step::NeedMore | Step::End => None,
        }
    }
}

/// Lifecycle of a [`DocumentSplitter`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SplitState {
    Scanning,
    Done,
}

/// Result of asking a [`DocumentSplitter`] for its next document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Split {
    Document(Vec<u8>),
    NeedMore,
    End,
}

/// Push-based splitter for input that arrives in chunks.
///
/// ```
/// use anvil_loader::splitter::{DocumentSplitter, Split};
///
/// let mut splitter = DocumentSplitter::new();
/// splitter.push(b"kind: A\n-").unwrap();
/// assert_eq!(splitter.next_document(), Split::NeedMore);
///
/// splitter.push(b"--\nkind: B").unwrap();
/// assert_eq!(splitter.next_document(), Split::Document(b"kind: A".to_vec()));
/// assert_eq!(splitter.next_document(), Split::NeedMore);
///
/// splitter.finish();
/// assert_eq!(splitter.next_document(), Split::Document(b"kind: B".to_vec()));
/// assert_eq!(splitter.next_document(), Split::End);
/// ```
#[derive(Debug, Clone, Default)]
pub struct DocumentSplitter {
    separator: Separator,
    buf: Vec<u8>,
    /// Offset in `buf` where the next separator search starts
    search_from: usize,
    finished: bool,
    done: bool,
}

impl DocumentSplitter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_separator(separator: Separator) -> Self {
        DocumentSplitter {
            separator,
            ..Self::default()
        }
    }

    /// Appends a chunk of input.
    pub fn push(&mut self, chunk: &[u8]) -> Result<(), SplitError> {
        if self.finished {
            return Err(SplitError::Finished);
        }
        self.buf.extend_from_slice(chunk);
        Ok(())
    }

    /// Marks the end of input; buffered bytes are flushed by later calls to
    /// [`next_document`](Self::next_document).
    pub fn finish(&mut self) {
        self.finished = true;
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    pub fn state(&self) -> SplitState {
        if self.done {
            SplitState::Done
        } else {
            SplitState::Scanning
        }
    }

    /// Bytes received but not yet emitted or consumed.
    pub fn buffered(&self) -> usize {
        self.buf.len()
    }

    pub fn next_document(&mut self) -> Split {
        if self.done {
            return Split::End;
        }
        let (step, resume) = scan_from(&self.buf, self.finished, &self.separator, self.search_from);
        self.search_from = resume;
        match step {
            Step::Emit { len, advance } => {
                let token = self.buf[..len].to_vec();
                self.buf.drain(..advance);
                Split::Document(token)
            }
            Step::NeedMore => Split::NeedMore,
            Step::End => {
                self.done = true;
                Split::End
            }
        }
    }
}

/// Reads documents from an [`io::Read`] source in fixed-size chunks.
pub struct DocumentReader<R> {
    reader: R,
    splitter: DocumentSplitter,
    chunk: Vec<u8>,
}

impl<R: Read> DocumentReader<R> {
    pub fn new(reader: R) -> Self {
        Self::with_separator(reader, Separator::default(), DEFAULT_READ_SIZE)
    }

    /// A zero `read_size` is treated as one byte per read.
    pub fn with_separator(reader: R, separator: Separator, read_size: usize) -> Self {
        DocumentReader {
            reader,
            splitter: DocumentSplitter::with_separator(separator),
            chunk: vec![0; read_size.max(1)],
        }
    }

    /// Returns the next document, or `None` once the source is exhausted.
    pub fn next_document(&mut self) -> io::Result<Option<Vec<u8>>> {
        loop {
            match self.splitter.next_document() {
                Split::Document(document) => return Ok(Some(document)),
                Split::End => return Ok(None),
                Split::NeedMore => {}
            }

            let read = match self.reader.read(&mut self.chunk) {
                Ok(read) => read,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            };
            if read == 0 {
                self.splitter.finish();
            } else {
                self.splitter
                    .push(&self.chunk[..read])
                    .map_err(io::Error::other)?;
            }
        }
    }
}

impl<R: Read> Iterator for DocumentReader<R> {
    type Item = io::Result<Vec<u8>>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_document().transpose()
    }
}
