// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Feed byte sources.
//!
//! A source produces one complete message buffer per fetch. Sources block;
//! run them through [`spawn_fetch`](super::spawn_fetch) to get an explicit
//! completion signal.

use std::io::Read;
use std::path::{Path, PathBuf};

use crate::core::{CodecError, Result};

/// Producer of complete feed buffers.
pub trait FeedSource: Send {
    /// Human-readable origin, used in logs and errors.
    fn describe(&self) -> String;

    /// Fetch one complete buffer. Returns only once every byte is in hand.
    fn fetch(&mut self) -> Result<Vec<u8>>;
}

impl<S: FeedSource + ?Sized> FeedSource for Box<S> {
    fn describe(&self) -> String {
        (**self).describe()
    }

    fn fetch(&mut self) -> Result<Vec<u8>> {
        (**self).fetch()
    }
}

/// Reads a whole file.
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    /// Create a source for the given path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Get the file path.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl FeedSource for FileSource {
    fn describe(&self) -> String {
        self.path.display().to_string()
    }

    fn fetch(&mut self) -> Result<Vec<u8>> {
        std::fs::read(&self.path)
            .map_err(|e| CodecError::Io(format!("{}: {e}", self.path.display())))
    }
}

/// Reads any byte stream to its end.
pub struct ReaderSource<R> {
    reader: R,
    label: String,
}

impl<R: Read + Send> ReaderSource<R> {
    /// Wrap a reader.
    pub fn new(reader: R, label: impl Into<String>) -> Self {
        Self {
            reader,
            label: label.into(),
        }
    }
}

impl ReaderSource<std::io::Stdin> {
    /// Read from standard input.
    pub fn stdin() -> Self {
        Self::new(std::io::stdin(), "<stdin>")
    }
}

impl<R: Read + Send> FeedSource for ReaderSource<R> {
    fn describe(&self) -> String {
        self.label.clone()
    }

    fn fetch(&mut self) -> Result<Vec<u8>> {
        let mut buffer = Vec::new();
        self.reader.read_to_end(&mut buffer)?;
        Ok(buffer)
    }
}

/// Already materialized bytes.
#[derive(Debug, Clone)]
pub struct MemorySource {
    bytes: Vec<u8>,
}

impl MemorySource {
    /// Wrap a buffer.
    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            bytes: bytes.into(),
        }
    }
}

impl FeedSource for MemorySource {
    fn describe(&self) -> String {
        format!("<memory: {} bytes>", self.bytes.len())
    }

    fn fetch(&mut self) -> Result<Vec<u8>> {
        Ok(self.bytes.clone())
    }
}

/// Decodes a hex dump (`0a 03 61 62 63`) produced by another source.
///
/// Whitespace between digits is ignored.
pub struct HexSource<S> {
    inner: S,
}

impl<S: FeedSource> HexSource<S> {
    /// Wrap a source whose bytes are hex text.
    pub fn new(inner: S) -> Self {
        Self { inner }
    }
}

impl<S: FeedSource> FeedSource for HexSource<S> {
    fn describe(&self) -> String {
        format!("hex:{}", self.inner.describe())
    }

    fn fetch(&mut self) -> Result<Vec<u8>> {
        let raw = self.inner.fetch()?;
        parse_hex(&raw).map_err(|reason| {
            CodecError::acquisition(format!("{}: {reason}", self.inner.describe()))
        })
    }
}

/// Parse hex text, ignoring ASCII whitespace.
pub fn parse_hex(text: &[u8]) -> std::result::Result<Vec<u8>, String> {
    let digits: Vec<u8> = text
        .iter()
        .copied()
        .filter(|b| !b.is_ascii_whitespace())
        .collect();
    hex::decode(&digits).map_err(|e| format!("invalid hex input: {e}"))
}
