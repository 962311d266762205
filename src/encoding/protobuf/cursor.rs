// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Wire cursor for reading protobuf-encoded data.
//!
//! The cursor owns a position into one immutable buffer. Every read either
//! advances past exactly the bytes it consumed or fails without reading out
//! of bounds, so the position never exceeds the buffer length.
//!
//! # Example
//!
//! ```
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use feedcodec::encoding::protobuf::WireCursor;
//!
//! let data = [0x08, 0x96, 0x01];
//! let mut cursor = WireCursor::new(&data);
//! let tag = cursor.read_tag()?;
//! assert_eq!(tag.field_number, 1);
//! assert_eq!(cursor.read_varint()?, 150);
//! assert!(cursor.is_at_end());
//! # Ok(())
//! # }
//! ```

use byteorder::{ByteOrder, LittleEndian};

use super::wire::{Tag, MAX_VARINT_LEN};
use crate::CodecError;
use crate::Result as CoreResult;

/// Read-only cursor over one protobuf message buffer.
///
/// Embedded messages get their own cursor over their own slice, starting at
/// zero; see [`WireCursor::read_length_delimited`].
#[derive(Debug, Clone)]
pub struct WireCursor<'a> {
    /// The message bytes
    data: &'a [u8],
    /// Current read position
    offset: usize,
}

impl<'a> WireCursor<'a> {
    /// Create a cursor at the start of `data`.
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, offset: 0 }
    }

    /// Get the current position relative to the buffer start.
    #[inline]
    pub fn position(&self) -> usize {
        self.offset
    }

    /// Get the remaining bytes available to read.
    #[inline]
    pub fn remaining(&self) -> usize {
        self.data.len() - self.offset
    }

    /// Check if at end of buffer.
    #[inline]
    pub fn is_at_end(&self) -> bool {
        self.offset >= self.data.len()
    }

    /// Read a base-128 varint.
    ///
    /// The first byte holds the least-significant 7 bits. Up to 10 bytes are
    /// accepted; the 10th may only contribute the 64th bit.
    pub fn read_varint(&mut self) -> CoreResult<u64> {
        let start = self.offset;
        let mut value: u64 = 0;

        for (i, &byte) in self.data[start..].iter().take(MAX_VARINT_LEN).enumerate() {
            if i == MAX_VARINT_LEN - 1 && byte > 0x01 {
                return Err(CodecError::malformed_varint(start, "value exceeds 64 bits"));
            }
            value |= u64::from(byte & 0x7F) << (7 * i);
            if byte & 0x80 == 0 {
                self.offset = start + i + 1;
                return Ok(value);
            }
        }

        Err(CodecError::malformed_varint(start, "continuation runs past end of buffer"))
    }

    /// Read a field tag, itself encoded as a varint.
    ///
    /// Fails with `InvalidTag` only when the field number does not fit in
    /// 32 bits; field number 0 is returned for the caller to judge.
    pub fn read_tag(&mut self) -> CoreResult<Tag> {
        let start = self.offset;
        let raw = self.read_varint()?;
        Tag::from_raw(raw).ok_or_else(|| CodecError::invalid_tag(raw, start))
    }

    /// Read exactly `len` bytes.
    pub fn read_bytes(&mut self, len: u64) -> CoreResult<&'a [u8]> {
        let available = self.remaining();
        let len = usize::try_from(len)
            .ok()
            .filter(|&len| len <= available)
            .ok_or_else(|| CodecError::truncated(len, available, self.offset))?;
        let bytes = &self.data[self.offset..self.offset + len];
        self.offset += len;
        Ok(bytes)
    }

    /// Read a 4-byte little-endian IEEE-754 single precision float.
    ///
    /// The bit pattern is reinterpreted as-is: zero, subnormals, infinities
    /// and NaN payloads come through unchanged.
    pub fn read_fixed32(&mut self) -> CoreResult<f32> {
        let bytes = self.read_bytes(4)?;
        Ok(LittleEndian::read_f32(bytes))
    }

    /// Read a varint length prefix and return the payload slice it covers.
    pub fn read_length_delimited(&mut self) -> CoreResult<&'a [u8]> {
        let len = self.read_varint()?;
        self.read_bytes(len)
    }

    /// Skip `len` bytes.
    pub fn skip(&mut self, len: usize) -> CoreResult<()> {
        self.read_bytes(len as u64).map(|_| ())
    }
}
