// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Wire types and field tags.

use std::fmt;

/// Maximum encoded width of a varint, in bytes.
pub const MAX_VARINT_LEN: usize = 10;

/// Physical encoding of a field, carried in the low 3 bits of its tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WireType {
    /// 0: base-128 varint
    Varint,
    /// 1: 8 little-endian bytes (unsupported)
    Fixed64,
    /// 2: varint length followed by that many bytes
    LengthDelimited,
    /// 3: deprecated group start (unsupported)
    StartGroup,
    /// 4: deprecated group end (unsupported)
    EndGroup,
    /// 5: 4 little-endian bytes
    Fixed32,
    /// 6 and 7: not assigned by the protocol
    Reserved(u8),
}

impl WireType {
    /// Decode the 3-bit wire type code.
    pub fn from_code(code: u8) -> Self {
        match code & 0x07 {
            0 => WireType::Varint,
            1 => WireType::Fixed64,
            2 => WireType::LengthDelimited,
            3 => WireType::StartGroup,
            4 => WireType::EndGroup,
            5 => WireType::Fixed32,
            other => WireType::Reserved(other),
        }
    }

    /// The 3-bit wire type code.
    pub fn code(self) -> u8 {
        match self {
            WireType::Varint => 0,
            WireType::Fixed64 => 1,
            WireType::LengthDelimited => 2,
            WireType::StartGroup => 3,
            WireType::EndGroup => 4,
            WireType::Fixed32 => 5,
            WireType::Reserved(code) => code,
        }
    }

    /// Whether the decoder produces a value for this wire type.
    pub fn is_supported(self) -> bool {
        matches!(
            self,
            WireType::Varint | WireType::LengthDelimited | WireType::Fixed32
        )
    }

    /// Payload width in bytes, when fixed by the wire type.
    pub fn fixed_width(self) -> Option<usize> {
        match self {
            WireType::Fixed64 => Some(8),
            WireType::Fixed32 => Some(4),
            _ => None,
        }
    }
}

impl fmt::Display for WireType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WireType::Varint => write!(f, "varint"),
            WireType::Fixed64 => write!(f, "fixed64"),
            WireType::LengthDelimited => write!(f, "length-delimited"),
            WireType::StartGroup => write!(f, "start-group"),
            WireType::EndGroup => write!(f, "end-group"),
            WireType::Fixed32 => write!(f, "fixed32"),
            WireType::Reserved(code) => write!(f, "reserved({code})"),
        }
    }
}

/// A decoded field key: `tag = field_number << 3 | wire_type`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Tag {
    /// Field number from the schema
    pub field_number: u32,
    /// Physical encoding of the payload that follows
    pub wire_type: WireType,
}

impl Tag {
    /// Split a raw tag value. Returns `None` when the field number does not
    /// fit in 32 bits.
    ///
    /// Field number 0 is reserved by the protocol but still splits; see
    /// [`Tag::is_reserved`].
    pub fn from_raw(raw: u64) -> Option<Self> {
        let field_number = u32::try_from(raw >> 3).ok()?;
        Some(Self {
            field_number,
            wire_type: WireType::from_code((raw & 0x07) as u8),
        })
    }

    /// The raw tag value this tag was split from.
    pub fn raw(self) -> u64 {
        (u64::from(self.field_number) << 3) | u64::from(self.wire_type.code())
    }

    /// Whether the field number is the reserved value 0.
    pub fn is_reserved(self) -> bool {
        self.field_number == 0
    }
}
