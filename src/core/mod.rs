// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Core types used throughout feedcodec.
//!
//! This module provides the foundational types for the library:
//! - [`CodecError`] - Decode, schema, and acquisition errors
//! - [`DecodedValue`] / [`DecodedTree`] - Decoded message representation

pub mod error;
pub mod value;

pub use error::{CodecError, Result};
pub use value::{lookup, merge_field, DecodedTree, DecodedValue};
