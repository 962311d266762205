// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! CLI subcommands.

mod decode;
mod schema;

pub use decode::DecodeCmd;
pub use schema::SchemaCmd;
