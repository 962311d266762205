// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! JSON presentation module.
//!
//! Renders decoded trees as JSON for downstream collaborators.

pub mod render;

pub use render::{to_json_string, to_json_value, JsonOptions};
