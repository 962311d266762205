// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! JSON rendering of decoded trees.
//!
//! Float values are held at full single precision in the tree; rounding to a
//! fixed number of fractional digits happens here, at presentation time only.
//!
//! ## Example
//!
//! ```
//! use feedcodec::encoding::json::{to_json_value, JsonOptions};
//! use feedcodec::{DecodedTree, DecodedValue};
//!
//! let mut tree = DecodedTree::new();
//! tree.insert("speed".to_string(), DecodedValue::Float(12.345678));
//! let json = to_json_value(&tree, &JsonOptions::default());
//! assert_eq!(json["speed"], 12.34568);
//! ```

use serde_json::{Map, Number, Value};

use crate::core::{CodecError, DecodedTree, DecodedValue, Result as CoreResult};

/// Fractional digits kept for floats unless configured otherwise.
pub const DEFAULT_FLOAT_PRECISION: u32 = 5;

/// JSON rendering options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JsonOptions {
    /// Round floats to this many fractional digits; `None` keeps the shortest
    /// representation that round-trips the stored `f32`.
    pub float_precision: Option<u32>,
    /// Indent the output
    pub pretty: bool,
}

impl Default for JsonOptions {
    fn default() -> Self {
        Self {
            float_precision: Some(DEFAULT_FLOAT_PRECISION),
            pretty: false,
        }
    }
}

impl JsonOptions {
    /// Set the float precision.
    pub fn with_float_precision(mut self, precision: Option<u32>) -> Self {
        self.float_precision = precision;
        self
    }

    /// Enable or disable indentation.
    pub fn with_pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }
}

/// Convert a decoded tree to a JSON value.
pub fn to_json_value(tree: &DecodedTree, options: &JsonOptions) -> Value {
    Value::Object(tree_to_map(tree, options))
}

/// Serialize a decoded tree to a JSON string.
pub fn to_json_string(tree: &DecodedTree, options: &JsonOptions) -> CoreResult<String> {
    let value = to_json_value(tree, options);
    let result = if options.pretty {
        serde_json::to_string_pretty(&value)
    } else {
        serde_json::to_string(&value)
    };
    result.map_err(|e| CodecError::Other(format!("JSON serialization failed: {e}")))
}

fn tree_to_map(tree: &DecodedTree, options: &JsonOptions) -> Map<String, Value> {
    tree.iter()
        .map(|(key, value)| (key.clone(), value_to_json(value, options)))
        .collect()
}

fn value_to_json(value: &DecodedValue, options: &JsonOptions) -> Value {
    match value {
        DecodedValue::Integer(v) => Value::Number(Number::from(*v)),
        DecodedValue::Float(v) => float_to_json(*v, options.float_precision),
        DecodedValue::Text(s) => Value::String(s.clone()),
        DecodedValue::Subtree(tree) => Value::Object(tree_to_map(tree, options)),
        DecodedValue::List(items) => Value::Array(
            items
                .iter()
                .map(|item| value_to_json(item, options))
                .collect(),
        ),
    }
}

fn float_to_json(value: f32, precision: Option<u32>) -> Value {
    if !value.is_finite() {
        return Value::Null;
    }
    // Shortest decimal form of the f32, so 0.1f32 renders as 0.1.
    let widened: f64 = value.to_string().parse().unwrap_or(f64::from(value));
    let rendered = match precision {
        Some(digits) => round_to(widened, digits),
        None => widened,
    };
    Number::from_f64(rendered).map_or(Value::Null, Value::Number)
}

fn round_to(value: f64, digits: u32) -> f64 {
    let factor = 10f64.powi(digits.min(i32::MAX as u32) as i32);
    let rounded = (value * factor).round() / factor;
    if rounded.is_finite() {
        rounded
    } else {
        value
    }
}
