// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Decoded value type system.
//!
//! A decoded message is a [`DecodedTree`]: an insertion-ordered mapping from
//! field name (or stringified field number) to [`DecodedValue`]. Repeated
//! fields are folded into [`DecodedValue::List`] in wire order.

use std::fmt;

use indexmap::IndexMap;
use serde::Serialize;

/// Decoded message as field name -> value mapping, ordered by first appearance.
pub type DecodedTree = IndexMap<String, DecodedValue>;

/// A single decoded field value.
///
/// Serializes untagged, so a tree renders as plain JSON
/// (`{"id": "abc", "stop": [1, 2]}`).
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum DecodedValue {
    /// Varint payload, unsigned as read from the wire
    Integer(u64),

    /// Fixed32 payload reinterpreted as IEEE-754 single precision
    Float(f32),

    /// Length-delimited payload without a message schema
    Text(String),

    /// Embedded message decoded against its sub-schema
    Subtree(DecodedTree),

    /// Every occurrence of a repeated field, in wire order
    List(Vec<DecodedValue>),
}

impl DecodedValue {
    /// Try to get the integer value.
    pub fn as_u64(&self) -> Option<u64> {
        match self {
            DecodedValue::Integer(v) => Some(*v),
            _ => None,
        }
    }

    /// Try to get the float value.
    pub fn as_f32(&self) -> Option<f32> {
        match self {
            DecodedValue::Float(v) => Some(*v),
            _ => None,
        }
    }

    /// Try to get the inner string value.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            DecodedValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Try to get the embedded message.
    pub fn as_tree(&self) -> Option<&DecodedTree> {
        match self {
            DecodedValue::Subtree(t) => Some(t),
            _ => None,
        }
    }

    /// Try to get the aggregated repeated values.
    pub fn as_list(&self) -> Option<&[DecodedValue]> {
        match self {
            DecodedValue::List(items) => Some(items),
            _ => None,
        }
    }

    /// Check if this value aggregates a repeated field.
    pub fn is_list(&self) -> bool {
        matches!(self, DecodedValue::List(_))
    }

    /// Iterate the occurrences of a field: one item for a scalar or subtree,
    /// every element for a list.
    pub fn occurrences(&self) -> std::slice::Iter<'_, DecodedValue> {
        match self {
            DecodedValue::List(items) => items.iter(),
            other => std::slice::from_ref(other).iter(),
        }
    }

    /// Get the type name of this value as a string.
    pub fn type_name(&self) -> &'static str {
        match self {
            DecodedValue::Integer(_) => "integer",
            DecodedValue::Float(_) => "float",
            DecodedValue::Text(_) => "text",
            DecodedValue::Subtree(_) => "subtree",
            DecodedValue::List(_) => "list",
        }
    }
}

impl fmt::Display for DecodedValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DecodedValue::Integer(v) => write!(f, "{v}"),
            DecodedValue::Float(v) => write!(f, "{v}"),
            DecodedValue::Text(v) => write!(f, "\"{v}\""),
            DecodedValue::Subtree(v) => write!(f, "{{{} fields}}", v.len()),
            DecodedValue::List(v) => write!(f, "[{} elements]", v.len()),
        }
    }
}

/// Merge one decoded field into a tree.
///
/// An absent key is set directly. A key holding a single value becomes a
/// two-element list on its second appearance, and a list is appended to.
pub fn merge_field(tree: &mut DecodedTree, name: impl Into<String>, value: DecodedValue) {
    match tree.entry(name.into()) {
        indexmap::map::Entry::Vacant(slot) => {
            slot.insert(value);
        }
        indexmap::map::Entry::Occupied(mut slot) => match slot.get_mut() {
            DecodedValue::List(items) => items.push(value),
            existing => {
                let first = std::mem::replace(existing, DecodedValue::List(Vec::new()));
                *existing = DecodedValue::List(vec![first, value]);
            }
        },
    }
}

/// Follow a dotted path of field names through nested subtrees.
///
/// Lists are not traversed; address list elements through
/// [`DecodedValue::occurrences`].
pub fn lookup<'a>(tree: &'a DecodedTree, path: &str) -> Option<&'a DecodedValue> {
    let mut segments = path.split('.');
    let mut current = tree.get(segments.next()?)?;
    for segment in segments {
        current = current.as_tree()?.get(segment)?;
    }
    Some(current)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(s: &str) -> DecodedValue {
        DecodedValue::Text(s.to_string())
    }

    #[test]
    fn test_merge_first_appearance() {
        let mut tree = DecodedTree::new();
        merge_field(&mut tree, "id", text("a"));
        assert_eq!(tree.get("id"), Some(&text("a")));
    }

    #[test]
    fn test_merge_second_appearance_builds_pair() {
        let mut tree = DecodedTree::new();
        merge_field(&mut tree, "id", text("a"));
        merge_field(&mut tree, "id", text("b"));
        assert_eq!(tree.get("id"), Some(&DecodedValue::List(vec![text("a"), text("b")])));
    }

    #[test]
    fn test_merge_appends_in_order() {
        let mut tree = DecodedTree::new();
        for v in [3, 1, 2] {
            merge_field(&mut tree, "n", DecodedValue::Integer(v));
        }
        let items: Vec<u64> = tree["n"].occurrences().filter_map(|v| v.as_u64()).collect();
        assert_eq!(items, vec![3, 1, 2]);
    }

    #[test]
    fn test_merge_text_is_not_mistaken_for_list() {
        let mut tree = DecodedTree::new();
        merge_field(&mut tree, "label", text("abc"));
        merge_field(&mut tree, "label", text("de"));
        let list = tree["label"].as_list().unwrap();
        assert_eq!(list.len(), 2);
        assert_eq!(list[0], text("abc"));
    }

    #[test]
    fn test_insertion_order_is_first_appearance() {
        let mut tree = DecodedTree::new();
        merge_field(&mut tree, "b", DecodedValue::Integer(1));
        merge_field(&mut tree, "a", DecodedValue::Integer(2));
        merge_field(&mut tree, "b", DecodedValue::Integer(3));
        let keys: Vec<&str> = tree.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["b", "a"]);
    }

    #[test]
    fn test_lookup_nested() {
        let mut inner = DecodedTree::new();
        inner.insert("version".to_string(), text("2.0"));
        let mut tree = DecodedTree::new();
        tree.insert("header".to_string(), DecodedValue::Subtree(inner));

        assert_eq!(lookup(&tree, "header.version"), Some(&text("2.0")));
        assert_eq!(lookup(&tree, "header.missing"), None);
        assert_eq!(lookup(&tree, "header.version.deeper"), None);
    }

    #[test]
    fn test_accessors() {
        assert_eq!(DecodedValue::Integer(7).as_u64(), Some(7));
        assert_eq!(DecodedValue::Float(1.5).as_f32(), Some(1.5));
        assert_eq!(text("x").as_str(), Some("x"));
        assert_eq!(text("x").as_u64(), None);
        assert!(DecodedValue::List(vec![]).is_list());
        assert_eq!(DecodedValue::Subtree(DecodedTree::new()).type_name(), "subtree");
    }

    #[test]
    fn test_occurrences_of_scalar() {
        let v = DecodedValue::Integer(4);
        assert_eq!(v.occurrences().count(), 1);
    }

    #[test]
    fn test_display() {
        assert_eq!(DecodedValue::Integer(42).to_string(), "42");
        assert_eq!(text("hi").to_string(), "\"hi\"");
        assert_eq!(DecodedValue::List(vec![]).to_string(), "[0 elements]");
    }

    #[test]
    fn test_serialize_untagged() {
        let mut tree = DecodedTree::new();
        tree.insert("id".to_string(), text("abc"));
        tree.insert(
            "n".to_string(),
            DecodedValue::List(vec![DecodedValue::Integer(1), DecodedValue::Integer(2)]),
        );
        let json = serde_json::to_string(&tree).unwrap();
        assert_eq!(json, r#"{"id":"abc","n":[1,2]}"#);
    }
}
