// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Declarative decode schemas.
//!
//! A schema maps field numbers to names at each nesting level. A
//! [`SchemaNode::Message`] entry makes the decoder recurse into the field's
//! payload; a [`SchemaNode::Terminal`] entry only names the field.
//!
//! Schemas other than the built-in [`gtfs_realtime`] one are loaded from TOML
//! or JSON without code changes:
//!
//! ```toml
//! name = "FeedMessage"
//!
//! [fields.1]
//! name = "header"
//!
//! [fields.1.fields.1]
//! name = "gtfs_realtime_version"
//! ```

pub mod gtfs_realtime;

use std::collections::BTreeMap;
use std::path::Path;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::core::{CodecError, Result};

/// One level of a decode schema.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SchemaNode {
    /// A scalar or text field
    Terminal {
        /// Key used in the decoded tree
        name: String,
    },
    /// An embedded message with its own field table
    Message {
        /// Key used in the decoded tree
        name: String,
        /// Field number -> child schema
        children: BTreeMap<u32, SchemaNode>,
    },
}

impl SchemaNode {
    /// Create a terminal node.
    pub fn terminal(name: impl Into<String>) -> Self {
        SchemaNode::Terminal { name: name.into() }
    }

    /// Create a message node from `(field_number, child)` pairs.
    pub fn message(
        name: impl Into<String>,
        children: impl IntoIterator<Item = (u32, SchemaNode)>,
    ) -> Self {
        SchemaNode::Message {
            name: name.into(),
            children: children.into_iter().collect(),
        }
    }

    /// Name of this node.
    pub fn name(&self) -> &str {
        match self {
            SchemaNode::Terminal { name } | SchemaNode::Message { name, .. } => name,
        }
    }

    /// Check if this node describes an embedded message.
    pub fn is_message(&self) -> bool {
        matches!(self, SchemaNode::Message { .. })
    }

    /// Field table of a message node.
    pub fn children(&self) -> Option<&BTreeMap<u32, SchemaNode>> {
        match self {
            SchemaNode::Message { children, .. } => Some(children),
            SchemaNode::Terminal { .. } => None,
        }
    }

    /// Resolve a field number one level down.
    pub fn child(&self, field_number: u32) -> Option<&SchemaNode> {
        self.children()?.get(&field_number)
    }

    /// Nesting depth; a terminal is depth 0.
    pub fn depth(&self) -> usize {
        match self {
            SchemaNode::Terminal { .. } => 0,
            SchemaNode::Message { children, .. } => {
                1 + children.values().map(SchemaNode::depth).max().unwrap_or(0)
            }
        }
    }

    /// Number of field entries in the whole schema, at every level.
    pub fn field_count(&self) -> usize {
        self.children()
            .map(|children| {
                children
                    .values()
                    .map(|child| 1 + child.field_count())
                    .sum()
            })
            .unwrap_or(0)
    }

    /// Parse a schema from TOML text. `source` names the schema in errors.
    pub fn from_toml_str(source: &str, text: &str) -> Result<Self> {
        let def: SchemaDef =
            toml::from_str(text).map_err(|e| CodecError::invalid_schema(source, e.to_string()))?;
        def.into_node(source, "")
    }

    /// Parse a schema from JSON text. `source` names the schema in errors.
    pub fn from_json_str(source: &str, text: &str) -> Result<Self> {
        let def: SchemaDef = serde_json::from_str(text)
            .map_err(|e| CodecError::invalid_schema(source, e.to_string()))?;
        def.into_node(source, "")
    }

    /// Load a schema file; `.json` files are read as JSON, anything else as TOML.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let source = path.display().to_string();
        let text = std::fs::read_to_string(path)?;
        let is_json = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

        if is_json {
            Self::from_json_str(&source, &text)
        } else {
            Self::from_toml_str(&source, &text)
        }
    }

    /// Render this schema in the TOML file format.
    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string(&SchemaDef::from(self))
            .map_err(|e| CodecError::invalid_schema(self.name(), e.to_string()))
    }

    /// Render this schema in the JSON file format.
    pub fn to_json_string(&self) -> Result<String> {
        serde_json::to_string_pretty(&SchemaDef::from(self))
            .map_err(|e| CodecError::invalid_schema(self.name(), e.to_string()))
    }
}

/// On-disk form of a schema node. `fields` present means a message.
#[derive(Debug, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct SchemaDef {
    name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    fields: Option<IndexMap<String, SchemaDef>>,
}

impl SchemaDef {
    fn into_node(self, source: &str, path: &str) -> Result<SchemaNode> {
        if self.name.trim().is_empty() {
            return Err(CodecError::invalid_schema(
                source,
                format!("{}: name must not be empty", display_path(path)),
            ));
        }

        let Some(fields) = self.fields else {
            return Ok(SchemaNode::Terminal { name: self.name });
        };

        let mut children = BTreeMap::new();
        for (key, def) in fields {
            let child_path = if path.is_empty() {
                format!("fields.{key}")
            } else {
                format!("{path}.fields.{key}")
            };
            let field_number = key
                .trim()
                .parse::<u32>()
                .ok()
                .filter(|&n| n != 0)
                .ok_or_else(|| {
                    CodecError::invalid_schema(
                        source,
                        format!("{child_path}: field number must be a positive 32-bit integer"),
                    )
                })?;
            let child = def.into_node(source, &child_path)?;
            if children.insert(field_number, child).is_some() {
                return Err(CodecError::invalid_schema(
                    source,
                    format!("{child_path}: duplicate field number {field_number}"),
                ));
            }
        }

        Ok(SchemaNode::Message {
            name: self.name,
            children,
        })
    }
}

impl From<&SchemaNode> for SchemaDef {
    fn from(node: &SchemaNode) -> Self {
        match node {
            SchemaNode::Terminal { name } => SchemaDef {
                name: name.clone(),
                fields: None,
            },
            SchemaNode::Message { name, children } => SchemaDef {
                name: name.clone(),
                fields: Some(
                    children
                        .iter()
                        .map(|(number, child)| (number.to_string(), SchemaDef::from(child)))
                        .collect(),
                ),
            },
        }
    }
}

fn display_path(path: &str) -> &str {
    if path.is_empty() {
        "<root>"
    } else {
        path
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> SchemaNode {
        SchemaNode::message(
            "Feed",
            [
                (1, SchemaNode::message("header", [(1, SchemaNode::terminal("version"))])),
                (2, SchemaNode::terminal("id")),
            ],
        )
    }

    #[test]
    fn test_child_lookup() {
        let schema = sample();
        assert_eq!(schema.child(2), Some(&SchemaNode::terminal("id")));
        assert_eq!(schema.child(1).map(SchemaNode::name), Some("header"));
        assert_eq!(schema.child(3), None);
        assert_eq!(SchemaNode::terminal("x").child(1), None);
    }

    #[test]
    fn test_depth_and_field_count() {
        let schema = sample();
        assert_eq!(schema.depth(), 2);
        assert_eq!(schema.field_count(), 3);
        assert_eq!(SchemaNode::terminal("x").depth(), 0);
    }

    #[test]
    fn test_from_toml() {
        let text = r#"
            name = "Feed"

            [fields.2]
            name = "id"

            [fields.1]
            name = "header"

            [fields.1.fields.1]
            name = "version"
        "#;
        let schema = SchemaNode::from_toml_str("feed.toml", text).unwrap();
        assert_eq!(schema, sample());
    }

    #[test]
    fn test_from_json() {
        let text = r#"{
            "name": "Feed",
            "fields": {
                "1": { "name": "header", "fields": { "1": { "name": "version" } } },
                "2": { "name": "id" }
            }
        }"#;
        let schema = SchemaNode::from_json_str("feed.json", text).unwrap();
        assert_eq!(schema, sample());
    }

    #[test]
    fn test_empty_fields_table_is_message() {
        let text = "name = \"Empty\"\n[fields]\n";
        let schema = SchemaNode::from_toml_str("empty.toml", text).unwrap();
        assert!(schema.is_message());
        assert_eq!(schema.field_count(), 0);
    }

    #[test]
    fn test_rejects_non_numeric_key() {
        let text = "name = \"Feed\"\n[fields.abc]\nname = \"x\"\n";
        let err = SchemaNode::from_toml_str("bad.toml", text).unwrap_err();
        match err {
            CodecError::InvalidSchema {
                schema_name,
                reason,
            } => {
                assert_eq!(schema_name, "bad.toml");
                assert!(reason.contains("fields.abc"), "{reason}");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_rejects_field_zero() {
        let text = r#"{"name": "Feed", "fields": {"0": {"name": "x"}}}"#;
        assert!(matches!(
            SchemaNode::from_json_str("bad.json", text),
            Err(CodecError::InvalidSchema { .. })
        ));
    }

    #[test]
    fn test_rejects_empty_name() {
        let text = r#"{"name": "Feed", "fields": {"1": {"name": " "}}}"#;
        let err = SchemaNode::from_json_str("bad.json", text).unwrap_err();
        assert!(err.to_string().contains("fields.1: name must not be empty"));
    }

    #[test]
    fn test_rejects_unknown_keys() {
        let text = r#"{"name": "Feed", "type": "message"}"#;
        assert!(SchemaNode::from_json_str("bad.json", text).is_err());
    }

    #[test]
    fn test_toml_round_trip() {
        let schema = sample();
        let text = schema.to_toml_string().unwrap();
        assert_eq!(SchemaNode::from_toml_str("out.toml", &text).unwrap(), schema);
    }

    #[test]
    fn test_json_round_trip() {
        let schema = sample();
        let text = schema.to_json_string().unwrap();
        assert_eq!(SchemaNode::from_json_str("out.json", &text).unwrap(), schema);
    }
}
