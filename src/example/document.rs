//! Conversion of YAML/JSON documents into example trees.
//!
//! A document describes a node as a mapping:
//!
//! ```yaml
//! nodeTags: [Project]
//! fileset:
//!   nodeTags: [File]
//!   nodeName: fileset
//!   _match: true
//!   extension: ts
//! ```
//!
//! `nodeTags` (a string or a list of strings) gives the type tag, `nodeName`
//! the node name, and `_match: true` the match flag. A nested mapping is a
//! node only when it has both `nodeTags` and `nodeName`; other mappings,
//! sequences and nulls become [`Member::Ignored`].

use super::error::{ExampleError, Result};
use super::node::{ExampleNode, Member, Scalar, TypeTag};
use serde_json::{Map, Value};

/// Member holding the type tag.
pub const NODE_TAGS_KEY: &str = "nodeTags";
/// Member holding the node name.
pub const NODE_NAME_KEY: &str = "nodeName";
/// Member holding the match flag.
pub const MATCH_KEY: &str = "_match";

/// Parses a JSON document into an example.
pub fn from_json_str(content: &str) -> Result<ExampleNode> {
    let value: Value = serde_json::from_str(content)?;
    from_json_value(&value)
}

/// Parses a YAML document into an example.
pub fn from_yaml_str(content: &str) -> Result<ExampleNode> {
    let value: Value = serde_yaml::from_str(content)?;
    from_json_value(&value)
}

/// Converts a parsed document into an example.
///
/// The root only needs `nodeTags`; `nodeName` is optional there.
pub fn from_json_value(value: &Value) -> Result<ExampleNode> {
    match value {
        Value::Object(fields) => node_from_fields(fields, "$"),
        _ => Err(ExampleError::NotAMapping {
            path: "$".to_string(),
        }),
    }
}

fn node_from_fields(fields: &Map<String, Value>, path: &str) -> Result<ExampleNode> {
    let tag = fields
        .get(NODE_TAGS_KEY)
        .and_then(type_tag)
        .ok_or_else(|| ExampleError::MissingTypeTag {
            path: path.to_string(),
        })?;

    let mut node = ExampleNode::new(tag);
    if let Some(Value::String(name)) = fields.get(NODE_NAME_KEY) {
        node.set_name(name.clone());
    }
    if let Some(Value::Bool(true)) = fields.get(MATCH_KEY) {
        node = node.matched();
    }

    for (key, value) in fields {
        if key == NODE_TAGS_KEY || key == NODE_NAME_KEY || key == MATCH_KEY {
            continue;
        }
        let child_path = format!("{}.{}", path, key);
        node.insert(key.clone(), member(value, &child_path)?);
    }

    Ok(node)
}

fn member(value: &Value, path: &str) -> Result<Member> {
    let member = match value {
        Value::Null | Value::Array(_) => Member::Ignored,
        Value::Bool(b) => Member::Scalar(Scalar::Boolean(*b)),
        Value::String(s) => Member::Scalar(Scalar::Text(s.clone())),
        Value::Number(n) => match n.as_i64() {
            Some(i) => Member::Scalar(Scalar::Integer(i)),
            None => match n.as_f64() {
                Some(fl) => Member::Scalar(Scalar::Float(fl)),
                None => Member::Ignored,
            },
        },
        Value::Object(fields) if looks_like_node(fields) => {
            Member::Node(node_from_fields(fields, path)?)
        }
        Value::Object(_) => Member::Ignored,
    };
    Ok(member)
}

/// Nested mappings count as nodes only with both a tag and a name.
fn looks_like_node(fields: &Map<String, Value>) -> bool {
    fields.contains_key(NODE_TAGS_KEY) && fields.contains_key(NODE_NAME_KEY)
}

fn type_tag(value: &Value) -> Option<TypeTag> {
    match value {
        Value::String(label) if !label.is_empty() => Some(TypeTag::new(label.clone())),
        Value::Array(items) => {
            let labels: Option<Vec<String>> = items
                .iter()
                .map(|item| item.as_str().map(str::to_string))
                .collect();
            TypeTag::from_labels(labels?)
        }
        _ => None,
    }
}
