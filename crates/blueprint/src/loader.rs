// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Raw document loading (syntactic layer).
//!
//! Decodes blueprint text into untyped documents. No interpretation is
//! performed here; that is the job of the shape classifier.

use crate::error::ParseError;
use serde::Deserialize;
use serde_json::{Map, Number, Value};
use std::path::Path;

/// Encoding of a blueprint file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileType {
    Json,
    Yaml,
}

impl FileType {
    /// Infer the file type from a path's extension
    pub fn from_path(path: &Path) -> Result<Self, ParseError> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_ascii_lowercase());
        match extension.as_deref() {
            Some("json") => Ok(FileType::Json),
            Some("yaml") | Some("yml") => Ok(FileType::Yaml),
            _ => Err(ParseError::UnknownFileType {
                path: path.to_path_buf(),
            }),
        }
    }
}

impl std::str::FromStr for FileType {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "json" => Ok(FileType::Json),
            "yaml" | "yml" => Ok(FileType::Yaml),
            other => Err(ParseError::InvalidFileType(other.to_string())),
        }
    }
}

impl std::fmt::Display for FileType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FileType::Json => write!(f, "json"),
            FileType::Yaml => write!(f, "yaml"),
        }
    }
}

/// Decode blueprint content into its raw documents.
///
/// JSON content always yields exactly one document. YAML content may hold
/// several `---` separated documents; null documents are dropped.
pub fn load_documents(content: &str, file_type: FileType) -> Result<Vec<Value>, ParseError> {
    match file_type {
        FileType::Json => {
            let doc: Value =
                serde_json::from_str(content).map_err(|e| ParseError::Json(e.to_string()))?;
            Ok(vec![doc])
        }
        FileType::Yaml => load_yaml_stream(content),
    }
}

fn load_yaml_stream(content: &str) -> Result<Vec<Value>, ParseError> {
    let mut docs = Vec::new();
    for document in serde_yaml::Deserializer::from_str(content) {
        let doc = serde_yaml::Value::deserialize(document)
            .map_err(|e| ParseError::Yaml(e.to_string()))?;
        let doc = yaml_to_json(doc)?;
        if !doc.is_null() {
            docs.push(doc);
        }
    }

    if docs.is_empty() {
        return Err(ParseError::EmptyYaml);
    }
    tracing::debug!(documents = docs.len(), "loaded yaml blueprint");
    Ok(docs)
}

/// Convert a YAML value, keeping key order.
///
/// `.inf` and `.nan` have no JSON form and are rejected here rather than
/// decoded as null.
fn yaml_to_json(value: serde_yaml::Value) -> Result<Value, ParseError> {
    use serde_yaml::Value as Yaml;

    Ok(match value {
        Yaml::Null => Value::Null,
        Yaml::Bool(b) => Value::Bool(b),
        Yaml::Number(n) => yaml_number(&n)?,
        Yaml::String(s) => Value::String(s),
        Yaml::Sequence(items) => Value::Array(
            items
                .into_iter()
                .map(yaml_to_json)
                .collect::<Result<_, _>>()?,
        ),
        Yaml::Mapping(mapping) => {
            let mut map = Map::with_capacity(mapping.len());
            for (key, value) in mapping {
                map.insert(yaml_key(key)?, yaml_to_json(value)?);
            }
            Value::Object(map)
        }
        Yaml::Tagged(tagged) => yaml_to_json(tagged.value)?,
    })
}

fn yaml_number(n: &serde_yaml::Number) -> Result<Value, ParseError> {
    if let Some(i) = n.as_i64() {
        return Ok(Value::from(i));
    }
    if let Some(u) = n.as_u64() {
        return Ok(Value::from(u));
    }
    n.as_f64()
        .and_then(Number::from_f64)
        .map(Value::Number)
        .ok_or_else(|| ParseError::NonFiniteNumber {
            found: n.to_string(),
        })
}

// Scalar keys are written as strings, as a JSON object requires.
fn yaml_key(key: serde_yaml::Value) -> Result<String, ParseError> {
    use serde_yaml::Value as Yaml;

    match key {
        Yaml::String(s) => Ok(s),
        Yaml::Bool(b) => Ok(b.to_string()),
        Yaml::Number(n) => Ok(n.to_string()),
        Yaml::Null => Ok("null".to_string()),
        Yaml::Tagged(tagged) => yaml_key(tagged.value),
        Yaml::Sequence(_) | Yaml::Mapping(_) => Err(ParseError::Yaml(
            "mapping keys must be scalars".to_string(),
        )),
    }
}

#[cfg(test)]
#[path = "loader_tests.rs"]
mod tests;
