// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Document shape classification.
//!
//! Blueprints carry no version tag, so the layout is sniffed from the
//! documents themselves. Single-document layouts are an ordered rule table;
//! the first rule whose predicate matches extracts the header and prompts.

use crate::error::{type_name, ParseError};
use crate::loader::FileType;
use serde_json::{Map, Value};

/// Keys that mark a document as a blueprint header
pub const HEADER_KEYS: &[&str] = &[
    "models",
    "id",
    "title",
    "system",
    "evaluationConfig",
    "configId",
    "configTitle",
    "point_defs",
    "defs",
];

/// Keys that mark a document as a prompt
pub const PROMPT_KEYS: &[&str] = &["prompt", "messages", "should", "ideal", "points"];

/// Recognized blueprint layouts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentShape {
    /// A bare list of prompts
    PromptList,
    /// One object with a `prompts` list
    PromptsField,
    /// JSON object without a `prompts` list
    LegacyJson,
    /// One YAML object that is itself a prompt
    SinglePrompt,
    /// One YAML object with no prompts; a `prompts` key may only be null
    HeaderOnly,
    /// Header document followed by prompt documents
    HeaderAndPrompts,
    /// Every document is a prompt (or a list of prompts)
    PromptStream,
}

/// Result of classifying the raw documents
#[derive(Debug, Clone, PartialEq)]
pub struct ClassifiedDocuments {
    pub shape: DocumentShape,
    pub header: Map<String, Value>,
    pub prompts: Vec<Value>,
}

type Extracted = (Map<String, Value>, Vec<Value>);

struct ShapeRule {
    shape: DocumentShape,
    matches: fn(&Value, FileType) -> bool,
    extract: fn(Value) -> Result<Extracted, ParseError>,
}

const SINGLE_DOCUMENT_RULES: &[ShapeRule] = &[
    ShapeRule {
        shape: DocumentShape::PromptList,
        matches: |doc, _| doc.is_array(),
        extract: extract_prompt_list,
    },
    ShapeRule {
        shape: DocumentShape::PromptsField,
        matches: |doc, _| doc.get("prompts").is_some_and(Value::is_array),
        extract: extract_prompts_field,
    },
    ShapeRule {
        shape: DocumentShape::LegacyJson,
        matches: |doc, file_type| file_type == FileType::Json && doc.is_object(),
        extract: extract_prompts_field,
    },
    ShapeRule {
        shape: DocumentShape::SinglePrompt,
        matches: |doc, file_type| {
            file_type == FileType::Yaml && doc.is_object() && has_any_key(doc, PROMPT_KEYS)
        },
        extract: extract_single_prompt,
    },
    ShapeRule {
        shape: DocumentShape::HeaderOnly,
        matches: |doc, file_type| file_type == FileType::Yaml && doc.is_object(),
        extract: extract_prompts_field,
    },
];

/// Split raw documents into a header object and a list of raw prompts.
pub fn classify_documents(
    docs: Vec<Value>,
    file_type: FileType,
) -> Result<ClassifiedDocuments, ParseError> {
    let classified = if docs.len() == 1 {
        let doc = docs.into_iter().next().unwrap_or(Value::Null);
        classify_single(doc, file_type)?
    } else {
        classify_stream(docs)
    };

    tracing::debug!(
        shape = ?classified.shape,
        prompts = classified.prompts.len(),
        "classified blueprint documents"
    );
    Ok(classified)
}

fn classify_single(doc: Value, file_type: FileType) -> Result<ClassifiedDocuments, ParseError> {
    let rule = SINGLE_DOCUMENT_RULES
        .iter()
        .find(|rule| (rule.matches)(&doc, file_type))
        .ok_or(ParseError::InvalidDocument {
            found: type_name(&doc),
        })?;

    if rule.shape == DocumentShape::HeaderOnly && !has_any_key(&doc, HEADER_KEYS) {
        tracing::warn!("document has neither header nor prompt keys; treating it as a header");
    }

    let (header, prompts) = (rule.extract)(doc)?;
    Ok(ClassifiedDocuments {
        shape: rule.shape,
        header,
        prompts,
    })
}

fn classify_stream(docs: Vec<Value>) -> ClassifiedDocuments {
    let header_first = docs.first().is_some_and(is_config_header);
    if header_first {
        let mut docs = docs.into_iter();
        let header = match docs.next() {
            Some(Value::Object(map)) => map,
            _ => Map::new(),
        };
        return ClassifiedDocuments {
            shape: DocumentShape::HeaderAndPrompts,
            header,
            prompts: flatten_one_level(docs),
        };
    }

    let unmarked = docs.first().is_some_and(|doc| {
        doc.is_object() && !has_any_key(doc, HEADER_KEYS) && !has_any_key(doc, PROMPT_KEYS)
    });
    if unmarked {
        tracing::warn!(
            "first document has neither header nor prompt keys; treating every document as a prompt"
        );
    }

    ClassifiedDocuments {
        shape: DocumentShape::PromptStream,
        header: Map::new(),
        prompts: flatten_one_level(docs.into_iter()),
    }
}

/// Whether a document is a blueprint header rather than a prompt
pub fn is_config_header(doc: &Value) -> bool {
    doc.is_object() && has_any_key(doc, HEADER_KEYS) && !has_any_key(doc, PROMPT_KEYS)
}

fn has_any_key(doc: &Value, keys: &[&str]) -> bool {
    doc.as_object()
        .is_some_and(|map| keys.iter().any(|key| map.contains_key(*key)))
}

fn flatten_one_level(docs: impl Iterator<Item = Value>) -> Vec<Value> {
    let mut prompts = Vec::new();
    for doc in docs {
        match doc {
            Value::Array(items) => prompts.extend(items),
            other => prompts.push(other),
        }
    }
    prompts
}

fn extract_prompt_list(doc: Value) -> Result<Extracted, ParseError> {
    match doc {
        Value::Array(prompts) => Ok((Map::new(), prompts)),
        other => Err(ParseError::InvalidDocument {
            found: type_name(&other),
        }),
    }
}

fn extract_prompts_field(doc: Value) -> Result<Extracted, ParseError> {
    let map = match doc {
        Value::Object(map) => map,
        other => {
            return Err(ParseError::InvalidDocument {
                found: type_name(&other),
            })
        }
    };

    let mut header = Map::new();
    let mut prompts = Vec::new();
    for (key, value) in map {
        if key == "prompts" {
            prompts = match value {
                Value::Array(items) => items,
                Value::Null => Vec::new(),
                _ => return Err(ParseError::PromptsNotList),
            };
        } else {
            header.insert(key, value);
        }
    }
    Ok((header, prompts))
}

fn extract_single_prompt(doc: Value) -> Result<Extracted, ParseError> {
    Ok((Map::new(), vec![doc]))
}


#[cfg(test)]
#[path = "shape_tests.rs"]
mod tests;
