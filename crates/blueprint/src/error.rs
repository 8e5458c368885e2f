// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Errors raised while loading and normalizing a blueprint.
//!
//! Every message names the offending prompt, field or value so callers can
//! surface it to the user without further context.

use serde_json::Value;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur during blueprint parsing and normalization
#[derive(Debug, Error)]
pub enum ParseError {
    // ------------------------------------------------------------------
    // Document loading
    // ------------------------------------------------------------------
    #[error("Failed to parse JSON blueprint: {0}")]
    Json(String),

    #[error("Failed to parse YAML blueprint: {0}")]
    Yaml(String),

    #[error("Failed to parse YAML blueprint: non-finite number {found} is not supported.")]
    NonFiniteNumber { found: String },

    #[error("YAML blueprint is empty or contains only null documents.")]
    EmptyYaml,

    #[error("IO error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Unsupported blueprint file type for {path}: expected .json, .yaml or .yml")]
    UnknownFileType { path: PathBuf },

    #[error("Unsupported blueprint file type '{0}': expected 'json' or 'yaml'")]
    InvalidFileType(String),

    // ------------------------------------------------------------------
    // Document shape
    // ------------------------------------------------------------------
    #[error("Invalid YAML format: Document must be an object or array. Found: {found}")]
    InvalidDocument { found: &'static str },

    #[error("The 'prompts' key must contain a list of prompts.")]
    PromptsNotList,

    #[error("Prompt at index {index} is not a valid object.")]
    PromptNotObject { index: usize },

    // ------------------------------------------------------------------
    // Header metadata
    // ------------------------------------------------------------------
    #[error("Invalid 'author' object: missing 'name' string.")]
    AuthorMissingName,

    #[error("Invalid 'author' field: must be a string or an object with 'name'.")]
    InvalidAuthor,

    #[error("Invalid 'reference'/'citation' object: missing 'title' or 'name' string.")]
    ReferenceMissingTitle,

    #[error("Invalid 'reference'/'citation' entry: must be a string or an object with 'title' or 'name'. Found: {found}")]
    InvalidReference { found: String },

    #[error("Invalid 'models' field: must be an array. Found: {found}")]
    ModelsNotList { found: String },

    #[error("Invalid model definition '{model}': {reason}")]
    InvalidModel { model: String, reason: String },

    #[error("Invalid definition '{name}' in point_defs: must be a string or an object.")]
    InvalidDefinition { name: String },

    #[error("Invalid '{field}' in {context}: expected {expected}. Found: {found}")]
    InvalidField {
        field: String,
        context: String,
        expected: &'static str,
        found: String,
    },

    // ------------------------------------------------------------------
    // Point grammar
    // ------------------------------------------------------------------
    #[error("Nested arrays within nested arrays are not supported in prompt '{prompt_id}'.")]
    NestedArray { prompt_id: String },

    #[error("Nested arrays within alternative paths are not supported in prompt '{prompt_id}'.")]
    NestedAlternativePath { prompt_id: String },

    #[error("Invalid item in alternative path in prompt '{prompt_id}': Item must be a string or object. Found: {found}")]
    InvalidAlternative { prompt_id: String, found: String },

    #[error("Invalid point format in prompt '{prompt_id}': Point must be a string, array, or object. Found: {found}")]
    InvalidPointType { prompt_id: String, found: String },

    #[error("Invalid point in prompt '{prompt_id}': A point cannot have both 'text' and 'fn' defined.")]
    TextAndFunction { prompt_id: String },

    #[error("Invalid point in prompt '{prompt_id}': Point must define 'text', a function (e.g., '$contains'), or a 'Point: Citation' pair. Found: {found}")]
    MissingCriterion { prompt_id: String, found: String },

    #[error("Point multiplier must be a number between 0.1 and 10. Found {found}. Prompt ID: '{prompt_id}'")]
    InvalidMultiplier { found: String, prompt_id: String },

    // ------------------------------------------------------------------
    // References
    // ------------------------------------------------------------------
    #[error("Invalid $ref usage in prompt '{prompt_id}'. Expected a string name.")]
    InvalidRef { prompt_id: String },

    #[error("Undefined definition '{name}' referenced in prompt '{prompt_id}'.")]
    UndefinedRef { name: String, prompt_id: String },

    // ------------------------------------------------------------------
    // Prompts and messages
    // ------------------------------------------------------------------
    #[error("Each message in the shorthand format must have exactly one key (e.g., 'user', 'assistant'). Found {count} keys in message at index {index} of prompt '{prompt_id}'.")]
    MessageKeyCount {
        count: usize,
        index: usize,
        prompt_id: String,
    },

    #[error("Invalid role '{role}' in message at index {index} of prompt '{prompt_id}'. Must be one of 'user', 'assistant', 'system', or 'ai'.")]
    InvalidRole {
        role: String,
        index: usize,
        prompt_id: String,
    },

    #[error("Invalid message at index {index} of prompt '{prompt_id}': {reason}")]
    InvalidMessage {
        index: usize,
        prompt_id: String,
        reason: String,
    },

    #[error("Prompt weight must be a number between 0.1 and 10. Found {found}. Prompt ID: '{prompt_id}'")]
    InvalidWeight { found: String, prompt_id: String },

    #[error("Rubric '{key}' in prompt '{prompt_id}' must be a list.")]
    RubricNotList { key: &'static str, prompt_id: String },
}

impl ParseError {
    /// Build an [`ParseError::InvalidField`] for a value of the wrong type.
    pub(crate) fn invalid_field(
        field: &str,
        context: &str,
        expected: &'static str,
        found: &Value,
    ) -> Self {
        ParseError::InvalidField {
            field: field.to_string(),
            context: context.to_string(),
            expected,
            found: render_value(found),
        }
    }
}

/// Render a value for inclusion in an error message.
pub(crate) fn render_value(value: &Value) -> String {
    serde_json::to_string(value).unwrap_or_else(|_| value.to_string())
}

/// Name of a value's type, as reported by shape errors.
pub(crate) fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
