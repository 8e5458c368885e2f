// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Blueprint validation.
//!
//! Parsing already rejects malformed fields. Validation adds the checks a
//! blueprint author wants before committing a file:
//! - the blueprint is not empty
//! - every prompt has something to send to the model
//! - prompt IDs are unique

use crate::loader::FileType;
use crate::model::ComparisonConfig;
use crate::parser::parse_and_normalize_blueprint;
use std::collections::HashSet;

/// Collection of validation errors
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationErrors {
    pub errors: Vec<ValidationError>,
}

impl std::fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(
            f,
            "Blueprint validation failed with {} error(s):",
            self.errors.len()
        )?;
        for (i, error) in self.errors.iter().enumerate() {
            writeln!(f, "  {}: {}", i + 1, error)?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

/// A single validation error
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Content could not be parsed or normalized
    Parse(String),
    /// No prompts and no header metadata
    EmptyBlueprint,
    /// Prompt has neither `prompt`, `promptText` nor `messages`
    MissingPromptText { prompt_id: String },
    /// Two prompts share an id
    DuplicatePromptId { prompt_id: String },
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationError::Parse(message) => write!(f, "{}", message),
            ValidationError::EmptyBlueprint => write!(
                f,
                "Blueprint must contain at least one prompt or config header."
            ),
            ValidationError::MissingPromptText { prompt_id } => write!(
                f,
                "Prompt '{}' must contain 'prompt' or 'messages'.",
                prompt_id
            ),
            ValidationError::DuplicatePromptId { prompt_id } => {
                write!(f, "Duplicate prompt id '{}'.", prompt_id)
            }
        }
    }
}

/// Parse and validate blueprint content.
pub fn validate_blueprint(
    content: &str,
    file_type: FileType,
) -> Result<ComparisonConfig, ValidationErrors> {
    let config = parse_and_normalize_blueprint(content, file_type).map_err(|e| ValidationErrors {
        errors: vec![ValidationError::Parse(e.to_string())],
    })?;
    validate_config(&config)?;
    Ok(config)
}

/// Validate an already normalized blueprint.
pub fn validate_config(config: &ComparisonConfig) -> Result<(), ValidationErrors> {
    let mut errors = Vec::new();

    if config.prompts.is_empty() && !config.has_header_metadata() {
        errors.push(ValidationError::EmptyBlueprint);
    }

    let mut seen = HashSet::new();
    let mut reported = HashSet::new();
    for prompt in &config.prompts {
        if prompt.messages.is_empty() {
            errors.push(ValidationError::MissingPromptText {
                prompt_id: prompt.id.clone(),
            });
        }
        if !seen.insert(prompt.id.as_str()) && reported.insert(prompt.id.as_str()) {
            errors.push(ValidationError::DuplicatePromptId {
                prompt_id: prompt.id.clone(),
            });
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        tracing::debug!(errors = errors.len(), "blueprint validation failed");
        Err(ValidationErrors { errors })
    }
}

#[cfg(test)]
#[path = "validator_tests.rs"]
mod tests;
