// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Blueprint parsing entry points

use crate::error::ParseError;
use crate::header::normalize_header;
use crate::loader::{load_documents, FileType};
use crate::model::ComparisonConfig;
use crate::prompt::normalize_prompt;
use crate::shape::classify_documents;
use std::path::Path;

/// Parse blueprint content and normalize it into a [`ComparisonConfig`].
///
/// Any malformed prompt, point or header field aborts the whole parse.
///
/// # Example
///
/// ```ignore
/// let yaml = r#"
/// id: demo
/// models: [gpt-4]
/// ---
/// - prompt: "Say hi"
///   should: ["Contains greeting"]
/// "#;
///
/// let config = parse_and_normalize_blueprint(yaml, FileType::Yaml)?;
/// assert_eq!(config.id.as_deref(), Some("demo"));
/// ```
pub fn parse_and_normalize_blueprint(
    content: &str,
    file_type: FileType,
) -> Result<ComparisonConfig, ParseError> {
    let docs = load_documents(content, file_type)?;
    let classified = classify_documents(docs, file_type)?;
    let header = normalize_header(&classified.header)?;

    let prompts = classified
        .prompts
        .iter()
        .enumerate()
        .map(|(index, raw)| normalize_prompt(raw, index, &header.defs))
        .collect::<Result<Vec<_>, _>>()?;

    tracing::debug!(
        id = header.config.id.as_deref().unwrap_or(""),
        prompts = prompts.len(),
        "normalized blueprint"
    );

    Ok(ComparisonConfig {
        prompts,
        ..header.config
    })
}

/// Parse a blueprint file, inferring its type from the extension.
pub fn parse_blueprint_file(path: &Path) -> Result<ComparisonConfig, ParseError> {
    let file_type = FileType::from_path(path)?;
    let content = std::fs::read_to_string(path).map_err(|e| ParseError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;
    parse_and_normalize_blueprint(&content, file_type)
}

#[cfg(test)]
#[path = "parser_tests.rs"]
mod tests;
