// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! User-friendly error display with context and suggestions.
//!
//! This module provides enhanced error types that include:
//! - What went wrong (message)
//! - Why it might have happened (context)
//! - How to fix it (suggestions)

use bp_blueprint::ParseError;
use std::fmt;
use std::path::Path;

/// A failed command, rendered for a person at a terminal.
#[derive(Debug)]
pub struct BpError {
    message: String,
    context: Vec<String>,
    suggestions: Vec<String>,
    source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl BpError {
    /// Create a new error with the given message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            context: Vec::new(),
            suggestions: Vec::new(),
            source: None,
        }
    }

    /// Add context about why this error might have happened.
    pub fn with_context(mut self, ctx: impl Into<String>) -> Self {
        self.context.push(ctx.into());
        self
    }

    /// Add a suggestion for how to fix this error.
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestions.push(suggestion.into());
        self
    }

    /// Set the source error that caused this error.
    pub fn with_source<E: std::error::Error + Send + Sync + 'static>(mut self, source: E) -> Self {
        self.source = Some(Box::new(source));
        self
    }
}

impl fmt::Display for BpError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "error: {}", self.message)?;

        if !self.context.is_empty() {
            writeln!(f)?;
            for ctx in &self.context {
                writeln!(f, "  -> {}", ctx)?;
            }
        }

        if !self.suggestions.is_empty() {
            writeln!(f)?;
            writeln!(f, "suggestions:")?;
            for (i, suggestion) in self.suggestions.iter().enumerate() {
                writeln!(f, "  {}. {}", i + 1, suggestion)?;
            }
        }

        Ok(())
    }
}

impl std::error::Error for BpError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_ref()
            .map(|e| e.as_ref() as &(dyn std::error::Error + 'static))
    }
}

/// Common error builders for blueprint commands.
impl BpError {
    /// The blueprint type could not be inferred from the file name.
    pub fn unknown_file_type(path: &Path) -> Self {
        BpError::new(format!(
            "Cannot tell whether '{}' is JSON or YAML",
            path.display()
        ))
        .with_context("Blueprint files end in .json, .yaml or .yml")
        .with_suggestion(format!(
            "Pass the type explicitly: bp normalize {} --type yaml",
            path.display()
        ))
    }

    /// The blueprint file could not be read.
    pub fn read_failed(path: &Path, source: std::io::Error) -> Self {
        BpError::new(format!("Failed to read '{}'", path.display()))
            .with_context(source.to_string())
            .with_suggestion("Check that the file exists and is readable")
            .with_source(source)
    }

    /// The blueprint was read but could not be normalized.
    pub fn parse_failed(path: &Path, source: ParseError) -> Self {
        let mut err = BpError::new(format!("Invalid blueprint '{}'", path.display()))
            .with_context(source.to_string());
        if matches!(source, ParseError::UndefinedRef { .. }) {
            err = err
                .with_suggestion("Define the name under 'point_defs' in the blueprint header");
        }
        if matches!(source, ParseError::Yaml(_) | ParseError::Json(_)) {
            err = err.with_suggestion("If the extension is wrong, pass --type json or --type yaml");
        }
        err.with_source(source)
    }
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
