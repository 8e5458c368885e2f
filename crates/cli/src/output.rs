// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Output formatting for CLI commands

use clap::ValueEnum;
use serde::Serialize;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Json,
    Yaml,
}

/// Render a value in the specified format.
///
/// `compact` only affects JSON; YAML is always block style.
pub fn render<T: Serialize>(
    value: &T,
    format: OutputFormat,
    compact: bool,
) -> anyhow::Result<String> {
    let rendered = match format {
        OutputFormat::Json if compact => serde_json::to_string(value)?,
        OutputFormat::Json => serde_json::to_string_pretty(value)?,
        OutputFormat::Yaml => serde_yaml::to_string(value)?,
    };
    Ok(rendered.trim_end().to_string())
}

/// Print a value in the specified format
pub fn print<T: Serialize>(value: &T, format: OutputFormat, compact: bool) -> anyhow::Result<()> {
    println!("{}", render(value, format, compact)?);
    Ok(())
}

#[cfg(test)]
#[path = "output_tests.rs"]
mod tests;
