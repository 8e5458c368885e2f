// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Subcommand implementations

pub mod check;
pub mod ids;
pub mod normalize;

use crate::error::BpError;
use bp_blueprint::FileType;
use std::path::Path;

/// Blueprint text plus the type it should be decoded as
pub struct BlueprintSource {
    pub content: String,
    pub file_type: FileType,
}

/// Read a blueprint file, using `file_type` when given and the extension otherwise.
pub fn read_source(path: &Path, file_type: Option<FileType>) -> Result<BlueprintSource, BpError> {
    let file_type = match file_type {
        Some(file_type) => file_type,
        None => FileType::from_path(path).map_err(|_| BpError::unknown_file_type(path))?,
    };
    let content =
        std::fs::read_to_string(path).map_err(|source| BpError::read_failed(path, source))?;
    tracing::debug!(path = %path.display(), %file_type, bytes = content.len(), "read blueprint");
    Ok(BlueprintSource { content, file_type })
}
