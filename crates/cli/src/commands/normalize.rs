// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `bp normalize <file>` - Print the normalized blueprint

use super::read_source;
use crate::error::BpError;
use crate::output::{self, OutputFormat};
use bp_blueprint::{parse_and_normalize_blueprint, FileType};
use clap::Args;
use std::path::PathBuf;

#[derive(Args)]
pub struct NormalizeArgs {
    /// Blueprint file (.json, .yaml or .yml)
    pub file: PathBuf,

    /// Decode the file as this type instead of inferring it from the extension
    #[arg(short = 't', long = "type", value_name = "TYPE")]
    pub file_type: Option<FileType>,

    /// Output encoding
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Json)]
    pub format: OutputFormat,

    /// Print JSON on a single line
    #[arg(long)]
    pub compact: bool,
}

pub fn normalize(args: NormalizeArgs) -> anyhow::Result<()> {
    let source = read_source(&args.file, args.file_type)?;
    let config = parse_and_normalize_blueprint(&source.content, source.file_type)
        .map_err(|e| BpError::parse_failed(&args.file, e))?;
    output::print(&config, args.format, args.compact)
}
