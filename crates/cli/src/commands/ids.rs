// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `bp ids <file>` - List prompt IDs

use super::read_source;
use crate::error::BpError;
use bp_blueprint::{parse_and_normalize_blueprint, FileType};
use clap::Args;
use std::path::PathBuf;

#[derive(Args)]
pub struct IdsArgs {
    /// Blueprint file (.json, .yaml or .yml)
    pub file: PathBuf,

    /// Decode the file as this type instead of inferring it from the extension
    #[arg(short = 't', long = "type", value_name = "TYPE")]
    pub file_type: Option<FileType>,
}

pub fn ids(args: IdsArgs) -> anyhow::Result<()> {
    let source = read_source(&args.file, args.file_type)?;
    let config = parse_and_normalize_blueprint(&source.content, source.file_type)
        .map_err(|e| BpError::parse_failed(&args.file, e))?;
    for prompt in &config.prompts {
        println!("{}", prompt.id);
    }
    Ok(())
}
