// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `bp check <file>...` - Validate blueprints

use super::read_source;
use bp_blueprint::{validate_blueprint, FileType};
use clap::Args;
use std::path::PathBuf;

#[derive(Args)]
pub struct CheckArgs {
    /// Blueprint files to validate
    #[arg(required = true)]
    pub files: Vec<PathBuf>,

    /// Decode every file as this type instead of inferring it from the extension
    #[arg(short = 't', long = "type", value_name = "TYPE")]
    pub file_type: Option<FileType>,
}

/// Validate each file, reporting every one. Returns the number of failures.
pub fn check(args: CheckArgs) -> usize {
    let mut failed = 0;
    for path in &args.files {
        let source = match read_source(path, args.file_type) {
            Ok(source) => source,
            Err(err) => {
                eprint!("{}", err);
                failed += 1;
                continue;
            }
        };
        match validate_blueprint(&source.content, source.file_type) {
            Ok(config) => println!("ok {} ({} prompts)", path.display(), config.prompts.len()),
            Err(errors) => {
                println!("FAIL {}", path.display());
                print!("{}", errors);
                failed += 1;
            }
        }
    }
    failed
}
