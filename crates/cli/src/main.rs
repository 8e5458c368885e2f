// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! bp - Blueprint normalizer CLI

mod commands;
mod error;
mod output;

use clap::{Parser, Subcommand};
use commands::{check, ids, normalize};
use error::BpError;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter
const LOG_ENV: &str = "BP_LOG";

#[derive(Parser)]
#[command(
    name = "bp",
    version,
    about = "Normalize and validate evaluation blueprints"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the normalized form of a blueprint
    Normalize(normalize::NormalizeArgs),
    /// Validate one or more blueprints
    Check(check::CheckArgs),
    /// List the prompt IDs of a blueprint
    Ids(ids::IdsArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging();

    let result = match cli.command {
        Commands::Normalize(args) => normalize::normalize(args),
        Commands::Ids(args) => ids::ids(args),
        Commands::Check(args) => {
            let failed = check::check(args);
            if failed > 0 {
                return ExitCode::FAILURE;
            }
            Ok(())
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            match err.downcast_ref::<BpError>() {
                Some(bp_err) => eprint!("{}", bp_err),
                None => eprintln!("error: {:#}", err),
            }
            ExitCode::FAILURE
        }
    }
}

/// Log to stderr so stdout stays machine readable.
fn init_logging() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
