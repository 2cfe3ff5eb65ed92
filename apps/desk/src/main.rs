//! # Tally Desk Binary
//!
//! Entry point for the desk host. All logic lives in the library crate.

use std::process::ExitCode;

use clap::Parser;
use tally_desk::Cli;

#[tokio::main]
async fn main() -> ExitCode {
    match tally_desk::run(Cli::parse()).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}
