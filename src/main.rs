//! @dose
//! purpose: This is the CLI entry point for toktrim. It parses command-line
//!     arguments using clap, determines the root directory, and dispatches to the
//!     appropriate command handler (truncate, count, or models).
//!
//! when-editing:
//!     - !All command handlers are imported from the toktrim crate
//!     - !The root directory defaults to current working directory if not
//!       specified
//!     - Error messages are printed to stderr and exit with code 1
//!
//! invariants:
//!     - One and only one subcommand is always executed per invocation
//!     - The process exits with 0 on success, 1 on any error
//!
//! do-not:
//!     - Never add business logic here - delegate to command modules
//!     - Never panic - always use proper error handling

use anyhow::Context;
use clap::Parser;
use std::env;
use toktrim::cli::{Cli, Commands};
use toktrim::commands::{run_count, run_models, run_truncate};

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Determine root directory
    let root = match cli.root {
        Some(root) => root,
        None => env::current_dir().context("Failed to get current directory")?,
    };

    match cli.command {
        Commands::Truncate(args) => run_truncate(&args, &root, cli.verbose),
        Commands::Count(args) => run_count(&args, &root, cli.verbose),
        Commands::Models => run_models(&root, cli.verbose),
    }
}
