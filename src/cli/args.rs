//! @dose
//! purpose: This module defines the command-line interface for toktrim using the
//!     clap derive macros. It specifies all commands (truncate, count, models) and
//!     their arguments.
//!
//! when-editing:
//!     - !Each command struct must derive Args and be added to the Commands enum
//!     - !Global flags (root, verbose) are defined on Cli and propagate to all
//!       subcommands
//!     - The model flag is optional everywhere; the config file's default model
//!       fills it in when omitted
//!
//! invariants:
//!     - The Cli struct is the root parser that clap uses to parse command-line
//!       arguments
//!     - PathBuf is used for all file path arguments
//!
//! gotchas:
//!     - The truncate and count commands accept "-" as input to read from stdin
//!     - --max-tokens overrides the registry budget for this invocation only

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "toktrim")]
#[command(author, version, about = "Token-accurate text truncation for LLM token budgets")]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to project root (defaults to current directory)
    #[arg(short, long, global = true)]
    pub root: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Truncate text to fit a model's token budget
    Truncate(TruncateArgs),

    /// Count the tokens a model's tokenizer produces for text
    Count(CountArgs),

    /// List registered models and their token budgets
    Models,
}

#[derive(Args, Default)]
pub struct TruncateArgs {
    /// Input file ("-" or omitted reads stdin)
    #[arg(value_name = "FILE")]
    pub input: Option<PathBuf>,

    /// Model whose tokenizer and budget to use
    #[arg(short, long)]
    pub model: Option<String>,

    /// Override the model's token budget for this run
    #[arg(long, value_name = "N")]
    pub max_tokens: Option<usize>,

    /// Use the brute-force reference scan instead of the bracketed search
    #[arg(long)]
    pub reference: bool,

    /// Write output to a file instead of stdout
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,
}

#[derive(Args, Default)]
pub struct CountArgs {
    /// Input file ("-" or omitted reads stdin)
    #[arg(value_name = "FILE")]
    pub input: Option<PathBuf>,

    /// Model whose tokenizer to use
    #[arg(short, long)]
    pub model: Option<String>,
}
