//! @dose
//! purpose: This module implements the count command: print the number of tokens a
//!     model's tokenizer produces for the input text.
//!
//! when-editing:
//!     - !The count goes to stdout as a bare number so scripts can consume it
//!     - Verbose mode adds character count and tokens-per-char context on stderr

use crate::cli::CountArgs;
use crate::commands::{read_input, resolve_model};
use crate::config::Config;
use crate::tokenizer::Tokenizer;
use anyhow::Result;
use std::path::Path;

pub fn run_count(args: &CountArgs, root: &Path, verbose: bool) -> Result<()> {
    let config = Config::load(root);
    let model = resolve_model(args.model.as_ref(), config.model.as_ref())?;

    let text = read_input(args.input.as_ref(), root)?;

    let tokenizer = Tokenizer::for_model(&model)?;
    let count = tokenizer.count(&text);

    if verbose {
        let chars = text.chars().count();
        let rate = if chars > 0 {
            count as f64 / chars as f64
        } else {
            0.0
        };
        eprintln!(
            "{} characters, {:.4} tokens per character for {}",
            chars, rate, model
        );
    }

    println!("{}", count);

    Ok(())
}
