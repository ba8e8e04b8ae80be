//! @dose
//! purpose: This module implements the truncate command. It reads text from a file
//!     or stdin, truncates it to the resolved model's token budget, and writes the
//!     result to stdout or a file.
//!
//! when-editing:
//!     - !Output is written with write_all, never println, so the result stays a
//!       byte-exact prefix of the input
//!     - !--max-tokens overrides the registry entry for the resolved model only
//!     - Verbose diagnostics go to stderr so stdout remains clean for piping
//!
//! invariants:
//!     - The reference flag switches algorithms, never output format
//!
//! gotchas:
//!     - The reference scan is one tokenizer call per removed character; on long
//!       over-budget input it is dramatically slower than the default path

use crate::cli::TruncateArgs;
use crate::commands::{read_input, resolve_model};
use crate::config::Config;
use crate::tokenizer::Tokenizer;
use crate::truncate::{truncate_to_max_tokens, truncate_to_max_tokens_reference};
use anyhow::{Context, Result};
use std::fs;
use std::io::Write;
use std::path::Path;

pub fn run_truncate(args: &TruncateArgs, root: &Path, verbose: bool) -> Result<()> {
    let config = Config::load(root);
    let model = resolve_model(args.model.as_ref(), config.model.as_ref())?;

    let mut registry = config.registry();
    if let Some(max_tokens) = args.max_tokens {
        registry.set_budget(model.clone(), max_tokens);
    }

    let text = read_input(args.input.as_ref(), root)?;

    if verbose {
        eprintln!(
            "Truncating {} characters for model {} (budget: {} tokens)",
            text.chars().count(),
            model,
            registry
                .max_tokens_for(&model)
                .map(|n| n.to_string())
                .unwrap_or_else(|_| "?".to_string()),
        );
    }

    let result = if args.reference {
        truncate_to_max_tokens_reference(&text, &model, &registry)?
    } else {
        truncate_to_max_tokens(&text, &model, &registry)?
    };

    if verbose {
        let tokenizer = Tokenizer::for_model(&model)?;
        eprintln!(
            "Kept {} of {} characters ({} tokens)",
            result.chars().count(),
            text.chars().count(),
            tokenizer.count(&result),
        );
    }

    match &args.output {
        Some(path) => {
            let path = if path.is_absolute() {
                path.clone()
            } else {
                root.join(path)
            };
            fs::write(&path, &result).context("Failed to write output file")?;
        }
        None => {
            std::io::stdout()
                .write_all(result.as_bytes())
                .context("Failed to write to stdout")?;
        }
    }

    Ok(())
}
