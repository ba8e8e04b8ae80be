//! @dose
//! purpose: This module implements the models command: list every registered model
//!     with its token budget, including config overrides.
//!
//! gotchas:
//!     - Output is sorted by model name so it is stable across runs

use crate::config::Config;
use anyhow::Result;
use std::path::Path;

pub fn run_models(root: &Path, _verbose: bool) -> Result<()> {
    let config = Config::load(root);
    let registry = config.registry();

    for (model, max_tokens) in registry.models() {
        println!("{:<28} {:>8}", model, max_tokens);
    }

    Ok(())
}
