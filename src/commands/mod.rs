mod count;
mod models;
mod truncate;

pub use count::*;
pub use models::*;
pub use truncate::*;

use anyhow::{Context, Result};
use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};

/// Read command input from a file, or from stdin when the path is "-" or absent.
pub(crate) fn read_input(input: Option<&PathBuf>, root: &Path) -> Result<String> {
    match input {
        Some(path) if path.to_string_lossy() != "-" => {
            let path = if path.is_absolute() {
                path.clone()
            } else {
                root.join(path)
            };
            fs::read_to_string(&path).context("Failed to read input file")
        }
        _ => {
            let mut buffer = String::new();
            std::io::stdin()
                .read_to_string(&mut buffer)
                .context("Failed to read from stdin")?;
            Ok(buffer)
        }
    }
}

/// Resolve the model to use from the --model flag or the config default.
pub(crate) fn resolve_model(flag: Option<&String>, config_default: Option<&String>) -> Result<String> {
    flag.or(config_default).cloned().context(
        "No model specified: pass --model or set `model` in toktrim.toml",
    )
}
