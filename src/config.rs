//! @dose
//! purpose: Configuration file parsing for toktrim.toml. Supplies a default model
//!     for commands that omit --model and per-model token budget overrides.
//!
//! when-editing:
//!     - !Config is loaded once per command invocation and folded into the
//!       budget registry before any truncation runs
//!     - A missing toktrim.toml yields the default config silently; a malformed
//!       one warns on stderr and falls back to defaults
//!
//! invariants:
//!     - Overrides in [models] shadow builtin budgets but never remove entries
//!
//! gotchas:
//!     - Budget values are token counts; zero is accepted here and rejected at
//!       lookup time so the error names the offending model

use crate::budget::BudgetRegistry;
use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// Main configuration structure matching toktrim.toml
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    /// Default model for commands invoked without --model
    pub model: Option<String>,

    /// Per-model token budget overrides
    pub models: HashMap<String, usize>,
}

impl Config {
    /// Load configuration from toktrim.toml in the given root directory
    pub fn load(root: &Path) -> Self {
        let config_path = root.join("toktrim.toml");

        if !config_path.exists() {
            return Self::default();
        }

        match fs::read_to_string(&config_path) {
            Ok(content) => match toml::from_str(&content) {
                Ok(config) => config,
                Err(e) => {
                    eprintln!("Warning: Failed to parse toktrim.toml: {}", e);
                    Self::default()
                }
            },
            Err(e) => {
                eprintln!("Warning: Failed to read toktrim.toml: {}", e);
                Self::default()
            }
        }
    }

    /// Build a budget registry from the builtin table plus this config's overrides
    pub fn registry(&self) -> BudgetRegistry {
        let mut registry = BudgetRegistry::builtin();
        for (model, max_tokens) in &self.models {
            registry.set_budget(model.clone(), *max_tokens);
        }
        registry
    }
}
