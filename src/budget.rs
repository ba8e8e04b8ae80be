//! @dose
//! purpose: Token budget registry mapping model identifiers to their maximum token
//!     counts. Every truncation call resolves its budget here exactly once, before
//!     any tokenizer work happens.
//!
//! when-editing:
//!     - !Only add models that tiktoken-rs can resolve an encoder for
//!     - !A zero budget is rejected at lookup time, not at insertion time, so
//!       config overrides surface the error on first use
//!     - Budgets are context-window sizes; callers override per-call limits via
//!       set_budget
//!
//! invariants:
//!     - Lookup of an unregistered model is always an UnknownModel error
//!     - The builtin table is never mutated; overrides live in the registry value
//!
//! gotchas:
//!     - models() returns entries sorted by name for stable CLI output

use crate::error::TruncateError;
use once_cell::sync::Lazy;
use std::collections::HashMap;

/// Builtin context-window sizes for the supported model families
static DEFAULT_BUDGETS: Lazy<HashMap<&'static str, usize>> = Lazy::new(|| {
    HashMap::from([
        ("text-embedding-ada-002", 8191),
        ("text-embedding-3-small", 8191),
        ("text-embedding-3-large", 8191),
        ("text-davinci-003", 4097),
        ("gpt-3.5-turbo", 16385),
        ("gpt-4", 8192),
        ("gpt-4-turbo", 128_000),
        ("gpt-4o", 128_000),
        ("gpt-4o-mini", 128_000),
        ("o1", 200_000),
        ("o1-mini", 128_000),
    ])
});

/// Registry of per-model token budgets
#[derive(Debug, Clone)]
pub struct BudgetRegistry {
    budgets: HashMap<String, usize>,
}

impl BudgetRegistry {
    /// Create a registry populated with the builtin model table
    pub fn builtin() -> Self {
        let budgets = DEFAULT_BUDGETS
            .iter()
            .map(|(model, max)| ((*model).to_string(), *max))
            .collect();
        Self { budgets }
    }

    /// Look up the maximum token count for a model.
    ///
    /// Fails with `UnknownModel` for unregistered identifiers and with
    /// `InvalidBudget` if an override registered a zero budget.
    pub fn max_tokens_for(&self, model: &str) -> Result<usize, TruncateError> {
        let max_tokens = *self
            .budgets
            .get(model)
            .ok_or_else(|| TruncateError::UnknownModel(model.to_string()))?;

        if max_tokens == 0 {
            return Err(TruncateError::InvalidBudget {
                model: model.to_string(),
                max_tokens,
            });
        }

        Ok(max_tokens)
    }

    /// Register or override the budget for a model
    pub fn set_budget(&mut self, model: impl Into<String>, max_tokens: usize) {
        self.budgets.insert(model.into(), max_tokens);
    }

    /// All registered models and budgets, sorted by model name
    pub fn models(&self) -> Vec<(&str, usize)> {
        let mut entries: Vec<(&str, usize)> = self
            .budgets
            .iter()
            .map(|(model, max)| (model.as_str(), *max))
            .collect();
        entries.sort_by_key(|(model, _)| *model);
        entries
    }
}

impl Default for BudgetRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}
