//! @dose
//! purpose: Model-specific tokenizer resolution and caching. Wraps tiktoken-rs
//!     encoders behind a small Tokenizer type whose only job is counting the tokens
//!     a prefix would cost a given model.
//!
//! when-editing:
//!     - !Encoders are resolved per model with get_bpe_from_model; never share a
//!       Tokenizer across models even when they use the same encoding family
//!     - !Cached encoders live for the whole process; there is no invalidation
//!     - Counting uses encode_ordinary, so special-token markup in the input is
//!       treated as plain text
//!
//! invariants:
//!     - Encoding is a pure function of the input string
//!     - Two Tokenizer values for the same model share one underlying encoder
//!
//! gotchas:
//!     - First resolution of a model pays the BPE construction cost; later calls
//!       are a map lookup
//!     - A lost race on first resolution builds the encoder twice; both copies are
//!       identical and either may end up cached

use crate::error::TruncateError;
use once_cell::sync::Lazy;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use tiktoken_rs::{get_bpe_from_model, CoreBPE};

/// Process-wide encoder cache, keyed by model identifier
static ENCODERS: Lazy<RwLock<HashMap<String, Arc<CoreBPE>>>> =
    Lazy::new(|| RwLock::new(HashMap::new()));

/// Tokenizer for a single model
#[derive(Clone)]
pub struct Tokenizer {
    model: String,
    bpe: Arc<CoreBPE>,
}

impl std::fmt::Debug for Tokenizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Tokenizer")
            .field("model", &self.model)
            .finish_non_exhaustive()
    }
}

impl Tokenizer {
    /// Resolve the tokenizer for a model, reusing the cached encoder if present.
    pub fn for_model(model: &str) -> Result<Self, TruncateError> {
        if let Some(bpe) = ENCODERS
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .get(model)
        {
            return Ok(Self {
                model: model.to_string(),
                bpe: Arc::clone(bpe),
            });
        }

        // Build outside the lock; construction is slow and encoding is pure,
        // so a duplicate build under a first-use race is harmless.
        let bpe = Arc::new(
            get_bpe_from_model(model).map_err(|e| TruncateError::Tokenizer {
                model: model.to_string(),
                message: e.to_string(),
            })?,
        );

        let mut cache = ENCODERS
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        let cached = cache
            .entry(model.to_string())
            .or_insert_with(|| Arc::clone(&bpe));

        Ok(Self {
            model: model.to_string(),
            bpe: Arc::clone(cached),
        })
    }

    /// Model identifier this tokenizer was resolved for
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Number of tokens the text encodes to for this model
    pub fn count(&self, text: &str) -> usize {
        self.bpe.encode_ordinary(text).len()
    }
}
