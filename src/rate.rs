//! @dose
//! purpose: Empirical tokens-per-character estimation. Tokenizes one fixed seeded
//!     1024-character sample per model and caches the resulting rate for the rest
//!     of the process, so bracket seeding costs one encode per model ever.
//!
//! when-editing:
//!     - !The cache key is the model identifier; rates are never shared across
//!       models even when their encoders coincide
//!     - !Entries are never invalidated or evicted; tokenizers are immutable for
//!       the process lifetime
//!     - The sample length and seed are fixed so bracket sizing is reproducible
//!       across runs
//!
//! invariants:
//!     - The returned rate is finite and positive
//!     - Concurrent first use may estimate twice; both racers compute the same
//!       value because encoding is pure, and either write wins
//!
//! gotchas:
//!     - The estimate comes from uniform printable text; real prose usually
//!       tokenizes cheaper, which the bracket search absorbs

use crate::sample::{random_string, DEFAULT_SEED};
use crate::tokenizer::Tokenizer;
use once_cell::sync::Lazy;
use std::collections::HashMap;
use std::sync::RwLock;

/// Sample size used for rate estimation
const SAMPLE_LEN: usize = 1024;

/// Process-wide rate cache, keyed by model identifier
static RATES: Lazy<RwLock<HashMap<String, f64>>> = Lazy::new(|| RwLock::new(HashMap::new()));

/// Estimated tokens per character for the tokenizer's model, cached.
pub fn tokens_per_char(tokenizer: &Tokenizer) -> f64 {
    if let Some(rate) = RATES
        .read()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
        .get(tokenizer.model())
    {
        return *rate;
    }

    let rate = estimate(tokenizer);

    let mut cache = RATES
        .write()
        .unwrap_or_else(|poisoned| poisoned.into_inner());
    *cache.entry(tokenizer.model().to_string()).or_insert(rate)
}

/// Tokenize a fixed sample and return its tokens-per-character ratio.
fn estimate(tokenizer: &Tokenizer) -> f64 {
    let sample = random_string(SAMPLE_LEN, DEFAULT_SEED);
    tokenizer.count(&sample) as f64 / SAMPLE_LEN as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rate_is_positive_and_sane() {
        let tokenizer = Tokenizer::for_model("gpt-4").unwrap();
        let rate = tokens_per_char(&tokenizer);
        // Random printable text costs well under two tokens per character
        assert!(rate > 0.0);
        assert!(rate < 2.0);
    }

    #[test]
    fn test_rate_is_stable() {
        let tokenizer = Tokenizer::for_model("gpt-4").unwrap();
        let first = tokens_per_char(&tokenizer);
        let second = tokens_per_char(&tokenizer);
        assert_eq!(first, second);
    }

    #[test]
    fn test_rate_matches_direct_estimate() {
        let tokenizer = Tokenizer::for_model("gpt-4o").unwrap();
        let cached = tokens_per_char(&tokenizer);
        assert_eq!(cached, estimate(&tokenizer));
    }
}
