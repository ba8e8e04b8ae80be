//! @dose
//! purpose: Core truncation search. Finds the longest character prefix of a text
//!     that stays within a model's token budget while keeping the number of
//!     tokenizer invocations far below one-per-character, then verifies the result
//!     with an exact backward scan. Also exposes the brute-force reference scan
//!     the fast path is validated against.
//!
//! when-editing:
//!     - !The bracket from find_bounds is a heuristic: BPE token counts are not
//!       strictly monotonic in prefix length, so correctness rests entirely on
//!       the backward scan, never on the bracket being tight
//!     - !Both public entry points share scan_back_to_fit so the fast path and
//!       the reference cannot drift apart
//!     - !All lengths are char counts; slicing goes through char_offsets so
//!       multibyte input never lands inside a code point
//!     - Growth constants (x1.1 with a 10-char floor) are tuning, not contract;
//!       keep the floor so steps never round to zero
//!
//! invariants:
//!     - The result is always a char prefix of the input
//!     - The result tokenizes to at most max_tokens tokens
//!     - Input already within budget is returned unchanged
//!     - The scan floor is length 1; only empty input yields empty output, and
//!       a single leading character over budget is a BudgetUnreachable error
//!
//! gotchas:
//!     - The expansion phase can collapse low == high at a point whose token
//!       count already exceeds the budget; the scan then does all the narrowing
//!     - The reference path is O(text length) tokenizer calls and exists for
//!       verification, not for production use on long documents

use crate::budget::BudgetRegistry;
use crate::error::TruncateError;
use crate::rate::tokens_per_char;
use crate::tokenizer::Tokenizer;

/// Minimum characters added or removed per bracketing step
const MIN_STEP: usize = 10;

/// Geometric growth factor for bracketing steps
const STEP_RATIO: f64 = 1.1;

/// Byte offsets of every char boundary, with the total length appended.
fn char_offsets(text: &str) -> Vec<usize> {
    let mut offsets: Vec<usize> = text.char_indices().map(|(i, _)| i).collect();
    offsets.push(text.len());
    offsets
}

/// Bracket the truncation point between a `low` char count believed under the
/// budget and a `high` char count at or beyond it.
///
/// Seeds the search at `max_tokens / tokens_per_char`, then grows the candidate
/// geometrically until its prefix exceeds the budget (collapsing both bounds to
/// that point) or the candidate reaches the full text length. If expansion hit
/// the end without exceeding, a matching shrink pass finds `low`. Costs
/// O(log n) tokenizer calls instead of the O(n) a linear scan would.
pub fn find_bounds(
    text: &str,
    tokenizer: &Tokenizer,
    max_tokens: usize,
    tokens_per_char: f64,
) -> (usize, usize) {
    let offsets = char_offsets(text);
    let n_chars = offsets.len() - 1;
    let estimated_length = (max_tokens as f64 / tokens_per_char) as usize;

    // Expansion: grow until the prefix overshoots the budget or covers the text
    let high;
    let mut candidate = estimated_length;
    loop {
        candidate = ((candidate as f64 * STEP_RATIO) as usize).max(candidate.saturating_add(MIN_STEP));
        let clamped = candidate.min(n_chars);
        let ntokens = tokenizer.count(&text[..offsets[clamped]]);
        if ntokens > max_tokens {
            // Both bounds collapse; the backward scan does the narrowing
            return (clamped, clamped);
        }
        if clamped == n_chars {
            high = n_chars;
            break;
        }
    }

    // Contraction: shrink until a prefix lands strictly under the budget
    let mut candidate = estimated_length;
    let low = loop {
        candidate = ((candidate as f64 / STEP_RATIO) as usize).min(candidate.saturating_sub(MIN_STEP));
        let clamped = candidate.min(n_chars);
        let ntokens = tokenizer.count(&text[..offsets[clamped]]);
        if ntokens < max_tokens {
            break clamped;
        }
    };

    (low, high)
}

/// Exact backward scan shared by the fast path and the reference.
///
/// Walks candidate char lengths from `high` down to 1 and returns the first
/// prefix whose token count fits the budget. Errors when even the single
/// leading character exceeds it.
fn scan_back_to_fit<'a>(
    text: &'a str,
    tokenizer: &Tokenizer,
    max_tokens: usize,
    high: usize,
) -> Result<&'a str, TruncateError> {
    let offsets = char_offsets(text);
    let n_chars = offsets.len() - 1;

    for len in (1..=high.min(n_chars)).rev() {
        let prefix = &text[..offsets[len]];
        if tokenizer.count(prefix) <= max_tokens {
            return Ok(prefix);
        }
    }

    Err(TruncateError::BudgetUnreachable {
        model: tokenizer.model().to_string(),
        max_tokens,
    })
}

/// Truncate `text` to the model's token budget using the bracketed search.
///
/// Resolves the budget and tokenizer, estimates a starting length from the
/// cached tokens-per-char rate, brackets the truncation point, and verifies it
/// with the backward scan. Text already within budget is returned unchanged.
pub fn truncate_to_max_tokens(
    text: &str,
    model: &str,
    registry: &BudgetRegistry,
) -> Result<String, TruncateError> {
    let max_tokens = registry.max_tokens_for(model)?;
    if text.is_empty() {
        return Ok(String::new());
    }

    let tokenizer = Tokenizer::for_model(model)?;
    let rate = tokens_per_char(&tokenizer);
    let (_low, high) = find_bounds(text, &tokenizer, max_tokens, rate);

    scan_back_to_fit(text, &tokenizer, max_tokens, high).map(str::to_owned)
}

/// Truncate `text` to the model's token budget by brute force.
///
/// The degenerate case of the fast path with the scan starting at the full
/// text length: one tokenizer call per removed character. Used to verify the
/// bracketed search, not for production truncation of long documents.
pub fn truncate_to_max_tokens_reference(
    text: &str,
    model: &str,
    registry: &BudgetRegistry,
) -> Result<String, TruncateError> {
    let max_tokens = registry.max_tokens_for(model)?;
    if text.is_empty() {
        return Ok(String::new());
    }

    let tokenizer = Tokenizer::for_model(model)?;
    let n_chars = text.chars().count();

    scan_back_to_fit(text, &tokenizer, max_tokens, n_chars).map(str::to_owned)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sample::random_string;

    fn registry_with(model: &str, max_tokens: usize) -> BudgetRegistry {
        let mut registry = BudgetRegistry::builtin();
        registry.set_budget(model, max_tokens);
        registry
    }

    #[test]
    fn test_find_bounds_collapses_on_overshoot() {
        let tokenizer = Tokenizer::for_model("gpt-4").unwrap();
        let text = random_string(2000, 11);
        let rate = tokens_per_char(&tokenizer);

        let (low, high) = find_bounds(&text, &tokenizer, 16, rate);
        assert_eq!(low, high);
        assert!(high <= text.chars().count());
        // The collapse point overshoots the budget
        let offsets: Vec<usize> = text.char_indices().map(|(i, _)| i).collect();
        let byte_end = offsets.get(high).copied().unwrap_or(text.len());
        assert!(tokenizer.count(&text[..byte_end]) > 16);
    }

    #[test]
    fn test_find_bounds_full_text_within_budget() {
        let tokenizer = Tokenizer::for_model("gpt-4").unwrap();
        let text = random_string(100, 12);
        let rate = tokens_per_char(&tokenizer);

        let (low, high) = find_bounds(&text, &tokenizer, 1000, rate);
        assert_eq!(high, 100);
        assert!(low <= high);
        let offsets: Vec<usize> = text.char_indices().map(|(i, _)| i).collect();
        let byte_end = offsets.get(low).copied().unwrap_or(text.len());
        assert!(tokenizer.count(&text[..byte_end]) < 1000);
    }

    #[test]
    fn test_truncate_noop_below_budget() {
        let registry = BudgetRegistry::builtin();
        let text = "a short sentence that fits easily";
        let out = truncate_to_max_tokens(text, "gpt-4", &registry).unwrap();
        assert_eq!(out, text);
    }

    #[test]
    fn test_truncate_respects_budget_and_prefix() {
        let registry = registry_with("gpt-4", 24);
        let text = random_string(1500, 13);

        let out = truncate_to_max_tokens(&text, "gpt-4", &registry).unwrap();
        assert!(text.starts_with(&out));
        assert!(out.chars().count() < text.chars().count());

        let tokenizer = Tokenizer::for_model("gpt-4").unwrap();
        assert!(tokenizer.count(&out) <= 24);
    }

    #[test]
    fn test_truncate_matches_reference() {
        let registry = registry_with("gpt-4", 32);
        let text = random_string(600, 14);

        let fast = truncate_to_max_tokens(&text, "gpt-4", &registry).unwrap();
        let slow = truncate_to_max_tokens_reference(&text, "gpt-4", &registry).unwrap();
        assert_eq!(fast, slow);
    }

    #[test]
    fn test_empty_input() {
        let registry = BudgetRegistry::builtin();
        assert_eq!(truncate_to_max_tokens("", "gpt-4", &registry).unwrap(), "");
        assert_eq!(
            truncate_to_max_tokens_reference("", "gpt-4", &registry).unwrap(),
            ""
        );
    }

    #[test]
    fn test_scan_floor_single_char() {
        // Control characters are single-byte base tokens with no learned merge,
        // so the two-char prefix costs two tokens and only length 1 fits
        let registry = registry_with("gpt-4", 1);
        let text = "\u{1}\u{2}";
        let out = truncate_to_max_tokens(text, "gpt-4", &registry).unwrap();
        assert_eq!(out, "\u{1}");
        let slow = truncate_to_max_tokens_reference(text, "gpt-4", &registry).unwrap();
        assert_eq!(slow, out);
    }

    #[test]
    fn test_budget_unreachable() {
        // U+0378 is unassigned: its two bytes never merge into one token
        let registry = registry_with("gpt-4", 1);
        let text = "\u{378}";

        let err = truncate_to_max_tokens(text, "gpt-4", &registry).unwrap_err();
        assert!(matches!(err, TruncateError::BudgetUnreachable { .. }));

        let err = truncate_to_max_tokens_reference(text, "gpt-4", &registry).unwrap_err();
        assert!(matches!(err, TruncateError::BudgetUnreachable { .. }));
    }

    #[test]
    fn test_unknown_model() {
        let registry = BudgetRegistry::builtin();
        let err = truncate_to_max_tokens("text", "nope", &registry).unwrap_err();
        assert!(matches!(err, TruncateError::UnknownModel(_)));
    }

    #[test]
    fn test_invalid_budget() {
        let registry = registry_with("gpt-4", 0);
        let err = truncate_to_max_tokens("text", "gpt-4", &registry).unwrap_err();
        assert!(matches!(err, TruncateError::InvalidBudget { .. }));
    }

    #[test]
    fn test_multibyte_input_never_splits_chars() {
        let registry = registry_with("gpt-4", 8);
        let text = "héllo wörld ünïcödé ".repeat(20);
        let out = truncate_to_max_tokens(&text, "gpt-4", &registry).unwrap();
        assert!(text.starts_with(&out));
        let slow = truncate_to_max_tokens_reference(&text, "gpt-4", &registry).unwrap();
        assert_eq!(out, slow);
    }
}
