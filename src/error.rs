//! @dose
//! purpose: Shared error type for the truncation pipeline. Every failure a caller
//!     can see is one of these four variants; there are no transient failure modes
//!     and nothing here is retried.
//!
//! when-editing:
//!     - !UnknownModel and InvalidBudget must be raised before any tokenizer work
//!     - Tokenizer failures carry the underlying message unchanged
//!
//! invariants:
//!     - Truncation is deterministic, so the same inputs always produce the same error
//!     - BudgetUnreachable means the scan reached length 1 and still exceeded the budget

use thiserror::Error;

#[derive(Error, Debug)]
pub enum TruncateError {
    #[error("unknown model: {0}")]
    UnknownModel(String),

    #[error("invalid token budget {max_tokens} for model {model}")]
    InvalidBudget { model: String, max_tokens: usize },

    #[error("failed to load tokenizer for model {model}: {message}")]
    Tokenizer { model: String, message: String },

    #[error("cannot truncate text to {max_tokens} tokens for model {model}")]
    BudgetUnreachable { model: String, max_tokens: usize },
}
