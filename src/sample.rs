//! @dose
//! purpose: Deterministic random text generation. Produces strings drawn uniformly
//!     from the printable ASCII set with a seeded generator, used to estimate a
//!     tokenizer's tokens-per-character rate and to build test inputs.
//!
//! when-editing:
//!     - !The same (length, seed) pair must always produce the same string
//!     - PRINTABLE is the 100-character printable set: digits, letters,
//!       punctuation, and whitespace
//!
//! gotchas:
//!     - Output includes \t \n \r and vertical-tab/form-feed characters, so it is
//!       printable but not single-line

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Printable ASCII characters: digits, letters, punctuation, whitespace.
const PRINTABLE: &[u8] =
    b"0123456789abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ!\"#$%&'()*+,-./:;<=>?@[\\]^_`{|}~ \t\n\r\x0B\x0C";

/// Default seed for reproducible samples
pub const DEFAULT_SEED: u64 = 42;

/// Generate a random string of `k` printable characters from a fixed seed.
pub fn random_string(k: usize, seed: u64) -> String {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..k)
        .map(|_| PRINTABLE[rng.random_range(0..PRINTABLE.len())] as char)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_charset_size() {
        assert_eq!(PRINTABLE.len(), 100);
    }

    #[test]
    fn test_length() {
        assert_eq!(random_string(0, DEFAULT_SEED).len(), 0);
        assert_eq!(random_string(1024, DEFAULT_SEED).len(), 1024);
    }

    #[test]
    fn test_deterministic_for_seed() {
        let a = random_string(256, 7);
        let b = random_string(256, 7);
        assert_eq!(a, b);
    }

    #[test]
    fn test_seeds_differ() {
        let a = random_string(256, 1);
        let b = random_string(256, 2);
        assert_ne!(a, b);
    }

    #[test]
    fn test_all_chars_printable() {
        let s = random_string(2048, DEFAULT_SEED);
        assert!(s.bytes().all(|b| PRINTABLE.contains(&b)));
    }
}
