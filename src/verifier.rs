//! Byte-exact round-trip verification.
//!
//! Reversibility is an invariant, not a user-facing error condition: the
//! verifier reports whether the emitted tokens concatenate back to the
//! normalized input, and the tokenizer falls back to safe mode when they
//! do not. Counters are atomic so one engine instance can be shared across
//! threads.

use std::sync::atomic::{AtomicU64, Ordering};

use crate::token::Token;

/// Tracks round-trip verification outcomes
#[derive(Debug, Default)]
pub struct Verifier {
    total: AtomicU64,
    verified: AtomicU64,
    failed: AtomicU64,
}

impl Verifier {
    pub fn new() -> Self {
        Verifier::default()
    }

    /// Check that the tokens concatenate to the normalized input, and
    /// record the outcome
    pub fn verify(&self, normalized: &str, tokens: &[Token]) -> bool {
        self.total.fetch_add(1, Ordering::Relaxed);
        let reconstructed: String = tokens.iter().map(|t| t.text.as_str()).collect();
        let ok = reconstructed == normalized;
        if ok {
            self.verified.fetch_add(1, Ordering::Relaxed);
        } else {
            self.failed.fetch_add(1, Ordering::Relaxed);
        }
        ok
    }

    pub fn total(&self) -> u64 {
        self.total.load(Ordering::Relaxed)
    }

    pub fn verified(&self) -> u64 {
        self.verified.load(Ordering::Relaxed)
    }

    pub fn failed(&self) -> u64 {
        self.failed.load(Ordering::Relaxed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token::TokenKind;

    fn token(text: &str, start: usize) -> Token {
        Token::with_text(text.to_string(), start, text.len(), TokenKind::Word)
    }

    #[test]
    fn test_verify_success() {
        let verifier = Verifier::new();
        let tokens = vec![token("राम", 0), token(" ", 9), token("सीता", 10)];
        assert!(verifier.verify("राम सीता", &tokens));
        assert_eq!(verifier.total(), 1);
        assert_eq!(verifier.verified(), 1);
        assert_eq!(verifier.failed(), 0);
    }

    #[test]
    fn test_verify_failure_counted() {
        let verifier = Verifier::new();
        let tokens = vec![token("राम", 0)];
        assert!(!verifier.verify("राम सीता", &tokens));
        assert_eq!(verifier.failed(), 1);
    }

    #[test]
    fn test_empty_input() {
        let verifier = Verifier::new();
        assert!(verifier.verify("", &[]));
    }
}
