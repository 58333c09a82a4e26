//! Error types surfaced at engine construction.
//!
//! Runtime anomalies (rejected candidates, verifier misses) never reach the
//! caller; they are absorbed by the safe fallback path and counted.

use thiserror::Error;

/// Errors raised while loading and validating the grammar knowledge base
#[derive(Debug, Error)]
pub enum KbError {
    /// Two rules share the same id
    #[error("duplicate rule id `{0}`")]
    DuplicateRuleId(String),

    /// A rule priority is outside the 1..=10 range
    #[error("rule `{id}`: priority {priority} outside 1..=10")]
    PriorityOutOfRange { id: String, priority: i64 },

    /// A sandhi pattern or result is empty
    #[error("rule `{0}`: empty pattern")]
    EmptyPattern(String),

    /// A pattern is not in NFC form
    #[error("rule `{id}`: pattern `{pattern}` is not NFC")]
    NotNfc { id: String, pattern: String },

    /// A record could not be parsed
    #[error("{table} line {line}: {message}")]
    Parse {
        table: &'static str,
        line: usize,
        message: String,
    },
}

/// Errors raised while validating the tokenizer configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Score weights do not sum to 1
    #[error("score weights sum to {0}, expected 1.0")]
    WeightSum(f64),

    /// A score weight is negative
    #[error("score weight {0} is negative")]
    NegativeWeight(f64),

    /// The candidate cap is zero
    #[error("max_candidates must be at least 1")]
    MaxCandidates,

    /// The frequency reference is not positive
    #[error("frequency_reference must be positive, got {0}")]
    FrequencyReference(f64),
}
