//! Tokenizer configuration.

use crate::error::ConfigError;

const WEIGHT_SUM_EPSILON: f64 = 1e-9;

/// Weights of the three candidate score components. Must sum to 1.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreWeights {
    /// Weight of the sandhi rule priority score
    pub rule: f64,
    /// Weight of the lexical frequency score
    pub freq: f64,
    /// Weight of the grammatical validity score
    pub grammar: f64,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        ScoreWeights {
            rule: 0.40,
            freq: 0.30,
            grammar: 0.30,
        }
    }
}

impl ScoreWeights {
    pub fn validate(&self) -> Result<(), ConfigError> {
        for w in [self.rule, self.freq, self.grammar] {
            if w < 0.0 {
                return Err(ConfigError::NegativeWeight(w));
            }
        }
        let sum = self.rule + self.freq + self.grammar;
        if (sum - 1.0).abs() > WEIGHT_SUM_EPSILON {
            return Err(ConfigError::WeightSum(sum));
        }
        Ok(())
    }
}

/// Configuration of the tokenization engine.
///
/// `preserve_whitespace = false` drops whitespace tokens and
/// `preserve_vedic_accents = false` strips accent marks; both modes forfeit
/// byte-level reversibility against the raw input and are meant for callers
/// that only consume word tokens.
#[derive(Debug, Clone)]
pub struct TokenizerConfig {
    /// Emit whitespace runs as tokens
    pub preserve_whitespace: bool,
    /// Keep Vedic accent marks on their base characters
    pub preserve_vedic_accents: bool,
    /// Propose sandhi splits for word runs
    pub enable_sandhi_splitting: bool,
    /// Run the derivational-suffix analyzer
    pub enable_derivation_analysis: bool,
    /// Admit rules marked as Vedic-only
    pub vedic_mode: bool,
    /// Maximum candidates kept per word
    pub max_candidates: usize,
    /// Composite score weights
    pub weights: ScoreWeights,
    /// Reference frequency for normalizing the frequency score
    pub frequency_reference: f64,
}

impl Default for TokenizerConfig {
    fn default() -> Self {
        TokenizerConfig {
            preserve_whitespace: true,
            preserve_vedic_accents: true,
            enable_sandhi_splitting: true,
            enable_derivation_analysis: true,
            vedic_mode: false,
            max_candidates: 8,
            weights: ScoreWeights::default(),
            frequency_reference: 10000.0,
        }
    }
}

impl TokenizerConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.weights.validate()?;
        if self.max_candidates == 0 {
            return Err(ConfigError::MaxCandidates);
        }
        if !(self.frequency_reference > 0.0) {
            return Err(ConfigError::FrequencyReference(self.frequency_reference));
        }
        Ok(())
    }
}
