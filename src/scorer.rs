//! Composite candidate scoring.
//!
//! Each candidate receives three component scores in [0, 1] and a weighted
//! composite:
//!
//! - rule score: the sandhi rule priority scaled to [0, 1]; fixed baselines
//!   for the trivial and lexical candidates
//! - frequency score: geometric mean of the parts' log frequencies against
//!   a reference frequency; one unknown part zeroes the component
//! - grammar score: additive 0.2 bonuses for recognized inflection and
//!   derivation patterns, capped at 1.0
//!
//! The geometric mean keeps a single high-frequency particle from carrying
//! an otherwise implausible split.

use std::cmp::Ordering;

use crate::config::ScoreWeights;
use crate::lexicon::Lexicon;
use crate::splitter::{Candidate, CandidateScores, NO_SPLIT_RULE_ID};

/// Rule score of the trivial no-split candidate
pub const NO_SPLIT_RULE_SCORE: f64 = 0.5;
/// Rule score of dictionary-adjacency splits
pub const LEXICAL_RULE_SCORE: f64 = 0.4;

/// Composite scores compare equal within this tolerance
const SCORE_EPSILON: f64 = 1e-9;

/// Scores and ranks candidates
#[derive(Debug, Clone)]
pub struct Scorer {
    weights: ScoreWeights,
    frequency_reference: f64,
}

impl Scorer {
    pub fn new(weights: ScoreWeights, frequency_reference: f64) -> Self {
        Scorer {
            weights,
            frequency_reference,
        }
    }

    /// Fill in a candidate's component and composite scores
    pub fn score(&self, candidate: &mut Candidate, lexicon: &Lexicon) {
        let rule = match candidate.rule_priority {
            Some(priority) => f64::from(priority) / 10.0,
            None if candidate.rule_id == NO_SPLIT_RULE_ID => NO_SPLIT_RULE_SCORE,
            None => LEXICAL_RULE_SCORE,
        };
        let freq = self.freq_score(&candidate.parts, lexicon);
        let grammar = grammar_score(candidate);
        candidate.scores = CandidateScores {
            rule,
            freq,
            grammar,
            composite: self.composite(rule, freq, grammar),
        };
    }

    /// The weighted composite of the three component scores
    pub fn composite(&self, rule: f64, freq: f64, grammar: f64) -> f64 {
        self.weights.rule * rule + self.weights.freq * freq + self.weights.grammar * grammar
    }

    fn freq_score(&self, parts: &[String], lexicon: &Lexicon) -> f64 {
        let mut log_product = 1.0f64;
        for part in parts {
            let freq = lexicon.frequency(part);
            if freq == 0 {
                return 0.0;
            }
            log_product *= (1.0 + freq as f64).ln();
        }
        let geomean = log_product.powf(1.0 / parts.len() as f64);
        let reference = (1.0 + self.frequency_reference).ln();
        (geomean / reference).clamp(0.0, 1.0)
    }

    /// Sort candidates best-first. Composites within 1e-9 tie-break on
    /// fewer parts, then higher rule score, then the joined parts
    /// lexicographically.
    pub fn rank(&self, candidates: &mut [Candidate]) {
        candidates.sort_by(compare);
    }
}

/// Additive grammar bonuses: 0.2 per part with an inflection analysis, 0.2
/// per part with a derivation analysis, and 0.2 when every part of a real
/// split carries some analysis. Capped at 1.0.
fn grammar_score(candidate: &Candidate) -> f64 {
    let mut score: f64 = 0.0;
    for analysis in &candidate.analyses {
        if !analysis.inflections.is_empty() {
            score += 0.2;
        }
        if !analysis.derivations.is_empty() {
            score += 0.2;
        }
    }
    if candidate.parts.len() >= 2 && candidate.analyses.iter().all(|a| a.has_any()) {
        score += 0.2;
    }
    score.min(1.0)
}

fn compare(a: &Candidate, b: &Candidate) -> Ordering {
    let diff = b.scores.composite - a.scores.composite;
    if diff.abs() > SCORE_EPSILON {
        return if diff > 0.0 {
            Ordering::Greater
        } else {
            Ordering::Less
        };
    }
    a.parts
        .len()
        .cmp(&b.parts.len())
        .then(
            b.scores
                .rule
                .partial_cmp(&a.scores.rule)
                .unwrap_or(Ordering::Equal),
        )
        .then_with(|| a.parts.concat().cmp(&b.parts.concat()))
}
