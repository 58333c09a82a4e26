//! Multi-candidate sandhi splitter.
//!
//! Given a surface word, proposes alternative segmentations from four
//! independent strategies: reverse rule application, left-greedy and
//! right-greedy lexicon scans, and the trivial no-split. Candidates are
//! deduplicated by (parts, rule id), re-join-verified, scored and capped.
//!
//! The re-joinability constraint is what keeps the engine lossless: a
//! non-trivial candidate survives only if forward application of its rule
//! reproduces the surface word exactly, and the surface split offset it
//! carries partitions the surface word, never the underlying forms.

use std::collections::HashSet;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::chars::AVAGRAHA;
use crate::derivation::DerivationMatch;
use crate::inflection::InflectionMatch;
use crate::kb::GrammarKb;
use crate::lexicon::Lexicon;
use crate::scorer::Scorer;

/// Sentinel rule id for the trivial candidate
pub const NO_SPLIT_RULE_ID: &str = "no-split";
/// Sentinel rule id for left-greedy lexical splits
pub const LEX_LEFT_RULE_ID: &str = "lex-left";
/// Sentinel rule id for right-greedy lexical splits
pub const LEX_RIGHT_RULE_ID: &str = "lex-right";

/// Morphological analyses of one candidate part
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PartAnalysis {
    pub inflections: Vec<InflectionMatch>,
    pub derivations: Vec<DerivationMatch>,
}

impl PartAnalysis {
    /// Does any analysis at all exist for this part?
    pub fn has_any(&self) -> bool {
        !self.inflections.is_empty() || !self.derivations.is_empty()
    }
}

/// Component and composite scores of a candidate
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct CandidateScores {
    pub rule: f64,
    pub freq: f64,
    pub grammar: f64,
    pub composite: f64,
}

/// A proposed analysis of one word span
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Candidate {
    /// Underlying word forms; their sandhi join equals the surface word
    pub parts: Vec<String>,
    /// KB rule id, or one of the sentinel ids
    pub rule_id: String,
    /// Priority of the KB rule, when one applies
    pub rule_priority: Option<u8>,
    /// Byte offset in the surface word where the emitted tokens divide
    /// (None for the trivial candidate)
    pub surface_split: Option<usize>,
    /// Per-part morphological analyses
    pub analyses: Vec<PartAnalysis>,
    pub scores: CandidateScores,
}

impl Candidate {
    fn no_split(word: &str) -> Candidate {
        Candidate {
            parts: vec![word.to_string()],
            rule_id: NO_SPLIT_RULE_ID.to_string(),
            rule_priority: None,
            surface_split: None,
            analyses: Vec::new(),
            scores: CandidateScores::default(),
        }
    }

    /// Is this the trivial single-part candidate?
    pub fn is_no_split(&self) -> bool {
        self.parts.len() == 1
    }
}

/// Options the splitter needs from the engine configuration
#[derive(Debug, Clone)]
pub struct SplitterOptions {
    pub max_candidates: usize,
    pub vedic_mode: bool,
    pub enable_derivation_analysis: bool,
}

/// The candidate generator
pub struct Splitter {
    kb: Arc<GrammarKb>,
    lexicon: Arc<Lexicon>,
    scorer: Scorer,
    options: SplitterOptions,
}

impl Splitter {
    pub fn new(
        kb: Arc<GrammarKb>,
        lexicon: Arc<Lexicon>,
        scorer: Scorer,
        options: SplitterOptions,
    ) -> Self {
        Splitter {
            kb,
            lexicon,
            scorer,
            options,
        }
    }

    /// Propose, analyze, score and rank candidates for one surface word.
    /// The list is never empty: the trivial candidate is always present
    /// before the cap is applied.
    pub fn candidates(&self, word: &str) -> Vec<Candidate> {
        let mut candidates = Vec::new();
        let mut seen: HashSet<(String, String)> = HashSet::new();

        self.rule_candidates(word, &mut candidates, &mut seen);
        self.lexical_candidates(word, &mut candidates, &mut seen);
        candidates.push(Candidate::no_split(word));

        for candidate in &mut candidates {
            self.analyze(candidate);
            self.scorer.score(candidate, &self.lexicon);
        }
        self.scorer.rank(&mut candidates);
        candidates.truncate(self.options.max_candidates);
        candidates
    }

    /// Strategy 1: reverse application of junction realizations found in
    /// the word
    fn rule_candidates(
        &self,
        word: &str,
        candidates: &mut Vec<Candidate>,
        seen: &mut HashSet<(String, String)>,
    ) {
        for (pos, c) in word.char_indices() {
            for entry in self.kb.junctions_starting_with(c) {
                let rule = &self.kb.rules()[entry.rule];
                if rule.vedic_only && !self.options.vedic_mode {
                    continue;
                }
                if !word[pos..].starts_with(&entry.text) {
                    continue;
                }
                let prefix = &word[..pos];
                let suffix = &word[pos + entry.text.len()..];
                let left = match rule.reconstruct_left(prefix, entry.kind) {
                    Some(l) => l,
                    None => continue,
                };
                let right = rule.reconstruct_right(suffix);
                if left.is_empty() || right.is_empty() {
                    continue;
                }
                // The hard constraint: the split must re-join byte-exactly
                if rule.join(&left, &right).as_deref() != Some(word) {
                    continue;
                }
                let split = surface_split_at(pos, &entry.text, &rule.right_pattern);
                if split == 0 || split >= word.len() {
                    continue;
                }
                let key = (format!("{}\u{1}{}", left, right), rule.id.clone());
                if !seen.insert(key) {
                    continue;
                }
                candidates.push(Candidate {
                    parts: vec![left, right],
                    rule_id: rule.id.clone(),
                    rule_priority: Some(rule.priority),
                    surface_split: Some(split),
                    analyses: Vec::new(),
                    scores: CandidateScores::default(),
                });
            }
        }
    }

    /// Strategies 2 and 3: dictionary-driven boundary search. The parts
    /// concatenate to the word, so the junction is plain adjacency.
    fn lexical_candidates(
        &self,
        word: &str,
        candidates: &mut Vec<Candidate>,
        seen: &mut HashSet<(String, String)>,
    ) {
        let boundaries: Vec<usize> = word
            .char_indices()
            .map(|(i, _)| i)
            .filter(|&i| i > 0)
            .collect();

        let mut push = |k: usize, rule_id: &str, candidates: &mut Vec<Candidate>| {
            let (left, right) = (&word[..k], &word[k..]);
            let key = (format!("{}\u{1}{}", left, right), rule_id.to_string());
            if !seen.insert(key) {
                return;
            }
            candidates.push(Candidate {
                parts: vec![left.to_string(), right.to_string()],
                rule_id: rule_id.to_string(),
                rule_priority: None,
                surface_split: Some(k),
                analyses: Vec::new(),
                scores: CandidateScores::default(),
            });
        };

        for &k in boundaries.iter().rev() {
            if self.lexicon.contains(&word[..k]) {
                push(k, LEX_LEFT_RULE_ID, candidates);
            }
        }
        for &k in boundaries.iter() {
            if self.lexicon.contains(&word[k..]) {
                push(k, LEX_RIGHT_RULE_ID, candidates);
            }
        }
    }

    fn analyze(&self, candidate: &mut Candidate) {
        candidate.analyses = candidate
            .parts
            .iter()
            .map(|part| PartAnalysis {
                inflections: self.kb.inflection().analyze(part),
                derivations: if self.options.enable_derivation_analysis {
                    self.kb.derivation().analyze(part)
                } else {
                    Vec::new()
                },
            })
            .collect();
    }
}

/// Where the emitted surface tokens divide. The realized junction stays
/// with the left token, except that a trailing avagraha opens the right
/// token (it marks the right word's elided initial), and a junction ending
/// with the right pattern gives that final piece to the right token.
fn surface_split_at(pos: usize, junction: &str, right_pattern: &str) -> usize {
    let end = pos + junction.len();
    if junction.ends_with(AVAGRAHA) && junction.len() > AVAGRAHA.len_utf8() {
        return end - AVAGRAHA.len_utf8();
    }
    if junction.ends_with(right_pattern) {
        return end - right_pattern.len();
    }
    end
}
