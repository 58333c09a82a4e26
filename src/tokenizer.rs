//! The tokenization engine.
//!
//! Orchestrates the pipeline: normalize, segment into raw runs, propose and
//! score sandhi candidates per word, emit tokens, verify the byte-exact
//! round trip. Whatever happens inside, `tokenize` is total: it returns a
//! token list whose concatenation equals the normalized input, falling back
//! to one-token-per-run safe segmentation if speculative emission ever
//! fails verification.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use serde::Serialize;

use crate::chunker::{Chunker, RawToken};
use crate::config::TokenizerConfig;
use crate::error::ConfigError;
use crate::kb::GrammarKb;
use crate::lexicon::Lexicon;
use crate::normalizer::Normalizer;
use crate::scorer::Scorer;
use crate::splitter::{Candidate, Splitter, SplitterOptions};
use crate::token::{Token, TokenKind};
use crate::verifier::Verifier;

/// Snapshot of engine counters
#[derive(Debug, Clone, Serialize)]
pub struct Statistics {
    /// Number of `tokenize` calls
    pub total_calls: u64,
    /// Round trips verified successfully
    pub verified_count: u64,
    /// Round trips that fell back to safe segmentation
    pub fallback_count: u64,
    /// Word runs processed through the splitter
    pub words_processed: u64,
    /// Mean size of the candidate pool per word
    pub average_candidates_per_word: f64,
    /// Winning rule ids and how often they won, most frequent first
    pub rule_matches: Vec<(String, u64)>,
}

/// The tokenization engine. One instance is safe to share across threads
/// for concurrent `tokenize` calls.
pub struct Tokenizer {
    kb: Arc<GrammarKb>,
    config: TokenizerConfig,
    normalizer: Normalizer,
    splitter: Splitter,
    verifier: Verifier,
    calls: AtomicU64,
    words: AtomicU64,
    candidates_generated: AtomicU64,
    rule_matches: Mutex<HashMap<String, u64>>,
}

impl Tokenizer {
    /// Build an engine from a knowledge base, a lexicon and a
    /// configuration. Fails only on an invalid configuration.
    pub fn new(
        kb: GrammarKb,
        lexicon: Lexicon,
        config: TokenizerConfig,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        let kb = Arc::new(kb);
        let lexicon = Arc::new(lexicon);
        let scorer = Scorer::new(config.weights, config.frequency_reference);
        let splitter = Splitter::new(
            Arc::clone(&kb),
            Arc::clone(&lexicon),
            scorer,
            SplitterOptions {
                max_candidates: config.max_candidates,
                vedic_mode: config.vedic_mode,
                enable_derivation_analysis: config.enable_derivation_analysis,
            },
        );
        Ok(Tokenizer {
            normalizer: Normalizer::new(config.preserve_vedic_accents),
            splitter,
            verifier: Verifier::new(),
            calls: AtomicU64::new(0),
            words: AtomicU64::new(0),
            candidates_generated: AtomicU64::new(0),
            rule_matches: Mutex::new(HashMap::new()),
            kb,
            config,
        })
    }

    /// The engine's knowledge base
    pub fn kb(&self) -> &GrammarKb {
        &self.kb
    }

    /// Tokenize text. Total: always returns a token list whose
    /// concatenation equals the normalized input (unless whitespace or
    /// accent preservation was disabled in the configuration).
    pub fn tokenize(&self, text: &str) -> Vec<Token> {
        self.calls.fetch_add(1, Ordering::Relaxed);
        let norm = self.normalizer.normalize(text);
        let raw = Chunker::new(&norm).raw_tokens();

        let mut tokens: Vec<Token> = Vec::with_capacity(raw.len());
        for rt in &raw {
            match rt.kind {
                TokenKind::Word if self.config.enable_sandhi_splitting => {
                    self.emit_word(&norm, rt, &mut tokens);
                }
                TokenKind::Word => {
                    tokens.push(self.plain_word_token(&norm, rt));
                }
                kind => {
                    tokens.push(Token::with_text(
                        norm[rt.start..rt.end].to_string(),
                        rt.start,
                        rt.len(),
                        kind,
                    ));
                }
            }
        }

        if self.config.preserve_whitespace {
            // Reversibility is the invariant; a miss means some candidate
            // slipped past its re-join check, so discard and go safe
            if !self.verifier.verify(&norm, &tokens) {
                eprintln!("[WARN] token round trip failed, using safe segmentation");
                tokens = safe_tokens(&norm, &raw);
            }
        } else {
            tokens.retain(|t| t.kind != TokenKind::Whitespace);
        }

        tokens
    }

    /// Reconstruct text from tokens by pure concatenation
    pub fn detokenize(tokens: &[Token]) -> String {
        tokens.iter().map(|t| t.text.as_str()).collect()
    }

    /// Scored candidate analyses of a single word, best first
    pub fn analyze_word(&self, word: &str) -> Vec<Candidate> {
        let norm = self.normalizer.normalize(word);
        self.splitter.candidates(&norm)
    }

    /// Counter snapshot
    pub fn statistics(&self) -> Statistics {
        let words = self.words.load(Ordering::Relaxed);
        let generated = self.candidates_generated.load(Ordering::Relaxed);
        let mut rule_matches: Vec<(String, u64)> = self
            .rule_matches
            .lock()
            .map(|m| m.iter().map(|(k, v)| (k.clone(), *v)).collect())
            .unwrap_or_default();
        rule_matches.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));
        Statistics {
            total_calls: self.calls.load(Ordering::Relaxed),
            verified_count: self.verifier.verified(),
            fallback_count: self.verifier.failed(),
            words_processed: words,
            average_candidates_per_word: if words == 0 {
                0.0
            } else {
                generated as f64 / words as f64
            },
            rule_matches,
        }
    }

    fn emit_word(&self, norm: &str, rt: &RawToken, tokens: &mut Vec<Token>) {
        let surface = &norm[rt.start..rt.end];
        let candidates = self.splitter.candidates(surface);
        self.words.fetch_add(1, Ordering::Relaxed);
        self.candidates_generated
            .fetch_add(candidates.len() as u64, Ordering::Relaxed);

        let winner = match candidates.first() {
            Some(w) => w,
            None => {
                tokens.push(self.plain_word_token(norm, rt));
                return;
            }
        };
        self.count_rule_match(&winner.rule_id);

        match winner.surface_split {
            Some(split) if winner.parts.len() == 2 && split > 0 && split < surface.len() => {
                let (left_text, right_text) = surface.split_at(split);
                for (i, text) in [left_text, right_text].into_iter().enumerate() {
                    let start = rt.start + if i == 0 { 0 } else { split };
                    let mut token =
                        Token::with_text(text.to_string(), start, text.len(), TokenKind::Word);
                    token.underlying = if winner.parts[i] == text {
                        None
                    } else {
                        Some(winner.parts[i].clone())
                    };
                    token.rule_id = Some(winner.rule_id.clone());
                    if let Some(analysis) = winner.analyses.get(i) {
                        token.inflections = analysis.inflections.clone();
                        token.derivations = analysis.derivations.clone();
                    }
                    tokens.push(token);
                }
            }
            _ => {
                let mut token = self.plain_word_token(norm, rt);
                match winner.analyses.first() {
                    Some(analysis) if winner.is_no_split() => {
                        token.inflections = analysis.inflections.clone();
                        token.derivations = analysis.derivations.clone();
                    }
                    _ => {
                        token.inflections = self.kb.inflection().analyze(surface);
                        if self.config.enable_derivation_analysis {
                            token.derivations = self.kb.derivation().analyze(surface);
                        }
                    }
                }
                tokens.push(token);
            }
        }
    }

    fn plain_word_token(&self, norm: &str, rt: &RawToken) -> Token {
        Token::with_text(
            norm[rt.start..rt.end].to_string(),
            rt.start,
            rt.len(),
            TokenKind::Word,
        )
    }

    fn count_rule_match(&self, rule_id: &str) {
        if let Ok(mut matches) = self.rule_matches.lock() {
            *matches.entry(rule_id.to_string()).or_insert(0) += 1;
        }
    }
}

/// One token per raw run, verbatim. Cannot fail: the runs partition the
/// normalized input by construction.
fn safe_tokens(norm: &str, raw: &[RawToken]) -> Vec<Token> {
    raw.iter()
        .map(|rt| {
            Token::with_text(
                norm[rt.start..rt.end].to_string(),
                rt.start,
                rt.len(),
                rt.kind,
            )
        })
        .collect()
}

/// A dictionary-free tokenizer: normalizes, segments into raw runs, and
/// emits each run verbatim. This is also the shape of the engine's
/// fallback path.
pub struct SafeTokenizer;

impl SafeTokenizer {
    pub fn tokenize(text: &str) -> Vec<Token> {
        let norm = crate::normalizer::normalize(text);
        let raw = Chunker::new(&norm).raw_tokens();
        safe_tokens(&norm, &raw)
    }
}
