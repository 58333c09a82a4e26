//! # vedic-tokenizer-rs
//!
//! A reversible Sanskrit tokenizer written in Rust.
//!
//! This is a Rust port of the Python `vedic_tokenizer` library. It segments
//! Devanāgarī text into linguistically meaningful units with a byte-exact
//! reversibility guarantee: concatenating the emitted tokens reproduces the
//! normalized input. On top of segmentation it attaches vibhakti (case
//! ending) and pratyaya (derivational suffix) analyses and proposes sandhi
//! splits for joined word forms, ranked by rule priority, corpus frequency
//! and grammatical validity.
//!
//! ## Quick Start
//!
//! ```rust
//! use vedic_tokenizer_rs::{GrammarKb, Lexicon, Tokenizer, TokenizerConfig};
//!
//! let kb = GrammarKb::builtin().expect("grammar tables load");
//! let lexicon = Lexicon::builtin();
//! let tokenizer = Tokenizer::new(kb, lexicon, TokenizerConfig::default())
//!     .expect("default config is valid");
//!
//! let text = "रामः वनं गच्छति";
//! let tokens = tokenizer.tokenize(text);
//!
//! // Lossless: concatenation reproduces the input
//! assert_eq!(Tokenizer::detokenize(&tokens), text);
//! ```
//!
//! ## Custom Data
//!
//! The grammar tables and the lexicon are plain TSV; callers can supply
//! their own via [`GrammarKb::from_tsv`] and [`Lexicon::from_tsv`] instead
//! of the embedded defaults.
//!
//! ## Simple Segmentation (No Grammar)
//!
//! If you just need class-run segmentation without sandhi analysis:
//!
//! ```rust
//! use vedic_tokenizer_rs::SafeTokenizer;
//!
//! let tokens = SafeTokenizer::tokenize("रामः वनं गच्छति।");
//! for token in &tokens {
//!     println!("{}: {}", token.text, token.kind.as_str());
//! }
//! ```

pub mod chars;
pub mod chunker;
pub mod config;
pub mod derivation;
pub mod error;
pub mod inflection;
pub mod kb;
pub mod lexicon;
pub mod normalizer;
pub mod sandhi;
pub mod scorer;
pub mod splitter;
pub mod token;
pub mod tokenizer;
pub mod verifier;

// Re-export main types for convenience
pub use chars::{get_char_class, CharClass, DevaString};
pub use chunker::{Chunker, RawToken};
pub use config::{ScoreWeights, TokenizerConfig};
pub use derivation::{DerivationKind, DerivationMatch, DerivationTable};
pub use error::{ConfigError, KbError};
pub use inflection::{Case, Gender, GramNumber, InflectionMatch, InflectionTable, StemClass};
pub use kb::{GrammarKb, RuleCategory, SandhiRule};
pub use lexicon::Lexicon;
pub use normalizer::{normalize, Normalizer};
pub use scorer::{Scorer, LEXICAL_RULE_SCORE, NO_SPLIT_RULE_SCORE};
pub use splitter::{Candidate, Splitter, NO_SPLIT_RULE_ID};
pub use token::{Token, TokenKind};
pub use tokenizer::{SafeTokenizer, Statistics, Tokenizer};
pub use verifier::Verifier;

/// Version of the library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
