//! Class-run segmentation for Devanāgarī text.
//!
//! This module walks a normalized string and coalesces runs of the same
//! character class into raw tokens (word runs, whitespace runs, punctuation,
//! digits, other). Raw tokens partition the input exactly: no gaps, no
//! overlap, so their concatenation reproduces the string byte for byte.

use crate::chars::{CharClass, DevaString};
use crate::token::TokenKind;

/// A raw token: a half-open byte span over the normalized input
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawToken {
    /// Starting byte offset
    pub start: usize,
    /// One past the last byte
    pub end: usize,
    /// The kind of this run
    pub kind: TokenKind,
}

impl RawToken {
    pub fn new(start: usize, end: usize, kind: TokenKind) -> Self {
        RawToken { start, end, kind }
    }

    /// Length in bytes
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

fn kind_of(class: CharClass) -> TokenKind {
    match class {
        c if c.is_word_part() => TokenKind::Word,
        CharClass::Whitespace => TokenKind::Whitespace,
        CharClass::Danda => TokenKind::Punct,
        CharClass::Digit => TokenKind::Digit,
        _ => TokenKind::Other,
    }
}

/// Chunker producing raw tokens from a normalized string
pub struct Chunker {
    ds: DevaString,
}

impl Chunker {
    /// Create a new chunker for the given (already normalized) string
    pub fn new(text: &str) -> Self {
        Chunker {
            ds: DevaString::new(text),
        }
    }

    /// Get the underlying string
    pub fn text(&self) -> &str {
        &self.ds.text
    }

    /// Segment the text into raw tokens by coalescing same-kind runs
    pub fn raw_tokens(&self) -> Vec<RawToken> {
        let mut tokens = Vec::new();
        if self.ds.is_empty() {
            return tokens;
        }

        let mut run_start = 0usize;
        let mut run_kind: Option<TokenKind> = None;
        let mut pos = 0usize;

        for (i, c) in self.ds.text.chars().enumerate() {
            let kind = kind_of(self.ds.classes[i]);
            match run_kind {
                Some(k) if k == kind => {}
                Some(k) => {
                    tokens.push(RawToken::new(run_start, pos, k));
                    run_start = pos;
                    run_kind = Some(kind);
                }
                None => {
                    run_kind = Some(kind);
                }
            }
            pos += c.len_utf8();
        }

        if let Some(k) = run_kind {
            tokens.push(RawToken::new(run_start, pos, k));
        }

        tokens
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(text: &str) -> Vec<(String, TokenKind)> {
        let chunker = Chunker::new(text);
        chunker
            .raw_tokens()
            .iter()
            .map(|t| (text[t.start..t.end].to_string(), t.kind))
            .collect()
    }

    #[test]
    fn test_words_and_spaces() {
        let runs = kinds("राम सीता");
        assert_eq!(
            runs,
            vec![
                ("राम".to_string(), TokenKind::Word),
                (" ".to_string(), TokenKind::Whitespace),
                ("सीता".to_string(), TokenKind::Word),
            ]
        );
    }

    #[test]
    fn test_danda_is_punct() {
        let runs = kinds("गच्छति।");
        assert_eq!(runs.len(), 2);
        assert_eq!(runs[1], ("।".to_string(), TokenKind::Punct));
    }

    #[test]
    fn test_double_danda_coalesces() {
        let runs = kinds("नमः॥");
        assert_eq!(runs[1], ("॥".to_string(), TokenKind::Punct));
    }

    #[test]
    fn test_digits() {
        let runs = kinds("अध्याय १२");
        assert_eq!(runs[2], ("१२".to_string(), TokenKind::Digit));
    }

    #[test]
    fn test_whitespace_run_coalesces() {
        let runs = kinds("राम  \tसीता");
        assert_eq!(runs.len(), 3);
        assert_eq!(runs[1].1, TokenKind::Whitespace);
        assert_eq!(runs[1].0, "  \t");
    }

    #[test]
    fn test_partition_invariant() {
        let text = "धर्मक्षेत्रे कुरुक्षेत्रे। abc १२३";
        let chunker = Chunker::new(text);
        let runs = chunker.raw_tokens();
        let mut pos = 0;
        for t in &runs {
            assert_eq!(t.start, pos, "no gaps");
            pos = t.end;
        }
        assert_eq!(pos, text.len(), "covers the whole input");
        let joined: String = runs.iter().map(|t| &text[t.start..t.end]).collect();
        assert_eq!(joined, text);
    }

    #[test]
    fn test_avagraha_stays_in_word() {
        let runs = kinds("रामोऽत्र");
        assert_eq!(runs.len(), 1);
        assert_eq!(runs[0].1, TokenKind::Word);
    }

    #[test]
    fn test_accent_stays_in_word() {
        let runs = kinds("अ॒");
        assert_eq!(runs, vec![("अ॒".to_string(), TokenKind::Word)]);
    }

    #[test]
    fn test_mixed_scripts() {
        let runs = kinds("राम hello");
        assert_eq!(runs[0].1, TokenKind::Word);
        assert_eq!(runs[1].1, TokenKind::Whitespace);
        assert_eq!(runs[2].1, TokenKind::Other);
    }

    #[test]
    fn test_empty() {
        assert!(Chunker::new("").raw_tokens().is_empty());
    }
}
