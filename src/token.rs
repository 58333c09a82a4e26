//! Token representation for Sanskrit text.
//!
//! A Token is an exact substring of the normalized input, optionally
//! carrying morphological annotations. The surface string is the
//! authoritative property: concatenating tokens in order reproduces the
//! normalized input byte for byte. Annotations are advisory.

use serde::{Deserialize, Serialize};

use crate::derivation::DerivationMatch;
use crate::inflection::InflectionMatch;

/// The kind of token
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TokenKind {
    /// Devanāgarī word material (akṣaras, marks, avagraha, accents)
    #[default]
    Word,
    /// Whitespace run
    Whitespace,
    /// Daṇḍa punctuation
    Punct,
    /// Digit run
    Digit,
    /// Other/unknown characters
    Other,
}

impl TokenKind {
    /// Convert to a string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            TokenKind::Word => "WORD",
            TokenKind::Whitespace => "WHITESPACE",
            TokenKind::Punct => "PUNCT",
            TokenKind::Digit => "DIGIT",
            TokenKind::Other => "OTHER",
        }
    }
}

/// A single token from the tokenization process
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Token {
    /// The surface text, an exact substring of the normalized input
    pub text: String,

    /// Starting byte offset in the normalized input
    pub start: usize,

    /// Length in bytes
    pub len: usize,

    /// The kind of this token
    pub kind: TokenKind,

    /// Underlying word form before sandhi, when it differs from the surface
    /// (e.g. surface `रामो` from underlying `रामः`)
    pub underlying: Option<String>,

    /// Sandhi rule that licensed the split this token came from
    pub rule_id: Option<String>,

    /// Possible case-ending analyses of the underlying word
    pub inflections: Vec<InflectionMatch>,

    /// Possible derivational-suffix analyses of the underlying word
    pub derivations: Vec<DerivationMatch>,
}

impl Token {
    /// Create a new empty token
    pub fn new() -> Self {
        Token::default()
    }

    /// Create a token with text and position
    pub fn with_text(text: String, start: usize, len: usize, kind: TokenKind) -> Self {
        Token {
            text,
            start,
            len,
            kind,
            ..Default::default()
        }
    }

    /// The word form to analyze: the underlying form if the surface was
    /// transformed by sandhi, otherwise the surface itself
    pub fn word_form(&self) -> &str {
        self.underlying.as_deref().unwrap_or(&self.text)
    }

    /// Check if this is a word token
    pub fn is_word(&self) -> bool {
        self.kind == TokenKind::Word
    }

    /// Check if this is punctuation
    pub fn is_punct(&self) -> bool {
        self.kind == TokenKind::Punct
    }
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.text)?;
        if let Some(ref u) = self.underlying {
            write!(f, "({})", u)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_creation() {
        let token = Token::with_text("रामः".to_string(), 0, 12, TokenKind::Word);
        assert_eq!(token.text, "रामः");
        assert_eq!(token.start, 0);
        assert_eq!(token.kind, TokenKind::Word);
        assert!(token.underlying.is_none());
    }

    #[test]
    fn test_word_form_prefers_underlying() {
        let mut token = Token::with_text("रामो".to_string(), 0, 12, TokenKind::Word);
        assert_eq!(token.word_form(), "रामो");
        token.underlying = Some("रामः".to_string());
        assert_eq!(token.word_form(), "रामः");
    }

    #[test]
    fn test_token_display() {
        let mut token = Token::with_text("रामो".to_string(), 0, 12, TokenKind::Word);
        token.underlying = Some("रामः".to_string());
        assert_eq!(format!("{}", token), "रामो(रामः)");
    }

    #[test]
    fn test_kind_as_str() {
        assert_eq!(TokenKind::Word.as_str(), "WORD");
        assert_eq!(TokenKind::Punct.as_str(), "PUNCT");
    }
}
