//! Character classification for Devanāgarī text.
//!
//! This module categorizes each character of a Sanskrit string into the
//! class used by downstream segmentation (vowel, consonant, virāma,
//! accent mark, daṇḍa, etc.).

use once_cell::sync::Lazy;
use std::collections::HashMap;

/// Character classes used in Devanāgarī text processing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CharClass {
    /// Independent vowel (अ, आ, इ, ...)
    VowelIndependent,
    /// Dependent vowel sign / mātrā (ा, ि, ...)
    VowelSign,
    /// Consonant letter
    Cons,
    /// Virāma (्), suppresses the inherent vowel
    Virama,
    /// Anusvāra (ं) and candrabindu (ँ)
    Anusvara,
    /// Visarga (ः)
    Visarga,
    /// Avagraha (ऽ), marks an elided initial अ
    Avagraha,
    /// Vedic accent mark (udātta, anudātta, svarita, Vedic Extensions)
    VedicAccent,
    /// Daṇḍa (।) and double daṇḍa (॥)
    Danda,
    /// Devanāgarī or ASCII digit
    Digit,
    /// Whitespace
    Whitespace,
    /// Anything else
    #[default]
    Other,
}

impl CharClass {
    /// Check if this class can be part of a word run
    pub fn is_word_part(&self) -> bool {
        matches!(
            self,
            CharClass::VowelIndependent
                | CharClass::VowelSign
                | CharClass::Cons
                | CharClass::Virama
                | CharClass::Anusvara
                | CharClass::Visarga
                | CharClass::Avagraha
                | CharClass::VedicAccent
        )
    }
}

/// Mapping from independent vowels to their dependent (mātrā) forms.
///
/// अ has no mātrā: after a consonant it is the inherent vowel.
pub static VOWEL_TO_MATRA: Lazy<HashMap<char, char>> = Lazy::new(|| {
    let mut m = HashMap::new();
    m.insert('आ', 'ा');
    m.insert('इ', 'ि');
    m.insert('ई', 'ी');
    m.insert('उ', 'ु');
    m.insert('ऊ', 'ू');
    m.insert('ऋ', 'ृ');
    m.insert('ॠ', 'ॄ');
    m.insert('ए', 'े');
    m.insert('ऐ', 'ै');
    m.insert('ओ', 'ो');
    m.insert('औ', 'ौ');
    m
});

/// The mātrā form of an independent vowel, if it has one
pub fn matra_for(vowel: char) -> Option<char> {
    VOWEL_TO_MATRA.get(&vowel).copied()
}

/// Virāma (halanta)
pub const VIRAMA: char = '\u{094D}';

/// Visarga
pub const VISARGA: char = '\u{0903}';

/// Avagraha
pub const AVAGRAHA: char = '\u{093D}';

/// Get the class of a character
pub fn get_char_class(c: char) -> CharClass {
    if c.is_whitespace() {
        return CharClass::Whitespace;
    }

    match c {
        // Digits first: Devanāgarī and ASCII
        '\u{0966}'..='\u{096F}' | '0'..='9' => CharClass::Digit,

        // Daṇḍa and double daṇḍa
        '\u{0964}' | '\u{0965}' => CharClass::Danda,

        // Nasalization marks
        '\u{0900}'..='\u{0902}' => CharClass::Anusvara,
        '\u{0903}' => CharClass::Visarga,

        // Independent vowels (including candra forms and ॐ)
        '\u{0904}'..='\u{0914}' | '\u{0950}' | '\u{0960}' | '\u{0961}' | '\u{0972}' => {
            CharClass::VowelIndependent
        }

        // Consonants (main block plus nukta forms)
        '\u{0915}'..='\u{0939}' | '\u{0958}'..='\u{095F}' | '\u{0973}'..='\u{097F}' => {
            CharClass::Cons
        }

        '\u{093D}' => CharClass::Avagraha,

        // Dependent vowel signs; the nukta rides along with the word
        '\u{093A}'..='\u{093C}'
        | '\u{093E}'..='\u{094C}'
        | '\u{094E}'
        | '\u{094F}'
        | '\u{0955}'..='\u{0957}'
        | '\u{0962}'
        | '\u{0963}' => CharClass::VowelSign,

        '\u{094D}' => CharClass::Virama,

        // Vedic accents: stress signs in the main block, the Vedic
        // Extensions block, and Devanāgarī Extended tone marks
        '\u{0951}'..='\u{0954}' | '\u{1CD0}'..='\u{1CFF}' | '\u{A8E0}'..='\u{A8FF}' => {
            CharClass::VedicAccent
        }

        _ => CharClass::Other,
    }
}

/// A string with a character class for each of its characters
#[derive(Debug, Clone)]
pub struct DevaString {
    /// The underlying string
    pub text: String,
    /// Class for each character (by char index)
    pub classes: Vec<CharClass>,
}

impl DevaString {
    /// Create a new DevaString from a string
    pub fn new(s: &str) -> Self {
        let classes: Vec<CharClass> = s.chars().map(get_char_class).collect();
        DevaString {
            text: s.to_string(),
            classes,
        }
    }

    /// Get the length (number of characters)
    pub fn len(&self) -> usize {
        self.classes.len()
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    /// Get the class at a specific character index
    pub fn get_class(&self, idx: usize) -> Option<CharClass> {
        self.classes.get(idx).copied()
    }
}

/// Check that a string's final character is a consonant letter
pub fn ends_with_consonant(s: &str) -> bool {
    s.chars()
        .next_back()
        .map(|c| get_char_class(c) == CharClass::Cons)
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_consonants() {
        assert_eq!(get_char_class('क'), CharClass::Cons);
        assert_eq!(get_char_class('र'), CharClass::Cons);
        assert_eq!(get_char_class('ह'), CharClass::Cons);
        assert_eq!(get_char_class('\u{0958}'), CharClass::Cons);
    }

    #[test]
    fn test_vowels_and_signs() {
        assert_eq!(get_char_class('अ'), CharClass::VowelIndependent);
        assert_eq!(get_char_class('औ'), CharClass::VowelIndependent);
        assert_eq!(get_char_class('ा'), CharClass::VowelSign);
        assert_eq!(get_char_class('ृ'), CharClass::VowelSign);
        assert_eq!(get_char_class('्'), CharClass::Virama);
    }

    #[test]
    fn test_marks() {
        assert_eq!(get_char_class('ं'), CharClass::Anusvara);
        assert_eq!(get_char_class('ँ'), CharClass::Anusvara);
        assert_eq!(get_char_class('ः'), CharClass::Visarga);
        assert_eq!(get_char_class('ऽ'), CharClass::Avagraha);
    }

    #[test]
    fn test_vedic_accents() {
        assert_eq!(get_char_class('\u{0951}'), CharClass::VedicAccent);
        assert_eq!(get_char_class('\u{0952}'), CharClass::VedicAccent);
        assert_eq!(get_char_class('\u{1CD0}'), CharClass::VedicAccent);
    }

    #[test]
    fn test_danda_and_digits() {
        assert_eq!(get_char_class('।'), CharClass::Danda);
        assert_eq!(get_char_class('॥'), CharClass::Danda);
        assert_eq!(get_char_class('१'), CharClass::Digit);
        assert_eq!(get_char_class('7'), CharClass::Digit);
    }

    #[test]
    fn test_whitespace_and_other() {
        assert_eq!(get_char_class(' '), CharClass::Whitespace);
        assert_eq!(get_char_class('\t'), CharClass::Whitespace);
        assert_eq!(get_char_class('x'), CharClass::Other);
        assert_eq!(get_char_class('。'), CharClass::Other);
    }

    #[test]
    fn test_matra_map() {
        assert_eq!(matra_for('आ'), Some('ा'));
        assert_eq!(matra_for('ओ'), Some('ो'));
        assert_eq!(matra_for('अ'), None);
    }

    #[test]
    fn test_deva_string() {
        let ds = DevaString::new("रामः");
        assert_eq!(ds.len(), 4);
        assert_eq!(ds.get_class(0), Some(CharClass::Cons)); // र
        assert_eq!(ds.get_class(1), Some(CharClass::VowelSign)); // ा
        assert_eq!(ds.get_class(2), Some(CharClass::Cons)); // म
        assert_eq!(ds.get_class(3), Some(CharClass::Visarga)); // ः
    }

    #[test]
    fn test_ends_with_consonant() {
        assert!(ends_with_consonant("राम"));
        assert!(!ends_with_consonant("रामः"));
        assert!(!ends_with_consonant("सीता"));
        assert!(!ends_with_consonant(""));
    }
}
