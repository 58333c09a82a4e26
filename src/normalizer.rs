//! Unicode normalization for Devanāgarī text.
//!
//! Applies NFC (canonical composition) so that different encodings of the
//! same akṣara compare equal. The normalized string is the canonical input
//! from which all token offsets are measured; byte content is not altered
//! beyond NFC, except for the opt-out accent stripping below.

use unicode_normalization::UnicodeNormalization;

use crate::chars::{get_char_class, CharClass};

/// Normalizes input text for tokenization.
///
/// Vedic accent marks attach to the preceding base character and are kept
/// verbatim by default. Setting `preserve_vedic_accents` to `false` strips
/// them, which forfeits byte-level reversibility against the raw input.
#[derive(Debug, Clone)]
pub struct Normalizer {
    preserve_vedic_accents: bool,
}

impl Default for Normalizer {
    fn default() -> Self {
        Normalizer {
            preserve_vedic_accents: true,
        }
    }
}

impl Normalizer {
    pub fn new(preserve_vedic_accents: bool) -> Self {
        Normalizer {
            preserve_vedic_accents,
        }
    }

    /// Normalize text to canonical form. Idempotent.
    pub fn normalize(&self, text: &str) -> String {
        let composed: String = text.nfc().collect();
        if self.preserve_vedic_accents {
            composed
        } else {
            composed
                .chars()
                .filter(|c| get_char_class(*c) != CharClass::VedicAccent)
                .collect()
        }
    }
}

/// NFC-normalize a string with default settings
pub fn normalize(text: &str) -> String {
    Normalizer::default().normalize(text)
}
