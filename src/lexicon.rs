//! Lexicon: surface word → corpus occurrence count.
//!
//! The lexicon backs the frequency component of candidate scoring and the
//! dictionary-driven boundary search. It is read-only once the engine is
//! built, but supports incremental growth while being assembled.
//!
//! Loading is lenient: a malformed line is skipped, and a missing or empty
//! lexicon is legal (frequency scores become zero, segmentation still runs).

use std::collections::HashMap;

/// Embedded seed vocabulary (word, frequency), one entry per line
static SEED_LEXICON: &str = include_str!("data/lexicon.tsv");

/// Word-frequency store with a derived global maximum
#[derive(Debug, Clone, Default)]
pub struct Lexicon {
    freqs: HashMap<String, u64>,
    max_freq: u64,
}

impl Lexicon {
    /// Create an empty lexicon
    pub fn new() -> Self {
        Lexicon::default()
    }

    /// Load the embedded seed vocabulary
    pub fn builtin() -> Self {
        Self::from_tsv(SEED_LEXICON)
    }

    /// Load words from a TSV string (format: word\tfrequency).
    ///
    /// Lines that are empty, start with `#`, or fail to parse are skipped.
    pub fn from_tsv(tsv: &str) -> Self {
        let mut lexicon = Lexicon::new();
        for line in tsv.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let mut parts = line.split('\t');
            let word = match parts.next() {
                Some(w) if !w.is_empty() => w,
                _ => continue,
            };
            let freq = parts
                .next()
                .and_then(|f| f.trim().parse::<u64>().ok())
                .unwrap_or(1);
            lexicon.insert(word, freq);
        }
        lexicon
    }

    fn insert(&mut self, word: &str, freq: u64) {
        let entry = self.freqs.entry(word.to_string()).or_insert(0);
        *entry = (*entry).max(freq);
        self.max_freq = self.max_freq.max(*entry);
    }

    /// Record one occurrence of a word
    pub fn add_word(&mut self, word: &str) {
        let word = word.trim();
        if word.is_empty() {
            return;
        }
        let entry = self.freqs.entry(word.to_string()).or_insert(0);
        *entry += 1;
        self.max_freq = self.max_freq.max(*entry);
    }

    /// Record one occurrence of each word
    pub fn add_words<'a, I: IntoIterator<Item = &'a str>>(&mut self, words: I) {
        for word in words {
            self.add_word(word);
        }
    }

    /// Check whether a word is known
    pub fn contains(&self, word: &str) -> bool {
        self.freqs.contains_key(word)
    }

    /// Occurrence count for a word (0 if unknown)
    pub fn frequency(&self, word: &str) -> u64 {
        self.freqs.get(word).copied().unwrap_or(0)
    }

    /// The highest frequency seen
    pub fn max_frequency(&self) -> u64 {
        self.max_freq
    }

    /// Number of distinct words
    pub fn len(&self) -> usize {
        self.freqs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.freqs.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_tsv() {
        let lexicon = Lexicon::from_tsv("राम\t2500\nसीता\t1200\n# comment\n\nच\t5000");
        assert_eq!(lexicon.len(), 3);
        assert_eq!(lexicon.frequency("राम"), 2500);
        assert_eq!(lexicon.frequency("सीता"), 1200);
        assert_eq!(lexicon.frequency("अश्व"), 0);
        assert_eq!(lexicon.max_frequency(), 5000);
    }

    #[test]
    fn test_unparseable_frequency_defaults() {
        let lexicon = Lexicon::from_tsv("राम\tabc\nगज\t42");
        // an unparseable frequency falls back to a count of 1
        assert_eq!(lexicon.frequency("राम"), 1);
        assert_eq!(lexicon.frequency("गज"), 42);
        assert_eq!(lexicon.len(), 2);
    }

    #[test]
    fn test_add_word_counts() {
        let mut lexicon = Lexicon::new();
        lexicon.add_words(["धर्म", "धर्म", "अर्थ"]);
        assert_eq!(lexicon.frequency("धर्म"), 2);
        assert_eq!(lexicon.frequency("अर्थ"), 1);
        assert_eq!(lexicon.max_frequency(), 2);
    }

    #[test]
    fn test_empty_lexicon() {
        let lexicon = Lexicon::new();
        assert!(lexicon.is_empty());
        assert_eq!(lexicon.frequency("राम"), 0);
        assert_eq!(lexicon.max_frequency(), 0);
    }

    #[test]
    fn test_builtin_seed() {
        let lexicon = Lexicon::builtin();
        assert!(!lexicon.is_empty());
        assert!(lexicon.contains("राम"));
        assert!(lexicon.contains("अत्र"));
    }
}
