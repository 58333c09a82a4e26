//! Pratyaya (derivational suffix) analysis.
//!
//! Matches the end of a surface word against kṛt, taddhita and strī suffix
//! patterns and extracts base + (suffix kind, category). An empty match
//! list is a legitimate outcome.

use serde::{Deserialize, Serialize};

use crate::error::KbError;

/// Kind of derivational suffix
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DerivationKind {
    /// Primary derivative from a verbal root
    Krt,
    /// Secondary derivative from a nominal
    Taddhita,
    /// Feminine formation
    Stri,
}

/// One suffix pattern
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DerivationPattern {
    pub suffix: String,
    pub kind: DerivationKind,
    /// Free-form tag: "infinitive", "absolutive", "agent", "abstract", ...
    pub category: String,
    pub priority: u8,
}

/// A successful derivation analysis
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DerivationMatch {
    /// The word with the suffix removed
    pub base: String,
    pub suffix: String,
    pub kind: DerivationKind,
    pub category: String,
    pub priority: u8,
}

/// Indexed derivation table, longest suffixes first
#[derive(Debug, Clone, Default)]
pub struct DerivationTable {
    patterns: Vec<DerivationPattern>,
}

impl DerivationTable {
    /// Load patterns from a TSV string
    /// (format: suffix\tkind\tcategory\tpriority)
    pub fn from_tsv(tsv: &str) -> Result<Self, KbError> {
        let mut patterns = Vec::new();
        for (lineno, line) in tsv.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let fields: Vec<&str> = line.split('\t').collect();
            let parse_err = |message: String| KbError::Parse {
                table: "derivation",
                line: lineno + 1,
                message,
            };
            if fields.len() < 4 {
                return Err(parse_err(format!("expected 4 fields, got {}", fields.len())));
            }
            if fields[0].is_empty() {
                return Err(parse_err("empty suffix".to_string()));
            }
            let kind = match fields[1] {
                "krt" => DerivationKind::Krt,
                "taddhita" => DerivationKind::Taddhita,
                "stri" => DerivationKind::Stri,
                other => return Err(parse_err(format!("bad kind `{}`", other))),
            };
            let priority = fields[3]
                .parse::<u8>()
                .map_err(|_| parse_err(format!("bad priority `{}`", fields[3])))?;
            patterns.push(DerivationPattern {
                suffix: fields[0].to_string(),
                kind,
                category: fields[2].to_string(),
                priority,
            });
        }

        patterns.sort_by(|a, b| {
            b.suffix
                .chars()
                .count()
                .cmp(&a.suffix.chars().count())
                .then(b.priority.cmp(&a.priority))
                .then(a.suffix.cmp(&b.suffix))
                .then(a.category.cmp(&b.category))
        });

        Ok(DerivationTable { patterns })
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    pub fn patterns(&self) -> &[DerivationPattern] {
        &self.patterns
    }

    /// Analyze a word for derivational suffixes. The base must keep at
    /// least two characters.
    pub fn analyze(&self, word: &str) -> Vec<DerivationMatch> {
        let mut matches = Vec::new();
        for pattern in &self.patterns {
            if !word.ends_with(&pattern.suffix) {
                continue;
            }
            let base = &word[..word.len() - pattern.suffix.len()];
            if base.chars().count() < 2 {
                continue;
            }
            matches.push(DerivationMatch {
                base: base.to_string(),
                suffix: pattern.suffix.clone(),
                kind: pattern.kind,
                category: pattern.category.clone(),
                priority: pattern.priority,
            });
        }
        matches
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> DerivationTable {
        DerivationTable::from_tsv(
            "तुम्\tkrt\tinfinitive\t10\n\
             त्वा\tkrt\tabsolutive\t10\n\
             ता\ttaddhita\tabstract\t10\n\
             त्व\ttaddhita\tabstract\t10\n\
             वत्\ttaddhita\tpossessive\t10",
        )
        .expect("test table loads")
    }

    #[test]
    fn test_infinitive() {
        let matches = table().analyze("कर्तुम्");
        let m = matches
            .iter()
            .find(|m| m.category == "infinitive")
            .expect("infinitive match");
        assert_eq!(m.base, "कर्");
        assert_eq!(m.kind, DerivationKind::Krt);
    }

    #[test]
    fn test_absolutive() {
        let matches = table().analyze("कृत्वा");
        assert!(matches.iter().any(|m| m.category == "absolutive"));
    }

    #[test]
    fn test_abstract_noun() {
        let matches = table().analyze("सुन्दरता");
        let m = matches.iter().find(|m| m.suffix == "ता").expect("ता match");
        assert_eq!(m.base, "सुन्दर");
        assert_eq!(m.kind, DerivationKind::Taddhita);
    }

    #[test]
    fn test_base_too_short() {
        // base would be `इ`, a single character
        assert!(table().analyze("इता").is_empty());
    }

    #[test]
    fn test_empty_result_is_fine() {
        assert!(table().analyze("रामः").is_empty());
    }

    #[test]
    fn test_bad_tsv_rejected() {
        assert!(DerivationTable::from_tsv("ता\tnoun\tabstract\t10").is_err());
        assert!(DerivationTable::from_tsv("ता\tkrt\tabstract").is_err());
        assert!(DerivationTable::from_tsv("\tkrt\tabstract\t10").is_err());
    }
}
