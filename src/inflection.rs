//! Vibhakti (case ending) analysis.
//!
//! Matches the end of a surface word against the nominal declension
//! paradigms and extracts stem + (case, number, gender, stem class).
//! Sanskrit endings are heavily ambiguous (e.g. `-ाः` is nominative plural
//! for several stem classes at once), so the analyzer returns every match;
//! collapsing the ambiguity is the scorer's job.

use serde::{Deserialize, Serialize};

use crate::chars::{ends_with_consonant, get_char_class, CharClass};
use crate::error::KbError;

/// The eight Sanskrit cases
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Case {
    Nominative,
    Accusative,
    Instrumental,
    Dative,
    Ablative,
    Genitive,
    Locative,
    Vocative,
}

impl Case {
    /// Traditional case index, 1 through 8
    pub fn index(&self) -> u8 {
        match self {
            Case::Nominative => 1,
            Case::Accusative => 2,
            Case::Instrumental => 3,
            Case::Dative => 4,
            Case::Ablative => 5,
            Case::Genitive => 6,
            Case::Locative => 7,
            Case::Vocative => 8,
        }
    }

    fn from_index(i: u8) -> Option<Self> {
        match i {
            1 => Some(Case::Nominative),
            2 => Some(Case::Accusative),
            3 => Some(Case::Instrumental),
            4 => Some(Case::Dative),
            5 => Some(Case::Ablative),
            6 => Some(Case::Genitive),
            7 => Some(Case::Locative),
            8 => Some(Case::Vocative),
            _ => None,
        }
    }
}

/// Grammatical number
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GramNumber {
    Singular,
    Dual,
    Plural,
}

/// Grammatical gender
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Gender {
    Masculine,
    Feminine,
    Neuter,
    Unknown,
}

/// Stem class by the final phonetic element of the stem
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StemClass {
    A,
    Aa,
    I,
    Ii,
    U,
    Uu,
    R,
    Consonant,
}

impl StemClass {
    /// The stem-final vowel in mātrā form, if the class has one
    fn stem_matra(&self) -> Option<char> {
        match self {
            StemClass::A => None,
            StemClass::Aa => Some('ा'),
            StemClass::I => Some('ि'),
            StemClass::Ii => Some('ी'),
            StemClass::U => Some('ु'),
            StemClass::Uu => Some('ू'),
            StemClass::R => Some('ृ'),
            StemClass::Consonant => None,
        }
    }
}

/// One declension paradigm cell
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InflectionPattern {
    pub ending: String,
    pub case: Case,
    pub number: GramNumber,
    pub gender: Gender,
    pub stem_class: StemClass,
    pub priority: u8,
}

/// A successful inflection analysis
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InflectionMatch {
    /// The stem in surface form (class vowel restored)
    pub stem: String,
    pub ending: String,
    pub case: Case,
    pub number: GramNumber,
    pub gender: Gender,
    pub stem_class: StemClass,
    pub priority: u8,
}

/// Indexed inflection table, longest endings first
#[derive(Debug, Clone, Default)]
pub struct InflectionTable {
    patterns: Vec<InflectionPattern>,
}

impl InflectionTable {
    /// Load patterns from a TSV string
    /// (format: ending\tcase\tnumber\tgender\tstem_class\tpriority)
    pub fn from_tsv(tsv: &str) -> Result<Self, KbError> {
        let mut patterns = Vec::new();
        for (lineno, line) in tsv.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let fields: Vec<&str> = line.split('\t').collect();
            if fields.len() < 6 {
                return Err(KbError::Parse {
                    table: "inflection",
                    line: lineno + 1,
                    message: format!("expected 6 fields, got {}", fields.len()),
                });
            }
            let parse_err = |message: String| KbError::Parse {
                table: "inflection",
                line: lineno + 1,
                message,
            };
            let case = fields[1]
                .parse::<u8>()
                .ok()
                .and_then(Case::from_index)
                .ok_or_else(|| parse_err(format!("bad case `{}`", fields[1])))?;
            let number = match fields[2] {
                "sg" => GramNumber::Singular,
                "du" => GramNumber::Dual,
                "pl" => GramNumber::Plural,
                other => return Err(parse_err(format!("bad number `{}`", other))),
            };
            let gender = match fields[3] {
                "m" => Gender::Masculine,
                "f" => Gender::Feminine,
                "n" => Gender::Neuter,
                "u" => Gender::Unknown,
                other => return Err(parse_err(format!("bad gender `{}`", other))),
            };
            let stem_class = match fields[4] {
                "a" => StemClass::A,
                "aa" => StemClass::Aa,
                "i" => StemClass::I,
                "ii" => StemClass::Ii,
                "u" => StemClass::U,
                "uu" => StemClass::Uu,
                "r" => StemClass::R,
                "cons" => StemClass::Consonant,
                other => return Err(parse_err(format!("bad stem class `{}`", other))),
            };
            let priority = fields[5]
                .parse::<u8>()
                .map_err(|_| parse_err(format!("bad priority `{}`", fields[5])))?;
            if fields[0].is_empty() {
                return Err(parse_err("empty ending".to_string()));
            }
            patterns.push(InflectionPattern {
                ending: fields[0].to_string(),
                case,
                number,
                gender,
                stem_class,
                priority,
            });
        }

        // Longest endings first; remaining keys only for determinism
        patterns.sort_by(|a, b| {
            b.ending
                .chars()
                .count()
                .cmp(&a.ending.chars().count())
                .then(b.priority.cmp(&a.priority))
                .then(a.ending.cmp(&b.ending))
                .then(a.case.index().cmp(&b.case.index()))
        });

        Ok(InflectionTable { patterns })
    }

    /// Number of patterns in the table
    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    pub fn patterns(&self) -> &[InflectionPattern] {
        &self.patterns
    }

    /// Analyze a word against every paradigm cell; all matches are returned
    pub fn analyze(&self, word: &str) -> Vec<InflectionMatch> {
        let mut matches = Vec::new();
        for pattern in &self.patterns {
            if !word.ends_with(&pattern.ending) {
                continue;
            }
            let raw = &word[..word.len() - pattern.ending.len()];
            if let Some(stem) = restore_stem(raw, pattern.stem_class) {
                matches.push(InflectionMatch {
                    stem,
                    ending: pattern.ending.clone(),
                    case: pattern.case,
                    number: pattern.number,
                    gender: pattern.gender,
                    stem_class: pattern.stem_class,
                    priority: pattern.priority,
                });
            }
        }
        matches
    }
}

/// Validate the residual stem against the stem class and restore the class
/// vowel in surface form. Stems shorter than two characters are rejected:
/// a bare consonant is not a plausible nominal stem.
fn restore_stem(raw: &str, class: StemClass) -> Option<String> {
    if raw.chars().count() < 2 {
        return None;
    }
    match class {
        StemClass::Consonant => {
            let last = raw.chars().next_back()?;
            match get_char_class(last) {
                CharClass::Cons | CharClass::Virama => Some(raw.to_string()),
                _ => None,
            }
        }
        _ => {
            // Vowel-class endings replace the stem vowel, so the residue
            // must end in a bare consonant
            if !ends_with_consonant(raw) {
                return None;
            }
            let mut stem = raw.to_string();
            if let Some(matra) = class.stem_matra() {
                stem.push(matra);
            }
            Some(stem)
        }
    }
}
