//! Grammar knowledge base: sandhi rules, inflection patterns, derivation
//! patterns.
//!
//! The KB is loaded once, validated, and treated as read-only shared data
//! for the lifetime of the engine. The loader is strict about structure
//! (duplicate ids, out-of-range priorities, empty or non-NFC patterns are
//! fatal) and additionally round-trip-checks every rule's own join/split
//! mechanics; a rule that fails the check is dropped and recorded rather
//! than trusted. Rule counts are whatever the table provides.

use std::collections::{HashMap, HashSet};

use unicode_normalization::is_nfc;

use crate::derivation::DerivationTable;
use crate::error::KbError;
use crate::inflection::InflectionTable;
use crate::sandhi::{Junction, JunctionKind};

static SANDHI_RULES_TSV: &str = include_str!("data/sandhi_rules.tsv");
static VIBHAKTI_TSV: &str = include_str!("data/vibhakti.tsv");
static PRATYAYA_TSV: &str = include_str!("data/pratyaya.tsv");

/// Category of a sandhi rule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RuleCategory {
    Vowel,
    Consonant,
    Visarga,
    Special,
}

impl RuleCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            RuleCategory::Vowel => "vowel",
            RuleCategory::Consonant => "consonant",
            RuleCategory::Visarga => "visarga",
            RuleCategory::Special => "special",
        }
    }
}

/// A phonetic junction rule
#[derive(Debug, Clone)]
pub struct SandhiRule {
    /// Stable identifier, e.g. "VS09"
    pub id: String,
    pub category: RuleCategory,
    /// Final sound of the left word
    pub left_pattern: String,
    /// Initial sound of the right word
    pub right_pattern: String,
    /// What the junction becomes
    pub result: String,
    /// 1..=10, higher is more preferred
    pub priority: u8,
    /// Rule participates in forward application
    pub forward: bool,
    /// Seeing `result` word-internally licenses a split hypothesis
    pub reverse: bool,
    /// Pāṇini sūtra citation
    pub sutra: Option<String>,
    /// Rule applies only in Vedic mode
    pub vedic_only: bool,
}

/// An entry of the reverse-application index: one surface realization of
/// one rule's result
#[derive(Debug, Clone)]
pub struct JunctionEntry {
    /// Index into `GrammarKb::rules`
    pub rule: usize,
    pub text: String,
    pub kind: JunctionKind,
}

/// The immutable grammar knowledge base
#[derive(Debug, Clone, Default)]
pub struct GrammarKb {
    rules: Vec<SandhiRule>,
    by_id: HashMap<String, usize>,
    /// Reverse-application index keyed by the first character of each
    /// realized junction
    junction_index: HashMap<char, Vec<JunctionEntry>>,
    inflection: InflectionTable,
    derivation: DerivationTable,
    skipped: Vec<String>,
}

impl GrammarKb {
    /// Load the embedded grammar tables
    pub fn builtin() -> Result<Self, KbError> {
        Self::from_tsv(SANDHI_RULES_TSV, VIBHAKTI_TSV, PRATYAYA_TSV)
    }

    /// Load a knowledge base from TSV tables.
    ///
    /// Sandhi format:
    /// id\tcategory\tleft\tright\tresult\tpriority\tdirections\tsutra\tvedic
    pub fn from_tsv(
        sandhi_tsv: &str,
        inflection_tsv: &str,
        derivation_tsv: &str,
    ) -> Result<Self, KbError> {
        let mut kb = GrammarKb {
            inflection: InflectionTable::from_tsv(inflection_tsv)?,
            derivation: DerivationTable::from_tsv(derivation_tsv)?,
            ..Default::default()
        };

        let mut seen_ids: HashSet<String> = HashSet::new();
        for (lineno, line) in sandhi_tsv.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let rule = parse_sandhi_line(line, lineno + 1)?;
            if !seen_ids.insert(rule.id.clone()) {
                return Err(KbError::DuplicateRuleId(rule.id));
            }
            validate_rule(&rule)?;

            // Structural checks passed; the rule must still prove its own
            // join/split mechanics round-trip before it is trusted
            if rule.self_check() {
                kb.push_rule(rule);
            } else {
                kb.skipped.push(rule.id);
            }
        }

        Ok(kb)
    }

    fn push_rule(&mut self, rule: SandhiRule) {
        let idx = self.rules.len();
        self.by_id.insert(rule.id.clone(), idx);
        if rule.reverse {
            for Junction { text, kind } in rule.junctions() {
                if let Some(first) = text.chars().next() {
                    self.junction_index
                        .entry(first)
                        .or_default()
                        .push(JunctionEntry {
                            rule: idx,
                            text,
                            kind,
                        });
                }
            }
        }
        self.rules.push(rule);
    }

    /// All loaded sandhi rules
    pub fn rules(&self) -> &[SandhiRule] {
        &self.rules
    }

    /// Look up a rule by id
    pub fn rule_by_id(&self, id: &str) -> Option<&SandhiRule> {
        self.by_id.get(id).map(|&i| &self.rules[i])
    }

    /// Ids of rules dropped by the load-time round-trip check
    pub fn skipped_rule_ids(&self) -> &[String] {
        &self.skipped
    }

    /// Junction realizations whose surface text starts with `c`
    pub fn junctions_starting_with(&self, c: char) -> &[JunctionEntry] {
        self.junction_index
            .get(&c)
            .map(|v| v.as_slice())
            .unwrap_or(&[])
    }

    /// The inflection (vibhakti) table
    pub fn inflection(&self) -> &InflectionTable {
        &self.inflection
    }

    /// The derivation (pratyaya) table
    pub fn derivation(&self) -> &DerivationTable {
        &self.derivation
    }
}

fn parse_sandhi_line(line: &str, lineno: usize) -> Result<SandhiRule, KbError> {
    let parse_err = |message: String| KbError::Parse {
        table: "sandhi",
        line: lineno,
        message,
    };
    let fields: Vec<&str> = line.split('\t').collect();
    if fields.len() < 9 {
        return Err(parse_err(format!("expected 9 fields, got {}", fields.len())));
    }
    let category = match fields[1] {
        "vowel" => RuleCategory::Vowel,
        "consonant" => RuleCategory::Consonant,
        "visarga" => RuleCategory::Visarga,
        "special" => RuleCategory::Special,
        other => return Err(parse_err(format!("bad category `{}`", other))),
    };
    let priority = fields[5]
        .parse::<i64>()
        .map_err(|_| parse_err(format!("bad priority `{}`", fields[5])))?;
    let (forward, reverse) = match fields[6] {
        "f" => (true, false),
        "r" => (false, true),
        "fr" => (true, true),
        other => return Err(parse_err(format!("bad directions `{}`", other))),
    };
    let sutra = match fields[7] {
        "-" | "" => None,
        s => Some(s.to_string()),
    };
    let vedic_only = match fields[8] {
        "0" => false,
        "1" => true,
        other => return Err(parse_err(format!("bad vedic flag `{}`", other))),
    };
    if priority < 1 || priority > 10 {
        return Err(KbError::PriorityOutOfRange {
            id: fields[0].to_string(),
            priority,
        });
    }
    Ok(SandhiRule {
        id: fields[0].to_string(),
        category,
        left_pattern: fields[2].to_string(),
        right_pattern: fields[3].to_string(),
        result: fields[4].to_string(),
        priority: priority as u8,
        forward,
        reverse,
        sutra,
        vedic_only,
    })
}

fn validate_rule(rule: &SandhiRule) -> Result<(), KbError> {
    for pattern in [&rule.left_pattern, &rule.right_pattern, &rule.result] {
        if pattern.is_empty() {
            return Err(KbError::EmptyPattern(rule.id.clone()));
        }
        if !is_nfc(pattern) {
            return Err(KbError::NotNfc {
                id: rule.id.clone(),
                pattern: pattern.clone(),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_loads() {
        let kb = GrammarKb::builtin().expect("builtin KB loads");
        assert!(kb.rules().len() >= 100, "got {} rules", kb.rules().len());
        assert!(!kb.inflection().is_empty());
        assert!(!kb.derivation().is_empty());
    }

    #[test]
    fn test_builtin_keeps_core_rules() {
        let kb = GrammarKb::builtin().expect("builtin KB loads");
        for id in ["VS01", "VS09", "VS13", "VS25", "VIS01", "VIS13", "CS43"] {
            assert!(kb.rule_by_id(id).is_some(), "rule {} missing", id);
            assert!(
                !kb.skipped_rule_ids().iter().any(|s| s == id),
                "rule {} was skipped",
                id
            );
        }
    }

    #[test]
    fn test_every_loaded_rule_round_trips() {
        let kb = GrammarKb::builtin().expect("builtin KB loads");
        for rule in kb.rules() {
            assert!(rule.self_check(), "rule {} fails its round trip", rule.id);
        }
    }

    #[test]
    fn test_forward_consistency_of_examples() {
        let kb = GrammarKb::builtin().expect("builtin KB loads");
        let cases = [
            ("VS13", "सुर", "उत्तमः", "सुरोत्तमः"),
            ("VS09", "रम", "इति", "रमेति"),
            ("VS12", "महा", "ईशः", "महेशः"),
            ("VIS01", "रामः", "अत्र", "रामोऽत्र"),
            ("CS43", "नमस्", "ते", "नमस्ते"),
            ("SP21", "सम्", "आगच्छति", "समागच्छति"),
        ];
        for (id, left, right, expect) in cases {
            let rule = kb.rule_by_id(id).expect(id);
            assert_eq!(rule.join(left, right).as_deref(), Some(expect), "{}", id);
        }
    }

    #[test]
    fn test_duplicate_id_fatal() {
        let tsv = "X1\tvowel\tअ\tअ\tआ\t10\tfr\t-\t0\nX1\tvowel\tअ\tआ\tआ\t9\tfr\t-\t0";
        let err = GrammarKb::from_tsv(tsv, "", "").unwrap_err();
        assert!(matches!(err, KbError::DuplicateRuleId(_)));
    }

    #[test]
    fn test_priority_range_fatal() {
        let tsv = "X1\tvowel\tअ\tअ\tआ\t11\tfr\t-\t0";
        let err = GrammarKb::from_tsv(tsv, "", "").unwrap_err();
        assert!(matches!(err, KbError::PriorityOutOfRange { .. }));
    }

    #[test]
    fn test_empty_pattern_fatal() {
        let tsv = "X1\tvowel\t\tअ\tआ\t10\tfr\t-\t0";
        let err = GrammarKb::from_tsv(tsv, "", "").unwrap_err();
        assert!(matches!(err, KbError::EmptyPattern(_)));
    }

    #[test]
    fn test_malformed_line_fatal() {
        let tsv = "X1\tvowel\tअ\tअ\tआ\t10";
        let err = GrammarKb::from_tsv(tsv, "", "").unwrap_err();
        assert!(matches!(err, KbError::Parse { .. }));
    }

    #[test]
    fn test_inconsistent_rule_skipped_not_fatal() {
        // a + a → a: the result merges invisibly into the junction base, so
        // reverse application can never recover the split
        let tsv = "X1\tvowel\tअ\tअ\tअ\t10\tfr\t-\t0\nX2\tvowel\tअ\tउ\tओ\t10\tfr\t-\t0";
        let kb = GrammarKb::from_tsv(tsv, "", "").expect("load succeeds");
        assert_eq!(kb.rules().len(), 1);
        assert_eq!(kb.skipped_rule_ids(), ["X1".to_string()]);
        assert!(kb.rule_by_id("X2").is_some());
    }

    #[test]
    fn test_junction_index() {
        let kb = GrammarKb::builtin().expect("builtin KB loads");
        // VS13's result ओ is realized as the mātrā ो after a consonant
        let entries = kb.junctions_starting_with('ो');
        assert!(entries
            .iter()
            .any(|e| kb.rules()[e.rule].id == "VS13" && e.kind == JunctionKind::MatraInitial));
    }
}
