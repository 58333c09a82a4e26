//! Forward and reverse application of sandhi rules.
//!
//! A rule's `left_pattern` describes the final sound of the left word,
//! `right_pattern` the initial sound of the right word, and `result` what
//! the junction looks like after the two merge. Devanāgarī complicates the
//! string mechanics: a consonant letter carries an inherent `अ`, vowels
//! appear as independent letters word-initially but as mātrās after a
//! consonant, and a virāma suppresses the vowel slot entirely.
//!
//! `join` converts the left word to its junction base (virāma form where
//! the pattern consumes the final vowel slot), realizes the result against
//! that base, and appends the right remainder. `split` searches a combined
//! word for each surface realization of the result and reconstructs the two
//! underlying words. For a well-formed rule the two operations are exact
//! inverses, which the knowledge base verifies at load time.

use crate::chars::{ends_with_consonant, matra_for, VIRAMA, VISARGA};
use crate::kb::SandhiRule;

/// How a rule's `result` is realized at a word-internal junction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JunctionKind {
    /// The result string appears verbatim
    Literal,
    /// The leading vowel of the result appears as its mātrā after a
    /// consonant base
    MatraInitial,
    /// The leading `अ` of the result merged into the preceding consonant's
    /// inherent vowel and is not visible
    ElidedA,
}

/// A surface realization of a rule result
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Junction {
    pub text: String,
    pub kind: JunctionKind,
}

/// Shape of a left pattern, deciding how the left word is stripped to its
/// junction base and how it is reconstructed from a split prefix
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LeftShape {
    /// `अ`: a consonant-final word whose inherent vowel participates
    InherentA,
    /// A single vowel with a mātrā form (`आ`, `इ`, ... `औ`)
    Vowel(char),
    /// `अः`: consonant + inherent a + visarga
    VisargaAfterA,
    /// Vowel + visarga (`इः`, `उः`); payload is the mātrā
    VisargaAfterVowel(char),
    /// `ः` after any vowel, visarga replaced wholesale
    BareVisarga,
    /// Anything else matches and strips literally (consonant patterns with
    /// virāma, whole prefixes like `उत्`)
    Literal,
}

fn left_shape(pattern: &str) -> LeftShape {
    let chars: Vec<char> = pattern.chars().collect();
    match chars.as_slice() {
        ['अ'] => LeftShape::InherentA,
        ['ः'] => LeftShape::BareVisarga,
        ['अ', 'ः'] => LeftShape::VisargaAfterA,
        [v] => match matra_for(*v) {
            Some(_) => LeftShape::Vowel(*v),
            None => LeftShape::Literal,
        },
        [v, 'ः'] => match matra_for(*v) {
            Some(m) => LeftShape::VisargaAfterVowel(m),
            None => LeftShape::Literal,
        },
        _ => LeftShape::Literal,
    }
}

fn last_char(s: &str) -> Option<char> {
    s.chars().next_back()
}

fn strip_last(s: &str) -> &str {
    match last_char(s) {
        Some(c) => &s[..s.len() - c.len_utf8()],
        None => s,
    }
}

impl SandhiRule {
    /// Does the left word end the way this rule requires?
    pub fn matches_left(&self, left: &str) -> bool {
        if left.is_empty() {
            return false;
        }
        match left_shape(&self.left_pattern) {
            LeftShape::InherentA => ends_with_consonant(left),
            LeftShape::Vowel(v) => {
                left.ends_with(v)
                    || matra_for(v).map(|m| left.ends_with(m)).unwrap_or(false)
            }
            LeftShape::VisargaAfterA => {
                if left.ends_with("अः") {
                    return true;
                }
                if !left.ends_with(VISARGA) {
                    return false;
                }
                ends_with_consonant(strip_last(left))
            }
            LeftShape::VisargaAfterVowel(m) => {
                if left.ends_with(&self.left_pattern) {
                    return true;
                }
                let mut suffix = String::new();
                suffix.push(m);
                suffix.push(VISARGA);
                left.ends_with(&suffix)
            }
            LeftShape::BareVisarga => left.ends_with(VISARGA),
            LeftShape::Literal => left.ends_with(&self.left_pattern),
        }
    }

    /// Does the right word start the way this rule requires?
    pub fn matches_right(&self, right: &str) -> bool {
        self.strip_right(right).is_some()
    }

    /// The right word minus the consumed initial pattern. A pattern ending
    /// in virāma also matches the bare consonant (the pure sound before any
    /// vowel attaches).
    fn strip_right<'a>(&self, right: &'a str) -> Option<&'a str> {
        if right.is_empty() {
            return None;
        }
        if right.starts_with(&self.right_pattern) {
            return Some(&right[self.right_pattern.len()..]);
        }
        if self.right_pattern.ends_with(VIRAMA) {
            let bare = &self.right_pattern[..self.right_pattern.len() - VIRAMA.len_utf8()];
            if !bare.is_empty() && right.starts_with(bare) {
                return Some(&right[bare.len()..]);
            }
        }
        None
    }

    /// The left word reduced to its junction base: the part that survives
    /// unchanged, in virāma form where the pattern consumed the vowel slot
    fn left_base(&self, left: &str) -> Option<String> {
        match left_shape(&self.left_pattern) {
            LeftShape::InherentA => {
                let mut base = left.to_string();
                base.push(VIRAMA);
                Some(base)
            }
            LeftShape::Vowel(v) => {
                let stripped = if left.ends_with(v) {
                    &left[..left.len() - v.len_utf8()]
                } else {
                    strip_last(left)
                };
                let mut base = stripped.to_string();
                if !base.is_empty() && !base.ends_with(VIRAMA) {
                    base.push(VIRAMA);
                }
                Some(base)
            }
            LeftShape::VisargaAfterA => {
                let stripped = if left.ends_with("अः") {
                    &left[..left.len() - "अः".len()]
                } else {
                    strip_last(left)
                };
                let mut base = stripped.to_string();
                if !base.is_empty() && !base.ends_with(VIRAMA) {
                    base.push(VIRAMA);
                }
                Some(base)
            }
            LeftShape::VisargaAfterVowel(_) => {
                let mut base = strip_last(strip_last(left)).to_string();
                base.push(VIRAMA);
                Some(base)
            }
            LeftShape::BareVisarga => Some(strip_last(left).to_string()),
            LeftShape::Literal => {
                if left.len() < self.left_pattern.len() {
                    return None;
                }
                Some(left[..left.len() - self.left_pattern.len()].to_string())
            }
        }
    }

    /// Forward application: merge `left` and `right` across this rule's
    /// junction. Returns `None` when the rule does not apply.
    pub fn join(&self, left: &str, right: &str) -> Option<String> {
        if !self.matches_left(left) {
            return None;
        }
        let rest = self.strip_right(right)?;
        let mut base = self.left_base(left)?;

        let mut realized = self.result.clone();
        if let Some(first) = realized.chars().next() {
            if let Some(matra) = matra_for(first) {
                if !base.is_empty() {
                    let mut converted = String::new();
                    converted.push(matra);
                    converted.push_str(&realized[first.len_utf8()..]);
                    realized = converted;
                    if base.ends_with(VIRAMA) {
                        base.truncate(base.len() - VIRAMA.len_utf8());
                    }
                }
            } else if first == 'अ' && base.ends_with(VIRAMA) {
                base.truncate(base.len() - VIRAMA.len_utf8());
                realized = realized['अ'.len_utf8()..].to_string();
            }
        }

        let mut joined = base;
        joined.push_str(&realized);
        joined.push_str(rest);
        Some(joined)
    }

    /// The surface realizations of this rule's result at a junction
    pub fn junctions(&self) -> Vec<Junction> {
        let mut junctions = Vec::new();
        if self.result.is_empty() {
            return junctions;
        }
        junctions.push(Junction {
            text: self.result.clone(),
            kind: JunctionKind::Literal,
        });
        let first = match self.result.chars().next() {
            Some(c) => c,
            None => return junctions,
        };
        if let Some(matra) = matra_for(first) {
            let mut text = String::new();
            text.push(matra);
            text.push_str(&self.result[first.len_utf8()..]);
            junctions.push(Junction {
                text,
                kind: JunctionKind::MatraInitial,
            });
        } else if first == 'अ' {
            let rest = &self.result['अ'.len_utf8()..];
            if !rest.is_empty() {
                junctions.push(Junction {
                    text: rest.to_string(),
                    kind: JunctionKind::ElidedA,
                });
            }
        }
        junctions
    }

    /// Rebuild the underlying left word from the text preceding a junction
    pub fn reconstruct_left(&self, prefix: &str, kind: JunctionKind) -> Option<String> {
        match left_shape(&self.left_pattern) {
            LeftShape::InherentA => match kind {
                JunctionKind::Literal => {
                    if prefix.ends_with(VIRAMA) {
                        Some(prefix[..prefix.len() - VIRAMA.len_utf8()].to_string())
                    } else {
                        None
                    }
                }
                _ => {
                    if ends_with_consonant(prefix) {
                        Some(prefix.to_string())
                    } else {
                        None
                    }
                }
            },
            LeftShape::Vowel(v) => {
                let matra = matra_for(v)?;
                if prefix.is_empty() {
                    return Some(v.to_string());
                }
                let stem = if prefix.ends_with(VIRAMA) {
                    &prefix[..prefix.len() - VIRAMA.len_utf8()]
                } else if ends_with_consonant(prefix) {
                    prefix
                } else {
                    return None;
                };
                let mut left = stem.to_string();
                left.push(matra);
                Some(left)
            }
            LeftShape::VisargaAfterA => {
                let stem = if prefix.ends_with(VIRAMA) {
                    &prefix[..prefix.len() - VIRAMA.len_utf8()]
                } else {
                    prefix
                };
                if !ends_with_consonant(stem) {
                    return None;
                }
                let mut left = stem.to_string();
                left.push(VISARGA);
                Some(left)
            }
            LeftShape::VisargaAfterVowel(m) => {
                let stem = if prefix.ends_with(VIRAMA) {
                    &prefix[..prefix.len() - VIRAMA.len_utf8()]
                } else if ends_with_consonant(prefix) {
                    prefix
                } else {
                    return None;
                };
                let mut left = stem.to_string();
                left.push(m);
                left.push(VISARGA);
                Some(left)
            }
            LeftShape::BareVisarga => {
                if prefix.is_empty() {
                    return None;
                }
                let mut left = prefix.to_string();
                left.push(VISARGA);
                Some(left)
            }
            LeftShape::Literal => {
                let mut left = prefix.to_string();
                left.push_str(&self.left_pattern);
                Some(left)
            }
        }
    }

    /// Rebuild the underlying right word from the text following a junction
    pub fn reconstruct_right(&self, suffix: &str) -> String {
        let mut right = self.right_pattern.clone();
        right.push_str(suffix);
        right
    }

    /// Propose (left, right) splits of `word` by reverse application.
    /// Every returned split re-joins to `word` under this rule.
    pub fn split(&self, word: &str) -> Vec<(String, String)> {
        let mut splits = Vec::new();
        if !self.reverse {
            return splits;
        }
        for junction in self.junctions() {
            let step = junction
                .text
                .chars()
                .next()
                .map(|c| c.len_utf8())
                .unwrap_or(1);
            let mut search_from = 0;
            while let Some(found) = word[search_from..].find(&junction.text) {
                let at = search_from + found;
                search_from = at + step;
                let prefix = &word[..at];
                let suffix = &word[at + junction.text.len()..];
                let left = match self.reconstruct_left(prefix, junction.kind) {
                    Some(l) => l,
                    None => continue,
                };
                let right = self.reconstruct_right(suffix);
                if left.is_empty() || right.is_empty() {
                    continue;
                }
                if self.join(&left, &right).as_deref() == Some(word) {
                    splits.push((left, right));
                }
            }
        }
        splits
    }

    /// Synthesize a minimal word pair matching the patterns, for the load-time
    /// round-trip check
    pub(crate) fn synthesize_pair(&self) -> Option<(String, String)> {
        let left = match left_shape(&self.left_pattern) {
            LeftShape::InherentA => "क".to_string(),
            LeftShape::Vowel(v) => {
                let mut l = "क".to_string();
                l.push(matra_for(v)?);
                l
            }
            LeftShape::VisargaAfterA => "कः".to_string(),
            LeftShape::VisargaAfterVowel(m) => {
                let mut l = "क".to_string();
                l.push(m);
                l.push(VISARGA);
                l
            }
            LeftShape::BareVisarga => "किः".to_string(),
            LeftShape::Literal => format!("क{}", self.left_pattern),
        };
        let right = format!("{}न", self.right_pattern);
        Some((left, right))
    }

    /// Self-consistency: joining the synthesized pair and reverse-splitting
    /// the joined form must recover the pair. The loader rejects rules that
    /// fail this check.
    pub fn self_check(&self) -> bool {
        let (left, right) = match self.synthesize_pair() {
            Some(pair) => pair,
            None => return false,
        };
        let joined = match self.join(&left, &right) {
            Some(j) => j,
            None => return false,
        };
        if !self.reverse {
            return true;
        }
        self.split(&joined)
            .iter()
            .any(|(l, r)| *l == left && *r == right)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kb::{RuleCategory, SandhiRule};

    fn rule(id: &str, left: &str, right: &str, result: &str) -> SandhiRule {
        SandhiRule {
            id: id.to_string(),
            category: RuleCategory::Vowel,
            left_pattern: left.to_string(),
            right_pattern: right.to_string(),
            result: result.to_string(),
            priority: 10,
            forward: true,
            reverse: true,
            sutra: None,
            vedic_only: false,
        }
    }

    #[test]
    fn test_guna_join() {
        // a + u → o
        let vs13 = rule("VS13", "अ", "उ", "ओ");
        assert_eq!(vs13.join("सुर", "उत्तमः").as_deref(), Some("सुरोत्तमः"));
    }

    #[test]
    fn test_guna_split() {
        let vs13 = rule("VS13", "अ", "उ", "ओ");
        let splits = vs13.split("सुरोत्तमः");
        assert!(splits.contains(&("सुर".to_string(), "उत्तमः".to_string())));
    }

    #[test]
    fn test_savarna_dirgha() {
        let vs01 = rule("VS01", "अ", "अ", "आ");
        assert_eq!(vs01.join("रम", "अति").as_deref(), Some("रमाति"));
        let splits = vs01.split("रमाति");
        assert!(splits.contains(&("रम".to_string(), "अति".to_string())));
    }

    #[test]
    fn test_visarga_avagraha() {
        // aḥ + a → o'
        let vis01 = rule("VIS01", "अः", "अ", "ओऽ");
        assert_eq!(vis01.join("रामः", "अत्र").as_deref(), Some("रामोऽत्र"));
        let splits = vis01.split("रामोऽत्र");
        assert!(splits.contains(&("रामः".to_string(), "अत्र".to_string())));
    }

    #[test]
    fn test_visarga_s() {
        // aḥ + t → as-t
        let vis13 = rule("VIS13", "अः", "त", "अस्त");
        assert_eq!(vis13.join("रामः", "तत्र").as_deref(), Some("रामस्तत्र"));
        let splits = vis13.split("रामस्तत्र");
        assert!(splits.contains(&("रामः".to_string(), "तत्र".to_string())));
    }

    #[test]
    fn test_yan_join() {
        // i + a → y
        let vs25 = rule("VS25", "इ", "अ", "य");
        assert_eq!(vs25.join("प्रति", "अर्थः").as_deref(), Some("प्रत्यर्थः"));
        let splits = vs25.split("प्रत्यर्थः");
        assert!(splits.contains(&("प्रति".to_string(), "अर्थः".to_string())));
    }

    #[test]
    fn test_consonant_junction() {
        // s + t → st
        let cs43 = rule("CS43", "स्", "त", "स्त");
        assert_eq!(cs43.join("नमस्", "ते").as_deref(), Some("नमस्ते"));
        let splits = cs43.split("नमस्ते");
        assert!(splits.contains(&("नमस्".to_string(), "ते".to_string())));
    }

    #[test]
    fn test_guna_ar() {
        // a + ṛ → ar
        let vs17 = rule("VS17", "अ", "ऋ", "अर्");
        assert_eq!(vs17.join("देव", "ऋषिः").as_deref(), Some("देवर्षिः"));
        let splits = vs17.split("देवर्षिः");
        assert!(splits.contains(&("देव".to_string(), "ऋषिः".to_string())));
    }

    #[test]
    fn test_prefix_rule() {
        // ut + ā → udā, empty junction base
        let sp20 = rule("SP20", "उत्", "आ", "उदा");
        assert_eq!(sp20.join("उत्", "आहरति").as_deref(), Some("उदाहरति"));
        let splits = sp20.split("उदाहरति");
        assert!(splits.contains(&("उत्".to_string(), "आहरति".to_string())));
    }

    #[test]
    fn test_bare_visarga_replacement() {
        // ḥ + vowel → r
        let vis15 = rule("VIS15", "ः", "अ", "र");
        assert_eq!(vis15.join("पुनः", "अपि").as_deref(), Some("पुनरपि"));
        let splits = vis15.split("पुनरपि");
        assert!(splits.contains(&("पुनः".to_string(), "अपि".to_string())));
    }

    #[test]
    fn test_non_matching_join() {
        let vs13 = rule("VS13", "अ", "उ", "ओ");
        // left does not end in a bare consonant
        assert!(vs13.join("रामः", "उत्तमः").is_none());
        // right does not start with u
        assert!(vs13.join("सुर", "अत्र").is_none());
    }

    #[test]
    fn test_all_splits_rejoin() {
        let rules = [
            rule("VS01", "अ", "अ", "आ"),
            rule("VS09", "अ", "इ", "ए"),
            rule("VS13", "अ", "उ", "ओ"),
            rule("VIS01", "अः", "अ", "ओऽ"),
            rule("CS43", "स्", "त", "स्त"),
        ];
        let words = ["सुरोत्तमः", "रामोऽत्र", "नमस्ते", "रमेति", "गजेन्द्रः"];
        for r in &rules {
            for w in &words {
                for (l, rgt) in r.split(w) {
                    assert_eq!(r.join(&l, &rgt).as_deref(), Some(*w), "rule {}", r.id);
                }
            }
        }
    }

    #[test]
    fn test_self_check() {
        for r in [
            rule("VS01", "अ", "अ", "आ"),
            rule("VS13", "अ", "उ", "ओ"),
            rule("VS25", "इ", "अ", "य"),
            rule("VIS01", "अः", "अ", "ओऽ"),
            rule("VIS13", "अः", "त", "अस्त"),
            rule("VIS15", "ः", "अ", "र"),
            rule("CS43", "स्", "त", "स्त"),
            rule("SP20", "उत्", "आ", "उदा"),
        ] {
            assert!(r.self_check(), "rule {} fails its round trip", r.id);
        }
    }
}
