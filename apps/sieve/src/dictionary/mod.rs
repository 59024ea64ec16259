//! Term Dictionaries: the versioned, externally editable term sets every
//! scorer matches against, and the matchers compiled from them.
//!
//! Loaded once per process into an immutable [`CompiledDictionaries`]; all
//! analysis runs share it read-only. A defective dictionary file is a
//! configuration error raised at load, never a scoring outcome.

pub mod builtin;

use std::collections::BTreeSet;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::models::document::Section;

/// Canonical sections a resume must have.
pub const REQUIRED_SECTIONS: &[&str] = &["Experience", "Education", "Skills"];

/// Canonical sections that earn a structure bonus when present.
pub const OPTIONAL_SECTIONS: &[&str] = &["Summary", "Certifications"];

/// One canonical section and the lowercase name fragments that resolve to it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SectionSynonyms {
    pub canonical: String,
    pub synonyms: Vec<String>,
}

/// The editable dictionary file format. `Default` yields the builtin tables.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TermDictionaries {
    pub version: String,
    pub technical: Vec<String>,
    pub soft: Vec<String>,
    pub industry: Vec<String>,
    pub action_verbs: Vec<String>,
    pub discouraged_phrases: Vec<String>,
    pub section_synonyms: Vec<SectionSynonyms>,
}

impl Default for TermDictionaries {
    fn default() -> Self {
        let owned = |table: &[&str]| table.iter().map(|t| t.to_string()).collect();
        Self {
            version: builtin::BUILTIN_VERSION.to_string(),
            technical: owned(builtin::TECHNICAL_TERMS),
            soft: owned(builtin::SOFT_SKILL_TERMS),
            industry: owned(builtin::INDUSTRY_TERMS),
            action_verbs: owned(builtin::ACTION_VERBS),
            discouraged_phrases: owned(builtin::DISCOURAGED_PHRASES),
            section_synonyms: builtin::SECTION_SYNONYMS
                .iter()
                .map(|(canonical, synonyms)| SectionSynonyms {
                    canonical: canonical.to_string(),
                    synonyms: synonyms.iter().map(|s| s.to_string()).collect(),
                })
                .collect(),
        }
    }
}

impl TermDictionaries {
    pub fn from_json(json: &str) -> Result<Self, AppError> {
        serde_json::from_str(json)
            .map_err(|e| AppError::Configuration(format!("invalid dictionary file: {e}")))
    }

    /// Structural validation, run before compilation. Scoring divides by the
    /// size of each keyword category, so empty categories are rejected here
    /// rather than defended against at analysis time.
    pub fn validate(&self) -> Result<(), AppError> {
        if self.version.trim().is_empty() {
            return Err(AppError::Configuration(
                "dictionary version must not be empty".into(),
            ));
        }
        for (name, terms) in [
            ("technical", &self.technical),
            ("soft", &self.soft),
            ("industry", &self.industry),
            ("action_verbs", &self.action_verbs),
        ] {
            if terms.is_empty() {
                return Err(AppError::Configuration(format!(
                    "dictionary category '{name}' must not be empty"
                )));
            }
            if terms.iter().any(|t| t.trim().is_empty()) {
                return Err(AppError::Configuration(format!(
                    "dictionary category '{name}' contains a blank term"
                )));
            }
        }
        for required in REQUIRED_SECTIONS {
            let covered = self
                .section_synonyms
                .iter()
                .any(|s| s.canonical == *required && !s.synonyms.is_empty());
            if !covered {
                return Err(AppError::Configuration(format!(
                    "section synonym table has no entry for required section '{required}'"
                )));
            }
        }
        Ok(())
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Compiled form
// ────────────────────────────────────────────────────────────────────────────

/// One keyword category, terms lowercased at compile time. Matching is
/// case-insensitive with manual word boundaries: regex `\b` misfires around
/// non-word characters (`c++`, `node.js`, `ci/cd`), so boundaries are
/// checked against neighbouring alphanumerics instead.
#[derive(Debug, Clone)]
pub struct TermSet {
    terms: Vec<String>,
}

impl TermSet {
    fn compile(terms: &[String]) -> Self {
        Self {
            terms: terms.iter().map(|t| t.trim().to_lowercase()).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    /// Case-insensitive equality against the term list (for skill tokens).
    pub fn contains(&self, token: &str) -> bool {
        let token = token.trim().to_lowercase();
        self.terms.iter().any(|t| *t == token)
    }

    /// Occurrence count per matched term, in dictionary order. The haystack
    /// must already be lowercased.
    pub fn match_counts<'a>(&'a self, text_lower: &str) -> Vec<(&'a str, usize)> {
        self.match_counts_with(text_lower, &[])
    }

    /// Like [`match_counts`](Self::match_counts), but a term absent from the
    /// text still counts once when it equals one of `extra_tokens` (already
    /// lowercased). Used to credit structured skill entries that never appear
    /// in the prose.
    pub fn match_counts_with<'a>(
        &'a self,
        text_lower: &str,
        extra_tokens: &[String],
    ) -> Vec<(&'a str, usize)> {
        self.terms
            .iter()
            .filter_map(|term| {
                let mut n = count_occurrences(text_lower, term);
                if n == 0 && extra_tokens.iter().any(|t| t == term) {
                    n = 1;
                }
                (n > 0).then_some((term.as_str(), n))
            })
            .collect()
    }
}

/// Counts non-overlapping occurrences of `term` in `haystack` where the
/// neighbouring characters are not alphanumeric.
pub(crate) fn count_occurrences(haystack: &str, term: &str) -> usize {
    if term.is_empty() {
        return 0;
    }
    let mut count = 0;
    let mut start = 0;
    while let Some(pos) = haystack[start..].find(term) {
        let begin = start + pos;
        let end = begin + term.len();
        let boundary_before = haystack[..begin]
            .chars()
            .next_back()
            .map_or(true, |c| !c.is_alphanumeric());
        let boundary_after = haystack[end..]
            .chars()
            .next()
            .map_or(true, |c| !c.is_alphanumeric());
        if boundary_before && boundary_after {
            count += 1;
            start = end;
        } else {
            start = begin + term.chars().next().map_or(1, char::len_utf8);
        }
    }
    count
}

/// Dictionaries compiled into their matchable form. Immutable after
/// construction; shared read-only across analyses.
#[derive(Debug)]
pub struct CompiledDictionaries {
    version: String,
    pub technical: TermSet,
    pub soft: TermSet,
    pub industry: TermSet,
    action_verbs: Vec<String>,
    discouraged: Vec<(String, Regex)>,
    quantifier: Regex,
    sections: Vec<(String, Vec<String>)>,
}

impl CompiledDictionaries {
    pub fn compile(dicts: &TermDictionaries) -> Result<Self, AppError> {
        dicts.validate()?;

        let discouraged = dicts
            .discouraged_phrases
            .iter()
            .map(|phrase| {
                let pattern = format!(r"(?i)\b{}\b", regex::escape(phrase));
                Regex::new(&pattern)
                    .map(|re| (phrase.clone(), re))
                    .map_err(|e| {
                        AppError::Configuration(format!(
                            "cannot compile discouraged phrase '{phrase}': {e}"
                        ))
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let quantifier = Regex::new(builtin::QUANTIFIER_PATTERN)
            .map_err(|e| AppError::Configuration(format!("quantifier pattern invalid: {e}")))?;

        Ok(Self {
            version: dicts.version.clone(),
            technical: TermSet::compile(&dicts.technical),
            soft: TermSet::compile(&dicts.soft),
            industry: TermSet::compile(&dicts.industry),
            action_verbs: dicts
                .action_verbs
                .iter()
                .map(|v| v.trim().to_lowercase())
                .collect(),
            discouraged,
            quantifier,
            sections: dicts
                .section_synonyms
                .iter()
                .map(|s| {
                    (
                        s.canonical.clone(),
                        s.synonyms.iter().map(|syn| syn.to_lowercase()).collect(),
                    )
                })
                .collect(),
        })
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn is_action_verb(&self, word: &str) -> bool {
        let word = word.to_lowercase();
        self.action_verbs.iter().any(|v| *v == word)
    }

    /// True when the text contains a numeral, percentage, currency amount,
    /// or magnitude word.
    pub fn is_quantified(&self, text: &str) -> bool {
        self.quantifier.is_match(text)
    }

    /// Discouraged phrases found in the text, in dictionary order.
    pub fn discouraged_phrases_in(&self, text: &str) -> Vec<String> {
        self.discouraged
            .iter()
            .filter(|(_, re)| re.is_match(text))
            .map(|(phrase, _)| phrase.clone())
            .collect()
    }

    /// Resolves a raw section name to its canonical section, if any.
    pub fn resolve_section(&self, raw_name: &str) -> Option<&str> {
        let name = raw_name.trim().to_lowercase();
        if name.is_empty() {
            return None;
        }
        self.sections
            .iter()
            .find(|(_, synonyms)| synonyms.iter().any(|syn| name.contains(syn.as_str())))
            .map(|(canonical, _)| canonical.as_str())
    }

    /// Canonical sections present in a document's section list.
    pub fn present_sections(&self, sections: &[Section]) -> BTreeSet<&str> {
        sections
            .iter()
            .filter_map(|s| self.resolve_section(&s.name))
            .collect()
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn compiled() -> CompiledDictionaries {
        CompiledDictionaries::compile(&TermDictionaries::default()).unwrap()
    }

    fn named_sections(names: &[&str]) -> Vec<Section> {
        names
            .iter()
            .map(|n| Section {
                name: n.to_string(),
                text: String::new(),
            })
            .collect()
    }

    #[test]
    fn test_builtin_dictionaries_validate() {
        assert!(TermDictionaries::default().validate().is_ok());
    }

    #[test]
    fn test_empty_category_is_rejected() {
        let mut dicts = TermDictionaries::default();
        dicts.technical.clear();
        let err = dicts.validate().unwrap_err();
        assert!(matches!(err, AppError::Configuration(_)));
        // Compilation runs the same validation, so a scorer can never see
        // an empty term set.
        assert!(CompiledDictionaries::compile(&dicts).is_err());
    }

    #[test]
    fn test_missing_required_synonyms_are_rejected() {
        let mut dicts = TermDictionaries::default();
        dicts.section_synonyms.retain(|s| s.canonical != "Education");
        assert!(dicts.validate().is_err());
    }

    #[test]
    fn test_blank_term_is_rejected() {
        let mut dicts = TermDictionaries::default();
        dicts.soft.push("   ".into());
        assert!(dicts.validate().is_err());
    }

    #[test]
    fn test_counts_terms_with_punctuation_boundaries() {
        let set = TermSet::compile(&["c++".into(), "node.js".into()]);
        let counts = set.match_counts("built c++ services, then more c++, on node.js");
        assert_eq!(counts, vec![("c++", 2), ("node.js", 1)]);
    }

    #[test]
    fn test_does_not_match_inside_words() {
        let set = TermSet::compile(&["ai".into(), "java".into()]);
        assert!(set.match_counts("chaired the javascript guild").is_empty());
    }

    #[test]
    fn test_terms_are_lowercased_at_compile_time() {
        let set = TermSet::compile(&["Python".into(), " SQL ".into()]);
        assert_eq!(
            set.match_counts("expert in python, sql, and pytorch"),
            vec![("python", 1), ("sql", 1)]
        );
    }

    #[test]
    fn test_skill_token_equality_ignores_case() {
        let set = TermSet::compile(&["kubernetes".into()]);
        assert!(set.contains("Kubernetes"));
        assert!(!set.contains("kube"));
    }

    #[test]
    fn test_extra_tokens_credit_terms_absent_from_text() {
        let set = TermSet::compile(&["python".into(), "docker".into()]);
        let counts =
            set.match_counts_with("shipped python python services", &["docker".to_string()]);
        assert_eq!(counts, vec![("python", 2), ("docker", 1)]);
    }

    #[test]
    fn test_resolves_section_synonyms() {
        let d = compiled();
        assert_eq!(d.resolve_section("Work History"), Some("Experience"));
        assert_eq!(d.resolve_section("PROFESSIONAL EXPERIENCE"), Some("Experience"));
        assert_eq!(d.resolve_section("Core Competencies"), Some("Skills"));
        assert_eq!(d.resolve_section("Academic Background"), Some("Education"));
        assert_eq!(d.resolve_section("Referees"), None);
    }

    #[test]
    fn test_present_sections_deduplicates() {
        let d = compiled();
        let present = d.present_sections(&named_sections(&[
            "Experience",
            "Work History",
            "Skills",
        ]));
        assert_eq!(present.len(), 2);
        assert!(present.contains("Experience"));
    }

    #[test]
    fn test_quantifier_matches_numbers_and_magnitude_words() {
        let d = compiled();
        assert!(d.is_quantified("Reduced latency by 40%"));
        assert!(d.is_quantified("Saved $2M annually"));
        assert!(d.is_quantified("Processed millions of events"));
        assert!(!d.is_quantified("Improved the user experience"));
    }

    #[test]
    fn test_discouraged_phrases_respect_word_boundaries() {
        let d = compiled();
        let found = d.discouraged_phrases_in("Career Objective: to grow. Hobbies: chess.");
        assert_eq!(found, vec!["objective".to_string(), "hobbies".to_string()]);
        assert!(d
            .discouraged_phrases_in("Measured objectives objectively")
            .is_empty());
    }
}
