//! The analysis engine: five component scorers fanned out in parallel over
//! one immutable scoring context, then aggregation, red-flag screening, and
//! recommendation generation over the combined result.

pub mod aggregate;
pub mod completeness;
pub mod content;
pub mod format;
pub mod keyword;
pub mod recommend;
pub mod red_flags;
pub mod structure;

use std::collections::BTreeMap;

use rayon::prelude::*;
use tracing::debug;

use crate::config::EngineConfig;
use crate::dictionary::CompiledDictionaries;
use crate::errors::AppError;
use crate::models::document::StructuredDocument;
use crate::models::{AnalysisResult, ComponentKind, ComponentScore};

use completeness::CompletenessScorer;
use content::ContentScorer;
use format::FormatScorer;
use keyword::KeywordScorer;
use structure::StructureScorer;

/// Everything a scorer may read. Borrowed and immutable, so the five
/// scorers can run concurrently over one document.
pub struct ScoreContext<'a> {
    pub doc: &'a StructuredDocument,
    pub word_count: usize,
    pub config: &'a EngineConfig,
    pub dicts: &'a CompiledDictionaries,
    pub job_terms: &'a [String],
}

/// One scoring dimension. Implementations must be pure functions of the
/// context: no interior state, no ordering dependence between scorers.
pub trait ComponentScorer: Sync {
    fn kind(&self) -> ComponentKind;
    fn score(&self, ctx: &ScoreContext<'_>) -> ComponentScore;
}

/// Rounds evidence ratios to three decimals for stable presentation.
pub(crate) fn round3(x: f64) -> f64 {
    (x * 1000.0).round() / 1000.0
}

/// A validated configuration plus compiled dictionaries. Construction is
/// the last point an analysis can fail; `analyze` itself is total.
pub struct AnalysisEngine {
    config: EngineConfig,
    dicts: CompiledDictionaries,
}

impl AnalysisEngine {
    pub fn new(config: EngineConfig) -> Result<Self, AppError> {
        config.validate()?;
        let dicts = CompiledDictionaries::compile(&config.dictionaries)?;
        Ok(Self { config, dicts })
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn dictionary_version(&self) -> &str {
        self.dicts.version()
    }

    pub fn dictionaries(&self) -> &CompiledDictionaries {
        &self.dicts
    }

    /// Scores one document. `job_terms` may be empty; when present they
    /// feed the keyword gap analysis.
    pub fn analyze(&self, doc: &StructuredDocument, job_terms: &[String]) -> AnalysisResult {
        let ctx = ScoreContext {
            doc,
            word_count: doc.word_count(),
            config: &self.config,
            dicts: &self.dicts,
            job_terms,
        };
        let scorers: &[&dyn ComponentScorer] = &[
            &KeywordScorer,
            &FormatScorer,
            &StructureScorer,
            &ContentScorer,
            &CompletenessScorer,
        ];

        let (scored, red_flags) = rayon::join(
            || {
                scorers
                    .par_iter()
                    .map(|s| (s.kind(), s.score(&ctx)))
                    .collect::<Vec<_>>()
            },
            || red_flags::detect(&ctx),
        );

        let component_scores: BTreeMap<ComponentKind, ComponentScore> =
            scored.into_iter().collect();
        for score in component_scores.values() {
            debug!(
                component = score.component.display_name(),
                value = score.value,
                "component scored"
            );
        }

        let missing_elements = collect_missing_elements(&component_scores);
        let overall_score = aggregate::weighted_score(&component_scores, &self.config.weights);
        let ats_score = aggregate::weighted_score(&component_scores, &self.config.ats_weights);
        let recommendations = recommend::generate(
            &component_scores,
            &red_flags,
            &missing_elements,
            ctx.word_count,
            overall_score,
            &self.config,
        );
        debug!(overall_score, ats_score, flags = red_flags.len(), "analysis complete");

        AnalysisResult {
            overall_score,
            ats_score,
            word_count: ctx.word_count,
            component_scores,
            red_flags,
            missing_elements,
            recommendations,
            dictionary_version: self.dicts.version().to_string(),
        }
    }
}

/// Union of what the completeness and structure scorers reported missing,
/// first occurrence wins. Contact fields come first, then sections.
fn collect_missing_elements(
    scores: &BTreeMap<ComponentKind, ComponentScore>,
) -> Vec<String> {
    let from_completeness = scores
        .get(&ComponentKind::Completeness)
        .map(|s| s.evidence_strings(completeness::MISSING_ELEMENTS))
        .unwrap_or_default();
    let from_structure = scores
        .get(&ComponentKind::Structure)
        .map(|s| s.evidence_strings(structure::MISSING_SECTIONS))
        .unwrap_or_default();

    let mut missing = Vec::new();
    for element in from_completeness.into_iter().chain(from_structure) {
        if !missing.contains(&element) {
            missing.push(element);
        }
    }
    missing
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dictionary::builtin;
    use crate::models::RecommendationCategory;

    fn engine() -> AnalysisEngine {
        AnalysisEngine::new(EngineConfig::default()).unwrap()
    }

    /// Filler prose that matches nothing in the builtin dictionaries.
    fn filler(words: usize) -> String {
        let vocab = ["quiet", "harbor", "lantern", "meadow", "violet", "gravel"];
        (0..words)
            .map(|i| vocab[i % vocab.len()])
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// A solid mid-career resume: 450 words, PDF, clean layout, every
    /// section, full contact block, strong bullets, 8 technical keywords.
    fn strong_resume() -> StructuredDocument {
        let raw_text = format!(
            "python java sql react docker kubernetes git linux {}",
            filler(442)
        );
        let json = serde_json::json!({
            "raw_text": raw_text,
            "file_format": "pdf",
            "sections": [
                {"name": "Summary"},
                {"name": "Experience"},
                {"name": "Education"},
                {"name": "Skills"}
            ],
            "contact": {
                "name": "Ada Lovelace",
                "email": "ada@example.com",
                "phone": "+44 20 5550 0100",
                "location": "London",
                "links": ["https://example.com/ada"]
            },
            "experience": [
                {
                    "title": "Senior Engineer",
                    "organization": "Acme",
                    "start_date": "Jan 2022",
                    "end_date": "Present",
                    "bullet_points": [
                        "Developed a payment service processing 2M transactions",
                        "Led a team of 6 engineers",
                        "Increased conversion by 15%"
                    ]
                },
                {
                    "title": "Engineer",
                    "organization": "Initech",
                    "start_date": "Mar 2019",
                    "end_date": "Dec 2021",
                    "bullet_points": [
                        "Designed the onboarding flow",
                        "Collaborated with the design team"
                    ]
                }
            ],
            "education": [
                {"degree": "BSc Computer Science", "institution": "UCL", "date": "2018"}
            ]
        });
        StructuredDocument::from_json(&json.to_string()).unwrap()
    }

    /// A thin RTF resume: 120 words, no Education section, an experience
    /// entry with no bullets, name-only contact.
    fn weak_resume() -> StructuredDocument {
        let json = serde_json::json!({
            "raw_text": filler(120),
            "file_format": "rtf",
            "sections": [{"name": "Experience"}, {"name": "Skills"}],
            "contact": {"name": "B. Doe"},
            "experience": [{
                "title": "Clerk",
                "organization": "Corner Shop",
                "start_date": "2020",
                "end_date": "2021",
                "bullet_points": []
            }]
        });
        StructuredDocument::from_json(&json.to_string()).unwrap()
    }

    fn value_of(result: &AnalysisResult, kind: ComponentKind) -> f64 {
        result.component(kind).unwrap().value
    }

    #[test]
    fn test_strong_resume_profile() {
        let result = engine().analyze(&strong_resume(), &[]);

        assert_eq!(result.word_count, 450);
        assert_eq!(value_of(&result, ComponentKind::FormatCompliance), 100.0);
        assert_eq!(value_of(&result, ComponentKind::Completeness), 100.0);
        assert_eq!(value_of(&result, ComponentKind::ContentQuality), 70.0);

        let keyword = value_of(&result, ComponentKind::KeywordOptimization);
        assert!(keyword > 0.0 && keyword < 50.0, "got {keyword}");

        assert!(
            (60..=85).contains(&result.overall_score),
            "got {}",
            result.overall_score
        );
        assert!(result.missing_elements.is_empty());
        assert!(result.red_flags.is_empty());
        assert!(result
            .recommendations
            .iter()
            .all(|r| r.category != RecommendationCategory::Critical));
        assert_eq!(result.dictionary_version, builtin::BUILTIN_VERSION);
    }

    #[test]
    fn test_weak_resume_profile() {
        let result = engine().analyze(&weak_resume(), &[]);

        assert_eq!(value_of(&result, ComponentKind::FormatCompliance), 48.0);
        assert_eq!(value_of(&result, ComponentKind::ContentQuality), 0.0);
        assert_eq!(value_of(&result, ComponentKind::Completeness), 40.0);

        assert!(result
            .missing_elements
            .contains(&"Education".to_string()));

        let flag_ids: Vec<&str> = result.red_flags.iter().map(|f| f.id.as_str()).collect();
        assert!(flag_ids.contains(&"length-out-of-bounds"));
        assert!(flag_ids.contains(&"no-bullet-points"));
        assert!(flag_ids.contains(&"missing-education"));

        let criticals: Vec<&str> = result
            .recommendations
            .iter()
            .filter(|r| r.category == RecommendationCategory::Critical)
            .map(|r| r.text.as_str())
            .collect();
        assert!(criticals.iter().any(|t| t.contains("Education section")));
        assert!(criticals.iter().any(|t| t.contains("PDF or DOCX")));
    }

    #[test]
    fn test_analysis_is_deterministic() {
        let engine = engine();
        let doc = strong_resume();
        let terms = vec!["go".to_string(), "python".to_string()];
        let first = engine.analyze(&doc, &terms).to_json_pretty().unwrap();
        let second = engine.analyze(&doc, &terms).to_json_pretty().unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_every_component_is_scored() {
        let result = engine().analyze(&weak_resume(), &[]);
        assert_eq!(result.component_scores.len(), 5);
        for kind in ComponentKind::ALL {
            assert!(result.component(kind).is_some(), "missing {kind:?}");
        }
    }

    #[test]
    fn test_scorer_kind_matches_produced_component() {
        let engine = engine();
        let doc = strong_resume();
        let ctx = ScoreContext {
            doc: &doc,
            word_count: doc.word_count(),
            config: engine.config(),
            dicts: engine.dictionaries(),
            job_terms: &[],
        };
        let scorers: &[&dyn ComponentScorer] = &[
            &KeywordScorer,
            &FormatScorer,
            &StructureScorer,
            &ContentScorer,
            &CompletenessScorer,
        ];
        for scorer in scorers {
            assert_eq!(scorer.kind(), scorer.score(&ctx).component);
        }
    }

    #[test]
    fn test_missing_section_is_reported_everywhere() {
        let mut doc = strong_resume();
        doc.sections.retain(|s| s.name != "Skills");
        let result = engine().analyze(&doc, &[]);

        assert!(result.missing_elements.contains(&"Skills".to_string()));
        assert!(result.red_flags.iter().any(|f| f.id == "missing-skills"));
        assert!(result
            .recommendations
            .iter()
            .any(|r| r.category == RecommendationCategory::Critical
                && r.text.contains("Skills section")));
    }

    #[test]
    fn test_added_keyword_never_lowers_overall() {
        let engine = engine();
        let base = engine.analyze(&strong_resume(), &[]);

        let mut doc = strong_resume();
        doc.raw_text.push_str(" terraform");
        let wider = engine.analyze(&doc, &[]);

        assert!(wider.overall_score >= base.overall_score);
    }

    #[test]
    fn test_job_terms_feed_gap_recommendation() {
        let engine = engine();
        let terms = vec!["go".to_string(), "terraform".to_string()];
        let result = engine.analyze(&strong_resume(), &terms);

        let without = engine.analyze(&strong_resume(), &[]);
        let with_terms = value_of(&result, ComponentKind::KeywordOptimization);
        assert!(with_terms < value_of(&without, ComponentKind::KeywordOptimization));
        assert!(result
            .recommendations
            .iter()
            .any(|r| r.category == RecommendationCategory::Ats && r.text.contains("go, terraform")));
    }

    #[test]
    fn test_degenerate_input_stays_in_bounds() {
        let doc =
            StructuredDocument::from_json(r#"{"raw_text": "", "file_format": "txt"}"#).unwrap();
        let result = engine().analyze(&doc, &[]);

        for kind in ComponentKind::ALL {
            let value = value_of(&result, kind);
            assert!((0.0..=100.0).contains(&value), "{kind:?} out of bounds: {value}");
        }
        assert!(result.overall_score <= 100);
        assert!(result.ats_score <= 100);
        assert_eq!(result.word_count, 0);
    }

    #[test]
    fn test_section_presence_requires_a_heading() {
        // Section presence is decided by the section list alone; structured
        // entries do not substitute for a heading.
        let mut doc = strong_resume();
        doc.sections.retain(|s| s.name != "Experience");
        let result = engine().analyze(&doc, &[]);
        assert!(result.missing_elements.contains(&"Experience".to_string()));
        assert!(!doc.experience.is_empty());
    }
}
