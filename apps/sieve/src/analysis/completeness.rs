//! Completeness: presence of contact fields and essential sections. Pure
//! deductions from a perfect score; the quality of what is present belongs
//! to the other scorers.

use std::collections::BTreeMap;

use serde_json::json;

use crate::dictionary::REQUIRED_SECTIONS;
use crate::models::{ComponentKind, ComponentScore, MAX_SCORE};

use super::{ComponentScorer, ScoreContext};

/// Evidence label carrying every missing element verbatim, contact fields
/// before sections.
pub const MISSING_ELEMENTS: &str = "missing_elements";

pub struct CompletenessScorer;

impl ComponentScorer for CompletenessScorer {
    fn kind(&self) -> ComponentKind {
        ComponentKind::Completeness
    }

    fn score(&self, ctx: &ScoreContext<'_>) -> ComponentScore {
        let params = &ctx.config.completeness;
        let contact = &ctx.doc.contact;

        let mut missing: Vec<&str> = Vec::new();
        let mut value = MAX_SCORE;

        let essential = [
            ("name", contact.has_name()),
            ("email", contact.has_email()),
            ("phone", contact.has_phone()),
        ];
        for (field, present) in essential {
            if !present {
                missing.push(field);
                value -= params.essential_field_penalty;
            }
        }

        let optional = [
            ("location", contact.has_location()),
            ("links", contact.has_links()),
        ];
        for (field, present) in optional {
            if !present {
                missing.push(field);
                value -= params.optional_field_penalty;
            }
        }

        let present_sections = ctx.dicts.present_sections(&ctx.doc.sections);
        for section in REQUIRED_SECTIONS {
            if !present_sections.contains(section) {
                missing.push(section);
                value -= params.essential_section_penalty;
            }
        }

        let mut evidence = BTreeMap::new();
        evidence.insert(MISSING_ELEMENTS.into(), json!(missing));

        ComponentScore::new(ComponentKind::Completeness, value, evidence)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::ScoreContext;
    use crate::config::EngineConfig;
    use crate::dictionary::CompiledDictionaries;
    use crate::models::document::StructuredDocument;

    fn full_doc() -> StructuredDocument {
        let json = serde_json::json!({
            "raw_text": "x",
            "file_format": "pdf",
            "sections": [
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
            }
        });
        StructuredDocument::from_json(&json.to_string()).unwrap()
    }

    fn score(doc: &StructuredDocument) -> ComponentScore {
        let config = EngineConfig::default();
        let dicts = CompiledDictionaries::compile(&config.dictionaries).unwrap();
        let ctx = ScoreContext {
            doc,
            word_count: doc.word_count(),
            config: &config,
            dicts: &dicts,
            job_terms: &[],
        };
        CompletenessScorer.score(&ctx)
    }

    #[test]
    fn test_complete_resume_scores_perfect() {
        let result = score(&full_doc());
        assert_eq!(result.value, 100.0);
        assert!(result.evidence_strings(MISSING_ELEMENTS).is_empty());
    }

    #[test]
    fn test_missing_essential_fields_deduct_fifteen_each() {
        let mut doc = full_doc();
        doc.contact.email = None;
        doc.contact.phone = None;
        let result = score(&doc);
        assert_eq!(result.value, 70.0);
        assert_eq!(
            result.evidence_strings(MISSING_ELEMENTS),
            vec!["email".to_string(), "phone".to_string()]
        );
    }

    #[test]
    fn test_missing_section_deducts_twenty() {
        let mut doc = full_doc();
        doc.sections.retain(|s| s.name != "Education");
        let result = score(&doc);
        assert_eq!(result.value, 80.0);
        assert_eq!(
            result.evidence_strings(MISSING_ELEMENTS),
            vec!["Education".to_string()]
        );
    }

    #[test]
    fn test_optional_fields_deduct_five_each() {
        let mut doc = full_doc();
        doc.contact.location = None;
        doc.contact.links.clear();
        assert_eq!(score(&doc).value, 90.0);
    }

    #[test]
    fn test_blank_fields_count_as_missing() {
        let mut doc = full_doc();
        doc.contact.email = Some("   ".into());
        let result = score(&doc);
        assert_eq!(result.value, 85.0);
        assert!(result
            .evidence_strings(MISSING_ELEMENTS)
            .contains(&"email".to_string()));
    }

    #[test]
    fn test_sections_resolve_through_synonyms() {
        let mut doc = full_doc();
        doc.sections[0].name = "Work History".into();
        assert_eq!(score(&doc).value, 100.0);
    }

    #[test]
    fn test_empty_document_floors_at_zero() {
        let doc =
            StructuredDocument::from_json(r#"{"raw_text": "x", "file_format": "pdf"}"#).unwrap();
        let result = score(&doc);
        assert_eq!(result.value, 0.0);
        assert_eq!(
            result.evidence_strings(MISSING_ELEMENTS),
            vec!["name", "email", "phone", "location", "links", "Experience", "Education", "Skills"]
        );
    }
}
