//! Recommendation generation: a fixed rule table over the scored analysis.
//! Each rule fires independently; the results are deduplicated by text and
//! ordered by category, then priority, then emission order.

use std::collections::BTreeMap;

use crate::config::EngineConfig;
use crate::dictionary::REQUIRED_SECTIONS;
use crate::models::{
    ComponentKind, ComponentScore, Recommendation, RecommendationCategory, RedFlag,
};
use RecommendationCategory::{Ats, Critical, General};

use super::{content, format, keyword, structure};

/// Component values below these draw a recommendation.
const KEYWORD_ATTENTION: f64 = 50.0;
const STRUCTURE_ATTENTION: f64 = 70.0;
const OVERALL_ATTENTION: u32 = 50;

/// Bullet-quality floors below which writing advice fires.
const VERB_FRACTION_FLOOR: f64 = 0.6;
const QUANTIFIED_FRACTION_FLOOR: f64 = 0.5;

/// How many missing job-description terms a recommendation names.
const JOB_TERMS_NAMED: usize = 5;

/// Runs the rule table and returns the deduplicated, ordered list.
pub fn generate(
    scores: &BTreeMap<ComponentKind, ComponentScore>,
    red_flags: &[RedFlag],
    missing_elements: &[String],
    word_count: usize,
    overall_score: u32,
    config: &EngineConfig,
) -> Vec<Recommendation> {
    let mut recs = Vec::new();
    let missing = |element: &str| missing_elements.iter().any(|m| m == element);
    let flagged = |id: &str| red_flags.iter().any(|f| f.id == id);
    let component = |kind: ComponentKind| scores.get(&kind);

    for section in REQUIRED_SECTIONS {
        if missing(section) {
            recs.push(Recommendation::new(
                Critical,
                1,
                format!("Add a dedicated {section} section; screens look for it by name."),
            ));
        }
    }
    for field in ["name", "email", "phone"] {
        if missing(field) {
            recs.push(Recommendation::new(
                Critical,
                1,
                format!("Add your {field} to the contact details."),
            ));
        }
    }

    let file_format = component(ComponentKind::FormatCompliance)
        .and_then(|s| s.evidence_str(format::FILE_FORMAT))
        .unwrap_or_default();
    match file_format {
        "doc" | "rtf" => recs.push(Recommendation::new(
            Critical,
            2,
            format!("Convert the resume to PDF or DOCX; {file_format} files often fail text extraction."),
        )),
        "txt" => recs.push(Recommendation::new(
            Ats,
            3,
            "Submit a PDF or DOCX instead of plain text to keep structure intact.",
        )),
        _ => {}
    }

    if flagged("no-bullet-points") {
        recs.push(Recommendation::new(
            Critical,
            2,
            "Break each role into bullet points describing what you accomplished.",
        ));
    }

    if let Some(score) = component(ComponentKind::KeywordOptimization) {
        if score.value < KEYWORD_ATTENTION {
            recs.push(Recommendation::new(
                Ats,
                2,
                "Work more role-relevant keywords into the resume, especially technical skills.",
            ));
        }
        let missing_terms = score.evidence_strings(keyword::MISSING_KEYWORDS);
        if !missing_terms.is_empty() {
            let named: Vec<&str> = missing_terms
                .iter()
                .take(JOB_TERMS_NAMED)
                .map(String::as_str)
                .collect();
            recs.push(Recommendation::new(
                Ats,
                1,
                format!(
                    "Incorporate the job description's missing terms, starting with: {}.",
                    named.join(", ")
                ),
            ));
        }
    }

    if word_count < config.format.min_words {
        recs.push(Recommendation::new(
            Ats,
            2,
            format!(
                "Expand the resume to at least {} words; {word_count} reads as thin.",
                config.format.min_words
            ),
        ));
    } else if word_count > config.format.max_words {
        recs.push(Recommendation::new(
            Ats,
            3,
            format!(
                "Tighten the resume to {} words or fewer.",
                config.format.max_words
            ),
        ));
    }

    if flagged("graphics-content") {
        recs.push(Recommendation::new(
            Ats,
            2,
            "Remove embedded images and graphics; they vanish in text extraction.",
        ));
    }
    if flagged("table-layout") {
        recs.push(Recommendation::new(
            Ats,
            2,
            "Replace tables with plain left-aligned text.",
        ));
    }
    if flagged("multi-column-layout") {
        recs.push(Recommendation::new(
            Ats,
            2,
            "Switch to a single-column layout so text extracts in reading order.",
        ));
    }
    if flagged("discouraged-content") {
        recs.push(Recommendation::new(
            Ats,
            3,
            "Drop dated or personal details such as objectives, hobbies, or marital status.",
        ));
    }

    if let Some(score) = component(ComponentKind::ContentQuality) {
        let has_bullets = score.evidence_f64(content::BULLET_COUNT).unwrap_or(0.0) > 0.0;
        let verb_fraction = score.evidence_f64(content::ACTION_VERB_FRACTION).unwrap_or(0.0);
        let quantified_fraction = score
            .evidence_f64(content::QUANTIFIED_FRACTION)
            .unwrap_or(0.0);
        if has_bullets && verb_fraction < VERB_FRACTION_FLOOR {
            recs.push(Recommendation::new(
                General,
                2,
                "Open each bullet with a strong action verb.",
            ));
        }
        if has_bullets && quantified_fraction < QUANTIFIED_FRACTION_FLOOR {
            recs.push(Recommendation::new(
                General,
                1,
                "Quantify achievements with numbers, percentages, or amounts.",
            ));
        }
    }

    if let Some(score) = component(ComponentKind::Structure) {
        if score.evidence_f64(structure::INVERSIONS).unwrap_or(0.0) > 0.0 {
            recs.push(Recommendation::new(
                General,
                2,
                "Order experience entries most recent first.",
            ));
        }
        if score.value < STRUCTURE_ATTENTION {
            recs.push(Recommendation::new(
                General,
                3,
                "Use standard section headings so parsers can map the content.",
            ));
        }
    }

    if missing("location") {
        recs.push(Recommendation::new(
            General,
            4,
            "Add your location to the contact details.",
        ));
    }
    if missing("links") {
        recs.push(Recommendation::new(
            General,
            4,
            "Add a LinkedIn or portfolio link to the contact details.",
        ));
    }

    if overall_score < OVERALL_ATTENTION {
        recs.push(Recommendation::new(
            General,
            5,
            "Tailor the resume to each posting, mirroring the language of the job description.",
        ));
    }

    dedup_and_rank(recs)
}

/// Collapses duplicate texts (case- and whitespace-insensitive), keeping the
/// strongest priority at the first occurrence's position, then orders by
/// category rank and priority. The sort is stable, so ties keep emission
/// order.
fn dedup_and_rank(recs: Vec<Recommendation>) -> Vec<Recommendation> {
    let mut kept: Vec<Recommendation> = Vec::new();
    let mut index: BTreeMap<String, usize> = BTreeMap::new();
    for rec in recs {
        let key = normalized(&rec.text);
        match index.get(&key) {
            Some(&at) => {
                if rec.priority < kept[at].priority {
                    kept[at] = rec;
                }
            }
            None => {
                index.insert(key, kept.len());
                kept.push(rec);
            }
        }
    }
    kept.sort_by_key(|r| (r.category.rank(), r.priority));
    kept
}

fn normalized(text: &str) -> String {
    text.to_lowercase().split_whitespace().collect::<Vec<_>>().join(" ")
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
