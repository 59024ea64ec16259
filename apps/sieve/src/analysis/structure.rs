//! Structure: canonical section coverage, reverse-chronological ordering of
//! experience, and whether roles are broken into bullet points.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde_json::json;

use crate::dictionary::{OPTIONAL_SECTIONS, REQUIRED_SECTIONS};
use crate::models::document::ExperienceEntry;
use crate::models::{ComponentKind, ComponentScore};

use super::{round3, ComponentScorer, ScoreContext};

/// Evidence labels downstream rules read.
pub const MISSING_SECTIONS: &str = "missing_sections";
pub const INVERSIONS: &str = "inversions";

const REQUIRED_SECTION_POINTS: f64 = 20.0;
const OPTIONAL_SECTION_BONUS: f64 = 5.0;
const CHRONOLOGY_POINTS: f64 = 15.0;
const INVERSION_PENALTY: f64 = 5.0;
const BULLET_USAGE_POINTS: f64 = 15.0;

pub struct StructureScorer;

impl ComponentScorer for StructureScorer {
    fn kind(&self) -> ComponentKind {
        ComponentKind::Structure
    }

    fn score(&self, ctx: &ScoreContext<'_>) -> ComponentScore {
        let present = ctx.dicts.present_sections(&ctx.doc.sections);

        let mut missing: Vec<&str> = Vec::new();
        let mut value = 0.0;
        for section in REQUIRED_SECTIONS {
            if present.contains(section) {
                value += REQUIRED_SECTION_POINTS;
            } else {
                missing.push(section);
            }
        }
        let optional_found: Vec<&str> = OPTIONAL_SECTIONS
            .iter()
            .copied()
            .filter(|s| present.contains(s))
            .collect();
        value += optional_found.len() as f64 * OPTIONAL_SECTION_BONUS;

        let inversions = chronology_inversions(&ctx.doc.experience);
        if !ctx.doc.experience.is_empty() {
            value += (CHRONOLOGY_POINTS - INVERSION_PENALTY * inversions as f64).max(0.0);
        }

        let ratio = bullet_ratio(&ctx.doc.experience);
        value += BULLET_USAGE_POINTS * ratio;

        let mut evidence = BTreeMap::new();
        evidence.insert(
            "sections_found".into(),
            json!(present.iter().copied().collect::<Vec<&str>>()),
        );
        evidence.insert(MISSING_SECTIONS.into(), json!(missing));
        evidence.insert("optional_found".into(), json!(optional_found));
        evidence.insert(INVERSIONS.into(), json!(inversions));
        evidence.insert("bullet_ratio".into(), json!(round3(ratio)));

        ComponentScore::new(ComponentKind::Structure, value, evidence)
    }
}

/// Adjacent pairs of parseable start dates running oldest-first. Entries
/// whose start date cannot be parsed are skipped; adjacency is over the
/// parseable subsequence in document order.
fn chronology_inversions(entries: &[ExperienceEntry]) -> usize {
    let starts: Vec<NaiveDate> = entries.iter().filter_map(ExperienceEntry::start).collect();
    starts.windows(2).filter(|pair| pair[1] > pair[0]).count()
}

/// Share of experience entries carrying at least one non-blank bullet.
fn bullet_ratio(entries: &[ExperienceEntry]) -> f64 {
    if entries.is_empty() {
        return 0.0;
    }
    let with_bullets = entries
        .iter()
        .filter(|e| e.bullet_points.iter().any(|b| !b.trim().is_empty()))
        .count();
    with_bullets as f64 / entries.len() as f64
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
