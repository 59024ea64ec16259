//! Format Compliance: three independent deductions from a perfect score,
//! for lossy file formats, word counts outside the preferred window, and
//! ATS-hostile layout markers.

use std::collections::BTreeMap;

use serde_json::json;

use crate::config::FormatParams;
use crate::models::{ComponentKind, ComponentScore, MAX_SCORE};

use super::{ComponentScorer, ScoreContext};

/// Evidence label for the document's declared file format.
pub const FILE_FORMAT: &str = "file_format";

pub struct FormatScorer;

impl ComponentScorer for FormatScorer {
    fn kind(&self) -> ComponentKind {
        ComponentKind::FormatCompliance
    }

    fn score(&self, ctx: &ScoreContext<'_>) -> ComponentScore {
        let params = &ctx.config.format;
        let markers = ctx.doc.markers;

        let format_deduction = params.format_penalty(ctx.doc.file_format);
        let word_deduction = word_count_deduction(ctx.word_count, params);
        let marker_count = [markers.images, markers.tables, markers.multi_column]
            .iter()
            .filter(|flagged| **flagged)
            .count();
        let marker_deduction = (marker_count as f64 * params.marker_penalty).min(params.marker_cap);

        let value = MAX_SCORE - format_deduction - word_deduction - marker_deduction;

        let mut evidence = BTreeMap::new();
        evidence.insert(FILE_FORMAT.into(), json!(ctx.doc.file_format.as_str()));
        evidence.insert("format_deduction".into(), json!(format_deduction));
        evidence.insert("word_count_deduction".into(), json!(word_deduction));
        evidence.insert("layout_deduction".into(), json!(marker_deduction));

        ComponentScore::new(ComponentKind::FormatCompliance, value, evidence)
    }
}

/// Distance in words from the nearest bound of the preferred window, scaled
/// and capped. Counts inside the window deduct nothing; both bounds are
/// inclusive.
fn word_count_deduction(word_count: usize, params: &FormatParams) -> f64 {
    let distance = if word_count < params.min_words {
        params.min_words - word_count
    } else if word_count > params.max_words {
        word_count - params.max_words
    } else {
        0
    };
    (distance as f64 * params.per_word_penalty).min(params.word_cap)
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
