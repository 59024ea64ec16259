//! Red Flags: boolean screens for conditions that materially hurt automated
//! or human review. Every rule runs on every analysis; a flag never
//! short-circuits the others and carries no score weight of its own.

use crate::models::{RedFlag, Severity};

use super::ScoreContext;

/// Runs all rules in a fixed order and returns every flag that fires.
pub fn detect(ctx: &ScoreContext<'_>) -> Vec<RedFlag> {
    let doc = ctx.doc;
    let params = &ctx.config.format;
    let mut flags = Vec::new();

    if doc.markers.images {
        flags.push(RedFlag::new(
            "graphics-content",
            Severity::High,
            "Embedded images or graphics are dropped by automated text extraction",
        ));
    }
    if doc.markers.tables {
        flags.push(RedFlag::new(
            "table-layout",
            Severity::Medium,
            "Table layouts scramble the text order many parsers see",
        ));
    }
    if doc.markers.multi_column {
        flags.push(RedFlag::new(
            "multi-column-layout",
            Severity::Medium,
            "Multi-column layouts extract out of reading order",
        ));
    }
    if doc.markers.non_standard_font {
        flags.push(RedFlag::new(
            "non-standard-font",
            Severity::Low,
            "Non-standard fonts can break text extraction",
        ));
    }

    if ctx.word_count < params.min_words {
        flags.push(RedFlag::new(
            "length-out-of-bounds",
            Severity::Medium,
            format!(
                "Word count {} is below the preferred {}-{} range",
                ctx.word_count, params.min_words, params.max_words
            ),
        ));
    } else if ctx.word_count > params.max_words {
        flags.push(RedFlag::new(
            "length-out-of-bounds",
            Severity::Medium,
            format!(
                "Word count {} is above the preferred {}-{} range",
                ctx.word_count, params.min_words, params.max_words
            ),
        ));
    }

    let bullets: Vec<&str> = doc.bullet_points().filter(|b| !b.trim().is_empty()).collect();
    if bullets.is_empty() {
        flags.push(RedFlag::new(
            "no-bullet-points",
            Severity::High,
            "Experience is not broken into bullet points",
        ));
    } else if bullets.iter().all(|b| !ctx.dicts.is_quantified(b)) {
        flags.push(RedFlag::new(
            "no-quantified-achievements",
            Severity::Medium,
            "No bullet point carries a number, percentage, or amount",
        ));
    }

    let present = ctx.dicts.present_sections(&doc.sections);
    for (id, section) in [
        ("missing-experience", "Experience"),
        ("missing-education", "Education"),
        ("missing-skills", "Skills"),
    ] {
        if !present.contains(section) {
            flags.push(RedFlag::new(
                id,
                Severity::High,
                format!("No {section} section was found"),
            ));
        }
    }

    let phrases = ctx.dicts.discouraged_phrases_in(&doc.raw_text);
    if !phrases.is_empty() {
        flags.push(RedFlag::new(
            "discouraged-content",
            Severity::Low,
            format!("Contains dated or personal details: {}", phrases.join(", ")),
        ));
    }

    flags
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
