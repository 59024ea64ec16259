//! Content Quality: how the achievement bullets read. Two signals, weighted
//! per configuration: bullets that open with an action verb and bullets
//! that carry a quantified outcome.

use std::collections::BTreeMap;

use serde_json::json;

use crate::dictionary::CompiledDictionaries;
use crate::models::{ComponentKind, ComponentScore, MAX_SCORE};

use super::{round3, ComponentScorer, ScoreContext};

/// Evidence labels downstream rules read.
pub const BULLET_COUNT: &str = "bullet_count";
pub const ACTION_VERB_FRACTION: &str = "action_verb_fraction";
pub const QUANTIFIED_FRACTION: &str = "quantified_fraction";

pub struct ContentScorer;

impl ComponentScorer for ContentScorer {
    fn kind(&self) -> ComponentKind {
        ComponentKind::ContentQuality
    }

    fn score(&self, ctx: &ScoreContext<'_>) -> ComponentScore {
        let bullets: Vec<&str> = ctx
            .doc
            .bullet_points()
            .filter(|b| !b.trim().is_empty())
            .collect();

        let mut evidence = BTreeMap::new();
        evidence.insert(BULLET_COUNT.into(), json!(bullets.len()));
        if bullets.is_empty() {
            evidence.insert(ACTION_VERB_FRACTION.into(), json!(0.0));
            evidence.insert(QUANTIFIED_FRACTION.into(), json!(0.0));
            return ComponentScore::new(ComponentKind::ContentQuality, 0.0, evidence);
        }

        let verb_hits = bullets
            .iter()
            .filter(|b| opens_with_action_verb(b, ctx.dicts))
            .count();
        let quantified_hits = bullets.iter().filter(|b| ctx.dicts.is_quantified(b)).count();

        let verb_fraction = verb_hits as f64 / bullets.len() as f64;
        let quantified_fraction = quantified_hits as f64 / bullets.len() as f64;

        let params = &ctx.config.content;
        let value = MAX_SCORE
            * (params.action_verb_weight * verb_fraction
                + params.quantified_weight * quantified_fraction);

        evidence.insert(ACTION_VERB_FRACTION.into(), json!(round3(verb_fraction)));
        evidence.insert(QUANTIFIED_FRACTION.into(), json!(round3(quantified_fraction)));

        ComponentScore::new(ComponentKind::ContentQuality, value, evidence)
    }
}

/// Whether the bullet's first word, after any leading list glyphs, is an
/// action verb. Matching is case-insensitive and whole-word.
fn opens_with_action_verb(bullet: &str, dicts: &CompiledDictionaries) -> bool {
    leading_word(bullet).is_some_and(|w| dicts.is_action_verb(w))
}

/// First alphanumeric word: tokens made purely of glyphs ("•", "-") are
/// skipped, and punctuation stuck to the word is trimmed off.
fn leading_word(bullet: &str) -> Option<&str> {
    bullet
        .split_whitespace()
        .map(|t| t.trim_matches(|c: char| !c.is_alphanumeric()))
        .find(|t| !t.is_empty())
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
