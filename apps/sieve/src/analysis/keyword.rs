//! Keyword Optimization: dictionary matching across the three keyword
//! categories, diminishing credit for repeated mentions, and a capped
//! deduction for job-description terms the resume never covers.

use std::collections::{BTreeMap, BTreeSet};

use serde_json::{json, Value};

use crate::config::KeywordParams;
use crate::dictionary::{self, TermSet};
use crate::models::{ComponentKind, ComponentScore};

use super::{round3, ComponentScorer, ScoreContext};

/// Points each category can contribute; together they span the full scale.
const TECHNICAL_POINTS: f64 = 50.0;
const SOFT_POINTS: f64 = 30.0;
const INDUSTRY_POINTS: f64 = 20.0;

/// Evidence label for job-description terms absent from the resume.
pub const MISSING_KEYWORDS: &str = "missing_keywords";

pub struct KeywordScorer;

impl ComponentScorer for KeywordScorer {
    fn kind(&self) -> ComponentKind {
        ComponentKind::KeywordOptimization
    }

    fn score(&self, ctx: &ScoreContext<'_>) -> ComponentScore {
        let text_lower = ctx.doc.raw_text.to_lowercase();
        let skill_tokens: Vec<String> = ctx
            .doc
            .skills
            .iter()
            .map(|s| s.token.trim().to_lowercase())
            .filter(|t| !t.is_empty())
            .collect();

        let params = &ctx.config.keyword;
        let mut evidence = BTreeMap::new();
        let mut value = 0.0;
        for (label, set, points) in [
            ("technical", &ctx.dicts.technical, TECHNICAL_POINTS),
            ("soft", &ctx.dicts.soft, SOFT_POINTS),
            ("industry", &ctx.dicts.industry, INDUSTRY_POINTS),
        ] {
            value += category_points(set, points, &text_lower, &skill_tokens, params, label, &mut evidence);
        }

        let (matched_jd, missing) = partition_job_terms(ctx.job_terms, &text_lower, &skill_tokens);
        let deduction = (missing.len() as f64 * params.missing_penalty).min(params.missing_cap);
        value -= deduction;

        evidence.insert("matched_job_terms".into(), json!(matched_jd));
        evidence.insert(MISSING_KEYWORDS.into(), json!(missing));
        evidence.insert("job_gap_deduction".into(), json!(deduction));

        ComponentScore::new(ComponentKind::KeywordOptimization, value, evidence)
    }
}

/// First mention of a term earns 1.0; each repeat up to `repeat_threshold`
/// adds `repeat_bonus`; mentions past the threshold earn nothing. Credit is
/// monotone in mention count and flat under stuffing.
fn saturated_credit(count: usize, params: &KeywordParams) -> f64 {
    let capped = count.min(params.repeat_threshold as usize);
    1.0 + params.repeat_bonus * capped.saturating_sub(1) as f64
}

fn category_points(
    set: &TermSet,
    points: f64,
    text_lower: &str,
    skill_tokens: &[String],
    params: &KeywordParams,
    label: &str,
    evidence: &mut BTreeMap<String, Value>,
) -> f64 {
    let matched = set.match_counts_with(text_lower, skill_tokens);
    let credit: f64 = matched.iter().map(|(_, n)| saturated_credit(*n, params)).sum();
    let coverage = (credit / set.len() as f64).min(1.0);
    let density = matched.len() as f64 / set.len() as f64;

    let terms: Vec<&str> = matched.iter().map(|(term, _)| *term).collect();
    evidence.insert(format!("matched_{label}"), json!(terms));
    evidence.insert(format!("{label}_density"), json!(round3(density)));

    points * coverage
}

/// Splits job-description terms into covered and missing, deduplicated and
/// in first-seen order. A term counts as covered when it occurs in the prose
/// or equals a structured skill token.
fn partition_job_terms(
    job_terms: &[String],
    text_lower: &str,
    skill_tokens: &[String],
) -> (Vec<String>, Vec<String>) {
    let mut seen = BTreeSet::new();
    let mut matched = Vec::new();
    let mut missing = Vec::new();
    for raw in job_terms {
        let term = raw.trim().to_lowercase();
        if term.is_empty() || !seen.insert(term.clone()) {
            continue;
        }
        let covered = dictionary::count_occurrences(text_lower, &term) > 0
            || skill_tokens.iter().any(|t| *t == term);
        if covered {
            matched.push(term);
        } else {
            missing.push(term);
        }
    }
    (matched, missing)
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
