//! Terminal report formatting. Kept in one place so the scoring code stays
//! clean and output changes are localized.

use crate::config::EngineConfig;
use crate::models::{AnalysisResult, ComponentKind, Severity};

/// Format the full analysis: headline scores, component table, red flags,
/// missing elements, and recommendations grouped by category.
pub fn format_analysis(result: &AnalysisResult, config: &EngineConfig) -> String {
    let mut out = String::new();

    out.push_str("=== sieve - Resume Analysis ===\n");
    out.push_str(&format!("Overall:    {:>3}/100\n", result.overall_score));
    out.push_str(&format!("ATS:        {:>3}/100\n", result.ats_score));
    out.push_str(&format!("Words:      {}\n", result.word_count));
    out.push_str(&format!("Dictionary: {}\n", result.dictionary_version));

    out.push_str("\nComponent scores:\n");
    for kind in ComponentKind::ALL {
        let value = result.component(kind).map_or(0.0, |s| s.value);
        out.push_str(&format!(
            "  {:<22} {:>5.1}  (weight {:.2}, ats {:.2})\n",
            kind.display_name(),
            value,
            config.weights.get(kind),
            config.ats_weights.get(kind),
        ));
    }

    if !result.red_flags.is_empty() {
        out.push_str("\nRed flags:\n");
        for flag in &result.red_flags {
            out.push_str(&format!(
                "  [{:<6}] {}\n",
                severity_label(flag.severity),
                flag.message
            ));
        }
    }

    if !result.missing_elements.is_empty() {
        out.push_str(&format!(
            "\nMissing elements: {}\n",
            result.missing_elements.join(", ")
        ));
    }

    if !result.recommendations.is_empty() {
        out.push_str("\nRecommendations:\n");
        let mut current_category = None;
        for rec in &result.recommendations {
            if current_category != Some(rec.category) {
                out.push_str(&format!("  {}:\n", rec.category.display_name()));
                current_category = Some(rec.category);
            }
            out.push_str(&format!("    {}. {}\n", rec.priority, rec.text));
        }
    }

    out
}

fn severity_label(severity: Severity) -> &'static str {
    match severity {
        Severity::Low => "low",
        Severity::Medium => "medium",
        Severity::High => "high",
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
