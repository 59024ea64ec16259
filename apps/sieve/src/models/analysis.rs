//! Output model: everything one analysis run produces. All types here are
//! immutable once returned and serialize deterministically (ordered maps,
//! ordered lists) so identical input yields byte-identical JSON.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::AppError;

pub const MAX_SCORE: f64 = 100.0;

/// The five scored components.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComponentKind {
    KeywordOptimization,
    FormatCompliance,
    Structure,
    ContentQuality,
    Completeness,
}

impl ComponentKind {
    pub const ALL: [ComponentKind; 5] = [
        ComponentKind::KeywordOptimization,
        ComponentKind::FormatCompliance,
        ComponentKind::Structure,
        ComponentKind::ContentQuality,
        ComponentKind::Completeness,
    ];

    pub fn display_name(&self) -> &'static str {
        match self {
            ComponentKind::KeywordOptimization => "Keyword Optimization",
            ComponentKind::FormatCompliance => "Format Compliance",
            ComponentKind::Structure => "Structure",
            ComponentKind::ContentQuality => "Content Quality",
            ComponentKind::Completeness => "Completeness",
        }
    }
}

/// One component's sub-score with its supporting evidence (matched keyword
/// lists, deduction breakdowns, fractions). Evidence keys are sorted by the
/// map itself, which keeps serialization stable.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComponentScore {
    pub component: ComponentKind,
    pub value: f64,
    pub max_value: f64,
    pub evidence: BTreeMap<String, Value>,
}

impl ComponentScore {
    /// Clamps into [0, 100] and rounds to one decimal. Every scorer funnels
    /// through here, so the bounds property holds by construction.
    pub fn new(component: ComponentKind, value: f64, evidence: BTreeMap<String, Value>) -> Self {
        let clamped = value.clamp(0.0, MAX_SCORE);
        Self {
            component,
            value: (clamped * 10.0).round() / 10.0,
            max_value: MAX_SCORE,
            evidence,
        }
    }

    pub fn evidence_f64(&self, label: &str) -> Option<f64> {
        self.evidence.get(label).and_then(Value::as_f64)
    }

    pub fn evidence_str(&self, label: &str) -> Option<&str> {
        self.evidence.get(label).and_then(Value::as_str)
    }

    pub fn evidence_strings(&self, label: &str) -> Vec<String> {
        self.evidence
            .get(label)
            .and_then(Value::as_array)
            .map(|items| {
                items
                    .iter()
                    .filter_map(Value::as_str)
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Low,
    Medium,
    High,
}

/// A detected property likely to harm automated screening, independent of
/// any numeric score.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RedFlag {
    pub id: String,
    pub severity: Severity,
    pub message: String,
}

impl RedFlag {
    pub fn new(id: &str, severity: Severity, message: impl Into<String>) -> Self {
        Self {
            id: id.to_string(),
            severity,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecommendationCategory {
    Critical,
    Ats,
    General,
}

impl RecommendationCategory {
    /// Sort rank: critical advice always precedes ATS advice, which precedes
    /// general advice.
    pub fn rank(&self) -> u8 {
        match self {
            RecommendationCategory::Critical => 0,
            RecommendationCategory::Ats => 1,
            RecommendationCategory::General => 2,
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            RecommendationCategory::Critical => "Critical",
            RecommendationCategory::Ats => "ATS",
            RecommendationCategory::General => "General",
        }
    }
}

/// One actionable suggestion. Lower priority number = more urgent within a
/// category.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recommendation {
    pub text: String,
    pub category: RecommendationCategory,
    pub priority: u8,
}

impl Recommendation {
    pub fn new(category: RecommendationCategory, priority: u8, text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            category,
            priority,
        }
    }
}

/// The engine's sole externally visible artifact.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub overall_score: u32,
    pub ats_score: u32,
    pub word_count: usize,
    pub component_scores: BTreeMap<ComponentKind, ComponentScore>,
    pub red_flags: Vec<RedFlag>,
    pub missing_elements: Vec<String>,
    pub recommendations: Vec<Recommendation>,
    pub dictionary_version: String,
}

impl AnalysisResult {
    pub fn component(&self, kind: ComponentKind) -> Option<&ComponentScore> {
        self.component_scores.get(&kind)
    }

    pub fn to_json_pretty(&self) -> Result<String, AppError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
