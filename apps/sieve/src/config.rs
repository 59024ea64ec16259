//! Engine configuration: the two weight tables, per-scorer parameters, and
//! the Term Dictionaries. Everything here is caller-editable through JSON
//! override files merged over the shipped defaults; validation runs at load
//! and a bad table fails configuration, never an analysis.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::dictionary::TermDictionaries;
use crate::errors::AppError;
use crate::models::ComponentKind;

/// Floating tolerance for the weight-sum invariant.
pub const WEIGHT_SUM_TOLERANCE: f64 = 1e-6;

/// One weight per component. Two instances exist in every configuration:
/// the overall table and the ATS table; each must sum to 1.0 on its own.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct ComponentWeights {
    pub keyword_optimization: f64,
    pub format_compliance: f64,
    pub structure: f64,
    pub content_quality: f64,
    pub completeness: f64,
}

impl Default for ComponentWeights {
    fn default() -> Self {
        Self {
            keyword_optimization: 0.25,
            format_compliance: 0.20,
            structure: 0.20,
            content_quality: 0.20,
            completeness: 0.15,
        }
    }
}

impl ComponentWeights {
    /// ATS screens hinge on term matching and parseable formatting, so those
    /// two carry 65% here against 45% in the overall table.
    pub fn ats_default() -> Self {
        Self {
            keyword_optimization: 0.35,
            format_compliance: 0.30,
            structure: 0.15,
            content_quality: 0.10,
            completeness: 0.10,
        }
    }

    pub fn get(&self, kind: ComponentKind) -> f64 {
        match kind {
            ComponentKind::KeywordOptimization => self.keyword_optimization,
            ComponentKind::FormatCompliance => self.format_compliance,
            ComponentKind::Structure => self.structure,
            ComponentKind::ContentQuality => self.content_quality,
            ComponentKind::Completeness => self.completeness,
        }
    }

    pub fn sum(&self) -> f64 {
        ComponentKind::ALL.iter().map(|k| self.get(*k)).sum()
    }

    fn validate(&self, table: &str) -> Result<(), AppError> {
        for kind in ComponentKind::ALL {
            let weight = self.get(kind);
            if !(0.0..=1.0).contains(&weight) {
                return Err(AppError::Configuration(format!(
                    "{table}: weight for {} must be within [0, 1], got {weight}",
                    kind.display_name()
                )));
            }
        }
        let sum = self.sum();
        if (sum - 1.0).abs() > WEIGHT_SUM_TOLERANCE {
            return Err(AppError::Configuration(format!(
                "{table}: weights must sum to 1.0, got {sum}"
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct KeywordParams {
    /// Mentions of one term stop earning anything past this count.
    pub repeat_threshold: u32,
    /// Credit each repeat (up to the threshold) adds on top of the first
    /// mention's 1.0.
    pub repeat_bonus: f64,
    /// Deduction per job-description term missing from the resume.
    pub missing_penalty: f64,
    /// Cap on the total missing-keyword deduction.
    pub missing_cap: f64,
}

impl Default for KeywordParams {
    fn default() -> Self {
        Self {
            repeat_threshold: 5,
            repeat_bonus: 0.1,
            missing_penalty: 2.0,
            missing_cap: 20.0,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct FormatParams {
    pub min_words: usize,
    pub max_words: usize,
    /// Deduction per word of distance from the nearest bound.
    pub per_word_penalty: f64,
    pub word_cap: f64,
    pub txt_penalty: f64,
    pub doc_penalty: f64,
    pub rtf_penalty: f64,
    /// Deduction per layout marker (images, tables, multi-column).
    pub marker_penalty: f64,
    pub marker_cap: f64,
}

impl Default for FormatParams {
    fn default() -> Self {
        Self {
            min_words: 300,
            max_words: 700,
            per_word_penalty: 0.15,
            word_cap: 35.0,
            txt_penalty: 10.0,
            doc_penalty: 15.0,
            rtf_penalty: 25.0,
            marker_penalty: 10.0,
            marker_cap: 25.0,
        }
    }
}

impl FormatParams {
    pub fn format_penalty(&self, format: crate::models::FileFormat) -> f64 {
        use crate::models::FileFormat;
        match format {
            FileFormat::Pdf | FileFormat::Docx => 0.0,
            FileFormat::Txt => self.txt_penalty,
            FileFormat::Doc => self.doc_penalty,
            FileFormat::Rtf => self.rtf_penalty,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct ContentParams {
    pub action_verb_weight: f64,
    pub quantified_weight: f64,
}

impl Default for ContentParams {
    fn default() -> Self {
        Self {
            action_verb_weight: 0.5,
            quantified_weight: 0.5,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct CompletenessParams {
    /// Deduction per missing essential contact field (name, email, phone).
    pub essential_field_penalty: f64,
    /// Deduction per missing essential section (Experience, Education,
    /// Skills).
    pub essential_section_penalty: f64,
    /// Deduction per missing field beyond the minimal set (location, links).
    pub optional_field_penalty: f64,
}

impl Default for CompletenessParams {
    fn default() -> Self {
        Self {
            essential_field_penalty: 15.0,
            essential_section_penalty: 20.0,
            optional_field_penalty: 5.0,
        }
    }
}

/// The full configuration surface. A JSON override file may specify any
/// subset of fields; the rest fall back to these defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub weights: ComponentWeights,
    pub ats_weights: ComponentWeights,
    pub keyword: KeywordParams,
    pub format: FormatParams,
    pub content: ContentParams,
    pub completeness: CompletenessParams,
    pub dictionaries: TermDictionaries,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            weights: ComponentWeights::default(),
            ats_weights: ComponentWeights::ats_default(),
            keyword: KeywordParams::default(),
            format: FormatParams::default(),
            content: ContentParams::default(),
            completeness: CompletenessParams::default(),
            dictionaries: TermDictionaries::default(),
        }
    }
}

impl EngineConfig {
    pub fn from_json(json: &str) -> Result<Self, AppError> {
        serde_json::from_str(json)
            .map_err(|e| AppError::Configuration(format!("invalid configuration file: {e}")))
    }

    /// Loads defaults, then the optional config override, then the optional
    /// dictionary override, and validates the merged result.
    pub fn load(
        config_path: Option<&Path>,
        dictionaries_path: Option<&Path>,
    ) -> Result<Self, AppError> {
        let mut config = match config_path {
            Some(path) => Self::from_json(&read_config_file(path)?)?,
            None => Self::default(),
        };
        if let Some(path) = dictionaries_path {
            config.dictionaries = TermDictionaries::from_json(&read_config_file(path)?)?;
        }
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), AppError> {
        self.weights.validate("component weights")?;
        self.ats_weights.validate("ats weights")?;

        let sub_sum = self.content.action_verb_weight + self.content.quantified_weight;
        if self.content.action_verb_weight < 0.0 || self.content.quantified_weight < 0.0 {
            return Err(AppError::Configuration(
                "content sub-weights must be non-negative".into(),
            ));
        }
        if (sub_sum - 1.0).abs() > WEIGHT_SUM_TOLERANCE {
            return Err(AppError::Configuration(format!(
                "content sub-weights must sum to 1.0, got {sub_sum}"
            )));
        }

        if self.keyword.repeat_threshold == 0 {
            return Err(AppError::Configuration(
                "keyword repeat_threshold must be at least 1".into(),
            ));
        }
        if self.format.min_words >= self.format.max_words {
            return Err(AppError::Configuration(format!(
                "word-count bounds are inverted: [{}, {}]",
                self.format.min_words, self.format.max_words
            )));
        }

        let non_negative = [
            ("keyword.repeat_bonus", self.keyword.repeat_bonus),
            ("keyword.missing_penalty", self.keyword.missing_penalty),
            ("keyword.missing_cap", self.keyword.missing_cap),
            ("format.per_word_penalty", self.format.per_word_penalty),
            ("format.word_cap", self.format.word_cap),
            ("format.txt_penalty", self.format.txt_penalty),
            ("format.doc_penalty", self.format.doc_penalty),
            ("format.rtf_penalty", self.format.rtf_penalty),
            ("format.marker_penalty", self.format.marker_penalty),
            ("format.marker_cap", self.format.marker_cap),
            (
                "completeness.essential_field_penalty",
                self.completeness.essential_field_penalty,
            ),
            (
                "completeness.essential_section_penalty",
                self.completeness.essential_section_penalty,
            ),
            (
                "completeness.optional_field_penalty",
                self.completeness.optional_field_penalty,
            ),
        ];
        for (name, value) in non_negative {
            if value < 0.0 {
                return Err(AppError::Configuration(format!(
                    "{name} must be non-negative, got {value}"
                )));
            }
        }

        self.dictionaries.validate()
    }
}

fn read_config_file(path: &Path) -> Result<String, AppError> {
    std::fs::read_to_string(path).map_err(|e| {
        AppError::Configuration(format!("cannot read '{}': {e}", path.display()))
    })
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
