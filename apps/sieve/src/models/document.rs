//! Structured Document: the normalized, format-independent representation of
//! a resume handed over by the external parsing layer.
//!
//! The engine never reads resume files itself; it consumes this model as
//! JSON. Only `raw_text` and `file_format` are required. Every other field
//! defaults to empty, because a sparsely populated document is data to be
//! scored, not an error.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::errors::AppError;

/// File formats the upstream parsers can produce text from.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum FileFormat {
    Pdf,
    Docx,
    Doc,
    Txt,
    Rtf,
}

impl FileFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            FileFormat::Pdf => "pdf",
            FileFormat::Docx => "docx",
            FileFormat::Doc => "doc",
            FileFormat::Txt => "txt",
            FileFormat::Rtf => "rtf",
        }
    }
}

/// One detected section: name as found in the document (not yet normalized)
/// plus its raw body text. Order reflects document order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Section {
    pub name: String,
    #[serde(default)]
    pub text: String,
}

/// Contact details as far as the parser could recover them. Empty strings
/// count as absent.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ContactBlock {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub links: Vec<String>,
}

impl ContactBlock {
    fn filled(value: &Option<String>) -> bool {
        value.as_deref().is_some_and(|v| !v.trim().is_empty())
    }

    pub fn has_name(&self) -> bool {
        Self::filled(&self.name)
    }

    pub fn has_email(&self) -> bool {
        Self::filled(&self.email)
    }

    pub fn has_phone(&self) -> bool {
        Self::filled(&self.phone)
    }

    pub fn has_location(&self) -> bool {
        Self::filled(&self.location)
    }

    pub fn has_links(&self) -> bool {
        self.links.iter().any(|l| !l.trim().is_empty())
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SkillKind {
    Technical,
    Soft,
}

/// A raw skill token. `kind` is optional: untagged tokens are classified by
/// the keyword scorer against the dictionaries.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkillToken {
    pub token: String,
    #[serde(default)]
    pub kind: Option<SkillKind>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExperienceEntry {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub organization: String,
    /// Free-text date as extracted ("Jan 2020", "01/2020", "2020", ...).
    #[serde(default)]
    pub start_date: String,
    /// Free-text date, or an ongoing marker such as "present".
    #[serde(default)]
    pub end_date: String,
    #[serde(default)]
    pub bullet_points: Vec<String>,
}

impl ExperienceEntry {
    pub fn start(&self) -> Option<NaiveDate> {
        parse_flexible_date(&self.start_date)
    }

    pub fn is_ongoing(&self) -> bool {
        ONGOING_TOKENS.contains(&self.end_date.trim().to_lowercase().as_str())
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EducationEntry {
    #[serde(default)]
    pub degree: String,
    #[serde(default)]
    pub institution: String,
    #[serde(default)]
    pub date: String,
}

/// Layout signals the parser may flag. All default to false when the parser
/// cannot tell.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct LayoutMarkers {
    #[serde(default)]
    pub images: bool,
    #[serde(default)]
    pub tables: bool,
    #[serde(default)]
    pub multi_column: bool,
    #[serde(default)]
    pub non_standard_font: bool,
}

/// The engine's sole input. Immutable once constructed; word count is always
/// derived from `raw_text`, never deserialized from upstream.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StructuredDocument {
    #[serde(default)]
    pub sections: Vec<Section>,
    #[serde(default)]
    pub contact: ContactBlock,
    #[serde(default)]
    pub skills: Vec<SkillToken>,
    #[serde(default)]
    pub experience: Vec<ExperienceEntry>,
    #[serde(default)]
    pub education: Vec<EducationEntry>,
    pub raw_text: String,
    pub file_format: FileFormat,
    #[serde(default)]
    pub markers: LayoutMarkers,
}

impl StructuredDocument {
    /// Deserializes a document, mapping any structural defect (missing
    /// required field, unknown format token, broken JSON) to
    /// `MalformedInput`. An empty-but-present field is not a defect.
    pub fn from_json(json: &str) -> Result<Self, AppError> {
        serde_json::from_str(json).map_err(|e| AppError::MalformedInput(e.to_string()))
    }

    pub fn word_count(&self) -> usize {
        self.raw_text.split_whitespace().count()
    }

    /// All bullet points across all experience entries, in document order.
    pub fn bullet_points(&self) -> impl Iterator<Item = &str> {
        self.experience
            .iter()
            .flat_map(|e| e.bullet_points.iter())
            .map(String::as_str)
    }
}

const ONGOING_TOKENS: &[&str] = &["present", "current", "ongoing", "now"];

const PADDED_DATE_FORMATS: &[&str] = &["%d %b %Y", "%d %B %Y", "%d %m/%Y", "%d %m-%Y", "%d %Y-%m"];

/// Parses the date shapes resume parsers commonly emit: "Jan 2020",
/// "January 2020", "01/2020", "01-2020", "2020-01", "2020". Unparseable
/// input yields None; chronology checks simply skip such entries.
pub fn parse_flexible_date(raw: &str) -> Option<NaiveDate> {
    let s = raw.trim();
    if s.is_empty() {
        return None;
    }
    if let Ok(year) = s.parse::<i32>() {
        if (1900..=2100).contains(&year) {
            return NaiveDate::from_ymd_opt(year, 1, 1);
        }
        return None;
    }
    // Month-granularity formats get a synthetic day so chrono can parse them.
    let padded = format!("1 {s}");
    PADDED_DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(&padded, fmt).ok())
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_month_name_dates() {
        assert_eq!(
            parse_flexible_date("Jan 2020"),
            NaiveDate::from_ymd_opt(2020, 1, 1)
        );
        assert_eq!(
            parse_flexible_date("September 2018"),
            NaiveDate::from_ymd_opt(2018, 9, 1)
        );
    }

    #[test]
    fn test_parses_numeric_dates() {
        assert_eq!(
            parse_flexible_date("03/2021"),
            NaiveDate::from_ymd_opt(2021, 3, 1)
        );
        assert_eq!(
            parse_flexible_date("03-2021"),
            NaiveDate::from_ymd_opt(2021, 3, 1)
        );
        assert_eq!(
            parse_flexible_date("2021-03"),
            NaiveDate::from_ymd_opt(2021, 3, 1)
        );
    }

    #[test]
    fn test_parses_bare_year_as_january() {
        assert_eq!(
            parse_flexible_date("2019"),
            NaiveDate::from_ymd_opt(2019, 1, 1)
        );
    }

    #[test]
    fn test_rejects_garbage_dates() {
        assert_eq!(parse_flexible_date(""), None);
        assert_eq!(parse_flexible_date("sometime"), None);
        assert_eq!(parse_flexible_date("13/13/13"), None);
    }

    #[test]
    fn test_ongoing_markers_are_recognized() {
        let mut entry = ExperienceEntry {
            end_date: "Present".into(),
            ..Default::default()
        };
        assert!(entry.is_ongoing());
        entry.end_date = "Jun 2022".into();
        assert!(!entry.is_ongoing());
    }

    #[test]
    fn test_word_count_is_derived_from_raw_text() {
        let doc = StructuredDocument::from_json(
            r#"{"raw_text": "one  two\nthree", "file_format": "pdf"}"#,
        )
        .unwrap();
        assert_eq!(doc.word_count(), 3);
    }

    #[test]
    fn test_missing_raw_text_is_malformed_input() {
        let err = StructuredDocument::from_json(r#"{"file_format": "pdf"}"#).unwrap_err();
        assert!(matches!(err, AppError::MalformedInput(_)));
    }

    #[test]
    fn test_unknown_file_format_is_malformed_input() {
        let err =
            StructuredDocument::from_json(r#"{"raw_text": "x", "file_format": "odt"}"#).unwrap_err();
        assert!(matches!(err, AppError::MalformedInput(_)));
    }

    #[test]
    fn test_optional_collections_default_to_empty() {
        let doc =
            StructuredDocument::from_json(r#"{"raw_text": "x", "file_format": "txt"}"#).unwrap();
        assert!(doc.sections.is_empty());
        assert!(doc.experience.is_empty());
        assert!(!doc.contact.has_email());
    }

    #[test]
    fn test_blank_contact_fields_count_as_absent() {
        let contact = ContactBlock {
            email: Some("   ".into()),
            links: vec!["".into()],
            ..Default::default()
        };
        assert!(!contact.has_email());
        assert!(!contact.has_links());
    }
}
