use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub mod backend;
pub mod config_file;
pub mod process;
pub mod text;

// Re-export for convenience
pub use backend::{
    BackendError, ConversionError, ConversionStrategy, Converted, OcrEngine, OcrEngineError,
    OcrError, PageRasterizer, TextLayerReader,
};
pub use config_file::{ConfigFile, ToolConfig, load_config, load_from_path};
pub use text::{alnum_count, truncate_chars};

/// Transcripts shorter than this indicate a bad or empty upload rather than
/// a pipeline failure; callers should reject the document instead of
/// treating it as a system error.
pub const MIN_USABLE_TEXT_LEN: usize = 50;

/// Which backend(s) produced the transcript.
///
/// The serialized labels are stable wire values matched on by downstream
/// storage and recommendation forwarding; do not rename them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExtractionMethod {
    #[serde(rename = "docx")]
    Docx,
    #[serde(rename = "antiword")]
    Antiword,
    #[serde(rename = "pdfminer")]
    TextLayer,
    #[serde(rename = "ocr")]
    Ocr,
    #[serde(rename = "pdfminer+ocr")]
    TextLayerOcr,
    #[serde(rename = "ocr_only")]
    OcrOnly,
}

impl ExtractionMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Docx => "docx",
            Self::Antiword => "antiword",
            Self::TextLayer => "pdfminer",
            Self::Ocr => "ocr",
            Self::TextLayerOcr => "pdfminer+ocr",
            Self::OcrOnly => "ocr_only",
        }
    }
}

impl fmt::Display for ExtractionMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Coarse language-skill classification inferred from keyword cues.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Proficiency {
    Native,
    Advanced,
    Intermediate,
    Basic,
}

impl fmt::Display for Proficiency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Native => "Native",
            Self::Advanced => "Advanced",
            Self::Intermediate => "Intermediate",
            Self::Basic => "Basic",
        };
        f.write_str(s)
    }
}

/// One education history entry. Fields may be empty when the source line
/// could not be split; construction enforces the per-field length caps.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct EducationEntry {
    pub degree: String,
    pub institution: String,
    pub year: String,
    pub description: String,
}

impl EducationEntry {
    pub fn new(degree: &str, institution: &str, year: &str, description: &str) -> Self {
        Self {
            degree: truncate_chars(degree, 200),
            institution: truncate_chars(institution, 200),
            year: truncate_chars(year, 100),
            description: truncate_chars(description, 300),
        }
    }
}

/// One work experience entry, same conventions as [`EducationEntry`].
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ExperienceEntry {
    pub title: String,
    pub company: String,
    pub duration: String,
    pub description: String,
}

impl ExperienceEntry {
    pub fn new(title: &str, company: &str, duration: &str, description: &str) -> Self {
        Self {
            title: truncate_chars(title, 200),
            company: truncate_chars(company, 200),
            duration: truncate_chars(duration, 100),
            description: truncate_chars(description, 500),
        }
    }
}

/// A spoken language with its inferred proficiency level.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LanguageEntry {
    pub language: String,
    pub proficiency: Proficiency,
}

/// A certification or license line from the transcript.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CertificationEntry {
    pub name: String,
    pub organization: String,
    pub year: String,
}

impl CertificationEntry {
    pub fn new(name: &str, organization: &str, year: &str) -> Self {
        Self {
            name: truncate_chars(name, 200),
            organization: truncate_chars(organization, 100),
            year: year.to_string(),
        }
    }
}

/// Structured candidate fields parsed from a transcript.
///
/// Every field is independently optional or empty: a parser that finds
/// nothing leaves its field at the default and never blocks the others.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ParsedCv {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub location: Option<String>,
    pub summary: Option<String>,
    pub skills: Vec<String>,
    pub education: Vec<EducationEntry>,
    pub experience: Vec<ExperienceEntry>,
    pub languages: Vec<LanguageEntry>,
    pub certifications: Vec<CertificationEntry>,
}

/// Result of extracting one document: the full plain-text transcript, the
/// parsed candidate fields, and which backend(s) produced the text.
///
/// Created once per extraction call and never mutated; the caller decides
/// what (if anything) to persist.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractionResult {
    pub full_text: String,
    pub parsed_fields: ParsedCv,
    pub extraction_method: ExtractionMethod,
}

impl ExtractionResult {
    /// Whether the transcript is long enough to be worth keeping.
    ///
    /// A `false` here is a validation outcome (bad or empty document), not
    /// an extraction failure.
    pub fn is_usable(&self) -> bool {
        self.full_text.chars().count() >= MIN_USABLE_TEXT_LEN
    }
}

/// Extraction-level failures. These abort the whole call; field-parsing
/// problems never surface here (each parser recovers locally).
#[derive(Error, Debug)]
pub enum ExtractError {
    /// File extension outside pdf|doc|docx.
    #[error("unsupported file format: .{extension}")]
    UnsupportedFormat { extension: String },

    /// A backend failed irrecoverably (corrupt container, unreadable file).
    #[error("extraction failed: {0}")]
    Extraction(#[from] BackendError),

    /// Every strategy in the DOC conversion chain failed.
    #[error("no DOC converter available (tried soffice, antiword)")]
    NoConverterAvailable,

    /// The PDF text layer and the OCR fallback both failed. Carries both
    /// causes so neither is lost from the chain.
    #[error("failed to extract PDF text: {text_layer}; OCR also failed: {ocr}")]
    PdfUnreadable {
        #[source]
        text_layer: BackendError,
        ocr: OcrError,
    },

    /// The OCR engine could not run at all and no text layer was usable.
    #[error("OCR failed: {0}")]
    Ocr(#[from] OcrError),
}
