//! Extraction orchestrator.
//!
//! Dispatches a document to the right backend by extension, runs the
//! transcript through the field parsers, and hands back one
//! [`ExtractionResult`]. All policy lives here; the backends only know
//! how to turn bytes into text.

pub mod pdf;

use std::path::Path;

use cvparse_core::config_file::ToolConfig;
use cvparse_core::{ExtractError, ExtractionMethod, ExtractionResult};

pub use pdf::{extract_pdf, extract_pdf_with};

/// Extract text and structured fields from a CV document.
///
/// Supported extensions are `pdf`, `doc` and `docx`, matched
/// case-insensitively; anything else is rejected up front without
/// touching the file.
pub fn extract(path: &Path, config: &ToolConfig) -> Result<ExtractionResult, ExtractError> {
    let extension = path
        .extension()
        .map(|e| e.to_string_lossy().to_lowercase())
        .unwrap_or_default();

    let (full_text, extraction_method) = match extension.as_str() {
        "pdf" => pdf::extract_pdf(path, config)?,
        "docx" => (cvparse_docx::read_docx(path)?, ExtractionMethod::Docx),
        "doc" => cvparse_docx::extract_doc(path, config)?,
        _ => return Err(ExtractError::UnsupportedFormat { extension }),
    };

    tracing::info!(
        method = %extraction_method,
        chars = full_text.chars().count(),
        "document extracted"
    );

    let parsed_fields = cvparse_parsing::parse_cv(&full_text);
    Ok(ExtractionResult {
        full_text,
        parsed_fields,
        extraction_method,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unsupported_extension_is_rejected() {
        let err = extract(Path::new("cv.txt"), &ToolConfig::default()).unwrap_err();
        assert!(matches!(
            err,
            ExtractError::UnsupportedFormat { ref extension } if extension == "txt"
        ));
    }

    #[test]
    fn missing_extension_is_rejected() {
        let err = extract(Path::new("cv"), &ToolConfig::default()).unwrap_err();
        assert!(matches!(err, ExtractError::UnsupportedFormat { .. }));
    }

    #[test]
    fn extension_match_is_case_insensitive() {
        // Not a real DOCX, so it must reach the DOCX backend and fail
        // there rather than being rejected as unsupported.
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cv.DOCX");
        std::fs::write(&path, b"nope").unwrap();
        let err = extract(&path, &ToolConfig::default()).unwrap_err();
        assert!(matches!(err, ExtractError::Extraction(_)));
    }
}
