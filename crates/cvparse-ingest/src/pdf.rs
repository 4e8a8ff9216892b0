//! The PDF text-vs-OCR decision policy.
//!
//! Born-digital PDFs have a usable text layer and never touch OCR.
//! Scanned PDFs have an empty or garbage text layer; those pages go
//! through rasterization and recognition, and whatever direct text did
//! exist is kept alongside the OCR output rather than thrown away.

use std::path::Path;

use cvparse_core::backend::TextLayerReader;
use cvparse_core::text::alnum_count;
use cvparse_core::{ExtractError, ExtractionMethod};
use cvparse_core::config_file::ToolConfig;
use cvparse_ocr::OcrPipeline;
use cvparse_pdf_mupdf::MupdfTextLayer;

/// Acceptance rule for the direct text layer: at least this many chars...
const MIN_TEXT_CHARS: usize = 20;
/// ...of which at least this many alphanumeric. Filters out PDFs whose
/// "text layer" is ligature soup or whitespace padding.
const MIN_ALNUM_CHARS: usize = 15;

pub fn extract_pdf(
    path: &Path,
    config: &ToolConfig,
) -> Result<(String, ExtractionMethod), ExtractError> {
    let reader = MupdfTextLayer::new();
    let ocr = OcrPipeline::from_config(config);
    extract_pdf_with(path, &reader, &ocr)
}

/// Policy core, generic over the backends so tests can fake them.
pub fn extract_pdf_with(
    path: &Path,
    reader: &dyn TextLayerReader,
    ocr: &OcrPipeline,
) -> Result<(String, ExtractionMethod), ExtractError> {
    match reader.extract(path) {
        Ok(direct) => {
            let direct = direct.trim().to_string();
            if direct.chars().count() >= MIN_TEXT_CHARS && alnum_count(&direct) >= MIN_ALNUM_CHARS
            {
                tracing::debug!(chars = direct.chars().count(), "text layer accepted");
                return Ok((direct, ExtractionMethod::TextLayer));
            }

            tracing::debug!(
                chars = direct.chars().count(),
                "text layer too thin, falling back to OCR"
            );
            let recognized = ocr.run(path)?;
            let recognized = recognized.trim();

            if direct.is_empty() {
                return Ok((recognized.to_string(), ExtractionMethod::Ocr));
            }
            // Both produced something: prefer the OCR text when it is
            // clearly richer, otherwise keep both.
            let merged = if recognized.chars().count() > direct.chars().count() {
                recognized.to_string()
            } else {
                format!("{direct}\n{recognized}").trim().to_string()
            };
            Ok((merged, ExtractionMethod::TextLayerOcr))
        }
        Err(text_layer_err) => {
            tracing::warn!(error = %text_layer_err, "text layer unreadable, OCR is the only option");
            match ocr.run(path) {
                Ok(recognized) => Ok((
                    recognized.trim().to_string(),
                    ExtractionMethod::OcrOnly,
                )),
                Err(ocr_err) => Err(ExtractError::PdfUnreadable {
                    text_layer: text_layer_err,
                    ocr: ocr_err,
                }),
            }
        }
    }
}
