use std::path::Path;
use std::process::Command;

use cvparse_core::backend::{OcrEngine, OcrEngineError, OcrError};

/// Tesseract CLI invocation, one page image per call.
pub struct TesseractEngine {
    command: String,
    language: String,
    psm: u32,
}

impl TesseractEngine {
    pub fn new(command: impl Into<String>, language: impl Into<String>, psm: u32) -> Self {
        Self {
            command: command.into(),
            language: language.into(),
            psm,
        }
    }
}

impl OcrEngine for TesseractEngine {
    fn recognize(&self, image: &Path) -> Result<String, OcrError> {
        let output = Command::new(&self.command)
            .arg(image)
            .arg("stdout")
            .arg("-l")
            .arg(&self.language)
            .arg("--psm")
            .arg(self.psm.to_string())
            .output()
            .map_err(|e| OcrEngineError {
                command: self.command.clone(),
                message: e.to_string(),
            })?;

        // Tesseract exits nonzero for per-page problems while still
        // writing whatever it recognized; keep the stdout and let the
        // page-length rule decide whether it counts.
        if !output.status.success() {
            tracing::warn!(
                page = %image.display(),
                stderr = %String::from_utf8_lossy(&output.stderr).trim(),
                "tesseract reported errors on page"
            );
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}
