//! Legacy `.doc` conversion.
//!
//! Binary Word documents are handed to external converters in a fixed
//! order: LibreOffice headless (best fidelity, produces a DOCX we then
//! read ourselves), then antiword (plain text straight from stdout).
//! Each strategy failure is logged and the chain moves on; when every
//! strategy fails the caller reports no converter available.

use std::path::{Path, PathBuf};
use std::process::Command;
use std::time::Duration;

use cvparse_core::backend::{ConversionError, ConversionStrategy, Converted};
use cvparse_core::config_file::ToolConfig;
use cvparse_core::process::{ProcessError, run_with_timeout};
use cvparse_core::{ExtractError, ExtractionMethod};

use crate::container::read_docx;

/// LibreOffice headless conversion to DOCX.
pub struct SofficeConvert {
    command: String,
    timeout: Duration,
}

impl SofficeConvert {
    pub fn new(command: impl Into<String>, timeout: Duration) -> Self {
        Self {
            command: command.into(),
            timeout,
        }
    }
}

impl ConversionStrategy for SofficeConvert {
    fn name(&self) -> &'static str {
        "soffice"
    }

    fn convert(&self, input: &Path, work_dir: &Path) -> Result<Converted, ConversionError> {
        let mut cmd = Command::new(&self.command);
        cmd.arg("--headless")
            .arg("--convert-to")
            .arg("docx")
            .arg("--outdir")
            .arg(work_dir)
            .arg(input);

        let output = run_with_timeout(cmd, self.timeout)
            .map_err(|e| conversion_error(self.name(), self.timeout, e))?;
        if !output.status.success() {
            return Err(ConversionError::Failed {
                tool: self.name().to_string(),
                message: output.stderr_lossy().trim().to_string(),
            });
        }

        // soffice names the output after the input; scan rather than
        // guess, its stem mangling differs across versions.
        find_docx_in(work_dir)
            .map(Converted::DocxFile)
            .ok_or_else(|| ConversionError::Failed {
                tool: self.name().to_string(),
                message: "no DOCX produced".to_string(),
            })
    }
}

fn find_docx_in(dir: &Path) -> Option<PathBuf> {
    let entries = std::fs::read_dir(dir).ok()?;
    for entry in entries.flatten() {
        let path = entry.path();
        if path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("docx"))
        {
            return Some(path);
        }
    }
    None
}

/// antiword plain-text conversion.
pub struct AntiwordText {
    command: String,
    timeout: Duration,
}

impl AntiwordText {
    pub fn new(command: impl Into<String>, timeout: Duration) -> Self {
        Self {
            command: command.into(),
            timeout,
        }
    }
}

impl ConversionStrategy for AntiwordText {
    fn name(&self) -> &'static str {
        "antiword"
    }

    fn convert(&self, input: &Path, _work_dir: &Path) -> Result<Converted, ConversionError> {
        let mut cmd = Command::new(&self.command);
        cmd.arg(input);

        let output = run_with_timeout(cmd, self.timeout)
            .map_err(|e| conversion_error(self.name(), self.timeout, e))?;
        if !output.status.success() {
            return Err(ConversionError::Failed {
                tool: self.name().to_string(),
                message: output.stderr_lossy().trim().to_string(),
            });
        }
        Ok(Converted::PlainText(
            output.stdout_lossy().trim().to_string(),
        ))
    }
}

fn conversion_error(tool: &str, timeout: Duration, err: ProcessError) -> ConversionError {
    if err.is_not_found() {
        return ConversionError::Unavailable {
            tool: tool.to_string(),
            message: err.to_string(),
        };
    }
    match err {
        ProcessError::TimedOut { .. } => ConversionError::TimedOut {
            tool: tool.to_string(),
            timeout,
        },
        other => ConversionError::Failed {
            tool: tool.to_string(),
            message: other.to_string(),
        },
    }
}

/// Extract text from a legacy `.doc` file via the configured converter
/// chain. Returns the transcript together with the method that produced
/// it: `Docx` when the file went through a DOCX intermediate, `Antiword`
/// when antiword answered directly.
pub fn extract_doc(
    path: &Path,
    config: &ToolConfig,
) -> Result<(String, ExtractionMethod), ExtractError> {
    let strategies: Vec<Box<dyn ConversionStrategy>> = vec![
        Box::new(SofficeConvert::new(
            config.soffice_cmd.clone(),
            config.convert_timeout,
        )),
        Box::new(AntiwordText::new(
            config.antiword_cmd.clone(),
            config.convert_timeout,
        )),
    ];
    extract_doc_with(path, &strategies)
}

/// Converter-chain core, separated so tests can inject fake strategies.
pub fn extract_doc_with(
    path: &Path,
    strategies: &[Box<dyn ConversionStrategy>],
) -> Result<(String, ExtractionMethod), ExtractError> {
    let work_dir = tempfile::tempdir().map_err(cvparse_core::BackendError::from)?;

    for strategy in strategies {
        match strategy.convert(path, work_dir.path()) {
            Ok(Converted::DocxFile(docx_path)) => {
                // The converter ran; a bad intermediate is a real
                // extraction error, not a reason to try the next tool.
                let text = read_docx(&docx_path)?;
                return Ok((text, ExtractionMethod::Docx));
            }
            Ok(Converted::PlainText(text)) => {
                return Ok((text, ExtractionMethod::Antiword));
            }
            Err(err) => {
                tracing::debug!(strategy = strategy.name(), error = %err, "DOC converter failed, trying next");
            }
        }
    }

    Err(ExtractError::NoConverterAvailable)
}
