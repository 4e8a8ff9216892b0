use std::path::{Path, PathBuf};
use std::time::Duration;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum BackendError {
    #[error("failed to open document: {0}")]
    Open(String),
    #[error("failed to extract text: {0}")]
    Extraction(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// The OCR engine binary is missing or misconfigured. This is the terminal
/// cause when the decision policy had to fall back to OCR and could not.
#[derive(Error, Debug)]
#[error("OCR engine `{command}` could not be invoked: {message}")]
pub struct OcrEngineError {
    pub command: String,
    pub message: String,
}

#[derive(Error, Debug)]
pub enum OcrError {
    #[error(transparent)]
    Engine(#[from] OcrEngineError),
    #[error("page rasterization failed: {0}")]
    Rasterize(String),
    #[error("page preprocessing failed: {0}")]
    Preprocess(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Trait for direct PDF text-layer extraction backends.
///
/// Implementors return the concatenated text of all pages,
/// whitespace-trimmed. The decision policy in the orchestrator decides
/// whether that text is usable or OCR is needed.
pub trait TextLayerReader: Send + Sync {
    fn extract(&self, path: &Path) -> Result<String, BackendError>;
}

/// Trait for rendering PDF pages to raster image files.
///
/// Returned paths must be in page order; the OCR pipeline relies on that
/// order for deterministic output.
pub trait PageRasterizer: Send + Sync {
    fn rasterize(&self, path: &Path, dpi: u32, out_dir: &Path) -> Result<Vec<PathBuf>, OcrError>;
}

/// Trait for recognizing text in a single page image.
pub trait OcrEngine: Send + Sync {
    fn recognize(&self, image: &Path) -> Result<String, OcrError>;
}

/// Output of one DOC conversion strategy.
#[derive(Debug)]
pub enum Converted {
    /// A DOCX file was produced; the caller feeds it to the DOCX backend.
    DocxFile(PathBuf),
    /// Plain text was produced directly (e.g. antiword stdout).
    PlainText(String),
}

#[derive(Error, Debug)]
pub enum ConversionError {
    #[error("converter `{tool}` is not available: {message}")]
    Unavailable { tool: String, message: String },
    #[error("converter `{tool}` timed out after {timeout:?}")]
    TimedOut { tool: String, timeout: Duration },
    #[error("converter `{tool}` failed: {message}")]
    Failed { tool: String, message: String },
}

/// One strategy in the ordered legacy-DOC conversion chain.
///
/// Strategies are tried in sequence, first success wins; a failure of any
/// kind moves the chain to the next strategy. `work_dir` is a scoped temp
/// directory owned by the caller; strategies must write intermediate
/// files only there so cleanup is guaranteed on every exit path.
pub trait ConversionStrategy: Send + Sync {
    fn name(&self) -> &'static str;
    fn convert(&self, input: &Path, work_dir: &Path) -> Result<Converted, ConversionError>;
}
