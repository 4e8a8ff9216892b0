use std::path::Path;

use mupdf::{Document, TextPageFlags};

use cvparse_core::BackendError;
use cvparse_core::backend::TextLayerReader;

/// MuPDF-based implementation of [`TextLayerReader`].
///
/// This crate is the sole AGPL island: it isolates the mupdf dependency
/// (which is AGPL-3.0) so that non-PDF code paths do not transitively
/// depend on it.
///
/// Nothing is filtered out positionally. CVs are single-column,
/// header-light documents, and the acceptance rule downstream only needs
/// an honest character count to decide whether the text layer is real.
#[derive(Debug, Default)]
pub struct MupdfTextLayer;

impl MupdfTextLayer {
    pub fn new() -> Self {
        Self
    }
}

impl TextLayerReader for MupdfTextLayer {
    fn extract(&self, path: &Path) -> Result<String, BackendError> {
        let path_str = path
            .to_str()
            .ok_or_else(|| BackendError::Open("invalid path encoding".into()))?;

        let document =
            Document::open(path_str).map_err(|e| BackendError::Open(e.to_string()))?;

        let mut pages_text = Vec::new();

        for page_result in document
            .pages()
            .map_err(|e| BackendError::Extraction(e.to_string()))?
        {
            let page = page_result.map_err(|e| BackendError::Extraction(e.to_string()))?;
            let text_page = page
                .to_text_page(TextPageFlags::empty())
                .map_err(|e| BackendError::Extraction(e.to_string()))?;

            let mut page_text = String::new();
            for block in text_page.blocks() {
                for line in block.lines() {
                    let line_text: String = line
                        .chars()
                        .map(|c| c.char().unwrap_or('\u{FFFD}'))
                        .collect();
                    page_text.push_str(&line_text);
                    page_text.push('\n');
                }
            }
            pages_text.push(page_text);
        }

        Ok(pages_text.join("\n").trim().to_string())
    }
}
