use std::path::Path;

use cvparse_core::backend::{OcrEngine, OcrError, PageRasterizer};
use cvparse_core::config_file::ToolConfig;

use crate::engine::TesseractEngine;
use crate::preprocess::preprocess_page;
use crate::rasterize::PdftoppmRasterizer;

/// A page contributes to the transcript only when its recognized text is
/// longer than this after trimming. Shorter output is scanner noise.
const MIN_PAGE_TEXT_CHARS: usize = 10;

/// Full OCR pipeline: rasterize every page, clean each image up, run the
/// engine over them in page order, and join the page texts.
pub struct OcrPipeline {
    rasterizer: Box<dyn PageRasterizer>,
    engine: Box<dyn OcrEngine>,
    dpi: u32,
    preprocess: bool,
}

impl OcrPipeline {
    pub fn from_config(config: &ToolConfig) -> Self {
        Self {
            rasterizer: Box::new(PdftoppmRasterizer::new(config.pdftoppm_cmd.clone())),
            engine: Box::new(TesseractEngine::new(
                config.tesseract_cmd.clone(),
                config.ocr_language.clone(),
                config.ocr_psm,
            )),
            dpi: config.ocr_dpi,
            preprocess: true,
        }
    }

    pub fn new(rasterizer: Box<dyn PageRasterizer>, engine: Box<dyn OcrEngine>, dpi: u32) -> Self {
        Self {
            rasterizer,
            engine,
            dpi,
            preprocess: true,
        }
    }

    /// Skip image preprocessing. For tests with synthetic page files.
    pub fn without_preprocessing(mut self) -> Self {
        self.preprocess = false;
        self
    }

    /// OCR the whole document into one transcript, pages separated by a
    /// blank line. Pages below the length floor are dropped; an empty
    /// return means the document had no recognizable text at all.
    pub fn run(&self, path: &Path) -> Result<String, OcrError> {
        let work_dir = tempfile::tempdir()?;
        let pages = self.rasterizer.rasterize(path, self.dpi, work_dir.path())?;

        let mut page_texts: Vec<String> = Vec::new();
        for (index, page) in pages.iter().enumerate() {
            if self.preprocess {
                // A page that cannot be cleaned up is still worth
                // recognizing as-is.
                if let Err(err) = preprocess_page(page) {
                    tracing::warn!(page = index + 1, error = %err, "preprocessing failed, using raw image");
                }
            }

            let text = self.engine.recognize(page)?;
            let text = text.trim();
            tracing::debug!(page = index + 1, chars = text.chars().count(), "OCR page done");
            if text.chars().count() > MIN_PAGE_TEXT_CHARS {
                page_texts.push(text.to_string());
            }
        }

        Ok(page_texts.join("\n\n"))
    }
}
