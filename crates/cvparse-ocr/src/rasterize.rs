use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use std::process::Command;

use cvparse_core::backend::{OcrError, PageRasterizer};

/// Rasterize PDF pages with `pdftoppm` from poppler-utils.
///
/// One PNG per page lands in the output directory with a shared prefix;
/// pdftoppm zero-pads the page counter, so a lexicographic sort restores
/// page order.
pub struct PdftoppmRasterizer {
    command: String,
}

impl PdftoppmRasterizer {
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
        }
    }
}

impl PageRasterizer for PdftoppmRasterizer {
    fn rasterize(&self, path: &Path, dpi: u32, out_dir: &Path) -> Result<Vec<PathBuf>, OcrError> {
        let prefix = out_dir.join("page");

        let output = Command::new(&self.command)
            .arg("-png")
            .arg("-r")
            .arg(dpi.to_string())
            .arg(path)
            .arg(&prefix)
            .output()
            .map_err(|e| OcrError::Rasterize(format!("failed to run `{}`: {e}", self.command)))?;

        if !output.status.success() {
            return Err(OcrError::Rasterize(format!(
                "`{}` failed: {}",
                self.command,
                String::from_utf8_lossy(&output.stderr).trim()
            )));
        }

        let mut pages: Vec<PathBuf> = std::fs::read_dir(out_dir)?
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .filter(|p| p.extension() == Some(OsStr::new("png")))
            .collect();
        pages.sort();

        if pages.is_empty() {
            return Err(OcrError::Rasterize(format!(
                "`{}` produced no page images",
                self.command
            )));
        }
        Ok(pages)
    }
}
