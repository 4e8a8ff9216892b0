use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// On-disk TOML configuration structure.
/// All fields are optional so partial configs work (merge with defaults).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConfigFile {
    pub tools: Option<ToolsConfig>,
    pub ocr: Option<OcrSettings>,
}

/// External tool binaries. Overrides let deployments point at non-PATH
/// installs (e.g. a bundled LibreOffice).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ToolsConfig {
    pub soffice_cmd: Option<String>,
    pub antiword_cmd: Option<String>,
    pub pdftoppm_cmd: Option<String>,
    pub tesseract_cmd: Option<String>,
    pub convert_timeout_secs: Option<u64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OcrSettings {
    pub dpi: Option<u32>,
    pub language: Option<String>,
    pub psm: Option<u32>,
}

/// Platform config directory path: `<config_dir>/cvparse/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("cvparse").join("config.toml"))
}

/// Load config by cascading CWD `.cvparse.toml` over platform config.
/// CWD values override platform values.
pub fn load_config() -> ConfigFile {
    let platform = config_path().and_then(|p| load_from_path(&p));
    let cwd = load_from_path(&PathBuf::from(".cvparse.toml"));

    match (platform, cwd) {
        (None, None) => ConfigFile::default(),
        (Some(p), None) => p,
        (None, Some(c)) => c,
        (Some(p), Some(c)) => merge(p, c),
    }
}

/// Load a config from a specific path. Returns `None` if the file doesn't
/// exist or can't be parsed.
pub fn load_from_path(path: &PathBuf) -> Option<ConfigFile> {
    let content = std::fs::read_to_string(path).ok()?;
    toml::from_str(&content).ok()
}

/// Merge two configs: `overlay` values take precedence over `base`.
pub fn merge(base: ConfigFile, overlay: ConfigFile) -> ConfigFile {
    ConfigFile {
        tools: Some(ToolsConfig {
            soffice_cmd: overlay
                .tools
                .as_ref()
                .and_then(|t| t.soffice_cmd.clone())
                .or_else(|| base.tools.as_ref().and_then(|t| t.soffice_cmd.clone())),
            antiword_cmd: overlay
                .tools
                .as_ref()
                .and_then(|t| t.antiword_cmd.clone())
                .or_else(|| base.tools.as_ref().and_then(|t| t.antiword_cmd.clone())),
            pdftoppm_cmd: overlay
                .tools
                .as_ref()
                .and_then(|t| t.pdftoppm_cmd.clone())
                .or_else(|| base.tools.as_ref().and_then(|t| t.pdftoppm_cmd.clone())),
            tesseract_cmd: overlay
                .tools
                .as_ref()
                .and_then(|t| t.tesseract_cmd.clone())
                .or_else(|| base.tools.as_ref().and_then(|t| t.tesseract_cmd.clone())),
            convert_timeout_secs: overlay
                .tools
                .as_ref()
                .and_then(|t| t.convert_timeout_secs)
                .or_else(|| base.tools.as_ref().and_then(|t| t.convert_timeout_secs)),
        }),
        ocr: Some(OcrSettings {
            dpi: overlay
                .ocr
                .as_ref()
                .and_then(|o| o.dpi)
                .or_else(|| base.ocr.as_ref().and_then(|o| o.dpi)),
            language: overlay
                .ocr
                .as_ref()
                .and_then(|o| o.language.clone())
                .or_else(|| base.ocr.as_ref().and_then(|o| o.language.clone())),
            psm: overlay
                .ocr
                .as_ref()
                .and_then(|o| o.psm)
                .or_else(|| base.ocr.as_ref().and_then(|o| o.psm)),
        }),
    }
}

/// Resolved tool configuration, constructed once at startup and passed
/// into the backends. Algorithms never read the environment themselves.
#[derive(Debug, Clone)]
pub struct ToolConfig {
    pub soffice_cmd: String,
    pub antiword_cmd: String,
    pub pdftoppm_cmd: String,
    pub tesseract_cmd: String,
    /// Wall-clock bound on each external DOC converter invocation.
    pub convert_timeout: Duration,
    /// Rasterization resolution; 300 is the sweet spot for OCR accuracy.
    pub ocr_dpi: u32,
    /// Tesseract language pack.
    pub ocr_language: String,
    /// Tesseract page segmentation mode (3 = fully automatic, no OSD).
    pub ocr_psm: u32,
}

impl Default for ToolConfig {
    fn default() -> Self {
        Self {
            soffice_cmd: "soffice".into(),
            antiword_cmd: "antiword".into(),
            pdftoppm_cmd: "pdftoppm".into(),
            tesseract_cmd: "tesseract".into(),
            convert_timeout: Duration::from_secs(30),
            ocr_dpi: 300,
            ocr_language: "eng".into(),
            ocr_psm: 3,
        }
    }
}

impl ToolConfig {
    /// Apply an on-disk config over the built-in defaults.
    pub fn from_config_file(file: &ConfigFile) -> Self {
        let mut cfg = Self::default();
        if let Some(tools) = &file.tools {
            if let Some(v) = &tools.soffice_cmd {
                cfg.soffice_cmd = v.clone();
            }
            if let Some(v) = &tools.antiword_cmd {
                cfg.antiword_cmd = v.clone();
            }
            if let Some(v) = &tools.pdftoppm_cmd {
                cfg.pdftoppm_cmd = v.clone();
            }
            if let Some(v) = &tools.tesseract_cmd {
                cfg.tesseract_cmd = v.clone();
            }
            if let Some(v) = tools.convert_timeout_secs {
                cfg.convert_timeout = Duration::from_secs(v);
            }
        }
        if let Some(ocr) = &file.ocr {
            if let Some(v) = ocr.dpi {
                cfg.ocr_dpi = v;
            }
            if let Some(v) = &ocr.language {
                cfg.ocr_language = v.clone();
            }
            if let Some(v) = ocr.psm {
                cfg.ocr_psm = v;
            }
        }
        cfg
    }
}
