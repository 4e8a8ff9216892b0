//! Decision-policy tests with fake backends: a good text layer must
//! never trigger OCR, a thin one must, and double failure surfaces both
//! causes.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use cvparse_core::backend::{
    BackendError, OcrEngine, OcrError, PageRasterizer, TextLayerReader,
};
use cvparse_core::{ExtractError, ExtractionMethod};
use cvparse_ingest::extract_pdf_with;
use cvparse_ocr::OcrPipeline;

struct FakeReader {
    result: Result<&'static str, &'static str>,
}

impl TextLayerReader for FakeReader {
    fn extract(&self, _path: &Path) -> Result<String, BackendError> {
        match self.result {
            Ok(text) => Ok(text.to_string()),
            Err(msg) => Err(BackendError::Open(msg.to_string())),
        }
    }
}

/// Writes one fake page file and counts invocations.
struct CountingRasterizer {
    calls: Arc<AtomicUsize>,
    fail: bool,
}

impl PageRasterizer for CountingRasterizer {
    fn rasterize(&self, _path: &Path, _dpi: u32, out_dir: &Path) -> Result<Vec<PathBuf>, OcrError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(OcrError::Rasterize("no pages".to_string()));
        }
        let page = out_dir.join("page-01.png");
        std::fs::write(&page, b"fake")?;
        Ok(vec![page])
    }
}

struct FakeEngine {
    text: &'static str,
}

impl OcrEngine for FakeEngine {
    fn recognize(&self, _image: &Path) -> Result<String, OcrError> {
        Ok(self.text.to_string())
    }
}

fn ocr_pipeline(text: &'static str, fail: bool) -> (OcrPipeline, Arc<AtomicUsize>) {
    let calls = Arc::new(AtomicUsize::new(0));
    let pipeline = OcrPipeline::new(
        Box::new(CountingRasterizer {
            calls: Arc::clone(&calls),
            fail,
        }),
        Box::new(FakeEngine { text }),
        300,
    )
    .without_preprocessing();
    (pipeline, calls)
}

const GOOD_TEXT: &str = "John Smith\nSoftware Engineer with plenty of experience";

#[test]
fn good_text_layer_never_invokes_ocr() {
    let reader = FakeReader {
        result: Ok(GOOD_TEXT),
    };
    let (ocr, calls) = ocr_pipeline("should never be seen", false);

    let (text, method) = extract_pdf_with(Path::new("cv.pdf"), &reader, &ocr).unwrap();
    assert_eq!(text, GOOD_TEXT);
    assert_eq!(method, ExtractionMethod::TextLayer);
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[test]
fn empty_text_layer_is_pure_ocr() {
    let reader = FakeReader { result: Ok("") };
    let (ocr, calls) = ocr_pipeline("recognized text from a scanned page", false);

    let (text, method) = extract_pdf_with(Path::new("cv.pdf"), &reader, &ocr).unwrap();
    assert_eq!(text, "recognized text from a scanned page");
    assert_eq!(method, ExtractionMethod::Ocr);
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[test]
fn thin_text_layer_prefers_richer_ocr_text() {
    // Short but non-empty direct text; OCR output is longer and wins.
    let reader = FakeReader { result: Ok("Jn Sm") };
    let (ocr, _) = ocr_pipeline("John Smith full transcript recovered by the OCR engine", false);

    let (text, method) = extract_pdf_with(Path::new("cv.pdf"), &reader, &ocr).unwrap();
    assert_eq!(text, "John Smith full transcript recovered by the OCR engine");
    assert_eq!(method, ExtractionMethod::TextLayerOcr);
}

#[test]
fn thin_text_layer_with_thinner_ocr_keeps_both() {
    // Direct text fails the length rule but is still longer than what
    // OCR recovers, so the two are concatenated.
    let reader = FakeReader {
        result: Ok("Jn Sm fragment txt"),
    };
    let (ocr, _) = ocr_pipeline("ocr snippet x", false);

    let (text, method) = extract_pdf_with(Path::new("cv.pdf"), &reader, &ocr).unwrap();
    assert_eq!(method, ExtractionMethod::TextLayerOcr);
    assert_eq!(text, "Jn Sm fragment txt\nocr snippet x");
}

#[test]
fn garbage_text_layer_fails_the_alnum_rule() {
    // Plenty of characters, almost none alphanumeric.
    let reader = FakeReader {
        result: Ok("...___...___...___...___...a"),
    };
    let (ocr, calls) = ocr_pipeline("real recognized transcript text", false);

    let (_, method) = extract_pdf_with(Path::new("cv.pdf"), &reader, &ocr).unwrap();
    assert_eq!(method, ExtractionMethod::TextLayerOcr);
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[test]
fn unreadable_text_layer_with_working_ocr_is_ocr_only() {
    let reader = FakeReader {
        result: Err("encrypted document"),
    };
    let (ocr, _) = ocr_pipeline("text recovered from page images", false);

    let (text, method) = extract_pdf_with(Path::new("cv.pdf"), &reader, &ocr).unwrap();
    assert_eq!(text, "text recovered from page images");
    assert_eq!(method, ExtractionMethod::OcrOnly);
}

#[test]
fn double_failure_reports_both_causes() {
    let reader = FakeReader {
        result: Err("encrypted document"),
    };
    let (ocr, _) = ocr_pipeline("", true);

    let err = extract_pdf_with(Path::new("cv.pdf"), &reader, &ocr).unwrap_err();
    match err {
        ExtractError::PdfUnreadable { text_layer, ocr } => {
            assert!(text_layer.to_string().contains("encrypted document"));
            assert!(ocr.to_string().contains("no pages"));
        }
        other => panic!("expected PdfUnreadable, got {other:?}"),
    }
}

#[test]
fn ocr_failure_after_thin_text_layer_propagates() {
    let reader = FakeReader { result: Ok("thin") };
    let (ocr, _) = ocr_pipeline("", true);

    let err = extract_pdf_with(Path::new("cv.pdf"), &reader, &ocr).unwrap_err();
    assert!(matches!(err, ExtractError::Ocr(_)));
}
