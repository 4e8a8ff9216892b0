//! OCR fallback for scanned PDFs.
//!
//! Rasterization and recognition both shell out to the standard poppler
//! and tesseract binaries rather than linking engine libraries; the
//! binaries are configurable, and a missing one surfaces as a typed
//! error instead of a crash.

pub mod engine;
pub mod pipeline;
pub mod preprocess;
pub mod rasterize;

pub use engine::TesseractEngine;
pub use pipeline::OcrPipeline;
pub use rasterize::PdftoppmRasterizer;
