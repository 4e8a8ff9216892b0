//! Word document text extraction: native DOCX container reading plus an
//! external-converter chain for legacy binary DOC files.

pub mod container;
pub mod convert;

pub use container::read_docx;
pub use convert::{AntiwordText, SofficeConvert, extract_doc, extract_doc_with};
