//! Heuristic parsing of CV transcripts into structured fields.
//!
//! The input is whatever the extraction backends produced: clean
//! paragraph text from a DOCX, flattened PDF text, or noisy OCR output.
//! Every extractor therefore works in layers, trying well-formatted
//! patterns first and degrading to looser ones, and none of them can
//! fail: a field that cannot be found is simply absent.

pub mod fields;
pub mod section;

use cvparse_core::ParsedCv;

pub use section::find_section;

/// Parse a transcript into structured CV fields.
///
/// Purely heuristic and total: unrecognisable input yields an empty
/// [`ParsedCv`], never an error.
pub fn parse_cv(text: &str) -> ParsedCv {
    ParsedCv {
        name: fields::name::extract_name(text),
        email: fields::contact::extract_email(text),
        phone: fields::contact::extract_phone(text),
        location: fields::contact::extract_location(text),
        summary: fields::summary::extract_summary(text),
        skills: fields::skills::extract_skills(text),
        education: fields::entries::extract_education(text),
        experience: fields::entries::extract_experience(text),
        languages: fields::languages::extract_languages(text),
        certifications: fields::certifications::extract_certifications(text),
    }
}
