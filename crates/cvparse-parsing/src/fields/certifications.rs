use once_cell::sync::Lazy;
use regex::Regex;

use cvparse_core::CertificationEntry;

use crate::section::find_section;

const CERTIFICATION_SECTIONS: &[&str] =
    &["certifications", "certificates", "licenses", "professional certifications"];

const MIN_CERT_LINE_CHARS: usize = 5;

/// A line that is nothing but bullet or numbering characters.
static BULLET_ONLY_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[•·\-*\d.]+\s*$").unwrap());

static CERT_YEAR_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b(?:19|20)\d{2}\b").unwrap());

/// Multi-word capitalized run, taken as the issuing organization.
static ORGANIZATION_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b([A-Z][A-Za-z]*(?:\s+[A-Z][A-Za-z]*)+)\b").unwrap());

/// Certification entries, one per non-trivial line of the section.
/// Year and organization are best-effort pulls from the line text.
pub fn extract_certifications(text: &str) -> Vec<CertificationEntry> {
    let Some(section) = find_section(text, CERTIFICATION_SECTIONS) else {
        return Vec::new();
    };

    let mut entries = Vec::new();
    for line in section.lines() {
        let line = line.trim();
        if line.chars().count() < MIN_CERT_LINE_CHARS {
            continue;
        }
        if BULLET_ONLY_RE.is_match(line) {
            continue;
        }
        let year = CERT_YEAR_RE
            .find(line)
            .map(|m| m.as_str().to_string())
            .unwrap_or_default();
        let organization = ORGANIZATION_RE
            .find(line)
            .map(|m| m.as_str().to_string())
            .unwrap_or_default();
        entries.push(CertificationEntry::new(line, &organization, &year));
    }
    entries
}
