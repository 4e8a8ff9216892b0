use cvparse_core::text::truncate_chars;

use crate::section::find_section;

const SUMMARY_SECTIONS: &[&str] =
    &["summary", "profile", "objective", "about me", "professional summary"];

const MAX_SUMMARY_CHARS: usize = 500;

/// Professional summary, capped at 500 chars.
pub fn extract_summary(text: &str) -> Option<String> {
    find_section(text, SUMMARY_SECTIONS).map(|s| truncate_chars(&s, MAX_SUMMARY_CHARS))
}
