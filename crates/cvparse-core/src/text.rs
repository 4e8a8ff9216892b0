/// Truncate a string to at most `max` characters (not bytes), so OCR text
/// containing multi-byte characters never splits a codepoint.
pub fn truncate_chars(s: &str, max: usize) -> String {
    match s.char_indices().nth(max) {
        Some((idx, _)) => s[..idx].to_string(),
        None => s.to_string(),
    }
}

/// Count alphanumeric characters. Used by the PDF acceptance rule to tell a
/// real text layer from ligature soup and whitespace padding.
pub fn alnum_count(s: &str) -> usize {
    s.chars().filter(|c| c.is_alphanumeric()).count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncate_is_char_boundary_safe() {
        assert_eq!(truncate_chars("héllo wörld", 5), "héllo");
        assert_eq!(truncate_chars("short", 100), "short");
        assert_eq!(truncate_chars("", 10), "");
    }

    #[test]
    fn alnum_counts_unicode() {
        assert_eq!(alnum_count("ab1 !?"), 3);
        assert_eq!(alnum_count("   \n\t"), 0);
        assert_eq!(alnum_count("résumé"), 6);
    }
}
