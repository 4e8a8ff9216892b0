use once_cell::sync::Lazy;
use regex::Regex;

/// Maximum section length (in chars) when no following header bounds it.
pub const SECTION_WINDOW: usize = 2000;

/// Headers that terminate a section when they appear after its start.
///
/// This list is deliberately broader than any one caller's synonym list so
/// that, say, a "Skills" section is cut off by an "Education" header even
/// though the skills parser never looks for "education" itself.
const OTHER_SECTIONS: &[&str] = &[
    "education",
    "experience",
    "work experience",
    "employment",
    "skills",
    "technical skills",
    "core competencies",
    "competencies",
    "certifications",
    "certificates",
    "certification",
    "language",
    "languages",
    "projects",
    "project",
    "references",
    "volunteer",
    "volunteering",
    "achievements",
    "achievement",
    "awards",
    "award",
    "soft skills",
    "hard skills",
    "technical",
    "professional",
    "summary",
    "profile",
    "objective",
    "contact",
    "personal information",
];

/// Locate a named section in the transcript.
///
/// For each synonym, three header shapes are tried in order:
/// 1. A heading on its own line ("\nEducation:" or "\nEducation\n"), any case.
/// 2. An all-caps header embedded in flattened or OCR text ("EDUCATION ").
/// 3. A Title Case header in otherwise jumbled text ("Education ").
///
/// The section runs from the end of the matched header to the next known
/// header (tried with the same three shapes), or at most [`SECTION_WINDOW`]
/// chars. Returns `None` when no synonym matches or the section is blank.
pub fn find_section(text: &str, synonyms: &[&str]) -> Option<String> {
    for keyword in synonyms {
        let Some(start) = section_start(text, keyword) else {
            continue;
        };
        let rest = &text[start..];
        let end = section_end(rest).unwrap_or_else(|| window_end(rest));
        let section = rest[..end].trim();
        if section.is_empty() {
            return None;
        }
        return Some(section.to_string());
    }
    None
}

fn section_start(text: &str, keyword: &str) -> Option<usize> {
    let escaped = regex::escape(keyword);

    let newline_re = Regex::new(&format!(r"(?i)\n\s*{escaped}\s*[:\n]")).unwrap();
    if let Some(m) = newline_re.find(text) {
        return Some(m.end());
    }

    // Case-sensitive on purpose: a SHOUTING header is a strong signal,
    // a lowercase "skills" mid-sentence is not.
    let upper = regex::escape(&keyword.to_uppercase());
    let upper_re = Regex::new(&format!(r"{upper}\s*[:\s]")).unwrap();
    if let Some(m) = upper_re.find(text) {
        return Some(m.end());
    }

    let title = regex::escape(&title_case(keyword));
    let title_re = Regex::new(&format!(r"\b{title}\s*[:\s]")).unwrap();
    title_re.find(text).map(|m| m.end())
}

fn section_end(rest: &str) -> Option<usize> {
    static END_NEWLINE_RE: Lazy<Regex> = Lazy::new(|| {
        let alts = alternation(OTHER_SECTIONS.iter().map(|k| regex::escape(k)));
        Regex::new(&format!(r"(?i)\n\s*(?:{alts})\s*[:\n]")).unwrap()
    });
    static END_UPPER_RE: Lazy<Regex> = Lazy::new(|| {
        let alts = alternation(OTHER_SECTIONS.iter().map(|k| regex::escape(&k.to_uppercase())));
        Regex::new(&format!(r"(?:{alts})\s*[:\s]")).unwrap()
    });
    static END_TITLE_RE: Lazy<Regex> = Lazy::new(|| {
        let alts = alternation(OTHER_SECTIONS.iter().map(|k| regex::escape(&title_case(k))));
        Regex::new(&format!(r"\b(?:{alts})\s*[:\s]")).unwrap()
    });

    END_NEWLINE_RE
        .find(rest)
        .or_else(|| END_UPPER_RE.find(rest))
        .or_else(|| END_TITLE_RE.find(rest))
        .map(|m| m.start())
}

fn window_end(rest: &str) -> usize {
    rest.char_indices()
        .nth(SECTION_WINDOW)
        .map(|(i, _)| i)
        .unwrap_or(rest.len())
}

fn alternation(parts: impl Iterator<Item = String>) -> String {
    parts.collect::<Vec<_>>().join("|")
}

/// "work experience" -> "Work Experience"
pub(crate) fn title_case(s: &str) -> String {
    s.split(' ')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(c) => c.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}
