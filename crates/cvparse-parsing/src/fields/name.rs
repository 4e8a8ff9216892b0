use once_cell::sync::Lazy;
use regex::Regex;

/// Lines containing these are contact rows or headers, never a name.
const NON_NAME_KEYWORDS: &[&str] = &["email", "phone", "address", "linkedin", "profile", "skill"];

/// Capitalized phrases near the top of a CV that look like names but are
/// section headers or job titles.
const HEADER_PHRASES: &[&str] = &[
    "profile",
    "summary",
    "objective",
    "skills",
    "education",
    "experience",
    "technical",
    "professional",
    "work",
    "employment",
    "university",
    "college",
    "data science",
    "software engineer",
    "royal university",
];

static LABELED_NAME_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i:name|full name|candidate):\s*([A-Z][a-z]+(?:\s+[A-Z][a-z]+){1,3})").unwrap()
});

static CAPITALIZED_RUN_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b([A-Z][a-z]+(?:\s+[A-Z][a-z]+){1,3})\b").unwrap());

/// Candidate name, tried three ways in decreasing confidence:
/// an explicit "Name:" label, a short capitalized line among the first
/// few lines, then any capitalized run in the first 200 chars that is
/// not a known header phrase (preferring text before the email address).
pub fn extract_name(text: &str) -> Option<String> {
    labeled_name(text)
        .or_else(|| early_line_name(text))
        .or_else(|| leading_capitalized_run(text))
}

fn labeled_name(text: &str) -> Option<String> {
    let caps = LABELED_NAME_RE.captures(text)?;
    let name = caps.get(1)?.as_str();
    let words = name.split_whitespace().count();
    if (2..=4).contains(&words) {
        Some(name.to_string())
    } else {
        None
    }
}

fn early_line_name(text: &str) -> Option<String> {
    for line in text
        .trim()
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .take(5)
    {
        if line.chars().count() >= 50 {
            continue;
        }
        let lower = line.to_lowercase();
        if NON_NAME_KEYWORDS.iter().any(|kw| lower.contains(kw)) {
            continue;
        }
        let words: Vec<&str> = line.split_whitespace().collect();
        if !(2..=4).contains(&words.len()) {
            continue;
        }
        let capitalized = words.iter().all(|w| match w.chars().next() {
            Some(c) if c.is_alphabetic() => c.is_uppercase(),
            _ => true,
        });
        if capitalized {
            return Some(line.to_string());
        }
    }
    None
}

fn leading_capitalized_run(text: &str) -> Option<String> {
    let head_end = text
        .char_indices()
        .nth(200)
        .map(|(i, _)| i)
        .unwrap_or(text.len());
    let head = &text[..head_end];
    let email_pos = head.find('@');

    for m in CAPITALIZED_RUN_RE.find_iter(head) {
        let candidate = m.as_str();
        let lower = candidate.to_lowercase();
        if HEADER_PHRASES.iter().any(|p| lower.contains(p)) {
            continue;
        }
        // A name almost always precedes the email address on the page.
        if let Some(pos) = email_pos {
            if m.start() >= pos {
                continue;
            }
        }
        return Some(candidate.to_string());
    }
    None
}
