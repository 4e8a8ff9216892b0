use std::collections::HashSet;

use once_cell::sync::Lazy;
use regex::Regex;

use cvparse_core::{EducationEntry, ExperienceEntry};

use crate::section::find_section;

const EDUCATION_SECTIONS: &[&str] = &["education", "academic background", "qualifications"];

const EXPERIENCE_SECTIONS: &[&str] = &[
    "experience",
    "work experience",
    "employment history",
    "professional experience",
    "volunteer experience",
];

/// An education entry must mention one of these to count.
const DEGREE_KEYWORDS: &[&str] = &[
    "bachelor",
    "master",
    "phd",
    "degree",
    "diploma",
    "university",
    "college",
    "high school",
];

/// An experience entry without a year must mention a role keyword.
const ROLE_KEYWORDS: &[&str] =
    &["intern", "manager", "engineer", "developer", "coordinator", "analyst"];

const MIN_EDUCATION_ENTRY_CHARS: usize = 10;
const MIN_EXPERIENCE_ENTRY_CHARS: usize = 20;

static BLANK_LINE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n\s*\n").unwrap());

static LEADING_BULLET_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[\d.)*•·\s-]+").unwrap());

static YEAR_RANGE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\b(\d{4}\s*[-\u{2013}\u{2014}]\s*(?:\d{4}|present|current))\b").unwrap());

static LONE_YEAR_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b\d{4}\b").unwrap());

static EXPERIENCE_YEAR_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b(?:20\d{2}|19\d{2}|current|present)\b").unwrap());

static AT_SEPARATOR_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)\s+at\s+").unwrap());

static DASH_SEPARATOR_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s+[-\u{2013}\u{2014}]\s+").unwrap());

static DEGREE_PHRASE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)(?:bachelor|master|phd|doctorate|diploma|degree|associate|certificate)[\s\w-]+")
        .unwrap()
});

/// Education entries: the education section split on blank lines, each
/// block requiring a degree keyword, then parsed into degree /
/// institution / year.
pub fn extract_education(text: &str) -> Vec<EducationEntry> {
    let Some(section) = find_section(text, EDUCATION_SECTIONS) else {
        return Vec::new();
    };

    let mut seen = HashSet::new();
    let mut entries = Vec::new();
    for block in BLANK_LINE_RE.split(&section) {
        let block = block.trim();
        if block.chars().count() < MIN_EDUCATION_ENTRY_CHARS {
            continue;
        }
        let lower = block.to_lowercase();
        if !DEGREE_KEYWORDS.iter().any(|kw| lower.contains(kw)) {
            continue;
        }
        let cleaned = LEADING_BULLET_RE.replace(block, "");
        let cleaned = cleaned.trim();
        if !seen.insert(normalize_ws(cleaned)) {
            continue;
        }
        entries.push(parse_education_block(cleaned));
    }
    entries
}

fn parse_education_block(block: &str) -> EducationEntry {
    let mut lines = block.lines();
    let first_line = lines.next().unwrap_or(block);
    let (heading, year) = strip_year(first_line);

    let (degree, institution) = match split_heading(&heading) {
        Some(pair) => pair,
        None => degree_phrase_split(&heading),
    };

    let description = lines
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .collect::<Vec<_>>()
        .join(" ");
    EducationEntry::new(&degree, &institution, &year, &description)
}

/// When no separator is present, peel a leading degree phrase off the
/// heading and treat the remainder as the institution.
fn degree_phrase_split(heading: &str) -> (String, String) {
    if let Some(m) = DEGREE_PHRASE_RE.find(heading) {
        let degree = m.as_str().trim().to_string();
        let institution = heading.replacen(m.as_str(), "", 1).trim().to_string();
        (degree, institution)
    } else {
        (heading.trim().to_string(), String::new())
    }
}

/// Experience entries, parsed like education blocks but gated on a year
/// or a role keyword instead of a degree keyword.
pub fn extract_experience(text: &str) -> Vec<ExperienceEntry> {
    let Some(section) = find_section(text, EXPERIENCE_SECTIONS) else {
        return Vec::new();
    };

    let mut seen = HashSet::new();
    let mut entries = Vec::new();
    for block in BLANK_LINE_RE.split(&section) {
        let block = block.trim();
        if block.chars().count() < MIN_EXPERIENCE_ENTRY_CHARS {
            continue;
        }
        let lower = block.to_lowercase();
        let has_year = EXPERIENCE_YEAR_RE.is_match(&lower);
        let has_role = ROLE_KEYWORDS.iter().any(|kw| lower.contains(kw));
        if !has_year && !has_role {
            continue;
        }
        let cleaned = LEADING_BULLET_RE.replace(block, "");
        let cleaned = cleaned.trim();
        if !seen.insert(normalize_ws(cleaned)) {
            continue;
        }
        entries.push(parse_experience_block(cleaned));
    }
    entries
}

fn parse_experience_block(block: &str) -> ExperienceEntry {
    let mut lines = block.lines();
    let first_line = lines.next().unwrap_or(block);
    let (heading, duration) = strip_year(first_line);

    let (title, company) = match split_heading(&heading) {
        Some(pair) => pair,
        None => (heading.trim().to_string(), String::new()),
    };

    let description = lines
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .collect::<Vec<_>>()
        .join(" ");
    ExperienceEntry::new(&title, &company, &duration, &description)
}

/// Pull a "2018-2022" / "2019 - present" range, or failing that a lone
/// year not followed by a dash, out of the heading line. Returns the
/// heading with the token removed plus the token itself.
fn strip_year(first_line: &str) -> (String, String) {
    if let Some(caps) = YEAR_RANGE_RE.captures(first_line) {
        let token = caps.get(1).map(|m| m.as_str()).unwrap_or_default();
        let remaining = first_line.replacen(token, "", 1).trim().to_string();
        return (remaining, token.to_string());
    }
    for m in LONE_YEAR_RE.find_iter(first_line) {
        let after = &first_line[m.end()..];
        let next = after.trim_start().chars().next();
        if matches!(next, Some('-' | '\u{2013}' | '\u{2014}')) {
            continue;
        }
        let remaining = first_line.replacen(m.as_str(), "", 1).trim().to_string();
        return (remaining, m.as_str().to_string());
    }
    (first_line.trim().to_string(), String::new())
}

/// "X at Y", "X, Y" or "X - Y" into its two halves.
fn split_heading(heading: &str) -> Option<(String, String)> {
    if let Some(m) = AT_SEPARATOR_RE.find(heading) {
        return Some((
            heading[..m.start()].trim().to_string(),
            heading[m.end()..].trim().to_string(),
        ));
    }
    if let Some(idx) = heading.find(',') {
        return Some((
            heading[..idx].trim().to_string(),
            heading[idx + 1..].trim().to_string(),
        ));
    }
    if let Some(m) = DASH_SEPARATOR_RE.find(heading) {
        return Some((
            heading[..m.start()].trim().to_string(),
            heading[m.end()..].trim().to_string(),
        ));
    }
    None
}

fn normalize_ws(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}
