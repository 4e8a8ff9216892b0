use std::collections::HashSet;

use once_cell::sync::Lazy;
use regex::Regex;

use cvparse_core::{LanguageEntry, Proficiency};

use crate::section::find_section;

const LANGUAGE_SECTIONS: &[&str] =
    &["languages", "language skills", "language proficiency", "language"];

/// Languages recognised in the section, lowercased.
const COMMON_LANGUAGES: &[&str] = &[
    "english", "spanish", "french", "german", "chinese", "mandarin", "japanese", "korean",
    "arabic", "portuguese", "russian", "italian", "dutch", "hindi", "khmer", "cambodian",
    "vietnamese", "thai", "indonesian", "malay", "tagalog", "turkish", "polish", "ukrainian",
    "greek", "czech", "swedish", "finnish", "danish", "norwegian", "hebrew", "bengali", "urdu",
    "punjabi", "tamil", "telugu", "burmese", "lao", "nepali",
];

/// Proficiency keywords in priority order; the first one found in the
/// surrounding text wins.
const PROFICIENCY_KEYWORDS: &[(&str, Proficiency)] = &[
    ("native", Proficiency::Native),
    ("mother tongue", Proficiency::Native),
    ("fluent", Proficiency::Native),
    ("advanced", Proficiency::Advanced),
    ("proficient", Proficiency::Advanced),
    ("upper intermediate", Proficiency::Advanced),
    ("intermediate", Proficiency::Intermediate),
    ("conversational", Proficiency::Intermediate),
    ("basic", Proficiency::Basic),
    ("beginner", Proficiency::Basic),
    ("elementary", Proficiency::Basic),
    ("limited", Proficiency::Basic),
    ("working proficiency", Proficiency::Intermediate),
];

static LANGUAGE_DICT: Lazy<Vec<(&'static str, Regex)>> = Lazy::new(|| {
    COMMON_LANGUAGES
        .iter()
        .map(|lang| {
            (*lang, Regex::new(&format!(r"\b{}\b", regex::escape(lang))).unwrap())
        })
        .collect()
});

static ITEM_SPLIT_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[,;]").unwrap());

static LEADING_BULLET_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[\d.)*•·\s-]+").unwrap());

/// "english: fluent", "khmer - native", "french | basic"
static COLON_LINE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*([a-z\s]+)\s*[:|-]\s*(.+)$").unwrap());

fn display_name(lang: &str) -> String {
    match lang {
        "mandarin" => "Chinese (Mandarin)".to_string(),
        "cambodian" => "Khmer".to_string(),
        _ => capitalize(lang),
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) => c.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn infer_proficiency(context: &str) -> Proficiency {
    for (keyword, level) in PROFICIENCY_KEYWORDS {
        if context.contains(keyword) {
            return *level;
        }
    }
    Proficiency::Intermediate
}

/// Languages with proficiency levels from the languages section.
///
/// Three passes share one seen-set: comma-split items when the section
/// has commas, then per-line "Language: level" pairs, then bare language
/// names inline. Proficiency defaults to intermediate when no keyword
/// appears near the language.
pub fn extract_languages(text: &str) -> Vec<LanguageEntry> {
    let Some(section) = find_section(text, LANGUAGE_SECTIONS) else {
        return Vec::new();
    };

    let mut seen: HashSet<&'static str> = HashSet::new();
    let mut entries = Vec::new();

    if section.contains(',') {
        for item in ITEM_SPLIT_RE.split(&section) {
            let item = LEADING_BULLET_RE
                .replace(item.trim(), "")
                .to_lowercase();
            let item = item.trim();
            if item.is_empty() || item.chars().count() > 50 {
                continue;
            }
            for (lang, re) in LANGUAGE_DICT.iter() {
                if re.is_match(item) && !seen.contains(lang) {
                    entries.push(LanguageEntry {
                        language: display_name(lang),
                        proficiency: infer_proficiency(item),
                    });
                    seen.insert(lang);
                    break;
                }
            }
        }
    }

    for line in section.lines() {
        let line = LEADING_BULLET_RE
            .replace(line.trim(), "")
            .to_lowercase();
        let line = line.trim();
        if line.is_empty() || line.chars().count() > 100 {
            continue;
        }

        if let Some(caps) = COLON_LINE_RE.captures(line) {
            let name_part = caps[1].trim().to_string();
            let level_part = caps[2].to_string();
            let mut matched = false;
            for (lang, _) in LANGUAGE_DICT.iter() {
                if name_part.contains(lang) && !seen.contains(lang) {
                    entries.push(LanguageEntry {
                        language: display_name(lang),
                        proficiency: infer_proficiency(&level_part),
                    });
                    seen.insert(lang);
                    matched = true;
                    break;
                }
            }
            if matched {
                continue;
            }
        }

        for (lang, re) in LANGUAGE_DICT.iter() {
            if re.is_match(line) && !seen.contains(lang) {
                entries.push(LanguageEntry {
                    language: display_name(lang),
                    proficiency: infer_proficiency(line),
                });
                seen.insert(lang);
            }
        }
    }

    entries
}
