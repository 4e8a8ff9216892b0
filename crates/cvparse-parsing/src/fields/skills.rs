use once_cell::sync::Lazy;
use regex::Regex;

use crate::section::find_section;

pub const MAX_SKILLS: usize = 100;

/// Below this many delimiter-split skills, the dictionary scan kicks in
/// to rescue skills from jumbled or OCR'd sections.
const DICTIONARY_RESCUE_THRESHOLD: usize = 5;

const SKILL_SECTIONS: &[&str] = &[
    "skills",
    "technical skills",
    "core competencies",
    "key skills",
    "competencies",
    "hard skills",
    "soft skills",
];

/// Split items that are really sub-headers inside the skills section.
const SECTION_HEADER_TOKENS: &[&str] = &[
    "language",
    "languages",
    "soft skills",
    "hard skills",
    "technical skills",
    "certifications",
    "education",
    "experience",
    "projects",
    "achievements",
];

/// Well-known skills, scanned with word boundaries against the lowercased
/// section text when delimiter splitting yields too little.
const COMMON_SKILLS: &[&str] = &[
    // Programming languages
    "python", "java", "javascript", "typescript", "c++", "c#", "ruby", "php", "swift", "kotlin",
    "go", "rust", "r", "matlab", "scala", "perl", "sql",
    // Web
    "html", "css", "react", "angular", "vue", "node.js", "express", "django", "flask", "spring",
    "asp.net", "laravel", "jquery", "bootstrap", "tailwind",
    // Databases
    "mysql", "postgresql", "mongodb", "redis", "oracle", "sqlite", "cassandra", "dynamodb",
    "firebase",
    // Cloud and tooling
    "aws", "azure", "gcp", "docker", "kubernetes", "jenkins", "git", "github", "gitlab",
    "terraform", "ansible", "ci/cd",
    // Data science
    "machine learning", "deep learning", "tensorflow", "pytorch", "scikit-learn", "pandas",
    "numpy", "jupyter", "data analysis", "data visualization",
    // Office and design
    "excel", "powerpoint", "word", "outlook", "photoshop", "illustrator", "figma", "sketch",
    "jira", "confluence", "slack", "trello",
    // Soft skills
    "communication", "leadership", "teamwork", "problem-solving", "time management",
    "critical thinking", "analytical", "creativity", "adaptability", "collaboration",
];

static DELIMITER_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[,•·|/\n;]").unwrap());

static LEADING_BULLET_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[\d.)*•·\s-]+").unwrap());

/// Dictionary entries compiled once; boundaries are only asserted on sides
/// where the term actually ends in a word char, so "c++" and "c#" work.
static DICTIONARY: Lazy<Vec<(&'static str, Regex)>> = Lazy::new(|| {
    COMMON_SKILLS
        .iter()
        .map(|skill| (*skill, Regex::new(&word_bounded(skill)).unwrap()))
        .collect()
});

fn word_bounded(term: &str) -> String {
    let escaped = regex::escape(term);
    let lead = term
        .chars()
        .next()
        .is_some_and(|c| c.is_alphanumeric())
        .then_some(r"\b")
        .unwrap_or("");
    let trail = term
        .chars()
        .last()
        .is_some_and(|c| c.is_alphanumeric())
        .then_some(r"\b")
        .unwrap_or("");
    format!("{lead}{escaped}{trail}")
}

/// Uppercase short acronyms, Title Case the rest, mirroring how skills
/// are conventionally written ("sql" -> "SQL", "machine learning" ->
/// "Machine Learning").
fn format_skill(skill: &str) -> String {
    if skill.chars().count() <= 3 {
        skill.to_uppercase()
    } else {
        py_title(skill)
    }
}

/// Capitalize every letter that follows a non-letter.
fn py_title(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_alpha = false;
    for c in s.chars() {
        if c.is_alphabetic() {
            if prev_alpha {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            prev_alpha = true;
        } else {
            out.push(c);
            prev_alpha = false;
        }
    }
    out
}

/// Skills from the skills section: delimiter-split items first, then a
/// dictionary scan when the section is too jumbled to split cleanly.
/// Order of first appearance is kept; capped at [`MAX_SKILLS`].
pub fn extract_skills(text: &str) -> Vec<String> {
    let Some(section) = find_section(text, SKILL_SECTIONS) else {
        return Vec::new();
    };

    let mut skills: Vec<String> = Vec::new();
    for item in DELIMITER_RE.split(&section) {
        let item = LEADING_BULLET_RE.replace(item.trim(), "");
        let item = item.trim();
        if item.is_empty() {
            continue;
        }
        if SECTION_HEADER_TOKENS.contains(&item.to_lowercase().as_str()) {
            continue;
        }
        let len = item.chars().count();
        if !(2..=50).contains(&len) {
            continue;
        }
        // Mostly-digit items are dates or version numbers, not skills.
        let digits = item.chars().filter(|c| c.is_ascii_digit()).count();
        if digits * 2 > len {
            continue;
        }
        if !skills.iter().any(|s| s == item) {
            skills.push(item.to_string());
        }
    }

    if skills.len() < DICTIONARY_RESCUE_THRESHOLD {
        let lower = section.to_lowercase();
        for (skill, re) in DICTIONARY.iter() {
            if !re.is_match(&lower) {
                continue;
            }
            let formatted = format_skill(skill);
            if !skills.iter().any(|s| s.eq_ignore_ascii_case(&formatted)) {
                skills.push(formatted);
            }
        }
    }

    skills.truncate(MAX_SKILLS);
    skills
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn comma_separated_skills() {
        let text = "\nSkills:\nPython, SQL, Docker, Kubernetes, Communication";
        assert_eq!(
            extract_skills(text),
            vec!["Python", "SQL", "Docker", "Kubernetes", "Communication"],
        );
    }

    #[test]
    fn bulleted_skills() {
        let text = "\nSkills:\n• Python\n• Project Management\n- SQL\n1. Leadership\n2) Teamwork";
        assert_eq!(
            extract_skills(text),
            vec!["Python", "Project Management", "SQL", "Leadership", "Teamwork"],
        );
    }

    #[test]
    fn sub_headers_are_dropped() {
        let text = "\nSkills:\nPython, Languages, SQL, Rust, Git, Docker";
        let skills = extract_skills(text);
        assert!(!skills.iter().any(|s| s.eq_ignore_ascii_case("languages")));
        assert!(skills.contains(&"Python".to_string()));
        assert!(skills.contains(&"Docker".to_string()));
    }

    #[test]
    fn mostly_numeric_items_are_dropped() {
        let text = "\nSkills:\nPython, 2018, SQL, 12345, Git, Excel, Jira";
        let skills = extract_skills(text);
        assert!(!skills.contains(&"2018".to_string()));
        assert!(!skills.contains(&"12345".to_string()));
    }

    #[test]
    fn dictionary_rescues_jumbled_section() {
        // No usable delimiters, so splitting yields almost nothing and
        // the dictionary scan takes over.
        let text = "\nSkills:\nexperienced with python and sql plus docker deployments";
        let skills = extract_skills(text);
        assert!(skills.contains(&"Python".to_string()));
        assert!(skills.contains(&"SQL".to_string()));
        assert!(skills.contains(&"Docker".to_string()));
    }

    #[test]
    fn dictionary_matches_symbolic_names() {
        let text = "\nSkills:\nshipped services in c++ and c# for years";
        let skills = extract_skills(text);
        assert!(skills.contains(&"C++".to_string()));
        assert!(skills.contains(&"C#".to_string()));
    }

    #[test]
    fn single_letter_r_needs_word_boundaries() {
        let text = "\nSkills:\nstatistics work in r and python daily";
        let skills = extract_skills(text);
        assert!(skills.contains(&"R".to_string()));
        // "r" inside other words must not match.
        let text2 = "\nSkills:\ngreat interpersonal manner\n";
        assert!(!extract_skills(text2).contains(&"R".to_string()));
    }

    #[test]
    fn capped_at_maximum() {
        let items: Vec<String> = (0..150).map(|i| format!("Skill{i:03}x")).collect();
        let text = format!("\nSkills:\n{}", items.join(", "));
        assert_eq!(extract_skills(&text).len(), MAX_SKILLS);
    }

    #[test]
    fn duplicates_keep_first_occurrence() {
        let text = "\nSkills:\nPython, SQL, Python, Git, SQL, Docker, Jira";
        assert_eq!(
            extract_skills(text),
            vec!["Python", "SQL", "Git", "Docker", "Jira"],
        );
    }

    #[test]
    fn no_section_no_skills() {
        assert!(extract_skills("plain text with python mentioned").is_empty());
    }

    #[test]
    fn format_skill_cases() {
        assert_eq!(format_skill("sql"), "SQL");
        assert_eq!(format_skill("aws"), "AWS");
        assert_eq!(format_skill("machine learning"), "Machine Learning");
        assert_eq!(format_skill("node.js"), "Node.Js");
    }
}
