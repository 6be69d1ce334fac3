//! Heading detection for lines without markdown heading markers

use regex::Regex;
use std::sync::LazyLock;

/// Level used when a line looks like a heading but no rule assigns a depth
pub const FALLBACK_HEADING_LEVEL: u8 = 2;

static NUMBERED_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\d+\.\s+").unwrap());

static SINGLE_DIGIT_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[1-9]\.\s+").unwrap());

static ROMAN_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[IVX]+\.\s+").unwrap());

static LETTERED_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[A-Z]\.\s+").unwrap());

static ALL_CAPS_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[A-Z][A-Z\s]+:?$").unwrap());

static SECTION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(CALL TO ORDER|COMMUNICATIONS|CONSENT AGENDA|ACTION ITEMS|INFORMATION ITEMS|ADJOURN)",
    )
    .unwrap()
});

/// Whether a trimmed line that is neither a markdown heading nor a list item
/// should become a heading.
pub fn looks_like_heading(line: &str) -> bool {
    if line.starts_with(['#', '*', '>']) {
        return false;
    }

    let length = line.chars().count();
    if length > 100 {
        return false;
    }

    if NUMBERED_RE.is_match(line)
        || ROMAN_RE.is_match(line)
        || LETTERED_RE.is_match(line)
        || ALL_CAPS_RE.is_match(line)
        || SECTION_RE.is_match(line)
    {
        return true;
    }

    if line.ends_with(':') && length < 80 {
        return true;
    }

    length < 60 && !line.ends_with(['.', '!', '?']) && is_title_case(line)
}

/// More than one word and at least 70% of words capitalised
fn is_title_case(line: &str) -> bool {
    let words: Vec<&str> = line.split_whitespace().collect();
    if words.len() < 2 {
        return false;
    }

    let capitalized = words
        .iter()
        .filter(|word| word.chars().next().is_some_and(char::is_uppercase))
        .count();

    capitalized * 10 >= words.len() * 7
}

/// At least one cased character and no lower-case ones
fn is_upper(line: &str) -> bool {
    let mut has_cased = false;
    for c in line.chars() {
        if c.is_lowercase() {
            return false;
        }
        if c.is_uppercase() {
            has_cased = true;
        }
    }
    has_cased
}

/// Depth for a heading found by [`looks_like_heading`].
///
/// Single-digit numbered or fully upper-case lines are top level, lettered
/// and roman-numeral items are level 3, everything else gets
/// [`FALLBACK_HEADING_LEVEL`].
pub fn heading_level(line: &str) -> u8 {
    if SINGLE_DIGIT_RE.is_match(line) || is_upper(line) {
        return 1;
    }
    if LETTERED_RE.is_match(line) || ROMAN_RE.is_match(line) {
        return 3;
    }
    FALLBACK_HEADING_LEVEL
}
