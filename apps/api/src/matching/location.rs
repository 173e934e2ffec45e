//! Location extractor: best-effort "City, ST" lookup in free text.

use std::sync::LazyLock;

use regex::Regex;

// City words are capitalized; the state is exactly two uppercase letters.
// Only the preposition and label prefixes are case-insensitive.
static RE_PREPOSITION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i:in|at|near|around)\s+([A-Z][a-z]+(?:\s+[A-Z][a-z]+)*,\s*[A-Z]{2}\b)")
        .expect("valid preposition pattern")
});
static RE_LABEL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i:location|area|city):\s*([A-Z][a-z]+(?:\s+[A-Z][a-z]+)*,\s*[A-Z]{2}\b)")
        .expect("valid label pattern")
});
static RE_BARE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"([A-Z][a-z]+(?:\s+[A-Z][a-z]+)*,\s*[A-Z]{2}\b)").expect("valid bare pattern")
});

/// Patterns in priority order.
static PATTERNS: [&LazyLock<Regex>; 3] = [&RE_PREPOSITION, &RE_LABEL, &RE_BARE];

/// Returns the first "City, ST" token found, trying the preposition form,
/// then the labelled form, then a bare occurrence.
pub fn extract_location(description: &str) -> Option<String> {
    PATTERNS.iter().find_map(|pattern| {
        pattern
            .captures(description)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().to_string())
    })
}
