// src/extract/phone.rs
// =============================================================================
// This module finds German phone numbers in raw page text.
//
// How it works:
// 1. Four regex patterns are run over the text, each on its own
// 2. Every match is stripped down to digits and '+'
// 3. 0049 / leading 0 prefixes are rewritten to +49
// 4. Anything outside 11..=16 characters is thrown away
//
// Two patterns can fire on the same number (e.g. "+49 (30) 1234567" and
// the national pattern inside it). That's fine: once canonicalized they
// collapse into one entry of the result set.
//
// Rust concepts:
// - Regex: compiled once, reused for every page
// - BTreeSet: a sorted set, so duplicates disappear and output is stable
// - Option<T>: canonicalize() returns None for rejected candidates
// =============================================================================

use regex::Regex;
use std::collections::BTreeSet;

// The four accepted layouts. Separators between digit groups may be a
// hyphen or whitespace, and some groups may be wrapped in parentheses.
const PATTERNS: [&str; 4] = [
    // +49 international format
    r"\+49[-\s]?\(?[0-9]{2,5}\)?[-\s]?[0-9]{3,7}[-\s]?[0-9]{3,5}",
    // 0049 international format
    r"0049[-\s]?\(?[0-9]{2,5}\)?[-\s]?[0-9]{3,7}[-\s]?[0-9]{3,5}",
    // National format
    r"0[0-9]{2,5}[-\s]?\(?[0-9]{3,7}\)?[-\s]?[0-9]{3,5}",
    // National format with the area code in parentheses
    r"\(0[0-9]{2,5}\)[-\s]?[0-9]{3,7}[-\s]?[0-9]{3,5}",
];

/// Shortest accepted canonical number, counting the leading '+'.
pub const MIN_CANONICAL_LEN: usize = 11;
/// Longest accepted canonical number, counting the leading '+'.
pub const MAX_CANONICAL_LEN: usize = 16;

// Holds the compiled patterns
//
// Building a Regex is expensive compared to running one, so the crawl
// engine creates a single PhoneExtractor and reuses it for every page.
#[derive(Debug, Clone)]
pub struct PhoneExtractor {
    patterns: Vec<Regex>,
}

impl PhoneExtractor {
    pub fn new() -> Self {
        // The patterns are constants, so failing to compile one is a
        // programmer error rather than something a user can cause.
        let patterns = PATTERNS
            .iter()
            .map(|p| Regex::new(p).expect("phone pattern must compile"))
            .collect();

        Self { patterns }
    }

    // Extracts every distinct canonical phone number from the text
    //
    // Parameters:
    //   text: raw page content (HTML or plain text, may be malformed)
    //
    // Returns: a set of numbers like "+49301234567"; empty if none matched
    //
    // Example:
    //   "Tel: 030-1234567" -> {"+49301234567"}
    pub fn extract(&self, text: &str) -> BTreeSet<String> {
        let mut found = BTreeSet::new();

        for pattern in &self.patterns {
            for raw in pattern.find_iter(text) {
                if let Some(number) = canonicalize(raw.as_str()) {
                    found.insert(number);
                }
            }
        }

        found
    }
}

impl Default for PhoneExtractor {
    fn default() -> Self {
        Self::new()
    }
}

// Turns a raw regex match into its canonical +49 form
//
// Steps (in this order):
//   a. keep only ASCII digits and '+'
//   b. "0049..." becomes "+49..."
//   c. otherwise "0..." with at least 10 characters becomes "+49..."
//   d. accept only if the length is within 11..=16
//
// Examples:
//   "0049 30 1234567" -> Some("+49301234567")
//   "030-1234567"     -> Some("+49301234567")
//   "0301234"         -> None (too short)
pub fn canonicalize(raw: &str) -> Option<String> {
    let stripped: String = raw
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '+')
        .collect();

    let normalized = if let Some(rest) = stripped.strip_prefix("0049") {
        format!("+49{}", rest)
    } else if stripped.starts_with('0') && stripped.len() >= 10 {
        format!("+49{}", &stripped[1..])
    } else {
        stripped
    };

    // Every character is ASCII at this point, so len() is the char count
    if (MIN_CANONICAL_LEN..=MAX_CANONICAL_LEN).contains(&normalized.len()) {
        Some(normalized)
    } else {
        None
    }
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. What does find_iter do?
//    - Walks the text left to right and yields every non-overlapping match
//    - Each pattern gets its own pass, so one number can be matched twice
//
// 2. Why strip_prefix instead of starts_with + slicing?
//    - strip_prefix returns Some(rest) only if the prefix was there
//    - No index arithmetic to get wrong
// -----------------------------------------------------------------------------
