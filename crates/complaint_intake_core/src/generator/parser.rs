//! Parser for completion-service responses.
//!
//! Expected grammar:
//!
//! ```text
//! [preamble]
//! CATEGORY: <category line>
//! ---
//! <letter body>
//! ```
//!
//! The marker is matched case-insensitively anywhere in the response. Anything
//! before it is discarded. A missing `---` line is tolerated; the body then
//! starts right after the marker line. Without a marker the whole response is
//! the body and the category is the language default.

use regex::Regex;
use std::sync::LazyLock;

use crate::domain::{Language, Letter};

static CATEGORY_MARKER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)CATEGORY:[ \t]*([^\r\n]*)").expect("category marker pattern is valid")
});

/// Splits off the first line, dropping its terminator (`\n` or `\r\n`).
fn split_line(s: &str) -> (&str, &str) {
    match s.find('\n') {
        Some(i) => (s[..i].trim_end_matches('\r'), &s[i + 1..]),
        None => (s, ""),
    }
}

fn clean_category(raw: &str) -> &str {
    raw.trim_matches(|c: char| c.is_whitespace() || c == '*')
}

/// Extracts the category and the letter body from a raw completion.
pub fn parse_completion(response: &str, language: Language) -> Letter {
    let Some(caps) = CATEGORY_MARKER.captures(response) else {
        return Letter {
            category: language.default_category().to_string(),
            body: response.trim().to_string(),
        };
    };

    let category = match caps.get(1).map(|m| clean_category(m.as_str())) {
        Some(value) if !value.is_empty() => value.to_string(),
        _ => language.default_category().to_string(),
    };

    let marker_end = caps.get(0).map_or(0, |m| m.end());
    let (_, after_marker) = split_line(&response[marker_end..]);
    let (next_line, after_separator) = split_line(after_marker);
    let body = if next_line.trim() == "---" {
        after_separator
    } else {
        after_marker
    };

    Letter {
        category,
        body: body.trim().to_string(),
    }
}
