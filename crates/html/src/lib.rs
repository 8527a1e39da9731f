//! # crmtext-html: Markup Stripping
//!
//! Removes HTML tags from free text (e.g. email bodies) before it is sent to
//! the text-analytics service. Entities such as `&amp;` are left untouched.

use regex::Regex;
use std::sync::LazyLock;

static TAG_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]*>").unwrap());

/// Strips every `<...>` span from `input`, leaving the surrounding text intact.
///
/// An unterminated `<` (one with no later `>`) is kept as plain text.
pub fn strip_html(input: &str) -> String {
    if input.is_empty() {
        return String::new();
    }
    TAG_RE.replace_all(input, "").into_owned()
}

/// Strips markup and returns the remaining text, or `None` when nothing is
/// left to send.
pub fn non_blank_text(input: &str) -> Option<String> {
    let text = strip_html(input);
    if text.is_empty() {
        None
    } else {
        Some(text)
    }
}
