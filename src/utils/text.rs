// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use once_cell::sync::Lazy;
use regex::Regex;

static HTML_TAG_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]+>").unwrap());
static WHITESPACE_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

/// Clean HTML tags from text and decode HTML entities
///
/// Highlight markup such as `<em>` and `<strong>` is removed, entities like
/// `&amp;` are decoded and runs of whitespace collapse to a single space.
///
/// # Examples
/// * `<em>Rust</em> &amp; Go` → `Rust & Go`
pub fn clean_html_text(html: &str) -> String {
    let stripped = HTML_TAG_REGEX.replace_all(html, "");
    let decoded = html_escape::decode_html_entities(&stripped);
    collapse_whitespace(&decoded)
}

/// Collapse runs of whitespace (including newlines and `&nbsp;`) and trim
pub fn collapse_whitespace(text: &str) -> String {
    let text = text.replace('\u{a0}', " ");
    WHITESPACE_REGEX.replace_all(text.trim(), " ").into_owned()
}
