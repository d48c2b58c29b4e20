//! Plain-text excerpts for the article listing

use lazy_static::lazy_static;
use regex::Regex;

/// Number of words kept in a listing excerpt
pub const EXCERPT_WORDS: usize = 50;

lazy_static! {
    static ref BOLD: Regex = Regex::new(r"\*\*(.+?)\*\*").expect("valid pattern");
    static ref ITALIC: Regex = Regex::new(r"\*(.+?)\*").expect("valid pattern");
    static ref UNDERLINE_BOLD: Regex = Regex::new(r"__(.+?)__").expect("valid pattern");
    static ref UNDERLINE: Regex = Regex::new(r"_(.+?)_").expect("valid pattern");
    static ref HEADING: Regex = Regex::new(r"(?m)^#+\s*").expect("valid pattern");
    // An unclosed fence runs to the end of the body, as it does when rendered
    static ref FENCE: Regex = Regex::new(r"(?s)```.*?(?:```|\z)").expect("valid pattern");
    static ref INLINE_CODE: Regex = Regex::new(r"`([^`]+)`").expect("valid pattern");
    static ref WHITESPACE: Regex = Regex::new(r"\s+").expect("valid pattern");
}

/// Remove markdown formatting, leaving single-spaced plain text
pub fn strip_markdown(text: &str) -> String {
    let text = BOLD.replace_all(text, "$1");
    let text = ITALIC.replace_all(&text, "$1");
    let text = UNDERLINE_BOLD.replace_all(&text, "$1");
    let text = UNDERLINE.replace_all(&text, "$1");
    let text = HEADING.replace_all(&text, "");
    let text = FENCE.replace_all(&text, " ");
    let text = INLINE_CODE.replace_all(&text, "$1");
    let text = WHITESPACE.replace_all(&text, " ");
    text.trim().to_string()
}

/// First `limit` words of the stripped body, with `...` when truncated
pub fn excerpt(body: &str, limit: usize) -> String {
    let plain = strip_markdown(body);
    let words: Vec<&str> = plain.split(' ').filter(|w| !w.is_empty()).collect();
    if words.len() <= limit {
        return plain;
    }
    format!("{}...", words[..limit].join(" "))
}
