//! Inline emphasis lexer
//!
//! Recognizes `**bold**` and `*italic*`. Scanning goes left to right; at each
//! `*` the bold form is tried before the italic one and the shortest closing
//! delimiter wins. Markers that never close are kept as literal text.

use serde::Serialize;

/// A run of inline text
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "text", rename_all = "lowercase")]
pub enum Span {
    Text(String),
    Bold(String),
    Italic(String),
}

impl Span {
    /// The text without its emphasis
    pub fn text(&self) -> &str {
        match self {
            Span::Text(s) | Span::Bold(s) | Span::Italic(s) => s,
        }
    }
}

/// Split a line into plain and emphasised spans
pub fn parse_inline(text: &str) -> Vec<Span> {
    let mut spans = Vec::new();
    let mut plain = String::new();
    let mut pos = 0;

    while pos < text.len() {
        let rest = &text[pos..];
        let Some(star) = rest.find('*') else {
            plain.push_str(rest);
            break;
        };
        plain.push_str(&rest[..star]);
        pos += star;

        match scan_emphasis(&text[pos..]) {
            Some((span, consumed)) => {
                if !plain.is_empty() {
                    spans.push(Span::Text(std::mem::take(&mut plain)));
                }
                spans.push(span);
                pos += consumed;
            }
            None => {
                plain.push('*');
                pos += 1;
            }
        }
    }

    if !plain.is_empty() {
        spans.push(Span::Text(plain));
    }
    spans
}

/// Try to read an emphasis span at the start of `text` (which begins with `*`).
/// Returns the span and the number of bytes consumed.
fn scan_emphasis(text: &str) -> Option<(Span, usize)> {
    if let Some(inner) = text.strip_prefix("**") {
        if let Some(end) = find_close(inner, "**") {
            return Some((Span::Bold(inner[..end].to_string()), end + 4));
        }
    }
    let inner = text.strip_prefix('*')?;
    let end = find_close(inner, "*")?;
    Some((Span::Italic(inner[..end].to_string()), end + 2))
}

/// Find the closing delimiter after at least one character of content.
/// Content never spans a line break.
fn find_close(inner: &str, delim: &str) -> Option<usize> {
    let first = inner.chars().next().filter(|c| *c != '\n')?;
    let start = first.len_utf8();
    let line_end = inner.find('\n').unwrap_or(inner.len());
    if start > line_end {
        return None;
    }
    inner[start..line_end].find(delim).map(|i| i + start)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(s: &str) -> Span {
        Span::Text(s.to_string())
    }

    #[test]
    fn test_plain_text() {
        assert_eq!(parse_inline("no markers"), vec![text("no markers")]);
        assert!(parse_inline("").is_empty());
    }

    #[test]
    fn test_bold_and_italic() {
        assert_eq!(
            parse_inline("Some **bold** and *soft* text"),
            vec![
                text("Some "),
                Span::Bold("bold".to_string()),
                text(" and "),
                Span::Italic("soft".to_string()),
                text(" text"),
            ]
        );
    }

    #[test]
    fn test_shortest_match_wins() {
        assert_eq!(
            parse_inline("**a** **b**"),
            vec![
                Span::Bold("a".to_string()),
                text(" "),
                Span::Bold("b".to_string()),
            ]
        );
    }

    #[test]
    fn test_unmatched_markers_stay_literal() {
        assert_eq!(parse_inline("2 * 3 = 6"), vec![text("2 * 3 = 6")]);
        assert_eq!(parse_inline("**open"), vec![text("**open")]);
        assert_eq!(parse_inline("trailing *"), vec![text("trailing *")]);
    }

    #[test]
    fn test_bold_falls_back_to_italic() {
        // No closing `**`, so the first `*` opens an italic run
        assert_eq!(
            parse_inline("**a* rest"),
            vec![Span::Italic("*a".to_string()), text(" rest")]
        );
    }

    #[test]
    fn test_empty_markers() {
        assert_eq!(
            parse_inline("****"),
            vec![Span::Italic("*".to_string()), text("*")]
        );
        assert_eq!(parse_inline("**"), vec![text("**")]);
    }

    #[test]
    fn test_multibyte_content() {
        assert_eq!(
            parse_inline("速讀 **工具** ok"),
            vec![
                text("速讀 "),
                Span::Bold("工具".to_string()),
                text(" ok"),
            ]
        );
    }
}
