//! Article body formatting
//!
//! Turns an article body into display blocks, one line at a time. Only a
//! small subset of markdown is understood: `##`/`###` headings, fenced code,
//! blank lines and inline emphasis. Anything else is a paragraph.

use serde::Serialize;

use super::inline::{parse_inline, Span};

const FENCE: &str = "```";

/// A unit of rendered article content
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DisplayBlock {
    Paragraph { spans: Vec<Span> },
    Heading { level: u8, spans: Vec<Span> },
    CodeBlock { language: String, lines: Vec<String> },
    Break,
}

/// Pending fenced block
struct OpenFence {
    language: String,
    lines: Vec<String>,
}

impl OpenFence {
    fn open(marker_line: &str) -> Self {
        let language = marker_line[FENCE.len()..].trim();
        let language = if language.is_empty() {
            "text".to_string()
        } else {
            language.to_lowercase()
        };
        Self {
            language,
            lines: Vec::new(),
        }
    }

    /// Close the fence; an empty fence renders nothing
    fn close(self, out: &mut Vec<DisplayBlock>) {
        if !self.lines.is_empty() {
            out.push(DisplayBlock::CodeBlock {
                language: self.language,
                lines: self.lines,
            });
        }
    }
}

/// Format an article body into display blocks.
///
/// Never fails: a fence left open at the end of the body is closed
/// implicitly and its lines still become a code block.
pub fn format_content(content: &str) -> Vec<DisplayBlock> {
    let mut out = Vec::new();
    if content.is_empty() {
        return out;
    }

    let mut fence: Option<OpenFence> = None;

    for line in content.split('\n') {
        let line = line.strip_suffix('\r').unwrap_or(line);

        if line.starts_with(FENCE) {
            match fence.take() {
                Some(open) => open.close(&mut out),
                None => fence = Some(OpenFence::open(line)),
            }
            continue;
        }

        if let Some(open) = fence.as_mut() {
            open.lines.push(line.to_string());
            continue;
        }

        out.push(format_line(line));
    }

    if let Some(open) = fence {
        open.close(&mut out);
    }

    out
}

fn format_line(line: &str) -> DisplayBlock {
    if line.starts_with("## ") {
        DisplayBlock::Heading {
            level: 2,
            spans: parse_inline(strip_marker(line, "##")),
        }
    } else if line.starts_with("### ") {
        DisplayBlock::Heading {
            level: 3,
            spans: parse_inline(strip_marker(line, "###")),
        }
    } else if line.trim().is_empty() {
        DisplayBlock::Break
    } else {
        DisplayBlock::Paragraph {
            spans: parse_inline(line),
        }
    }
}

fn strip_marker<'a>(line: &'a str, marker: &str) -> &'a str {
    line[marker.len()..].trim_start()
}
