//! HTML rendering of article blocks with syntax-highlighted code

use syntect::highlighting::{Theme, ThemeSet};
use syntect::html::highlighted_html_for_string;
use syntect::parsing::SyntaxSet;

use crate::config::HighlightConfig;
use crate::content::{format_content, Article, DisplayBlock, Span};

/// Renders display blocks to HTML
pub struct HtmlRenderer {
    syntax_set: SyntaxSet,
    theme_set: ThemeSet,
    theme_name: String,
    line_numbers: bool,
}

impl HtmlRenderer {
    pub fn new() -> Self {
        Self::with_options(&HighlightConfig::default())
    }

    pub fn with_options(highlight: &HighlightConfig) -> Self {
        Self {
            syntax_set: SyntaxSet::load_defaults_newlines(),
            theme_set: ThemeSet::load_defaults(),
            theme_name: highlight.theme.clone(),
            line_numbers: highlight.line_number,
        }
    }

    /// Full article view: header, optional image, then the body
    pub fn render_article(&self, article: &Article) -> String {
        let mut html = String::from(r#"<article class="article-page">"#);
        html.push_str(&format!(
            r#"<header><h1 class="article-title">{}</h1>"#,
            html_escape(&article.title)
        ));
        if !article.date.is_empty() || !article.category.is_empty() {
            html.push_str(r#"<div class="article-meta">"#);
            if !article.date.is_empty() {
                html.push_str(&format!(
                    r#"<span class="article-date">Posted on {}</span>"#,
                    html_escape(&article.date)
                ));
            }
            if !article.category.is_empty() {
                html.push_str(&format!(
                    r#"<span class="article-category">In {}</span>"#,
                    html_escape(&article.category)
                ));
            }
            html.push_str("</div>");
        }
        html.push_str("</header>");
        if !article.image.is_empty() {
            html.push_str(&format!(
                r#"<img src="{}" alt="{}" class="article-image">"#,
                html_escape(&article.image),
                html_escape(&article.title)
            ));
        }
        html.push_str(r#"<div class="article-content">"#);
        html.push_str(&self.render_blocks(&format_content(&article.content)));
        html.push_str("</div></article>");
        html
    }

    pub fn render_blocks(&self, blocks: &[DisplayBlock]) -> String {
        let mut html = String::new();
        for block in blocks {
            match block {
                DisplayBlock::Paragraph { spans } => {
                    html.push_str(&format!("<p>{}</p>\n", render_spans(spans)));
                }
                DisplayBlock::Heading { level, spans } => {
                    html.push_str(&format!(
                        "<h{0}>{1}</h{0}>\n",
                        level,
                        render_spans(spans)
                    ));
                }
                DisplayBlock::CodeBlock { language, lines } => {
                    html.push_str(&self.highlight_code(&lines.join("\n"), language));
                    html.push('\n');
                }
                DisplayBlock::Break => html.push_str("<br>\n"),
            }
        }
        html
    }

    fn theme(&self) -> Option<&Theme> {
        self.theme_set
            .themes
            .get(&self.theme_name)
            .or_else(|| self.theme_set.themes.values().next())
    }

    /// Highlight a code block
    fn highlight_code(&self, code: &str, lang: &str) -> String {
        let syntax = self
            .syntax_set
            .find_syntax_by_token(lang)
            .or_else(|| self.syntax_set.find_syntax_by_extension(lang))
            .unwrap_or_else(|| self.syntax_set.find_syntax_plain_text());

        let highlighted = self.theme().and_then(|theme| {
            highlighted_html_for_string(code, &self.syntax_set, syntax, theme)
                .map_err(|e| tracing::debug!("Highlighting {} failed: {}", lang, e))
                .ok()
        });

        match highlighted {
            Some(highlighted) if self.line_numbers => add_line_numbers(&highlighted, lang),
            Some(highlighted) => format!(
                r#"<pre><code class="language-{}">{}</code></pre>"#,
                lang, highlighted
            ),
            None => format!(
                r#"<pre><code class="language-{}">{}</code></pre>"#,
                lang,
                html_escape(code)
            ),
        }
    }
}

impl Default for HtmlRenderer {
    fn default() -> Self {
        Self::new()
    }
}

fn render_spans(spans: &[Span]) -> String {
    spans
        .iter()
        .map(|span| match span {
            Span::Text(s) => html_escape(s),
            Span::Bold(s) => format!("<strong>{}</strong>", html_escape(s)),
            Span::Italic(s) => format!("<em>{}</em>", html_escape(s)),
        })
        .collect()
}

/// Wrap highlighted code in a gutter table
fn add_line_numbers(code: &str, lang: &str) -> String {
    let lines: Vec<&str> = code.lines().collect();
    let gutter = (1..=lines.len())
        .map(|n| format!(r#"<span class="line-number">{}</span>"#, n))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        r#"<figure class="highlight {}"><table><tr><td class="gutter"><pre>{}</pre></td><td class="code"><pre>{}</pre></td></tr></table></figure>"#,
        lang,
        gutter,
        lines.join("\n")
    )
}

pub(crate) fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_paragraph_and_heading() {
        let renderer = HtmlRenderer::new();
        let html = renderer.render_blocks(&format_content("## Title\n\nSome **bold** & *soft* text"));
        assert!(html.contains("<h2>Title</h2>"));
        assert!(html.contains("<br>"));
        assert!(html.contains("<strong>bold</strong>"));
        assert!(html.contains("<em>soft</em>"));
        assert!(html.contains("&amp;"));
    }

    #[test]
    fn test_code_block_has_line_numbers() {
        let renderer = HtmlRenderer::new();
        let html = renderer.render_blocks(&format_content("```rust\nfn main() {}\nlet x = 1;\n```"));
        assert!(html.contains(r#"<figure class="highlight rust">"#));
        assert!(html.contains(r#"<span class="line-number">1</span>"#));
        assert!(html.contains(r#"<td class="gutter">"#));
    }

    #[test]
    fn test_code_block_without_line_numbers() {
        let renderer = HtmlRenderer::with_options(&HighlightConfig {
            theme: "no-such-theme".to_string(),
            line_number: false,
        });
        let html = renderer.render_blocks(&format_content("```\n<tag>\n```"));
        assert!(html.contains(r#"<pre><code class="language-text">"#));
        assert!(!html.contains("<tag>"));
    }

    #[test]
    fn test_render_article_header() {
        let article = Article {
            id: "x".to_string(),
            title: "A <Title>".to_string(),
            date: "2026-02-28".to_string(),
            category: String::new(),
            tag: String::new(),
            image: String::new(),
            content: "Body".to_string(),
        };
        let html = HtmlRenderer::new().render_article(&article);
        assert!(html.contains("A &lt;Title&gt;"));
        assert!(html.contains("Posted on 2026-02-28"));
        assert!(!html.contains("article-category"));
        assert!(!html.contains("<img"));
        assert!(html.contains("<p>Body</p>"));
    }
}
