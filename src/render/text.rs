//! Plain terminal rendering

use std::fmt::Write;

use crate::config::ProfileConfig;
use crate::content::{format_content, Article, DisplayBlock, Span};
use crate::store::ArticlePage;

/// Render blocks as plain text. Bold becomes `*x*` and italic `_x_`;
/// code is indented four spaces under a `[language]` label.
pub fn render_blocks(blocks: &[DisplayBlock]) -> String {
    let mut out = String::new();
    for block in blocks {
        match block {
            DisplayBlock::Paragraph { spans } => {
                out.push_str(&render_spans(spans));
                out.push('\n');
            }
            DisplayBlock::Heading { level, spans } => {
                let _ = writeln!(out, "{} {}", "#".repeat(*level as usize), render_spans(spans));
            }
            DisplayBlock::CodeBlock { language, lines } => {
                let _ = writeln!(out, "    [{}]", language);
                for line in lines {
                    let _ = writeln!(out, "    {}", line);
                }
            }
            DisplayBlock::Break => out.push('\n'),
        }
    }
    out
}

fn render_spans(spans: &[Span]) -> String {
    spans
        .iter()
        .map(|span| match span {
            Span::Text(s) => s.clone(),
            Span::Bold(s) => format!("*{}*", s),
            Span::Italic(s) => format!("_{}_", s),
        })
        .collect()
}

pub fn render_article(article: &Article) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", article.title);
    let _ = writeln!(out, "{}", "=".repeat(article.title.chars().count().max(3)));
    let mut meta = Vec::new();
    if !article.date.is_empty() {
        meta.push(format!("Posted on {}", article.date));
    }
    if !article.category.is_empty() {
        meta.push(format!("In {}", article.category));
    }
    if !article.tag.is_empty() {
        meta.push(format!("#{}", article.tag));
    }
    if !meta.is_empty() {
        let _ = writeln!(out, "{}", meta.join(" | "));
    }
    out.push('\n');
    out.push_str(&render_blocks(&format_content(&article.content)));
    out
}

/// One page of the article list, with a page footer
pub fn render_page(page: &ArticlePage<'_>) -> String {
    let mut out = String::new();
    if page.articles.is_empty() {
        out.push_str("No articles yet.\n");
    }
    for article in page.articles {
        let date = if article.date.is_empty() {
            "----------"
        } else {
            article.date.as_str()
        };
        let _ = writeln!(out, "{}  {}  ({})", date, article.title, article.id);
        if !article.category.is_empty() {
            let _ = writeln!(out, "            In {}", article.category);
        }
        if !article.excerpt.is_empty() {
            let _ = writeln!(out, "            {}", article.excerpt);
        }
    }
    let _ = writeln!(out, "\nPage {} of {}", page.number, page.total_pages);
    out
}

pub fn render_profile(profile: &ProfileConfig) -> String {
    let about = &profile.about_page;
    let mut out = String::new();

    if !about.skills.is_empty() {
        out.push_str("Skills\n");
        for group in &about.skills {
            let _ = writeln!(out, "  {}: {}", group.title, group.items.join(", "));
        }
    }
    if !about.certifications.is_empty() {
        out.push_str("Certifications\n");
        for cert in &about.certifications {
            let _ = writeln!(out, "  - {}", cert);
        }
    }
    if !about.languages.is_empty() {
        out.push_str("Languages\n");
        for lang in &about.languages {
            let _ = writeln!(out, "  {} ({})", lang.name, lang.level);
        }
    }
    if !profile.social.is_empty() {
        out.push_str("Links\n");
        for link in &profile.social {
            let _ = writeln!(out, "  {}: {}", link.name, link.url);
        }
    }
    if out.is_empty() {
        out.push_str("No profile configured.\n");
    }
    out
}
