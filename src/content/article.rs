//! Article models

use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};
use serde::{Deserialize, Deserializer, Serialize};

use super::FrontMatter;

/// Manifest entry for one article
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArticleMeta {
    /// File stem of the source document
    pub id: String,
    pub title: String,
    /// ISO date, or empty
    pub date: String,
    pub category: String,
    pub tag: String,
    /// Image URL, or empty
    pub image: String,
    /// Plain-text preview
    pub excerpt: String,
}

impl ArticleMeta {
    /// Build the manifest entry from parsed front-matter.
    /// Missing fields default to empty strings; the title defaults to the id.
    pub fn from_front_matter(id: &str, fm: &FrontMatter, excerpt: String) -> Self {
        Self {
            id: id.to_string(),
            title: fm.title().unwrap_or(id).to_string(),
            date: fm.date().to_string(),
            category: fm.category().to_string(),
            tag: fm.tag().to_string(),
            image: fm.image().to_string(),
            excerpt,
        }
    }

    /// Site-relative link to the article view
    pub fn href(&self) -> String {
        article_href(&self.id)
    }
}

/// The aggregated article listing written to `articles.json`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArticleManifest {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub articles: Vec<ArticleMeta>,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<ArticleMeta>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<Vec<ArticleMeta>>::deserialize(deserializer).map(Option::unwrap_or_default)
}

impl ArticleManifest {
    /// Create a manifest sorted by date, newest first.
    pub fn new(mut articles: Vec<ArticleMeta>) -> Self {
        sort_by_date_desc(&mut articles);
        Self { articles }
    }

    pub fn len(&self) -> usize {
        self.articles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.articles.is_empty()
    }

    /// Serialize as pretty JSON (2-space indent)
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

/// Sort by date descending using plain string comparison.
///
/// ISO dates compare correctly as strings, and an empty date is smaller
/// than any other so it lands at the end. The sort is stable.
pub fn sort_by_date_desc(articles: &mut [ArticleMeta]) {
    articles.sort_by(|a, b| b.date.cmp(&a.date));
}

/// A parsed article document
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ArticleDocument {
    pub frontmatter: FrontMatter,
    /// Body with the front-matter removed, trimmed
    pub content: String,
}

impl ArticleDocument {
    pub fn parse(raw: &str) -> Self {
        let (frontmatter, content) = FrontMatter::parse(raw);
        Self {
            frontmatter,
            content: content.to_string(),
        }
    }
}

/// A loaded article, ready for display
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Article {
    pub id: String,
    pub title: String,
    pub date: String,
    pub category: String,
    pub tag: String,
    pub image: String,
    pub content: String,
}

impl Article {
    pub fn from_document(id: &str, doc: ArticleDocument) -> Self {
        let fm = &doc.frontmatter;
        Self {
            id: id.to_string(),
            title: fm.title().unwrap_or(id).to_string(),
            date: fm.date().to_string(),
            category: fm.category().to_string(),
            tag: fm.tag().to_string(),
            image: fm.image().to_string(),
            content: doc.content,
        }
    }
}

/// Link to the article view for `id`
pub fn article_href(id: &str) -> String {
    format!("/article/{}", utf8_percent_encode(id, NON_ALPHANUMERIC))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn meta(id: &str, date: &str) -> ArticleMeta {
        ArticleMeta {
            id: id.to_string(),
            title: id.to_string(),
            date: date.to_string(),
            category: String::new(),
            tag: String::new(),
            image: String::new(),
            excerpt: String::new(),
        }
    }

    #[test]
    fn test_manifest_sorted_newest_first() {
        let manifest = ArticleManifest::new(vec![
            meta("a", "2026-01-01"),
            meta("b", "2025-12-31"),
            meta("c", "2026-02-01"),
        ]);
        let dates: Vec<_> = manifest.articles.iter().map(|a| a.date.as_str()).collect();
        assert_eq!(dates, vec!["2026-02-01", "2026-01-01", "2025-12-31"]);
    }

    #[test]
    fn test_undated_articles_sort_last() {
        let manifest = ArticleManifest::new(vec![
            meta("undated", ""),
            meta("old", "2020-05-05"),
            meta("new", "2026-03-01"),
        ]);
        let ids: Vec<_> = manifest.articles.iter().map(|a| a.id.as_str()).collect();
        assert_eq!(ids, vec!["new", "old", "undated"]);
    }

    #[test]
    fn test_meta_defaults() {
        let (fm, _) = FrontMatter::parse("no front-matter here");
        let meta = ArticleMeta::from_front_matter("20260228", &fm, "preview".to_string());
        assert_eq!(meta.title, "20260228");
        assert_eq!(meta.date, "");
        assert_eq!(meta.image, "");
        assert_eq!(meta.excerpt, "preview");
    }

    #[test]
    fn test_manifest_json_shape() {
        let manifest = ArticleManifest::new(vec![meta("x", "2026-01-01")]);
        let json = manifest.to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["articles"][0]["id"], "x");
        assert_eq!(value["articles"][0]["excerpt"], "");
        assert!(json.contains("\n  \"articles\""));
    }

    #[test]
    fn test_article_from_document() {
        let doc = ArticleDocument::parse("---\ntitle: Hi\ncategory: Notes\n---\n\nBody\n");
        let article = Article::from_document("hi", doc);
        assert_eq!(article.title, "Hi");
        assert_eq!(article.category, "Notes");
        assert_eq!(article.content, "Body");
    }

    #[test]
    fn test_href_is_encoded() {
        assert_eq!(article_href("20260228"), "/article/20260228");
        assert_eq!(article_href("my post"), "/article/my%20post");
    }
}
