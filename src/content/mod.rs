//! Content module - article parsing, formatting and the manifest build

mod article;
pub mod excerpt;
mod format;
mod frontmatter;
mod inline;
pub mod loader;

pub use article::{article_href, sort_by_date_desc, Article, ArticleDocument, ArticleManifest, ArticleMeta};
pub use format::{format_content, DisplayBlock};
pub use frontmatter::FrontMatter;
pub use inline::{parse_inline, Span};
