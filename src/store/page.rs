//! Article list pagination

use crate::content::ArticleMeta;

pub const ARTICLES_PER_PAGE: usize = 10;

/// One page of the article list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArticlePage<'a> {
    pub articles: &'a [ArticleMeta],
    /// 1-based page number
    pub number: usize,
    /// Always at least 1, even for an empty list
    pub total_pages: usize,
}

impl ArticlePage<'_> {
    pub fn has_prev(&self) -> bool {
        self.number > 1
    }

    pub fn has_next(&self) -> bool {
        self.number < self.total_pages
    }
}

/// Slice out page `number` (1-based). Out of range numbers are clamped to
/// the first or last page.
pub fn paginate(articles: &[ArticleMeta], number: usize, per_page: usize) -> ArticlePage<'_> {
    let per_page = per_page.max(1);
    let total_pages = articles.len().div_ceil(per_page).max(1);
    let number = number.clamp(1, total_pages);

    let start = (number - 1) * per_page;
    let end = (start + per_page).min(articles.len());
    ArticlePage {
        articles: &articles[start.min(end)..end],
        number,
        total_pages,
    }
}
