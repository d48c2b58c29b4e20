//! List published articles

use anyhow::{bail, Result};

use crate::render::text;
use crate::store::{paginate, LoadState};
use crate::Folio;

/// Print one page of the article list, newest first
pub async fn run(folio: &Folio, page: usize) -> Result<()> {
    let articles = match folio.store().load_articles().await {
        LoadState::Loaded(articles) => articles,
        LoadState::Failed(message) => bail!("{}", message),
        LoadState::NotFound => Vec::new(),
    };

    let page = paginate(&articles, page, folio.config.per_page);
    println!("{}", folio.config.title);
    println!();
    print!("{}", text::render_page(&page));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_list_needs_manifest() {
        let tmp = TempDir::new().unwrap();
        let folio = Folio::new(tmp.path()).unwrap();
        let err = run(&folio, 1).await.unwrap_err();
        assert_eq!(err.to_string(), "Failed to load articles");
    }

    #[tokio::test]
    async fn test_list_after_generate() {
        let tmp = TempDir::new().unwrap();
        let src = tmp.path().join("src/assets/articles");
        fs::create_dir_all(&src).unwrap();
        fs::write(src.join("a.md"), "---\ndate: 2026-01-01\n---\nHi").unwrap();

        let folio = Folio::new(tmp.path()).unwrap();
        folio.generate().unwrap();
        run(&folio, 3).await.unwrap();
    }
}
