//! Show a single article

use anyhow::{bail, Result};

use crate::content::Article;
use crate::render::{text, HtmlRenderer};
use crate::store::LoadState;
use crate::Folio;

/// Load an article by id, as the article view would
pub async fn load(folio: &Folio, id: &str) -> Result<Article> {
    match folio.store().load_article(id).await {
        LoadState::Loaded(article) => Ok(article),
        LoadState::NotFound => bail!("Article not found: {}", id),
        LoadState::Failed(message) => bail!("{}", message),
    }
}

/// Print an article as plain text or as HTML
pub async fn run(folio: &Folio, id: &str, html: bool) -> Result<()> {
    let article = load(folio, id).await?;
    if html {
        let renderer = HtmlRenderer::with_options(&folio.config.highlight);
        println!("{}", renderer.render_article(&article));
    } else {
        print!("{}", text::render_article(&article));
    }
    Ok(())
}
