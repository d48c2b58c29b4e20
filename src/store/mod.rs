//! Article store - loads the published manifest and documents at runtime
//!
//! Reads go through `tokio::fs` against the public directory the manifest
//! builder writes into. A missing document is reported as "not found",
//! separately from read or decode failures, and failures are never retried.

mod page;

pub use page::{paginate, ArticlePage, ARTICLES_PER_PAGE};

use std::future::Future;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use thiserror::Error;

use crate::content::{Article, ArticleDocument, ArticleManifest, ArticleMeta};

/// Store I/O errors
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Failed to read `{0}`")]
    Io(PathBuf, #[source] io::Error),

    #[error("Failed to decode `{0}`")]
    Decode(PathBuf, #[source] serde_json::Error),
}

/// Outcome of a load, as the article views show it
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadState<T> {
    Loaded(T),
    NotFound,
    /// The fetch failed; holds the message to show inline
    Failed(String),
}

impl<T> LoadState<T> {
    pub fn is_loaded(&self) -> bool {
        matches!(self, LoadState::Loaded(_))
    }

    pub fn loaded(&self) -> Option<&T> {
        match self {
            LoadState::Loaded(value) => Some(value),
            _ => None,
        }
    }
}

/// Shared cancellation flag for in-flight loads.
///
/// A view trips its token when it goes away or when the requested id
/// changes; results arriving afterwards are dropped. This is for callers
/// that embed the store in something long-lived (a view, a watch loop);
/// one-shot commands load directly.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }

    /// Await `fut`, discarding its output if the token was tripped
    /// before it completed
    pub async fn guard<F: Future>(&self, fut: F) -> Option<F::Output> {
        let output = fut.await;
        if self.is_cancelled() {
            tracing::debug!("Discarding result of a cancelled load");
            return None;
        }
        Some(output)
    }
}

/// Reader over `<public>/articles.json` and `<public>/articles/{id}.md`
#[derive(Debug, Clone)]
pub struct ArticleStore {
    public_dir: PathBuf,
}

impl ArticleStore {
    pub fn new<P: AsRef<Path>>(public_dir: P) -> Self {
        Self {
            public_dir: public_dir.as_ref().to_path_buf(),
        }
    }

    pub fn manifest_path(&self) -> PathBuf {
        self.public_dir.join("articles.json")
    }

    fn document_path(&self, id: &str) -> PathBuf {
        self.public_dir.join("articles").join(format!("{}.md", id))
    }

    /// All article metadata, newest first as written by the builder
    pub async fn fetch_manifest(&self) -> Result<Vec<ArticleMeta>, FetchError> {
        let path = self.manifest_path();
        let raw = tokio::fs::read_to_string(&path)
            .await
            .map_err(|e| FetchError::Io(path.clone(), e))?;
        let manifest: ArticleManifest =
            serde_json::from_str(&raw).map_err(|e| FetchError::Decode(path, e))?;
        Ok(manifest.articles)
    }

    /// Raw markdown for `id`, or `None` when there is no such article
    pub async fn fetch_document(&self, id: &str) -> Result<Option<String>, FetchError> {
        if !is_valid_id(id) {
            tracing::debug!("Rejecting article id {:?}", id);
            return Ok(None);
        }
        let path = self.document_path(id);
        match tokio::fs::read_to_string(&path).await {
            Ok(raw) => Ok(Some(raw)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(FetchError::Io(path, e)),
        }
    }

    /// Load the article list for display
    pub async fn load_articles(&self) -> LoadState<Vec<ArticleMeta>> {
        match self.fetch_manifest().await {
            Ok(articles) => LoadState::Loaded(articles),
            Err(e) => {
                tracing::warn!("{:#}", anyhow::Error::new(e));
                LoadState::Failed("Failed to load articles".to_string())
            }
        }
    }

    /// Load and parse one article for display
    pub async fn load_article(&self, id: &str) -> LoadState<Article> {
        match self.fetch_document(id).await {
            Ok(Some(raw)) => LoadState::Loaded(Article::from_document(id, ArticleDocument::parse(&raw))),
            Ok(None) => LoadState::NotFound,
            Err(e) => {
                tracing::warn!("{:#}", anyhow::Error::new(e));
                LoadState::Failed("Failed to load article".to_string())
            }
        }
    }
}

/// Ids are file stems; anything that could leave the articles directory
/// is treated as unknown
fn is_valid_id(id: &str) -> bool {
    !id.is_empty() && id != "." && id != ".." && !id.contains(['/', '\\'])
}
