//! Manifest builder - scans article sources and publishes them

use anyhow::{Context, Result};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use super::{excerpt, ArticleManifest, ArticleMeta, FrontMatter};
use crate::Folio;

/// Summary of a manifest build
#[derive(Debug, Clone, Default)]
pub struct BuildReport {
    /// Number of articles in the manifest
    pub articles: usize,
    /// Sources that were not published (unreadable or duplicate id)
    pub skipped: Vec<PathBuf>,
    pub manifest_path: PathBuf,
    pub articles_dir: PathBuf,
    /// False when the source directory did not exist
    pub source_found: bool,
}

/// Builds `articles.json` and the per-article copies from the source tree
pub struct ManifestBuilder<'a> {
    folio: &'a Folio,
}

impl<'a> ManifestBuilder<'a> {
    pub fn new(folio: &'a Folio) -> Self {
        Self { folio }
    }

    /// Build the manifest and copy every article to the public directory
    pub fn build(&self) -> Result<BuildReport> {
        let source_dir = &self.folio.articles_source_dir;
        let manifest_path = self.folio.manifest_path();
        let articles_dir = self.folio.published_articles_dir();

        let mut report = BuildReport {
            manifest_path: manifest_path.clone(),
            articles_dir: articles_dir.clone(),
            ..Default::default()
        };

        if !source_dir.exists() {
            tracing::warn!("Articles source dir not found: {:?}", source_dir);
            write_manifest(&manifest_path, &ArticleManifest::default())?;
            return Ok(report);
        }
        report.source_found = true;

        fs::create_dir_all(&articles_dir)
            .with_context(|| format!("Failed to create {:?}", articles_dir))?;

        let mut seen = HashSet::new();
        let mut articles = Vec::new();

        for path in collect_markdown_files(source_dir) {
            let Some(id) = article_id(&path) else {
                report.skipped.push(path);
                continue;
            };

            if !seen.insert(id.clone()) {
                tracing::warn!("Duplicate article id {:?}, skipping {:?}", id, path);
                report.skipped.push(path);
                continue;
            }

            let raw = match fs::read_to_string(&path) {
                Ok(raw) => raw,
                Err(e) => {
                    tracing::warn!("Failed to read article {:?}: {}", path, e);
                    seen.remove(&id);
                    report.skipped.push(path);
                    continue;
                }
            };

            let (fm, body) = FrontMatter::parse(&raw);
            if !fm.date().is_empty() && fm.parse_date().is_none() {
                tracing::warn!(
                    "Article {:?} has a non-ISO date {:?}; ordering may be off",
                    id,
                    fm.date()
                );
            }

            let summary = excerpt::excerpt(body, self.folio.config.excerpt_words);
            articles.push(ArticleMeta::from_front_matter(&id, &fm, summary));

            let dest = articles_dir.join(format!("{}.md", id));
            fs::write(&dest, &raw).with_context(|| format!("Failed to write {:?}", dest))?;
            tracing::debug!("Published {:?} -> {:?}", path, dest);
        }

        let manifest = ArticleManifest::new(articles);
        write_manifest(&manifest_path, &manifest)?;
        report.articles = manifest.len();

        tracing::info!(
            "Generated {:?} with {} articles and copied sources to {:?}",
            manifest_path,
            manifest.len(),
            articles_dir
        );

        Ok(report)
    }
}

/// All `.md` files below `dir`, in file-name order
pub fn collect_markdown_files(dir: &Path) -> Vec<PathBuf> {
    WalkDir::new(dir)
        .follow_links(true)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file() && is_markdown_file(e.path()))
        .map(|e| e.into_path())
        .collect()
}

/// Check if a file is a markdown file
fn is_markdown_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e == "md")
        .unwrap_or(false)
}

/// The article id is the file name without its extension
fn article_id(path: &Path) -> Option<String> {
    path.file_stem()
        .and_then(|s| s.to_str())
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

fn write_manifest(path: &Path, manifest: &ArticleManifest) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let json = manifest.to_json()?;
    fs::write(path, json).with_context(|| format!("Failed to write manifest {:?}", path))?;
    Ok(())
}
