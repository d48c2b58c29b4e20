//! folio: build tooling and timing widgets for a markdown blog
//!
//! This crate builds the article manifest a single-page blog reads at
//! runtime, prepares a built site for static hosting, loads and formats
//! articles, and runs the site's timing widgets (speed reader, metronome,
//! countdown) on a cooperative timer queue.

pub mod commands;
pub mod config;
pub mod content;
pub mod layout;
pub mod render;
pub mod server;
pub mod store;
pub mod timer;

use anyhow::Result;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

/// The main folio application
#[derive(Clone)]
pub struct Folio {
    /// Site configuration
    pub config: config::SiteConfig,
    /// Base directory
    pub base_dir: PathBuf,
    /// Markdown article sources
    pub articles_source_dir: PathBuf,
    /// Public (data) directory
    pub public_dir: PathBuf,
    /// Built app directory
    pub build_dir: PathBuf,
    profile: OnceLock<config::ProfileConfig>,
}

impl Folio {
    /// Create a new folio instance from a directory
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        let config_path = base_dir.join("_config.yml");

        let config = if config_path.exists() {
            config::SiteConfig::load(&config_path)?
        } else {
            config::SiteConfig::default()
        };

        let articles_source_dir = base_dir.join(&config.articles_dir);
        let public_dir = base_dir.join(&config.public_dir);
        let build_dir = base_dir.join(&config.build_dir);

        Ok(Self {
            config,
            base_dir,
            articles_source_dir,
            public_dir,
            build_dir,
            profile: OnceLock::new(),
        })
    }

    /// Path of the generated manifest
    pub fn manifest_path(&self) -> PathBuf {
        self.public_dir.join("articles.json")
    }

    /// Directory holding the published per-article documents
    pub fn published_articles_dir(&self) -> PathBuf {
        self.public_dir.join("articles")
    }

    /// Profile configuration, read on first use and kept for the
    /// lifetime of this instance. A broken file degrades to an empty profile.
    pub fn profile(&self) -> &config::ProfileConfig {
        self.profile.get_or_init(|| {
            let path = self.base_dir.join(&self.config.profile_config);
            config::ProfileConfig::load(&path).unwrap_or_else(|e| {
                tracing::warn!("Ignoring profile config: {:#}", e);
                config::ProfileConfig::default()
            })
        })
    }

    /// Article store over the public directory
    pub fn store(&self) -> store::ArticleStore {
        store::ArticleStore::new(&self.public_dir)
    }

    /// Build the article manifest
    pub fn generate(&self) -> Result<content::loader::BuildReport> {
        commands::generate::run(self)
    }

    /// Prepare the built app for static hosting
    pub fn postbuild(&self) -> Result<()> {
        commands::postbuild::run(self)
    }

    /// Remove generated article data
    pub fn clean(&self) -> Result<()> {
        commands::clean::run(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_default_paths() {
        let tmp = tempfile::TempDir::new().unwrap();
        let folio = Folio::new(tmp.path()).unwrap();
        assert_eq!(
            folio.articles_source_dir,
            tmp.path().join("src/assets/articles")
        );
        assert_eq!(folio.manifest_path(), tmp.path().join("public/articles.json"));
        assert_eq!(folio.published_articles_dir(), tmp.path().join("public/articles"));
        assert_eq!(folio.build_dir, tmp.path().join("build"));
    }

    #[test]
    fn test_config_overrides_paths() {
        let tmp = tempfile::TempDir::new().unwrap();
        fs::write(tmp.path().join("_config.yml"), "public_dir: site\n").unwrap();
        let folio = Folio::new(tmp.path()).unwrap();
        assert_eq!(folio.manifest_path(), tmp.path().join("site/articles.json"));
    }

    #[test]
    fn test_profile_is_read_once() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("src/config/config.json");
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, r#"{"aboutPage": {"certifications": ["A"]}}"#).unwrap();

        let folio = Folio::new(tmp.path()).unwrap();
        assert_eq!(folio.profile().about_page.certifications, vec!["A"]);

        fs::write(&path, r#"{"aboutPage": {"certifications": ["B"]}}"#).unwrap();
        assert_eq!(folio.profile().about_page.certifications, vec!["A"]);
    }

    #[test]
    fn test_broken_profile_degrades() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("src/config/config.json");
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, "{ not json").unwrap();

        let folio = Folio::new(tmp.path()).unwrap();
        assert!(folio.profile().about_page.skills.is_empty());
    }
}
