//! Site configuration (_config.yml)

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// Main site configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    // Site
    pub title: String,
    pub author: String,

    // Directory
    /// Markdown article sources, scanned recursively
    pub articles_dir: String,
    /// Published data served alongside the app
    pub public_dir: String,
    /// Built single-page app
    pub build_dir: String,
    /// About page and social links
    pub profile_config: String,

    // Writing
    pub excerpt_words: usize,

    // Listing
    pub per_page: usize,

    #[serde(default)]
    pub highlight: HighlightConfig,

    // Store any additional fields
    #[serde(flatten)]
    pub extra: HashMap<String, serde_yaml::Value>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "My Blog".to_string(),
            author: String::new(),

            articles_dir: "src/assets/articles".to_string(),
            public_dir: "public".to_string(),
            build_dir: "build".to_string(),
            profile_config: "src/config/config.json".to_string(),

            excerpt_words: crate::content::excerpt::EXCERPT_WORDS,

            per_page: 10,

            highlight: HighlightConfig::default(),
            extra: HashMap::new(),
        }
    }
}

impl SiteConfig {
    /// Load configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content =
            fs::read_to_string(path).with_context(|| format!("Failed to read {:?}", path))?;
        let mut config: SiteConfig = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse {:?}", path))?;
        config.normalize();
        Ok(config)
    }

    /// Replace unusable values with their defaults
    fn normalize(&mut self) {
        let defaults = Self::default();
        if self.excerpt_words == 0 {
            tracing::warn!(
                "excerpt_words must be positive, using {}",
                defaults.excerpt_words
            );
            self.excerpt_words = defaults.excerpt_words;
        }
        if self.per_page == 0 {
            tracing::warn!("per_page must be positive, using {}", defaults.per_page);
            self.per_page = defaults.per_page;
        }
    }
}

/// Code highlighting configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HighlightConfig {
    pub theme: String,
    pub line_number: bool,
}

impl Default for HighlightConfig {
    fn default() -> Self {
        Self {
            theme: "base16-ocean.dark".to_string(),
            line_number: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SiteConfig::default();
        assert_eq!(config.articles_dir, "src/assets/articles");
        assert_eq!(config.public_dir, "public");
        assert_eq!(config.excerpt_words, 50);
        assert_eq!(config.per_page, 10);
    }

    #[test]
    fn test_parse_config() {
        let yaml = r#"
title: Lemon Notes
articles_dir: content/posts
per_page: 5
highlight:
  line_number: false
"#;
        let config: SiteConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.title, "Lemon Notes");
        assert_eq!(config.articles_dir, "content/posts");
        assert_eq!(config.public_dir, "public");
        assert_eq!(config.per_page, 5);
        assert!(!config.highlight.line_number);
        assert_eq!(config.highlight.theme, "base16-ocean.dark");
    }

    #[test]
    fn test_load_normalizes_zero_values() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("_config.yml");
        fs::write(&path, "excerpt_words: 0\nper_page: 0\n").unwrap();

        let config = SiteConfig::load(&path).unwrap();
        assert_eq!(config.excerpt_words, 50);
        assert_eq!(config.per_page, 10);
    }
}
