//! Profile configuration (about page and social links)

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Static content for the about page and sidebar links
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ProfileConfig {
    pub about_page: AboutPage,
    pub social: Vec<SocialLink>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AboutPage {
    pub skills: Vec<SkillGroup>,
    pub certifications: Vec<String>,
    pub languages: Vec<Language>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SkillGroup {
    pub title: String,
    pub items: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Language {
    pub name: String,
    pub level: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SocialLink {
    pub name: String,
    pub url: String,
}

impl ProfileConfig {
    /// Load the profile from a JSON file.
    /// A missing file is not an error; the profile is simply empty.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            tracing::warn!("Profile config not found: {:?}", path);
            return Ok(Self::default());
        }
        let content =
            fs::read_to_string(path).with_context(|| format!("Failed to read {:?}", path))?;
        let profile = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse {:?}", path))?;
        Ok(profile)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_profile() {
        let json = r#"{
            "aboutPage": {
                "skills": [{ "title": "Backend", "items": ["Rust", "Java"] }],
                "certifications": ["AWS SAA"],
                "languages": [{ "name": "English", "level": "Fluent" }]
            },
            "social": [{ "name": "GitHub", "url": "https://github.com/example" }]
        }"#;
        let profile: ProfileConfig = serde_json::from_str(json).unwrap();
        assert_eq!(profile.about_page.skills[0].items, vec!["Rust", "Java"]);
        assert_eq!(profile.about_page.certifications, vec!["AWS SAA"]);
        assert_eq!(profile.about_page.languages[0].level, "Fluent");
        assert_eq!(profile.social[0].name, "GitHub");
    }

    #[test]
    fn test_missing_sections_default() {
        let profile: ProfileConfig = serde_json::from_str("{}").unwrap();
        assert!(profile.about_page.skills.is_empty());
        assert!(profile.social.is_empty());
    }

    #[test]
    fn test_missing_file_is_empty() {
        let tmp = tempfile::TempDir::new().unwrap();
        let profile = ProfileConfig::load(tmp.path().join("nope.json")).unwrap();
        assert_eq!(profile, ProfileConfig::default());
    }
}
