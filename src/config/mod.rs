//! Configuration module

mod profile;
mod site;

pub use profile::{AboutPage, Language, ProfileConfig, SkillGroup, SocialLink};
pub use site::{HighlightConfig, SiteConfig};
