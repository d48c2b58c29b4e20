//! Front-matter parsing
//!
//! Articles carry a flat `key: value` block between `---` fences. The same
//! grammar is used when the manifest is built and when a single article is
//! loaded, so metadata in `articles.json` always agrees with the document.

use chrono::NaiveDate;
use indexmap::IndexMap;
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};

lazy_static! {
    static ref FRONT_MATTER: Regex =
        Regex::new(r"(?s)\A---\r?\n(.*?)\r?\n---\r?\n(.*)\z").expect("valid front-matter pattern");
}

/// Front-matter data from an article
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FrontMatter {
    fields: IndexMap<String, String>,
}

impl FrontMatter {
    /// Parse front-matter from content string
    /// Returns (front_matter, remaining_content), the content trimmed.
    /// Text without a delimited block yields empty front-matter.
    pub fn parse(raw: &str) -> (Self, &str) {
        let Some(caps) = FRONT_MATTER.captures(raw) else {
            return (Self::default(), raw.trim());
        };

        let block = caps.get(1).map_or("", |m| m.as_str());
        let rest = caps.get(2).map_or("", |m| m.as_str());

        let mut fields = IndexMap::new();
        for line in block.lines() {
            // Lines without a colon are not fields
            let Some((key, value)) = line.split_once(':') else {
                continue;
            };
            fields.insert(key.trim().to_string(), unquote(value.trim()).to_string());
        }

        (Self { fields }, rest.trim())
    }

    /// Look up a raw field
    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields.get(key).map(String::as_str)
    }

    /// Field value, or an empty string when absent
    fn field(&self, key: &str) -> &str {
        self.get(key).unwrap_or_default()
    }

    pub fn title(&self) -> Option<&str> {
        self.get("title").filter(|t| !t.is_empty())
    }

    pub fn date(&self) -> &str {
        self.field("date")
    }

    pub fn category(&self) -> &str {
        self.field("category")
    }

    pub fn tag(&self) -> &str {
        self.field("tag")
    }

    pub fn image(&self) -> &str {
        self.field("image")
    }

    /// Parse the date field as an ISO calendar date.
    ///
    /// Accepts `YYYY-MM-DD` optionally followed by a time part, which is
    /// the shape the manifest ordering relies on.
    pub fn parse_date(&self) -> Option<NaiveDate> {
        let date = self.date();
        let day = date.get(..10)?;
        let rest = &date[10..];
        if !(rest.is_empty() || rest.starts_with('T') || rest.starts_with(' ')) {
            return None;
        }
        NaiveDate::parse_from_str(day, "%Y-%m-%d").ok()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Iterate fields in declaration order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

/// Strip one pair of matching double quotes, then one pair of single quotes
fn unquote(value: &str) -> &str {
    let value = strip_pair(value, '"');
    strip_pair(value, '\'')
}

fn strip_pair(value: &str, quote: char) -> &str {
    if !(value.starts_with(quote) && value.ends_with(quote)) {
        return value;
    }
    // A lone quote character unwraps to nothing
    if value.len() < 2 {
        return "";
    }
    &value[1..value.len() - 1]
}
