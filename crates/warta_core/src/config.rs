//! Site configuration loading
//!
//! The site document is a single JSON file carrying the site metadata and,
//! optionally, an embedded post collection. A missing file is the caller's
//! concern (defaults apply); malformed JSON is fatal.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Deserializer};

use crate::model::SiteMeta;

const DEFAULT_SITE_TITLE: &str = "warta";
const DEFAULT_AUTHOR: &str = "warta";
const DEFAULT_STATIC_PATHS: [&str; 5] = [
    "/",
    "/id/index.html",
    "/en/index.html",
    "/id/blog/index.html",
    "/en/blog/index.html",
];

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SiteConfigRaw {
    site_url: Option<String>,
    author: Option<String>,
    site_title: Option<String>,
    site_description: Option<String>,
    static_paths: Option<Vec<String>>,
    #[serde(default)]
    posts: Vec<PostRecord>,
}

/// One entry of the JSON post collection. Everything except the slug is
/// optional; defaults are applied when the record becomes a `Post`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostRecord {
    pub slug: String,
    pub title: Option<String>,
    pub description: Option<String>,
    pub excerpt: Option<String>,
    pub date: Option<String>,
    pub date_published: Option<String>,
    #[serde(default, deserialize_with = "string_or_number")]
    pub year: Option<String>,
    pub tags: Option<TagsField>,
    pub cover_image: Option<String>,
    pub og_image: Option<String>,
    pub reading_time: Option<String>,
    pub author: Option<String>,
    pub content_html: Option<String>,
    pub content_html_en: Option<String>,
}

/// Tags arrive either as a JSON array or as one comma-separated string.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum TagsField {
    List(Vec<String>),
    Text(String),
}

#[derive(Debug, Clone)]
pub struct SiteConfig {
    pub site: SiteMeta,
    pub posts: Vec<PostRecord>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            site: SiteMeta {
                base_url: String::new(),
                title: DEFAULT_SITE_TITLE.to_string(),
                description: String::new(),
                author: DEFAULT_AUTHOR.to_string(),
                static_paths: DEFAULT_STATIC_PATHS
                    .iter()
                    .map(|path| path.to_string())
                    .collect(),
            },
            posts: Vec::new(),
        }
    }
}

pub fn load_site_config(path: &Path) -> Result<SiteConfig> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read config {}", path.display()))?;
    let parsed: SiteConfigRaw = serde_json::from_str(&raw)
        .with_context(|| format!("failed to parse JSON config {}", path.display()))?;

    let defaults = SiteConfig::default();
    let site = SiteMeta {
        base_url: parsed
            .site_url
            .map(|url| url.trim().to_string())
            .unwrap_or_default(),
        title: non_empty_or(parsed.site_title, defaults.site.title),
        description: parsed.site_description.unwrap_or_default(),
        author: non_empty_or(parsed.author, defaults.site.author),
        static_paths: parsed.static_paths.unwrap_or(defaults.site.static_paths),
    };

    Ok(SiteConfig {
        site,
        posts: parsed.posts,
    })
}

fn non_empty_or(value: Option<String>, default: String) -> String {
    match value {
        Some(text) if !text.trim().is_empty() => text,
        _ => default,
    }
}

/// JSON sources write `year` both as a string and as a bare number.
fn string_or_number<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum StringOrNumber {
        Text(String),
        Number(i64),
    }

    let value: Option<StringOrNumber> = Option::deserialize(deserializer)?;
    Ok(value.map(|year| match year {
        StringOrNumber::Text(text) => text,
        StringOrNumber::Number(number) => number.to_string(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write_temp(dir: &TempDir, contents: &str) -> std::path::PathBuf {
        let path = dir.path().join("site.json");
        fs::write(&path, contents).expect("write temp config");
        path
    }

    #[test]
    fn loads_full_config() {
        let temp = TempDir::new().expect("tempdir");
        let path = write_temp(
            &temp,
            r#"{
                "siteUrl": "https://example.com",
                "author": "Jane",
                "siteTitle": "Example",
                "siteDescription": "A site",
                "posts": [
                    {"slug": "a", "title": "A", "year": 2024, "tags": "x, y"},
                    {"slug": "b", "tags": ["p", "q"], "contentHtml": "<p>B</p>"}
                ]
            }"#,
        );
        let config = load_site_config(&path).expect("load config");

        assert_eq!(config.site.base_url, "https://example.com");
        assert_eq!(config.site.author, "Jane");
        assert_eq!(config.posts.len(), 2);
        assert_eq!(config.posts[0].year.as_deref(), Some("2024"));
        assert_eq!(
            config.posts[0].tags,
            Some(TagsField::Text("x, y".to_string()))
        );
        assert_eq!(
            config.posts[1].tags,
            Some(TagsField::List(vec!["p".to_string(), "q".to_string()]))
        );
    }

    #[test]
    fn defaults_apply_for_missing_fields() {
        let temp = TempDir::new().expect("tempdir");
        let path = write_temp(&temp, "{}");
        let config = load_site_config(&path).expect("load config");

        assert!(config.site.base_url.is_empty());
        assert_eq!(config.site.title, DEFAULT_SITE_TITLE);
        assert!(!config.site.static_paths.is_empty());
        assert!(config.posts.is_empty());
    }

    #[test]
    fn malformed_json_is_an_error() {
        let temp = TempDir::new().expect("tempdir");
        let path = write_temp(&temp, "{ not json");
        let err = load_site_config(&path).expect_err("expected parse error");
        assert!(err.to_string().contains("failed to parse JSON config"));
    }

    #[test]
    fn missing_file_is_an_error() {
        let err =
            load_site_config(Path::new("/nonexistent/site.json")).expect_err("expected error");
        assert!(err.to_string().contains("failed to read config"));
    }
}
