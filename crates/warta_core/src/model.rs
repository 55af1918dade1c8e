//! Post records and site metadata

use crate::config::{PostRecord, TagsField};
use crate::frontmatter::{FieldValue, parse_front_matter};
use crate::markdown::{render_markdown, strip_tags};

/// The two languages every post is rendered for.
pub const LANGUAGES: [&str; 2] = ["id", "en"];

pub const DEFAULT_READING_TIME: &str = "\u{2014}";
const EXCERPT_MAX_CHARS: usize = 140;
const PLACEHOLDER_CONTENT: &str = "<p class=\"lead\">(Tulis konten di sini)</p>";

/// Site-wide metadata shared by every rendering step. `base_url` may be
/// empty, in which case feed generation is skipped by the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteMeta {
    pub base_url: String,
    pub title: String,
    pub description: String,
    pub author: String,
    pub static_paths: Vec<String>,
}

/// Normalized representation of one blog post, assembled once per run and
/// used to drive every rendering step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Post {
    pub lang: String,
    pub slug: String,
    pub title: String,
    pub description: String,
    pub excerpt: String,
    pub date_published: Option<String>,
    pub year: String,
    pub date_label: String,
    pub reading_time: String,
    pub tags: Vec<String>,
    pub tags_slug: String,
    pub cover_image: Option<String>,
    pub og_image: Option<String>,
    pub author: String,
    pub content_html: String,
}

impl Post {
    /// Builds a post from a Markdown source document. The slug comes from the
    /// source filename and doubles as the output filename.
    pub fn from_markdown(slug: &str, raw: &str, lang: &str, site: &SiteMeta) -> Self {
        let doc = parse_front_matter(raw);
        let meta = &doc.meta;

        let title = non_empty(meta.scalar("title")).unwrap_or_else(|| slug.to_string());
        let description = non_empty(meta.scalar("description"))
            .or_else(|| non_empty(meta.scalar("excerpt")))
            .unwrap_or_default();
        let date_published =
            non_empty(meta.scalar("date")).or_else(|| non_empty(meta.scalar("datePublished")));
        let year = year_of(date_published.as_deref())
            .or_else(|| non_empty(meta.scalar("year")))
            .unwrap_or_default();
        let tags = normalize_front_matter_tags(meta.get("tags"));
        let cover_image = non_empty(meta.scalar("coverImage"))
            .or_else(|| non_empty(meta.scalar("cover")))
            .or_else(|| non_empty(meta.scalar("image")));
        let reading_time = non_empty(meta.scalar("readingTime"))
            .or_else(|| non_empty(meta.scalar("readTime")))
            .unwrap_or_else(|| DEFAULT_READING_TIME.to_string());
        let author = non_empty(meta.scalar("author")).unwrap_or_else(|| site.author.clone());
        let og_image = non_empty(meta.scalar("ogImage"));

        let rendered = render_markdown(&doc.body);
        let content_html = if rendered.is_empty() {
            PLACEHOLDER_CONTENT.to_string()
        } else {
            rendered
        };
        let excerpt = if description.is_empty() {
            truncate_chars(&strip_tags(&content_html), EXCERPT_MAX_CHARS)
        } else {
            description.clone()
        };

        Self {
            lang: lang.to_string(),
            slug: slug.to_string(),
            title,
            description,
            excerpt,
            date_published,
            date_label: year.clone(),
            year,
            reading_time,
            tags_slug: tags_slug_from_tags(&tags),
            tags,
            cover_image,
            og_image,
            author,
            content_html,
        }
    }

    /// Builds a post from one record of the JSON collection. The record
    /// carries pre-rendered HTML; the English page uses `contentHtmlEn`
    /// when present and falls back to the primary content otherwise.
    pub fn from_json(record: &PostRecord, lang: &str, site: &SiteMeta) -> Self {
        let title = non_empty(record.title.as_deref()).unwrap_or_else(|| record.slug.clone());
        let description = non_empty(record.description.as_deref())
            .or_else(|| non_empty(record.excerpt.as_deref()))
            .unwrap_or_default();
        let date_published = non_empty(record.date_published.as_deref())
            .or_else(|| non_empty(record.date.as_deref()));
        let year = year_of(date_published.as_deref())
            .or_else(|| record.year.clone())
            .unwrap_or_default();
        let tags = record
            .tags
            .as_ref()
            .map(normalize_tags)
            .unwrap_or_default();

        let raw_content = if lang == "en" {
            record
                .content_html_en
                .as_deref()
                .or(record.content_html.as_deref())
        } else {
            record.content_html.as_deref()
        };
        let content_html = non_empty(raw_content)
            .unwrap_or_else(|| PLACEHOLDER_CONTENT.to_string());
        let excerpt = if description.is_empty() {
            truncate_chars(&strip_tags(&content_html), EXCERPT_MAX_CHARS)
        } else {
            description.clone()
        };

        Self {
            lang: lang.to_string(),
            slug: record.slug.clone(),
            title,
            description,
            excerpt,
            date_published,
            date_label: year.clone(),
            year,
            reading_time: non_empty(record.reading_time.as_deref())
                .unwrap_or_else(|| DEFAULT_READING_TIME.to_string()),
            tags_slug: tags_slug_from_tags(&tags),
            tags,
            cover_image: non_empty(record.cover_image.as_deref()),
            og_image: non_empty(record.og_image.as_deref()),
            author: non_empty(record.author.as_deref()).unwrap_or_else(|| site.author.clone()),
            content_html,
        }
    }

    /// Site-relative path of the rendered page.
    pub fn page_path(&self) -> String {
        format!("/{}/blog/{}.html", self.lang, self.slug)
    }
}

/// Joins a base URL and a site-relative path with exactly one slash between.
/// An empty base yields a root-relative path.
pub fn base_url_join(base_url: &str, path: &str) -> String {
    let base = base_url.trim_end_matches('/');
    let path = path.trim_start_matches('/');
    format!("{base}/{path}")
}

/// Accepts either a list of strings or one comma-separated string; entries
/// are trimmed and empty ones dropped.
pub fn normalize_tags(tags: &TagsField) -> Vec<String> {
    match tags {
        TagsField::List(items) => items
            .iter()
            .map(|tag| tag.trim())
            .filter(|tag| !tag.is_empty())
            .map(str::to_string)
            .collect(),
        TagsField::Text(text) => text
            .split(',')
            .map(str::trim)
            .filter(|tag| !tag.is_empty())
            .map(str::to_string)
            .collect(),
    }
}

fn normalize_front_matter_tags(value: Option<&FieldValue>) -> Vec<String> {
    match value {
        Some(FieldValue::List(items)) => normalize_tags(&TagsField::List(items.clone())),
        Some(FieldValue::Scalar(text)) => normalize_tags(&TagsField::Text(text.clone())),
        None => Vec::new(),
    }
}

/// Lowercase space-joined token string used for client-side tag filtering.
pub fn tags_slug_from_tags(tags: &[String]) -> String {
    tags.iter()
        .map(|tag| tag.trim().to_lowercase())
        .filter(|tag| !tag.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

fn year_of(date: Option<&str>) -> Option<String> {
    date.map(|value| value.chars().take(4).collect::<String>())
        .filter(|year| !year.is_empty())
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value
        .filter(|text| !text.is_empty())
        .map(str::to_string)
}

fn truncate_chars(text: &str, max_chars: usize) -> String {
    text.chars().take(max_chars).collect()
}
