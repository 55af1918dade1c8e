//! `{{KEY}}` template substitution
//!
//! A single, non-recursive pass: replacement values are never re-scanned for
//! further placeholders, and unknown keys resolve to the empty string.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::markdown::escape_html;
use crate::model::{Post, SiteMeta, base_url_join};

static PLACEHOLDER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{\{([A-Z0-9_]+)\}\}").expect("placeholder pattern"));

const DEFAULT_OG_IMAGE: &str = "/assets/images/og/default.jpg";

pub type PlaceholderMap = BTreeMap<&'static str, String>;

pub fn render_template(template: &str, values: &PlaceholderMap) -> String {
    PLACEHOLDER_RE
        .replace_all(template, |caps: &Captures| {
            values.get(&caps[1]).cloned().unwrap_or_default()
        })
        .into_owned()
}

/// Builds the substitution map for one post page. Free-text values are
/// HTML-escaped here; `CONTENT_HTML` and `COVER_BLOCK` are pre-rendered HTML
/// and inserted raw.
pub fn post_placeholders(post: &Post, site: &SiteMeta) -> PlaceholderMap {
    let canonical = base_url_join(&site.base_url, &post.page_path());
    let alt_en = base_url_join(
        &site.base_url,
        &format!("/en/blog/{}.html", post.slug),
    );
    let cover_block = post
        .cover_image
        .as_deref()
        .map(|src| {
            format!(
                "<div class=\"post-cover\"><img src=\"{}\" alt=\"Cover\" loading=\"lazy\" /></div>",
                escape_html(src)
            )
        })
        .unwrap_or_default();
    let tags_text = if post.tags.is_empty() {
        "Blog".to_string()
    } else {
        post.tags.join(" \u{2022} ")
    };
    let og_image = post
        .og_image
        .as_deref()
        .or(post.cover_image.as_deref())
        .unwrap_or(DEFAULT_OG_IMAGE);

    let mut values = PlaceholderMap::new();
    values.insert("SLUG", escape_html(&post.slug));
    values.insert("TITLE", escape_html(&post.title));
    values.insert("DESCRIPTION", escape_html(&post.description));
    values.insert("YEAR", escape_html(&post.year));
    values.insert("READING_TIME", escape_html(&post.reading_time));
    values.insert("AUTHOR", escape_html(&post.author));
    values.insert("TAGS_TEXT", escape_html(&tags_text));
    values.insert("CANONICAL_URL", escape_html(&canonical));
    values.insert("ALT_EN_URL", escape_html(&alt_en));
    values.insert("OG_IMAGE", escape_html(og_image));
    values.insert(
        "DATE_PUBLISHED",
        escape_html(post.date_published.as_deref().unwrap_or("")),
    );
    values.insert("CONTENT_HTML", post.content_html.clone());
    values.insert("COVER_BLOCK", cover_block);
    values.insert("TOC_BLOCK", String::new());
    values.insert("PREV_BLOCK", String::new());
    values.insert("NEXT_BLOCK", String::new());
    values.insert("NEXT_URL", String::new());
    values.insert("NEXT_LABEL", String::new());
    values
}

/// Renders one full post page from the shared template.
pub fn render_post_page(template: &str, post: &Post, site: &SiteMeta) -> String {
    render_template(template, &post_placeholders(post, site))
}
