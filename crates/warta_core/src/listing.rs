//! Blog listing fragments and sentinel splicing

use chrono::NaiveDate;
use thiserror::Error;

use crate::markdown::escape_html;
use crate::model::Post;

pub const POSTS_START: &str = "<!-- POSTS:START -->";
pub const POSTS_END: &str = "<!-- POSTS:END -->";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ListingError {
    #[error("missing sentinel marker {0}")]
    MissingSentinel(&'static str),
    #[error("sentinel markers out of order")]
    MarkersOutOfOrder,
}

/// One post-preview anchor for the listing page.
pub fn render_list_item(post: &Post) -> String {
    let href = format!("/{}/blog/{}.html", post.lang, escape_html(&post.slug));
    let tag_text = if post.tags.is_empty() {
        "Blog".to_string()
    } else {
        post.tags.join(" \u{2022} ")
    };
    let date_label = if post.date_label.is_empty() {
        post.year.as_str()
    } else {
        post.date_label.as_str()
    };

    format!(
        r#"<a class="blog-item" href="{href}" data-tags="{data_tags}">
  <div class="blog-left">
    <p class="blog-tag">{tag_text}</p>
    <h2 class="blog-title">{title}</h2>
    <p class="blog-excerpt">{excerpt}</p>
  </div>
  <div class="blog-right">
    <span class="blog-date">{date_label}</span>
    <span class="blog-read">{read}</span>
    <span class="work-arrow" aria-hidden="true">&#8594;</span>
  </div>
</a>"#,
        data_tags = escape_html(&post.tags_slug),
        tag_text = escape_html(&tag_text),
        title = escape_html(&post.title),
        excerpt = escape_html(&post.excerpt),
        date_label = escape_html(date_label),
        read = escape_html(&post.reading_time),
    )
}

/// Sorts newest-first: descending `date_published` when present, tie-broken
/// by descending numeric year. Date-less posts sort below any dated post.
pub fn sort_newest(posts: &mut [Post]) {
    posts.sort_by(|a, b| sort_key(b).cmp(&sort_key(a)));
}

fn sort_key(post: &Post) -> (Option<NaiveDate>, i64) {
    let date = post
        .date_published
        .as_deref()
        .and_then(|value| NaiveDate::parse_from_str(value, "%Y-%m-%d").ok());
    let year = post.year.parse::<i64>().unwrap_or(0);
    (date, year)
}

/// The full listing block: sorted preview fragments joined by newlines.
pub fn render_listing(posts: &[Post]) -> String {
    let mut sorted: Vec<Post> = posts.to_vec();
    sort_newest(&mut sorted);
    sorted
        .iter()
        .map(render_list_item)
        .collect::<Vec<_>>()
        .join("\n")
}

/// Replaces everything between the sentinel comments (exclusive) with
/// `block`, leaving all surrounding bytes untouched.
pub fn splice_between_markers(html: &str, block: &str) -> Result<String, ListingError> {
    let start = html
        .find(POSTS_START)
        .ok_or(ListingError::MissingSentinel(POSTS_START))?;
    let end = html
        .find(POSTS_END)
        .ok_or(ListingError::MissingSentinel(POSTS_END))?;
    if end < start {
        return Err(ListingError::MarkersOutOfOrder);
    }
    let before = &html[..start + POSTS_START.len()];
    let after = &html[end..];
    Ok(format!("{before}\n{block}\n{after}"))
}
