//! Sitemap and RSS emission
//!
//! Both feeds need an absolute base URL; without one there is no meaningful
//! output, so each generator returns `None` and the caller warns and skips.

use std::collections::HashSet;

use crate::listing::sort_newest;
use crate::model::{Post, SiteMeta, base_url_join};

pub fn render_sitemap(site: &SiteMeta, posts: &[Post]) -> Option<String> {
    if site.base_url.trim().is_empty() {
        return None;
    }

    let mut locations = Vec::new();
    let mut seen = HashSet::new();
    for path in &site.static_paths {
        let loc = base_url_join(&site.base_url, path);
        if seen.insert(loc.clone()) {
            locations.push(loc);
        }
    }
    for post in posts {
        let loc = base_url_join(&site.base_url, &post.page_path());
        if seen.insert(loc.clone()) {
            locations.push(loc);
        }
    }

    let mut out = String::new();
    out.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
    out.push_str("<urlset xmlns=\"http://www.sitemaps.org/schemas/sitemap/0.9\">\n");
    for loc in locations {
        out.push_str("<url>\n");
        out.push_str(&format!("<loc>{}</loc>\n", escape_xml(&loc)));
        out.push_str("</url>\n");
    }
    out.push_str("</urlset>\n");
    Some(out)
}

pub fn render_rss(site: &SiteMeta, posts: &[Post]) -> Option<String> {
    if site.base_url.trim().is_empty() {
        return None;
    }

    let mut items: Vec<Post> = posts.to_vec();
    sort_newest(&mut items);

    let mut out = String::new();
    out.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
    out.push_str("<rss version=\"2.0\">\n");
    out.push_str("<channel>\n");
    out.push_str(&format!("<title>{}</title>\n", escape_xml(&site.title)));
    out.push_str(&format!("<link>{}</link>\n", escape_xml(&site.base_url)));
    out.push_str(&format!(
        "<description>{}</description>\n",
        escape_xml(&site.description)
    ));

    for post in &items {
        let link = base_url_join(&site.base_url, &post.page_path());
        out.push_str("<item>\n");
        out.push_str(&format!("<title>{}</title>\n", escape_xml(&post.title)));
        out.push_str(&format!("<link>{}</link>\n", escape_xml(&link)));
        out.push_str(&format!("<guid>{}</guid>\n", escape_xml(&link)));
        out.push_str(&format!(
            "<description>{}</description>\n",
            escape_xml(&post.excerpt)
        ));
        out.push_str("</item>\n");
    }

    out.push_str("</channel>\n</rss>\n");
    Some(out)
}

fn escape_xml(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(ch),
        }
    }
    out
}
