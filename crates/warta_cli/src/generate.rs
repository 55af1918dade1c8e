//! The batch generation pipeline: read all inputs, transform in memory,
//! write all outputs. Fully synchronous; every output file is rewritten
//! from scratch on each run.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use warta_core::config::{SiteConfig, load_site_config};
use warta_core::feeds::{render_rss, render_sitemap};
use warta_core::listing::{render_listing, splice_between_markers};
use warta_core::model::{LANGUAGES, Post, SiteMeta};
use warta_core::templates::render_post_page;

use crate::walk;

pub fn run(root: &Path, out: &Path) -> Result<()> {
    let config = load_config(root)?;

    let template_path = root.join("templates").join("post.template.html");
    let template = fs::read_to_string(&template_path)
        .with_context(|| format!("failed to read template {}", template_path.display()))?;

    let mut all_posts = Vec::new();
    for lang in LANGUAGES {
        let posts = collect_posts(root, &config, lang)?;
        let out_dir = out.join(lang).join("blog");
        fs::create_dir_all(&out_dir)
            .with_context(|| format!("failed to create {}", out_dir.display()))?;

        for post in &posts {
            let page = render_post_page(&template, post, &config.site);
            let page_path = out_dir.join(format!("{}.html", post.slug));
            fs::write(&page_path, page)
                .with_context(|| format!("failed to write {}", page_path.display()))?;
            println!("generated /{lang}/blog/{}.html", post.slug);
        }

        update_listing(&out_dir.join("index.html"), &posts, lang)?;
        all_posts.extend(posts);
    }

    write_feeds(out, &config.site, &all_posts)?;
    Ok(())
}

fn load_config(root: &Path) -> Result<SiteConfig> {
    let config_path = root.join("site.json");
    if !config_path.exists() {
        return Ok(SiteConfig::default());
    }
    load_site_config(&config_path)
}

/// Markdown sources first, then the JSON collection; on a slug collision the
/// later record wins when its page is written.
fn collect_posts(root: &Path, config: &SiteConfig, lang: &str) -> Result<Vec<Post>> {
    let posts_dir = root.join("content").join("posts").join(lang);
    let mut posts = Vec::new();

    for path in walk::list_markdown_posts(&posts_dir) {
        let raw = fs::read_to_string(&path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        let slug = walk::slug_from_filename(&path);
        posts.push(Post::from_markdown(&slug, &raw, lang, &config.site));
    }

    for record in &config.posts {
        posts.push(Post::from_json(record, lang, &config.site));
    }

    Ok(posts)
}

/// A missing listing page or bad sentinel markers abort this file's update
/// only; the rest of the run proceeds.
fn update_listing(index_path: &Path, posts: &[Post], lang: &str) -> Result<()> {
    if !index_path.exists() {
        eprintln!(
            "warning: skipped {lang} listing, file not found: {}",
            index_path.display()
        );
        return Ok(());
    }
    let html = fs::read_to_string(index_path)
        .with_context(|| format!("failed to read {}", index_path.display()))?;
    let block = render_listing(posts);
    match splice_between_markers(&html, &block) {
        Ok(updated) => {
            fs::write(index_path, updated)
                .with_context(|| format!("failed to write {}", index_path.display()))?;
            println!("updated /{lang}/blog/index.html");
        }
        Err(err) => {
            eprintln!(
                "warning: skipped {lang} listing {}: {err}",
                index_path.display()
            );
        }
    }
    Ok(())
}

fn write_feeds(out: &Path, site: &SiteMeta, posts: &[Post]) -> Result<()> {
    match render_sitemap(site, posts) {
        Some(sitemap) => {
            let path = out.join("sitemap.xml");
            fs::write(&path, sitemap)
                .with_context(|| format!("failed to write {}", path.display()))?;
            println!("generated /sitemap.xml");
        }
        None => eprintln!("warning: siteUrl is not set, skipping sitemap.xml"),
    }
    match render_rss(site, posts) {
        Some(rss) => {
            let path = out.join("rss.xml");
            fs::write(&path, rss)
                .with_context(|| format!("failed to write {}", path.display()))?;
            println!("generated /rss.xml");
        }
        None => eprintln!("warning: siteUrl is not set, skipping rss.xml"),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;
    use warta_core::listing::{POSTS_END, POSTS_START};

    const TEMPLATE: &str =
        "<title>{{TITLE}}</title>{{COVER_BLOCK}}<main>{{CONTENT_HTML}}</main><p>{{MISSING}}</p>";

    fn write_file(path: &Path, contents: &str) {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, contents).unwrap();
    }

    fn write_fixture(root: &Path) {
        write_file(&root.join("templates/post.template.html"), TEMPLATE);
        write_file(
            &root.join("site.json"),
            r#"{
                "siteUrl": "https://example.com",
                "author": "Jane",
                "siteTitle": "Example",
                "siteDescription": "A site",
                "posts": [
                    {"slug": "from-json", "title": "From JSON", "year": "2023",
                     "contentHtml": "<p>Halo</p>", "contentHtmlEn": "<p>Hello</p>"}
                ]
            }"#,
        );
        write_file(
            &root.join("content/posts/id/hello.md"),
            "---\ntitle: \"Hello\"\ndate: \"2025-01-01\"\ntags:\n  - A\n  - B\n---\n# Hi\n\nSome **bold** text.",
        );
        write_file(
            &root.join("content/posts/en/hello.md"),
            "---\ntitle: \"Hello EN\"\ndate: \"2024-06-01\"\n---\nEnglish body.",
        );
        write_file(
            &root.join("id/blog/index.html"),
            &format!("<header>ID</header>\n{POSTS_START}\nstale\n{POSTS_END}\n<footer>keep</footer>"),
        );
    }

    #[test]
    fn generates_pages_listings_and_feeds() {
        let temp = TempDir::new().expect("tempdir");
        let root = temp.path();
        write_fixture(root);

        run(root, root).expect("run");

        let id_page = fs::read_to_string(root.join("id/blog/hello.html")).expect("id page");
        assert!(id_page.contains("<title>Hello</title>"));
        assert!(id_page.contains("<h1>Hi</h1>\n<p>Some <strong>bold</strong> text.</p>"));
        assert!(id_page.contains("<p></p>"));

        let en_json_page =
            fs::read_to_string(root.join("en/blog/from-json.html")).expect("en json page");
        assert!(en_json_page.contains("<p>Hello</p>"));
        let id_json_page =
            fs::read_to_string(root.join("id/blog/from-json.html")).expect("id json page");
        assert!(id_json_page.contains("<p>Halo</p>"));

        let listing = fs::read_to_string(root.join("id/blog/index.html")).expect("listing");
        assert!(listing.starts_with("<header>ID</header>\n"));
        assert!(listing.ends_with("<footer>keep</footer>"));
        assert!(!listing.contains("stale"));
        let dated_at = listing.find("/id/blog/hello.html").expect("dated item");
        let year_only_at = listing.find("/id/blog/from-json.html").expect("year item");
        assert!(dated_at < year_only_at);

        let sitemap = fs::read_to_string(root.join("sitemap.xml")).expect("sitemap");
        assert!(sitemap.contains("<loc>https://example.com/id/blog/hello.html</loc>"));
        assert!(sitemap.contains("<loc>https://example.com/en/blog/from-json.html</loc>"));

        let rss = fs::read_to_string(root.join("rss.xml")).expect("rss");
        assert!(rss.contains("<title>Example</title>"));
        assert!(rss.contains("<guid>https://example.com/id/blog/hello.html</guid>"));
    }

    #[test]
    fn missing_template_is_fatal() {
        let temp = TempDir::new().expect("tempdir");
        let root = temp.path();
        write_file(&root.join("content/posts/id/a.md"), "Body");

        let err = run(root, root).expect_err("expected error");
        assert!(err.to_string().contains("failed to read template"));
    }

    #[test]
    fn malformed_config_is_fatal() {
        let temp = TempDir::new().expect("tempdir");
        let root = temp.path();
        write_file(&root.join("templates/post.template.html"), TEMPLATE);
        write_file(&root.join("site.json"), "{ not json");

        let err = run(root, root).expect_err("expected error");
        assert!(err.to_string().contains("failed to parse JSON config"));
    }

    #[test]
    fn missing_listing_file_is_only_a_warning() {
        let temp = TempDir::new().expect("tempdir");
        let root = temp.path();
        write_file(&root.join("templates/post.template.html"), TEMPLATE);
        write_file(&root.join("content/posts/id/a.md"), "---\ntitle: A\n---\nBody");

        run(root, root).expect("run succeeds without listing files");
        assert!(root.join("id/blog/a.html").exists());
    }

    #[test]
    fn bad_sentinels_leave_the_listing_untouched() {
        let temp = TempDir::new().expect("tempdir");
        let root = temp.path();
        write_file(&root.join("templates/post.template.html"), TEMPLATE);
        write_file(&root.join("content/posts/id/a.md"), "---\ntitle: A\n---\nBody");
        let reversed = format!("{POSTS_END}\ncontent\n{POSTS_START}");
        write_file(&root.join("id/blog/index.html"), &reversed);

        run(root, root).expect("run succeeds despite bad markers");
        let after = fs::read_to_string(root.join("id/blog/index.html")).expect("listing");
        assert_eq!(after, reversed);
    }

    #[test]
    fn feeds_are_skipped_without_site_url() {
        let temp = TempDir::new().expect("tempdir");
        let root = temp.path();
        write_file(&root.join("templates/post.template.html"), TEMPLATE);
        write_file(&root.join("content/posts/id/a.md"), "---\ntitle: A\n---\nBody");

        run(root, root).expect("run");
        assert!(!root.join("sitemap.xml").exists());
        assert!(!root.join("rss.xml").exists());
    }

    #[test]
    fn out_dir_can_differ_from_source_dir() {
        let temp = TempDir::new().expect("tempdir");
        let root = temp.path().join("src");
        let out = temp.path().join("out");
        write_fixture(&root);

        run(&root, &out).expect("run");
        assert!(out.join("id/blog/hello.html").exists());
        assert!(out.join("sitemap.xml").exists());
        // The listing fixture lives in the source tree, not the out tree,
        // so the out-tree update is skipped with a warning.
        assert!(!out.join("id/blog/index.html").exists());
    }
}
