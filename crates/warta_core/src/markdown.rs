//! Minimal line-oriented Markdown rendering
//!
//! This is deliberately a small formatter: headings, flat ordered/unordered
//! lists, fenced code blocks, paragraphs, and the four inline forms (bold,
//! italic, inline code, links). No nested emphasis, no blockquotes, no
//! tables, no reference-style links.

use std::sync::LazyLock;

use regex::{Captures, Regex};

static HEADING_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(#{1,6})\s+(.*)$").expect("heading pattern"));
static ORDERED_ITEM_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*\d+\.\s+(.*)$").expect("ordered item pattern"));
static UNORDERED_ITEM_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*-\s+(.*)$").expect("unordered item pattern"));

static BOLD_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\*\*(.+?)\*\*").expect("bold pattern"));
static ITALIC_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\*(.+?)\*").expect("italic pattern"));
static CODE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"`(.+?)`").expect("inline code pattern"));
static LINK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[([^\]]+)\]\(([^)]+)\)").expect("link pattern"));

pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#039;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Strips HTML tags, replacing each with a space, and collapses whitespace.
pub fn strip_tags(html: &str) -> String {
    let mut text = String::with_capacity(html.len());
    let mut in_tag = false;
    for ch in html.chars() {
        match ch {
            '<' => {
                in_tag = true;
                text.push(' ');
            }
            '>' => in_tag = false,
            _ if !in_tag => text.push(ch),
            _ => {}
        }
    }
    collapse_whitespace(&text)
}

fn collapse_whitespace(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut prev_space = false;
    for ch in text.chars() {
        if ch.is_whitespace() {
            if !prev_space {
                out.push(' ');
                prev_space = true;
            }
        } else {
            out.push(ch);
            prev_space = false;
        }
    }
    out.trim().to_string()
}

/// Inline pass for a single line of text. Escaping runs first so the
/// substitution patterns only ever see escaped text, and bold runs before
/// italic so the single-asterisk pattern cannot eat half of a `**` span.
pub fn render_inline(text: &str) -> String {
    let escaped = escape_html(text);
    let bold = BOLD_RE.replace_all(&escaped, "<strong>$1</strong>");
    let italic = ITALIC_RE.replace_all(&bold, "<em>$1</em>");
    let code = CODE_RE.replace_all(&italic, "<code>$1</code>");
    LINK_RE
        .replace_all(&code, |caps: &Captures| {
            format!("<a href=\"{}\">{}</a>", &caps[2], &caps[1])
        })
        .into_owned()
}

/// Block-level rendering: a single stateful scan over the input lines.
/// Open lists and fenced code blocks are force-closed at end of input.
pub fn render_markdown(body: &str) -> String {
    let mut blocks: Vec<String> = Vec::new();
    let mut in_ul = false;
    let mut in_ol = false;
    let mut code_block: Option<String> = None;

    for line in body.lines() {
        if line.trim().starts_with("```") {
            match code_block.take() {
                None => {
                    close_lists(&mut blocks, &mut in_ul, &mut in_ol);
                    code_block = Some(String::from("<pre><code>"));
                }
                Some(mut block) => {
                    block.push_str("</code></pre>");
                    blocks.push(block);
                }
            }
            continue;
        }
        if let Some(block) = code_block.as_mut() {
            block.push_str(&escape_html(line));
            block.push('\n');
            continue;
        }

        if let Some(caps) = HEADING_RE.captures(line) {
            close_lists(&mut blocks, &mut in_ul, &mut in_ol);
            let level = caps[1].len();
            blocks.push(format!("<h{level}>{}</h{level}>", render_inline(&caps[2])));
            continue;
        }

        if let Some(caps) = ORDERED_ITEM_RE.captures(line) {
            if in_ul {
                blocks.push("</ul>".to_string());
                in_ul = false;
            }
            if !in_ol {
                blocks.push("<ol>".to_string());
                in_ol = true;
            }
            blocks.push(format!("<li>{}</li>", render_inline(&caps[1])));
            continue;
        }

        if let Some(caps) = UNORDERED_ITEM_RE.captures(line) {
            if in_ol {
                blocks.push("</ol>".to_string());
                in_ol = false;
            }
            if !in_ul {
                blocks.push("<ul>".to_string());
                in_ul = true;
            }
            blocks.push(format!("<li>{}</li>", render_inline(&caps[1])));
            continue;
        }

        if line.trim().is_empty() {
            close_lists(&mut blocks, &mut in_ul, &mut in_ol);
            continue;
        }

        close_lists(&mut blocks, &mut in_ul, &mut in_ol);
        blocks.push(format!("<p>{}</p>", render_inline(line)));
    }

    if let Some(mut block) = code_block.take() {
        block.push_str("</code></pre>");
        blocks.push(block);
    }
    close_lists(&mut blocks, &mut in_ul, &mut in_ol);

    blocks.join("\n")
}

fn close_lists(blocks: &mut Vec<String>, in_ul: &mut bool, in_ol: &mut bool) {
    if *in_ul {
        blocks.push("</ul>".to_string());
        *in_ul = false;
    }
    if *in_ol {
        blocks.push("</ol>".to_string());
        *in_ol = false;
    }
}
