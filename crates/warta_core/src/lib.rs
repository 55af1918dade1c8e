//! Core pipeline for the warta static blog generator: front-matter parsing,
//! minimal Markdown rendering, post records, template substitution, listing
//! splicing and feed emission.

pub mod config;
pub mod feeds;
pub mod frontmatter;
pub mod listing;
pub mod markdown;
pub mod model;
pub mod templates;
