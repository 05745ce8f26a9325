//! Post model

use chrono::NaiveDate;
use serde::Serialize;
use std::path::{Path, PathBuf};

use super::Converted;
use crate::helpers::{compact_tag, display_date, parse_post_date};

/// A rendered blog post
#[derive(Debug, Clone, Serialize)]
pub struct Post {
    /// Output path relative to the build directory, e.g. `posts/hello.html`
    pub slug: String,

    /// Post title
    pub title: String,

    /// Date compacted to `DDMMYYYY`
    pub tag: String,

    /// Rendered HTML content
    pub content: String,

    /// Display date, e.g. `Jun 15, 2023`
    pub date: String,

    /// Parsed publication date, used for ordering
    #[serde(skip)]
    pub published: Option<NaiveDate>,

    /// Source path relative to the source directory
    #[serde(skip)]
    pub source: PathBuf,
}

impl Post {
    /// Build a post from its converted source
    ///
    /// `source` is the post path relative to the source directory.
    /// Missing metadata degrades to empty strings.
    pub fn new(converted: Converted, source: &Path, date_format: &str) -> Self {
        let Converted { html, metadata } = converted;
        let raw_date = metadata.date.unwrap_or_default();
        let published = parse_post_date(&raw_date);
        let tag = if raw_date.trim().is_empty() {
            String::new()
        } else {
            compact_tag(&raw_date)
        };

        Self {
            slug: slug_for(source),
            title: metadata.title.unwrap_or_default(),
            tag,
            content: html,
            date: display_date(published, date_format),
            published,
            source: source.to_path_buf(),
        }
    }

    /// The entry this post contributes to the listing
    pub fn summary(&self) -> PostSummary {
        PostSummary {
            slug: self.slug.clone(),
            title: self.title.clone(),
            tag: self.tag.clone(),
            date: self.date.clone(),
            published: self.published,
        }
    }
}

/// A post as it appears on the listing page
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PostSummary {
    pub slug: String,
    pub title: String,
    pub tag: String,
    pub date: String,
    #[serde(skip)]
    pub published: Option<NaiveDate>,
}

/// Sort summaries newest first
///
/// The sort is stable, so posts sharing a date keep discovery order. Posts
/// without a parseable date go last.
pub fn sort_newest_first(posts: &mut [PostSummary]) {
    posts.sort_by(|a, b| match (a.published, b.published) {
        (Some(a), Some(b)) => b.cmp(&a),
        (Some(_), None) => std::cmp::Ordering::Less,
        (None, Some(_)) => std::cmp::Ordering::Greater,
        (None, None) => std::cmp::Ordering::Equal,
    });
}

/// Output path of a post: its source-relative path with `.html` for `.md`
///
/// Separators are normalized to `/` so the slug doubles as a link.
pub fn slug_for(source: &Path) -> String {
    source
        .with_extension("html")
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}
