//! Content loader - reads post sources and converts them

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

use super::{MarkdownRenderer, Post};
use crate::Site;

/// Loads posts from the source directory
pub struct ContentLoader<'a> {
    site: &'a Site,
    renderer: MarkdownRenderer,
}

impl<'a> ContentLoader<'a> {
    /// Create a new content loader
    pub fn new(site: &'a Site) -> Self {
        Self {
            site,
            renderer: MarkdownRenderer::new(),
        }
    }

    /// Load a single post from a file
    pub fn load_post(&self, path: &Path) -> Result<Post> {
        let content =
            fs::read_to_string(path).with_context(|| format!("Failed to read {:?}", path))?;
        let converted = self.renderer.convert(&content);

        if converted.metadata.title.is_none() {
            tracing::warn!("Post {:?} has no title", path);
        }
        if converted.metadata.date.is_none() {
            tracing::warn!("Post {:?} has no date", path);
        }

        // Source path relative to the source dir, e.g. posts/hello.md
        let source = path.strip_prefix(&self.site.source_dir).unwrap_or(path);

        let post = Post::new(converted, source, &self.site.config.date_format);
        tracing::debug!("Loaded post {:?} -> {}", path, post.slug);
        Ok(post)
    }
}
