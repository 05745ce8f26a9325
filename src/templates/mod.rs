//! Handlebars templates of the site
//!
//! A page is rendered in two passes: a section template produces the inner
//! HTML, which the layout template then wraps together with the page title
//! and the relative prefix for asset links.

use anyhow::{Context, Result};
use handlebars::Handlebars;
use serde::Serialize;
use std::fs;

use crate::content::{Post, PostSummary};
use crate::source::{Slot, SourceManifest};

const LAYOUT: &str = "layout";
const POST_SECTION: &str = "post-section";
const LIST_SECTION: &str = "list-section";

/// Data handed to the layout template
#[derive(Debug, Clone, Serialize)]
pub struct LayoutData<'a> {
    /// Rendered section HTML, embedded raw with `{{{section}}}`
    pub section: &'a str,
    /// Prefix for asset links, `../` for pages one directory deep
    pub path: &'a str,
    /// Page title
    pub title: &'a str,
}

/// Data handed to the list section template
#[derive(Debug, Clone, Serialize)]
pub struct ListData<'a> {
    pub post: &'a [PostSummary],
}

/// Template renderer holding the three site templates
pub struct TemplateRenderer {
    registry: Handlebars<'static>,
}

impl TemplateRenderer {
    /// Create a renderer from template sources
    pub fn new(layout: &str, post_section: &str, list_section: &str) -> Result<Self> {
        let mut registry = Handlebars::new();

        for (name, slot, source) in [
            (LAYOUT, Slot::Layout, layout),
            (POST_SECTION, Slot::PostSection, post_section),
            (LIST_SECTION, Slot::ListSection, list_section),
        ] {
            registry
                .register_template_string(name, source)
                .with_context(|| format!("Invalid {}", slot))?;
        }

        Ok(Self { registry })
    }

    /// Read the templates named by the manifest
    pub fn load(manifest: &SourceManifest) -> Result<Self> {
        let read = |path: &std::path::Path, slot: Slot| {
            fs::read_to_string(path).with_context(|| format!("Failed to read {} {:?}", slot, path))
        };

        Self::new(
            &read(&manifest.layout, Slot::Layout)?,
            &read(&manifest.post_section, Slot::PostSection)?,
            &read(&manifest.list_section, Slot::ListSection)?,
        )
    }

    /// Render the section of a single post
    pub fn render_post(&self, post: &Post) -> Result<String> {
        Ok(self.registry.render(POST_SECTION, post)?)
    }

    /// Render the section listing all posts
    pub fn render_list(&self, posts: &[PostSummary]) -> Result<String> {
        Ok(self.registry.render(LIST_SECTION, &ListData { post: posts })?)
    }

    /// Wrap a rendered section in the layout
    pub fn render_layout(&self, data: &LayoutData<'_>) -> Result<String> {
        Ok(self.registry.render(LAYOUT, data)?)
    }
}
