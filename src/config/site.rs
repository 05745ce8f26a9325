//! Site configuration (_config.yml)

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Main site configuration
///
/// Every field has a default matching the conventional source layout, so a
/// site without `_config.yml` builds from `src/` into `build/`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    // Directory
    pub source_dir: String,
    pub build_dir: String,
    pub posts_dir: String,

    // Titles
    pub title: String,
    pub title_separator: String,

    // Date display format (chrono)
    pub date_format: String,

    // Output
    pub minify: bool,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            source_dir: "src".to_string(),
            build_dir: "build".to_string(),
            posts_dir: "posts".to_string(),

            title: "Blog".to_string(),
            title_separator: " | ".to_string(),

            date_format: "%b %d, %Y".to_string(),

            minify: true,
        }
    }
}

impl SiteConfig {
    /// Load configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content =
            fs::read_to_string(path).with_context(|| format!("Failed to read {:?}", path))?;
        let config: SiteConfig = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse {:?}", path))?;
        tracing::debug!("Loaded configuration from {:?}", path);
        Ok(config)
    }

    /// Page title of a rendered post
    pub fn post_title(&self, title: &str) -> String {
        format!("{}{}{}", self.title, self.title_separator, title)
    }
}
