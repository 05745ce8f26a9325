//! blog-builder: a one-shot static blog builder
//!
//! Reads Markdown posts, Handlebars templates, a stylesheet and plain HTML
//! pages from a source tree and writes a minified, deployable site to the
//! build directory. Every run starts from an empty build directory.

pub mod commands;
pub mod config;
pub mod content;
pub mod generator;
pub mod helpers;
pub mod minify;
pub mod source;
pub mod templates;

use anyhow::Result;
use std::path::{Path, PathBuf};

pub use generator::BuildReport;

/// Name of the optional configuration file in the base directory
pub const CONFIG_FILE: &str = "_config.yml";

/// The site being built
#[derive(Debug, Clone)]
pub struct Site {
    /// Site configuration
    pub config: config::SiteConfig,
    /// Base directory
    pub base_dir: PathBuf,
    /// Source directory
    pub source_dir: PathBuf,
    /// Build (output) directory
    pub build_dir: PathBuf,
}

impl Site {
    /// Create a new site from a base directory, loading `_config.yml` if present
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        let config_path = base_dir.join(CONFIG_FILE);

        let config = if config_path.exists() {
            config::SiteConfig::load(&config_path)?
        } else {
            config::SiteConfig::default()
        };

        Ok(Self::with_config(base_dir, config))
    }

    /// Create a site with an explicit configuration
    pub fn with_config<P: AsRef<Path>>(base_dir: P, config: config::SiteConfig) -> Self {
        let base_dir = base_dir.as_ref().to_path_buf();
        let source_dir = base_dir.join(&config.source_dir);
        let build_dir = base_dir.join(&config.build_dir);

        Self {
            config,
            base_dir,
            source_dir,
            build_dir,
        }
    }

    /// Source directory holding the posts
    pub fn posts_source_dir(&self) -> PathBuf {
        self.source_dir.join(&self.config.posts_dir)
    }

    /// Build directory receiving the rendered posts
    pub fn posts_build_dir(&self) -> PathBuf {
        self.build_dir.join(&self.config.posts_dir)
    }

    /// Clean the build directory and rebuild the whole site
    pub async fn build(&self) -> Result<BuildReport> {
        commands::build::run(self).await
    }

    /// Delete the build directory
    pub fn clean(&self) -> Result<()> {
        commands::clean::run(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_site_uses_default_layout() {
        let site = Site::new("/nonexistent/blog").unwrap();
        assert_eq!(site.source_dir, PathBuf::from("/nonexistent/blog/src"));
        assert_eq!(site.build_dir, PathBuf::from("/nonexistent/blog/build"));
        assert_eq!(
            site.posts_build_dir(),
            PathBuf::from("/nonexistent/blog/build/posts")
        );
    }

    #[test]
    fn test_site_reads_config_file() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join(CONFIG_FILE),
            "source_dir: content\nbuild_dir: public\n",
        )
        .unwrap();

        let site = Site::new(dir.path()).unwrap();
        assert_eq!(site.source_dir, dir.path().join("content"));
        assert_eq!(site.build_dir, dir.path().join("public"));
        assert_eq!(site.posts_source_dir(), dir.path().join("content/posts"));
    }
}
