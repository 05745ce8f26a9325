//! Generator module - builds the site from the source tree
//!
//! A build runs these phases in order, each relying on the previous one:
//!
//! 1. clean: the build directory is deleted and recreated with `posts/`
//! 2. discover: the source tree is walked and classified into a manifest
//! 3. style: the stylesheet is minified into the build directory
//! 4. posts: every post is rendered and written, then the listing
//! 5. pages: static HTML pages are minified into the build directory
//!
//! Layout errors in phases 1-2 abort the build. From phase 3 on, a failing
//! file is logged and counted while its siblings are still written.

mod output;

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

use crate::content::loader::ContentLoader;
use crate::content::{sort_newest_first, Post, PostSummary};
use crate::minify::Minifier;
use crate::source::{list_files, SourceManifest};
use crate::templates::{LayoutData, TemplateRenderer};
use crate::Site;

pub use output::{Output, WriteSummary, Writes};

/// Name of the listing page in the build root
pub const INDEX_FILE: &str = "index.html";

/// Asset link prefix of post pages, which sit one directory below the root
const POST_ASSET_PREFIX: &str = "../";

/// What a build produced
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct BuildReport {
    /// Post pages written
    pub posts: usize,
    /// Static pages written
    pub pages: usize,
    /// Whether the stylesheet was written
    pub stylesheet: bool,
    /// Whether the listing page was written
    pub index: bool,
    /// Files that could not be read, rendered or written
    pub failed: usize,
}

/// Static site generator
pub struct Generator<'a> {
    site: &'a Site,
    minifier: Minifier,
}

impl<'a> Generator<'a> {
    /// Create a new generator
    pub fn new(site: &'a Site) -> Self {
        Self {
            site,
            minifier: Minifier::new(site.config.minify),
        }
    }

    /// Generate the entire site
    pub async fn generate(&self) -> Result<BuildReport> {
        self.prepare_build_dir()?;

        let files = list_files(&self.site.source_dir)?;
        let manifest = SourceManifest::resolve(&files, &self.site.posts_source_dir())?;
        let templates = TemplateRenderer::load(&manifest)?;
        tracing::info!(
            "Found {} posts and {} pages in {:?}",
            manifest.posts.len(),
            manifest.pages.len(),
            self.site.source_dir
        );

        let mut report = BuildReport::default();
        self.generate_stylesheet(&manifest, &mut report).await?;
        self.generate_posts(&manifest, &templates, &mut report).await?;
        self.generate_pages(&manifest, &mut report).await?;

        Ok(report)
    }

    /// Delete the build directory and recreate it with its posts directory
    fn prepare_build_dir(&self) -> Result<()> {
        crate::commands::clean::run(self.site)?;

        let posts_dir = self.site.posts_build_dir();
        fs::create_dir_all(&posts_dir)
            .with_context(|| format!("Failed to create {:?}", posts_dir))?;
        Ok(())
    }

    async fn generate_stylesheet(
        &self,
        manifest: &SourceManifest,
        report: &mut BuildReport,
    ) -> Result<()> {
        for extra in &manifest.extra_stylesheets {
            tracing::warn!("Ignoring additional stylesheet {:?}", extra);
        }

        let mut writes = Writes::new(self.minifier);
        writes.spawn(
            Output::Stylesheet(manifest.stylesheet.clone()),
            self.output_path(&manifest.stylesheet)?,
        );
        let summary = writes.join().await;

        report.stylesheet = summary.written == 1;
        report.failed += summary.failed;
        Ok(())
    }

    /// Render every post, wait for their writes, then write the listing
    async fn generate_posts(
        &self,
        manifest: &SourceManifest,
        templates: &TemplateRenderer,
        report: &mut BuildReport,
    ) -> Result<()> {
        let loader = ContentLoader::new(self.site);
        let mut writes = Writes::new(self.minifier);
        let mut summaries: Vec<PostSummary> = Vec::with_capacity(manifest.posts.len());

        for path in &manifest.posts {
            let post = match loader.load_post(path) {
                Ok(post) => post,
                Err(e) => {
                    tracing::error!("Failed to load post {:?}: {:#}", path, e);
                    report.failed += 1;
                    continue;
                }
            };

            match self.render_post_page(templates, &post) {
                Ok(html) => {
                    writes.spawn(Output::Rendered(html), self.site.build_dir.join(&post.slug));
                    summaries.push(post.summary());
                }
                Err(e) => {
                    tracing::error!("Failed to render post {:?}: {:#}", path, e);
                    report.failed += 1;
                }
            }
        }

        let summary = writes.join().await;
        report.posts = summary.written;
        report.failed += summary.failed;
        tracing::info!("Generated {} posts", summary.written);

        sort_newest_first(&mut summaries);
        let index = self.render_index_page(templates, &summaries)?;

        let mut writes = Writes::new(self.minifier);
        writes.spawn(Output::Rendered(index), self.site.build_dir.join(INDEX_FILE));
        let summary = writes.join().await;
        report.index = summary.written == 1;
        report.failed += summary.failed;

        Ok(())
    }

    fn render_post_page(&self, templates: &TemplateRenderer, post: &Post) -> Result<String> {
        let section = templates.render_post(post)?;
        let title = self.site.config.post_title(&post.title);
        templates.render_layout(&LayoutData {
            section: &section,
            path: POST_ASSET_PREFIX,
            title: &title,
        })
    }

    fn render_index_page(
        &self,
        templates: &TemplateRenderer,
        posts: &[PostSummary],
    ) -> Result<String> {
        let section = templates
            .render_list(posts)
            .context("Failed to render the post listing")?;
        templates.render_layout(&LayoutData {
            section: &section,
            path: "",
            title: &self.site.config.title,
        })
    }

    /// Minify static pages into the build directory, no templates applied
    async fn generate_pages(
        &self,
        manifest: &SourceManifest,
        report: &mut BuildReport,
    ) -> Result<()> {
        let mut writes = Writes::new(self.minifier);
        for page in &manifest.pages {
            writes.spawn(Output::Page(page.clone()), self.output_path(page)?);
        }
        let summary = writes.join().await;

        report.pages = summary.written;
        report.failed += summary.failed;
        tracing::info!("Generated {} pages", summary.written);
        Ok(())
    }

    /// Build path of a source file, keeping its path below the source dir
    fn output_path(&self, source: &Path) -> Result<PathBuf> {
        let relative = source
            .strip_prefix(&self.site.source_dir)
            .with_context(|| format!("{:?} is outside the source directory", source))?;
        Ok(self.site.build_dir.join(relative))
    }
}
