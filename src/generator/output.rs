//! Output writes running as joined tasks

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tokio::task::JoinSet;

use crate::minify::{Minifier, MinifyType};

/// Something to be minified and written to the build directory
#[derive(Debug)]
pub enum Output {
    /// HTML rendered from templates
    Rendered(String),
    /// Static HTML page copied from the source tree
    Page(PathBuf),
    /// Stylesheet copied from the source tree
    Stylesheet(PathBuf),
}

/// Count of finished writes
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct WriteSummary {
    pub written: usize,
    pub failed: usize,
}

/// A batch of concurrent minify + write tasks
///
/// Each task owns exactly one destination path. A failed task is logged and
/// counted without affecting the others.
pub struct Writes {
    minifier: Minifier,
    tasks: JoinSet<(PathBuf, Result<()>)>,
}

impl Writes {
    pub fn new(minifier: Minifier) -> Self {
        Self {
            minifier,
            tasks: JoinSet::new(),
        }
    }

    /// Start writing `output` to `dest`
    pub fn spawn(&mut self, output: Output, dest: PathBuf) {
        let minifier = self.minifier;
        self.tasks.spawn(async move {
            let result = write_output(minifier, output, &dest).await;
            (dest, result)
        });
    }

    /// Wait for every started write
    pub async fn join(mut self) -> WriteSummary {
        let mut summary = WriteSummary::default();

        while let Some(joined) = self.tasks.join_next().await {
            match joined {
                Ok((dest, Ok(()))) => {
                    tracing::debug!("Wrote {:?}", dest);
                    summary.written += 1;
                }
                Ok((dest, Err(e))) => {
                    tracing::error!("Failed to write {:?}: {:#}", dest, e);
                    summary.failed += 1;
                }
                Err(e) => {
                    tracing::error!("Write task failed: {}", e);
                    summary.failed += 1;
                }
            }
        }

        summary
    }
}

async fn write_output(minifier: Minifier, output: Output, dest: &Path) -> Result<()> {
    let bytes = match output {
        Output::Rendered(html) => minify_blocking(minifier, Source::Html(html.into_bytes())).await?,
        Output::Page(path) => {
            let html = tokio::fs::read(&path)
                .await
                .with_context(|| format!("Failed to read {:?}", path))?;
            minify_blocking(minifier, Source::Html(html)).await?
        }
        Output::Stylesheet(path) => {
            let css = tokio::fs::read_to_string(&path)
                .await
                .with_context(|| format!("Failed to read {:?}", path))?;
            minify_blocking(minifier, Source::Css(css)).await?
        }
    };

    if let Some(parent) = dest.parent() {
        tokio::fs::create_dir_all(parent)
            .await
            .with_context(|| format!("Failed to create {:?}", parent))?;
    }
    tokio::fs::write(dest, bytes)
        .await
        .with_context(|| format!("Failed to write {:?}", dest))?;

    Ok(())
}

enum Source {
    Html(Vec<u8>),
    Css(String),
}

/// Minifiers are CPU bound; keep them off the async workers
async fn minify_blocking(minifier: Minifier, source: Source) -> Result<Vec<u8>> {
    tokio::task::spawn_blocking(move || -> Result<Vec<u8>> {
        let minified = match &source {
            Source::Html(html) => minifier.minify(MinifyType::Html(html))?,
            Source::Css(css) => minifier.minify(MinifyType::Css(css))?,
        };
        Ok(minified.into_owned())
    })
    .await?
}
