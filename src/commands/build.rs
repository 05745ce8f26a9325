//! Build the static site

use anyhow::Result;

use crate::generator::{BuildReport, Generator};
use crate::Site;

/// Clean the build directory and generate every output
pub async fn run(site: &Site) -> Result<BuildReport> {
    let start = std::time::Instant::now();
    tracing::info!("Building {:?} into {:?}", site.source_dir, site.build_dir);

    let report = Generator::new(site).generate().await?;

    if report.failed > 0 {
        tracing::warn!(
            "{} file(s) could not be built, see errors above",
            report.failed
        );
    }

    let duration = start.elapsed();
    tracing::info!(
        "Built {} posts and {} pages in {:.2}s",
        report.posts,
        report.pages,
        duration.as_secs_f64()
    );

    Ok(report)
}
