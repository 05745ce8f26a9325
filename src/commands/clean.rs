//! Clean the build directory

use anyhow::{Context, Result};
use std::fs;

use crate::Site;

/// Delete the build directory; a missing directory is not an error
pub fn run(site: &Site) -> Result<()> {
    if site.build_dir.exists() {
        fs::remove_dir_all(&site.build_dir)
            .with_context(|| format!("Failed to delete {:?}", site.build_dir))?;
        tracing::info!("Deleted: {:?}", site.build_dir);
    }

    Ok(())
}
