//! Source tree discovery
//!
//! Walks the source directory and classifies what it finds into the named
//! slots the build needs.

mod error;
mod manifest;
mod walker;

pub use error::SourceError;
pub use manifest::{Slot, SourceManifest};
pub use walker::{find_all, find_first, list_files};
