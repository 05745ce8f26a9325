//! Source layout errors

use std::path::PathBuf;
use thiserror::Error;

use super::Slot;

/// Errors raised while discovering the source tree
#[derive(Error, Debug)]
pub enum SourceError {
    #[error("Source directory not found: {0:?}")]
    MissingRoot(PathBuf),

    #[error("Source path is not a directory: {0:?}")]
    NotADirectory(PathBuf),

    #[error("No {slot} found (expected a file matching *{pattern})")]
    MissingSlot { slot: Slot, pattern: &'static str },

    #[error("More than one {slot} found: {candidates:?}")]
    AmbiguousSlot {
        slot: Slot,
        candidates: Vec<PathBuf>,
    },

    #[error("Failed to walk {path:?}: {source}")]
    Walk {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },
}
