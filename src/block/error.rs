//! Marked-block editing errors.

use std::io;
use std::path::PathBuf;

/// Errors that can occur while validating markers or editing a target file.
#[derive(Debug, thiserror::Error)]
pub enum BlockError {
    #[error("Block marker must not be empty")]
    EmptyMarker,

    #[error("Block marker must fit on a single line: {marker:?}")]
    MultilineMarker { marker: String },

    #[error("Block markers are ambiguous (one matches the other): {start:?} / {end:?}")]
    AmbiguousMarkers { start: String, end: String },

    #[error("Block content line {line} contains the marker {marker:?}")]
    MarkerInPayload { marker: String, line: usize },

    #[error("Failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}
