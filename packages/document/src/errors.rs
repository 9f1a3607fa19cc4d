//! Error types for document edits

use thiserror::Error;

#[derive(Error, Debug)]
pub enum EditError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Character is out of bounds: {start}..{end} (length {len})")]
    OutOfBounds { start: usize, end: usize, len: usize },

    #[error("Cannot overwrite the same content twice: {original:?} at {start}..{end}")]
    Conflict {
        start: usize,
        end: usize,
        original: String,
    },

    #[error("Cannot use replaced characters ({start}, {end}) as slice anchors")]
    AmbiguousAnchor { start: usize, end: usize },

    #[error("{operation} is deprecated, use {replacement} instead")]
    Deprecated {
        operation: &'static str,
        replacement: &'static str,
    },

    #[error("Invalid trim pattern: {0}")]
    InvalidPattern(#[from] regex::Error),

    #[error("Source map error: {0}")]
    Map(#[from] patchmap_sourcemap::SourceMapError),
}

/// Result alias for document operations
pub type EditResult<T> = Result<T, EditError>;
