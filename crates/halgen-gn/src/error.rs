//! Generation errors.

use std::path::PathBuf;

use thiserror::Error;

use crate::generator::Stage;

/// Errors that can occur while generating a BUILD.gn file.
#[derive(Debug, Error)]
pub enum GenError {
    /// The destination document could not be created. Nothing was written.
    #[error("cannot open {} for writing: {source}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Directory traversal failed; reported as-is, with no partial result.
    #[error("walking source tree: {0}")]
    Walk(#[from] walkdir::Error),

    #[error("invalid source pattern: {0}")]
    Pattern(#[from] glob::PatternError),

    /// A generator operation was called outside its place in the document.
    #[error("cannot {operation} once the generator is {stage}")]
    OutOfOrder {
        operation: &'static str,
        stage: Stage,
    },
}

/// Result type for generation.
pub type Result<T> = std::result::Result<T, GenError>;
