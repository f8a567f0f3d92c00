//! Error types for wiki discovery and summary extraction.

use std::path::PathBuf;

/// Failures while turning the wiki folder into pages.
///
/// Every variant aborts the run; nothing is published for a partial wiki.
#[derive(Debug, thiserror::Error)]
pub enum WikiError {
    #[error("invalid wiki glob pattern `{pattern}`: {source}")]
    Pattern {
        pattern: String,
        #[source]
        source: glob::PatternError,
    },

    #[error("failed to read wiki path: {0}")]
    Glob(#[from] glob::GlobError),

    #[error("failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to re-serialize markdown: {0}")]
    Render(#[from] std::fmt::Error),

    #[error("{} is outside the workspace root {}", .path.display(), .root.display())]
    OutsideWorkspace { path: PathBuf, root: PathBuf },
}

pub type Result<T> = std::result::Result<T, WikiError>;
