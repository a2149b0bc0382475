//! Error types for md2wiki-renderer.

use std::path::PathBuf;

use thiserror::Error;

/// All errors that can arise from template rendering operations.
#[derive(Debug, Error)]
pub enum RenderError {
    /// Tera template engine error (syntax in an override, missing variable, ...).
    #[error("template engine error: {0}")]
    Tera(#[from] tera::Error),

    /// Filesystem error while loading user templates.
    #[error("template io error at {}: {source}", path.display())]
    Io { path: PathBuf, source: std::io::Error },
}
