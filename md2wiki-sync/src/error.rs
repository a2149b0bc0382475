//! Error types for md2wiki-sync.

use std::path::PathBuf;

use thiserror::Error;

use md2wiki_core::FrontMatterError;
use md2wiki_renderer::RenderError;
use md2wiki_store::StoreError;

/// All errors that can arise while synchronizing documents.
#[derive(Debug, Error)]
pub enum SyncError {
    #[error("searching for page '{title}': {source}")]
    Search {
        title: String,
        #[source]
        source: StoreError,
    },

    #[error("creating page '{title}': {source}")]
    Create {
        title: String,
        #[source]
        source: StoreError,
    },

    #[error("updating page '{title}': {source}")]
    Update {
        title: String,
        #[source]
        source: StoreError,
    },

    /// The label update following a create failed. The page exists unlabelled.
    #[error("labelling new page '{title}': {source}")]
    LabelUpdate {
        title: String,
        #[source]
        source: StoreError,
    },

    /// A folder page could not be looked up or created.
    #[error("resolving ancestor '{folder}' for {}: {source}", path.display())]
    Ancestor {
        folder: String,
        path: PathBuf,
        #[source]
        source: StoreError,
    },

    /// The store rejected the version number sent with an update.
    #[error("page '{title}' changed remotely: {source}")]
    Conflict {
        title: String,
        #[source]
        source: StoreError,
    },

    #[error("render error: {0}")]
    Render(#[from] RenderError),

    #[error("front-matter of {}: {source}", path.display())]
    FrontMatter {
        path: PathBuf,
        #[source]
        source: FrontMatterError,
    },

    /// An I/O error, with annotated path for context.
    #[error("I/O error at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid exclude pattern: {0}")]
    Pattern(#[from] regex::Error),
}

impl SyncError {
    pub fn is_conflict(&self) -> bool {
        matches!(self, SyncError::Conflict { .. })
    }
}

/// Convenience constructor for [`SyncError::Io`].
pub(crate) fn io_err(path: impl Into<PathBuf>, source: std::io::Error) -> SyncError {
    SyncError::Io {
        path: path.into(),
        source,
    }
}
