//! Error types for md2wiki-store.

use thiserror::Error;

/// Failures of a single remote call.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Connection, TLS, DNS or timeout failure before a response arrived.
    #[error("transport error: {0}")]
    Transport(String),

    /// The store answered with a non-success status.
    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },

    /// The store rejected the version number sent with an update.
    #[error("version conflict on page {id}: sent version {version}")]
    Conflict { id: String, version: u64 },

    /// The update targeted a page id the store does not know.
    #[error("page {id} not found")]
    NotFound { id: String },

    /// The response body could not be decoded.
    #[error("invalid response body: {0}")]
    Decode(#[from] std::io::Error),
}

impl StoreError {
    pub fn is_conflict(&self) -> bool {
        matches!(self, StoreError::Conflict { .. })
    }
}
