//! # md2wiki-sync
//!
//! Mirrors a tree of Markdown documents into a wiki space.
//!
//! [`run`] discovers the sources under a root and hands each one to a
//! [`Synchronizer`], which creates or updates the matching page and the
//! folder pages above it. Any [`md2wiki_store::ContentStore`] works as the
//! target, so dry runs use the in-memory store.

pub mod ancestors;
pub mod error;
pub mod pipeline;
pub mod source;
pub mod uploader;

pub use ancestors::{AncestorCache, AncestorResolver};
pub use error::SyncError;
pub use pipeline::{run, FileReport, RunReport};
pub use source::{compile_excludes, discover, load, SourceFile};
pub use uploader::{Synchronizer, UploadAction, UploadOutcome};
