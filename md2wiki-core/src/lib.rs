//! md2wiki core library — domain types, front-matter, configuration, errors.
//!
//! - [`types`] — newtypes, [`Document`] and [`Label`]
//! - [`frontmatter`] — YAML front-matter splitting and typed access
//! - [`config`] — [`SyncConfig`] load / save
//! - [`error`] — [`ConfigError`], [`FrontMatterError`]

pub mod config;
pub mod error;
pub mod frontmatter;
pub mod types;

pub use config::{ImportSource, SyncConfig};
pub use error::{ConfigError, FrontMatterError};
pub use frontmatter::FrontMatter;
pub use types::{Document, Label, PageId, SpaceKey, MIGRATION_LABEL};
