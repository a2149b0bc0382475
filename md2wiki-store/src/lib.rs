//! # md2wiki-store
//!
//! The remote content store as seen by the synchronizer: the [`ContentStore`]
//! capability trait, the REST wire model, a blocking [`ConfluenceClient`] and
//! an [`InMemoryStore`] for dry runs and tests.

pub mod client;
pub mod error;
pub mod memory;
pub mod model;
pub mod store;

pub use client::{ConfluenceClient, Credentials};
pub use error::StoreError;
pub use memory::{CallCounts, InMemoryStore, Operation};
pub use model::{Content, ContentQuery, CreateContent, PAGE_TYPE};
pub use store::ContentStore;
