//! The capability set the synchronizer needs from a content store.

use crate::error::StoreError;
use crate::model::{Content, ContentQuery, CreateContent};

/// Search / create / update against a space-addressed page store.
///
/// All calls are blocking. Implementations report every failure as a
/// [`StoreError`]; callers add the context.
pub trait ContentStore {
    /// Pages matching `query`, possibly none.
    fn search(&self, query: &ContentQuery) -> Result<Vec<Content>, StoreError>;

    /// Create a page, returning it with its new id and initial version.
    fn create(&self, request: &CreateContent) -> Result<Content, StoreError>;

    /// Persist `content`. Its version number must be one above the stored one.
    fn update(&self, content: &Content) -> Result<Content, StoreError>;
}

impl<S: ContentStore + ?Sized> ContentStore for &S {
    fn search(&self, query: &ContentQuery) -> Result<Vec<Content>, StoreError> {
        (**self).search(query)
    }

    fn create(&self, request: &CreateContent) -> Result<Content, StoreError> {
        (**self).create(request)
    }

    fn update(&self, content: &Content) -> Result<Content, StoreError> {
        (**self).update(content)
    }
}

impl<S: ContentStore + ?Sized> ContentStore for Box<S> {
    fn search(&self, query: &ContentQuery) -> Result<Vec<Content>, StoreError> {
        (**self).search(query)
    }

    fn create(&self, request: &CreateContent) -> Result<Content, StoreError> {
        (**self).create(request)
    }

    fn update(&self, content: &Content) -> Result<Content, StoreError> {
        (**self).update(content)
    }
}
