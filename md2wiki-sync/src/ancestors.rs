//! Folder → page resolution.
//!
//! Every folder on a document's path is represented by a page of the same
//! title. Missing folder pages are created as stubs listing their children,
//! each nested under the previous one. Resolved ids are memoized for the run.

use std::collections::HashMap;
use std::path::Path;

use md2wiki_core::{PageId, SpaceKey};
use md2wiki_renderer::{RenderError, Renderer};
use md2wiki_store::{ContentQuery, ContentStore, CreateContent, StoreError};

use crate::error::SyncError;

// ---------------------------------------------------------------------------
// AncestorCache
// ---------------------------------------------------------------------------

/// Folder name → page id, for the lifetime of one run.
///
/// Folder names are treated as unique across the tree: the first resolution
/// of a name wins and is never invalidated.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AncestorCache {
    ids: HashMap<String, PageId>,
}

impl AncestorCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, folder: &str) -> Option<&PageId> {
        self.ids.get(folder)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    fn insert(&mut self, folder: &str, id: PageId) {
        self.ids.entry(folder.to_string()).or_insert(id);
    }
}

// ---------------------------------------------------------------------------
// AncestorResolver
// ---------------------------------------------------------------------------

pub struct AncestorResolver<'a, S: ContentStore> {
    store: &'a S,
    renderer: &'a Renderer,
    space: &'a SpaceKey,
}

impl<'a, S: ContentStore> AncestorResolver<'a, S> {
    pub fn new(store: &'a S, renderer: &'a Renderer, space: &'a SpaceKey) -> Self {
        Self {
            store,
            renderer,
            space,
        }
    }

    /// Id of the innermost folder page of `path`, creating missing ones.
    ///
    /// `path` is outermost first. Returns `None` for an empty path without
    /// touching the store. Blank segments are skipped. Stubs created before a
    /// failure are left in place.
    pub fn resolve(
        &self,
        cache: &mut AncestorCache,
        path: &[String],
        document_path: &Path,
    ) -> Result<Option<PageId>, SyncError> {
        let mut previous: Option<PageId> = None;

        for folder in path.iter().map(String::as_str).filter(|f| !f.is_empty()) {
            if let Some(id) = cache.get(folder) {
                tracing::debug!(folder, id = %id, "ancestor cached");
                previous = Some(id.clone());
                continue;
            }

            let id = self
                .lookup_or_create(folder, previous.as_ref())
                .map_err(|err| match err {
                    LookupError::Store(source) => SyncError::Ancestor {
                        folder: folder.to_string(),
                        path: document_path.to_path_buf(),
                        source,
                    },
                    LookupError::Render(err) => SyncError::Render(err),
                })?;
            cache.insert(folder, id.clone());
            previous = Some(id);
        }

        Ok(previous)
    }

    fn lookup_or_create(
        &self,
        folder: &str,
        parent: Option<&PageId>,
    ) -> Result<PageId, LookupError> {
        let query = ContentQuery::page(folder, self.space);
        if let Some(found) = self.store.search(&query)?.into_iter().next() {
            tracing::debug!(folder, id = %found.id, "ancestor found");
            return Ok(found.page_id());
        }

        let body = self.renderer.ancestor_page(folder)?;
        let request = CreateContent::page(folder, self.space, body, parent);
        let created = self.store.create(&request)?;
        tracing::info!(folder, id = %created.id, "created folder page");
        Ok(created.page_id())
    }
}

enum LookupError {
    Store(StoreError),
    Render(RenderError),
}

impl From<StoreError> for LookupError {
    fn from(err: StoreError) -> Self {
        LookupError::Store(err)
    }
}

impl From<RenderError> for LookupError {
    fn from(err: RenderError) -> Self {
        LookupError::Render(err)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use md2wiki_core::ImportSource;
    use md2wiki_store::{InMemoryStore, Operation};

    use super::*;

    fn folders(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    fn doc_path() -> PathBuf {
        PathBuf::from("guides/setup/install.md")
    }

    #[test]
    fn empty_path_makes_no_calls() {
        let store = InMemoryStore::new();
        let renderer = Renderer::new(ImportSource::default()).unwrap();
        let space = SpaceKey::from("DOC");
        let mut cache = AncestorCache::new();

        let id = AncestorResolver::new(&store, &renderer, &space)
            .resolve(&mut cache, &[], &doc_path())
            .unwrap();
        assert!(id.is_none());
        assert_eq!(store.calls().total(), 0);
    }

    #[test]
    fn missing_folders_become_nested_stubs() {
        let store = InMemoryStore::new();
        let renderer = Renderer::new(ImportSource::default()).unwrap();
        let space = SpaceKey::from("DOC");
        let mut cache = AncestorCache::new();

        let id = AncestorResolver::new(&store, &renderer, &space)
            .resolve(&mut cache, &folders(&["guides", "setup"]), &doc_path())
            .unwrap()
            .expect("innermost id");

        let guides = store.page_titled("guides").unwrap();
        let setup = store.page_titled("setup").unwrap();
        assert!(guides.ancestors.is_empty());
        assert_eq!(setup.ancestors[0].id, guides.id);
        assert_eq!(id.0, setup.id);
        assert!(setup.body.storage.value.contains(r#"ac:name="children""#));
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn existing_folder_page_is_reused() {
        let store = InMemoryStore::new();
        let space = SpaceKey::from("DOC");
        let existing = store.insert("guides", &space, "<p>hand written</p>");
        let renderer = Renderer::new(ImportSource::default()).unwrap();
        let mut cache = AncestorCache::new();

        let id = AncestorResolver::new(&store, &renderer, &space)
            .resolve(&mut cache, &folders(&["guides"]), &doc_path())
            .unwrap();
        assert_eq!(id, Some(PageId::from(existing)));
        assert_eq!(store.calls().create, 0);
    }

    #[test]
    fn blank_segments_do_not_reset_parent() {
        let store = InMemoryStore::new();
        let renderer = Renderer::new(ImportSource::default()).unwrap();
        let space = SpaceKey::from("DOC");
        let mut cache = AncestorCache::new();

        AncestorResolver::new(&store, &renderer, &space)
            .resolve(&mut cache, &folders(&["a", "", "b"]), &doc_path())
            .unwrap();
        let a = store.page_titled("a").unwrap();
        let b = store.page_titled("b").unwrap();
        assert_eq!(b.ancestors[0].id, a.id);
        assert_eq!(store.pages().len(), 2);
    }

    #[test]
    fn search_failure_names_folder_and_document() {
        let store = InMemoryStore::new();
        let renderer = Renderer::new(ImportSource::default()).unwrap();
        let space = SpaceKey::from("DOC");
        let mut cache = AncestorCache::new();
        store.fail_after(Operation::Search, 1);

        let err = AncestorResolver::new(&store, &renderer, &space)
            .resolve(&mut cache, &folders(&["guides", "setup"]), &doc_path())
            .unwrap_err();
        match err {
            SyncError::Ancestor { folder, path, .. } => {
                assert_eq!(folder, "setup");
                assert_eq!(path, doc_path());
            }
            other => panic!("expected ancestor error, got {other:?}"),
        }
        assert!(store.page_titled("guides").is_some());
        assert!(cache.get("guides").is_some());
        assert!(cache.get("setup").is_none());
    }
}
