//! In-process [`ContentStore`] used for `--dry-run` and tests.
//!
//! Behaves like the REST store where the synchronizer can observe it:
//! exact-title search within a space, sequential ids, version 1 on create,
//! `stored + 1` required on update, labels kept when an update carries none.
//! Calls are counted so callers can assert on remote traffic.

use std::cell::RefCell;

use md2wiki_core::SpaceKey;

use crate::error::StoreError;
use crate::model::{Content, ContentQuery, CreateContent, Links, Version, PAGE_TYPE};
use crate::store::ContentStore;

const FIRST_ID: u64 = 1000;

/// Number of calls of each kind received so far.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CallCounts {
    pub search: usize,
    pub create: usize,
    pub update: usize,
}

impl CallCounts {
    pub fn total(&self) -> usize {
        self.search + self.create + self.update
    }
}

/// Which operation an injected failure applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Search,
    Create,
    Update,
}

#[derive(Debug, Default)]
struct State {
    pages: Vec<Content>,
    next_id: u64,
    calls: CallCounts,
    /// `(operation, calls of that kind to let through first)`.
    failure: Option<(Operation, usize)>,
}

#[derive(Debug)]
pub struct InMemoryStore {
    state: RefCell<State>,
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self {
            state: RefCell::new(State {
                next_id: FIRST_ID,
                ..State::default()
            }),
        }
    }

    /// Seed a page as if it had been created earlier. Returns its id.
    ///
    /// Seeding is not counted as a call.
    pub fn insert(&self, title: &str, space: &SpaceKey, storage_body: &str) -> String {
        let mut state = self.state.borrow_mut();
        let id = state.allocate_id();
        let mut page = Content {
            id: id.clone(),
            content_type: PAGE_TYPE.to_string(),
            title: title.to_string(),
            version: Version { number: 1 },
            ..Content::default()
        };
        page.space.key = space.0.clone();
        page.set_storage_body(storage_body);
        page.links = links_for(&id);
        state.pages.push(page);
        id
    }

    pub fn calls(&self) -> CallCounts {
        self.state.borrow().calls
    }

    /// Snapshot of every stored page, in creation order.
    pub fn pages(&self) -> Vec<Content> {
        self.state.borrow().pages.clone()
    }

    pub fn page_titled(&self, title: &str) -> Option<Content> {
        self.state
            .borrow()
            .pages
            .iter()
            .find(|p| p.title == title)
            .cloned()
    }

    /// Make the call of kind `operation` after the next `skip` ones fail.
    pub fn fail_after(&self, operation: Operation, skip: usize) {
        self.state.borrow_mut().failure = Some((operation, skip));
    }

    /// Make the next call of kind `operation` fail with a transport error.
    pub fn fail_next(&self, operation: Operation) {
        self.fail_after(operation, 0);
    }
}

impl State {
    fn allocate_id(&mut self) -> String {
        let id = self.next_id;
        self.next_id += 1;
        id.to_string()
    }

    fn record(&mut self, operation: Operation) -> Result<(), StoreError> {
        match operation {
            Operation::Search => self.calls.search += 1,
            Operation::Create => self.calls.create += 1,
            Operation::Update => self.calls.update += 1,
        }
        let failure = self.failure;
        match failure {
            Some((op, 0)) if op == operation => {
                self.failure = None;
                Err(StoreError::Transport(format!("injected {operation:?} failure")))
            }
            Some((op, skip)) if op == operation => {
                self.failure = Some((op, skip - 1));
                Ok(())
            }
            _ => Ok(()),
        }
    }
}

fn links_for(id: &str) -> Links {
    Links {
        tinyui: format!("/x/{id}"),
        webui: format!("/pages/viewpage.action?pageId={id}"),
    }
}

impl ContentStore for InMemoryStore {
    fn search(&self, query: &ContentQuery) -> Result<Vec<Content>, StoreError> {
        let mut state = self.state.borrow_mut();
        state.record(Operation::Search)?;
        Ok(state
            .pages
            .iter()
            .filter(|p| {
                p.title == query.title
                    && p.space.key == query.space_key.0
                    && p.content_type == query.content_type
            })
            .take(query.limit as usize)
            .cloned()
            .collect())
    }

    fn create(&self, request: &CreateContent) -> Result<Content, StoreError> {
        let mut state = self.state.borrow_mut();
        state.record(Operation::Create)?;
        let id = state.allocate_id();
        let page = Content {
            id: id.clone(),
            content_type: request.content_type.clone(),
            title: request.title.clone(),
            space: request.space.clone(),
            version: Version { number: 1 },
            body: request.body.clone(),
            ancestors: request.ancestors.clone(),
            metadata: None,
            links: links_for(&id),
        };
        state.pages.push(page.clone());
        Ok(page)
    }

    fn update(&self, content: &Content) -> Result<Content, StoreError> {
        let mut state = self.state.borrow_mut();
        state.record(Operation::Update)?;
        let Some(stored) = state.pages.iter_mut().find(|p| p.id == content.id) else {
            return Err(StoreError::NotFound {
                id: content.id.clone(),
            });
        };
        if content.version.number != stored.version.number + 1 {
            return Err(StoreError::Conflict {
                id: content.id.clone(),
                version: content.version.number,
            });
        }

        let metadata = content.metadata.clone().or_else(|| stored.metadata.take());
        let space = if content.space.key.is_empty() {
            stored.space.clone()
        } else {
            content.space.clone()
        };
        *stored = Content {
            space,
            metadata,
            links: links_for(&content.id),
            ..content.clone()
        };
        Ok(stored.clone())
    }
}
