//! Per-document create-or-update against a [`ContentStore`].
//!
//! ## `upload` flow
//!
//! 1. Append the attribution footer to the rendered body.
//! 2. Search the space for the effective title.
//! 3. Resolve the folder pages on the document's path.
//! 4. Found → one update (version + 1, new body, extra ancestor, labels only
//!    when `sync_labels_on_update`).
//!    Not found → create, then one update carrying the full label set.
//! 5. Report the short link returned by the last update.

use serde::Serialize;

use md2wiki_core::{Document, SpaceKey, SyncConfig};
use md2wiki_renderer::Renderer;
use md2wiki_store::{ContentQuery, ContentStore, CreateContent, StoreError};

use crate::ancestors::{AncestorCache, AncestorResolver};
use crate::error::SyncError;

const SEARCH_EXPANSIONS: &[&str] = &["version", "body.storage"];

// ---------------------------------------------------------------------------
// Outcome
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum UploadAction {
    Created,
    Updated,
}

/// Result of synchronizing one document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UploadOutcome {
    /// Title the page was stored under.
    pub title: String,
    /// Endpoint joined with the page's short link.
    pub url: String,
    pub action: UploadAction,
    /// Version number after the last update.
    pub version: u64,
}

// ---------------------------------------------------------------------------
// Synchronizer
// ---------------------------------------------------------------------------

/// Uploads documents one at a time, sharing the folder cache across calls.
pub struct Synchronizer<'a, S: ContentStore> {
    store: &'a S,
    renderer: &'a Renderer,
    config: &'a SyncConfig,
    space: SpaceKey,
    cache: AncestorCache,
}

impl<'a, S: ContentStore> Synchronizer<'a, S> {
    pub fn new(store: &'a S, renderer: &'a Renderer, config: &'a SyncConfig) -> Self {
        Self {
            store,
            renderer,
            config,
            space: config.space_key(),
            cache: AncestorCache::new(),
        }
    }

    pub fn cache(&self) -> &AncestorCache {
        &self.cache
    }

    /// Create or update the page for `document`.
    ///
    /// Remote failures are returned immediately with the operation and title
    /// attached. Nothing is retried or rolled back.
    pub fn upload(&mut self, document: &Document) -> Result<UploadOutcome, SyncError> {
        let body = self
            .renderer
            .with_footer(&document.rendered_body, &document.front_matter)?;

        let title = document.effective_title();
        tracing::debug!(
            path = %document.path.display(),
            title = %title,
            front_matter = ?document.front_matter,
            "uploading"
        );

        let query = ContentQuery::page(title.as_str(), &self.space).expand(SEARCH_EXPANSIONS);
        let existing = self
            .store
            .search(&query)
            .map_err(|source| SyncError::Search {
                title: title.clone(),
                source,
            })?
            .into_iter()
            .next();

        let ancestor = if document.ancestor_path.is_empty() {
            None
        } else {
            AncestorResolver::new(self.store, self.renderer, &self.space).resolve(
                &mut self.cache,
                &document.ancestor_path,
                &document.path,
            )?
        };

        let labels = document.labels();
        tracing::debug!(?labels, ancestor = ?ancestor, "label set");

        let (page, action) = match existing {
            Some(mut page) => {
                page.bump_version();
                page.set_storage_body(body);
                if let Some(id) = &ancestor {
                    page.push_ancestor(id);
                }
                if self.config.sync_labels_on_update {
                    page.set_labels(labels);
                }
                let page = self
                    .store
                    .update(&page)
                    .map_err(|source| update_error(&title, source, |title, source| {
                        SyncError::Update { title, source }
                    }))?;
                tracing::info!(title = %title, version = page.version.number, "updated page");
                (page, UploadAction::Updated)
            }
            None => {
                let request = CreateContent::page(title.as_str(), &self.space, body, ancestor.as_ref());
                let mut page = self
                    .store
                    .create(&request)
                    .map_err(|source| SyncError::Create {
                        title: title.clone(),
                        source,
                    })?;

                page.set_labels(labels);
                page.bump_version();
                let page = self
                    .store
                    .update(&page)
                    .map_err(|source| update_error(&title, source, |title, source| {
                        SyncError::LabelUpdate { title, source }
                    }))?;
                tracing::info!(title = %title, id = %page.id, "created page");
                (page, UploadAction::Created)
            }
        };

        Ok(UploadOutcome {
            url: format!("{}{}", self.config.endpoint_base(), page.links.tinyui),
            title,
            action,
            version: page.version.number,
        })
    }
}

fn update_error(
    title: &str,
    source: StoreError,
    otherwise: fn(String, StoreError) -> SyncError,
) -> SyncError {
    if source.is_conflict() {
        SyncError::Conflict {
            title: title.to_string(),
            source,
        }
    } else {
        otherwise(title.to_string(), source)
    }
}
