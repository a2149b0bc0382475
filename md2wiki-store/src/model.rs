//! Wire model of the content REST API.
//!
//! Field names follow the JSON the store sends and expects (`type`,
//! `_links.tinyui`, `body.storage.value`, ...). Everything absent from a
//! response deserializes to its default so partially expanded results work.

use serde::{Deserialize, Serialize};

use md2wiki_core::{Label, PageId, SpaceKey};

/// The only content type this tool reads or writes.
pub const PAGE_TYPE: &str = "page";
/// Storage representation name sent with every body.
pub const STORAGE_REPRESENTATION: &str = "storage";

fn page_type() -> String {
    PAGE_TYPE.to_string()
}

// ---------------------------------------------------------------------------
// Content
// ---------------------------------------------------------------------------

/// A remote page as returned by search/create/update.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Content {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub id: String,
    #[serde(rename = "type", default = "page_type")]
    pub content_type: String,
    #[serde(default)]
    pub title: String,
    #[serde(default, skip_serializing_if = "Space::is_empty")]
    pub space: Space,
    #[serde(default)]
    pub version: Version,
    #[serde(default)]
    pub body: Body,
    #[serde(default)]
    pub ancestors: Vec<Ancestor>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Metadata>,
    #[serde(rename = "_links", default, skip_serializing)]
    pub links: Links,
}

impl Content {
    pub fn page_id(&self) -> PageId {
        PageId::from(self.id.as_str())
    }

    pub fn bump_version(&mut self) {
        self.version.number += 1;
    }

    pub fn set_storage_body(&mut self, value: impl Into<String>) {
        self.body = Body::storage(value);
    }

    /// Append `id` as the innermost ancestor. Existing ancestors are kept.
    pub fn push_ancestor(&mut self, id: &PageId) {
        self.ancestors.push(Ancestor::from(id));
    }

    /// Replace the full label set.
    pub fn set_labels(&mut self, labels: Vec<Label>) {
        self.metadata = Some(Metadata { labels });
    }

    pub fn labels(&self) -> &[Label] {
        self.metadata.as_ref().map(|m| m.labels.as_slice()).unwrap_or(&[])
    }
}

// ---------------------------------------------------------------------------
// Nested parts
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Space {
    #[serde(default)]
    pub key: String,
}

impl Space {
    fn is_empty(&self) -> bool {
        self.key.is_empty()
    }
}

impl From<&SpaceKey> for Space {
    fn from(key: &SpaceKey) -> Self {
        Self { key: key.0.clone() }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Version {
    #[serde(default)]
    pub number: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Body {
    #[serde(default)]
    pub storage: Storage,
}

impl Body {
    pub fn storage(value: impl Into<String>) -> Self {
        Self {
            storage: Storage {
                value: value.into(),
                representation: STORAGE_REPRESENTATION.to_string(),
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Storage {
    #[serde(default)]
    pub value: String,
    #[serde(default = "storage_representation")]
    pub representation: String,
}

impl Default for Storage {
    fn default() -> Self {
        Self {
            value: String::new(),
            representation: storage_representation(),
        }
    }
}

fn storage_representation() -> String {
    STORAGE_REPRESENTATION.to_string()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ancestor {
    pub id: String,
}

impl From<&PageId> for Ancestor {
    fn from(id: &PageId) -> Self {
        Self { id: id.0.clone() }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Metadata {
    #[serde(default)]
    pub labels: Vec<Label>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Links {
    #[serde(default)]
    pub tinyui: String,
    #[serde(default)]
    pub webui: String,
}

// ---------------------------------------------------------------------------
// Requests
// ---------------------------------------------------------------------------

/// Parameters of a content search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentQuery {
    pub title: String,
    pub space_key: SpaceKey,
    pub content_type: String,
    pub limit: u32,
    pub expand: Vec<String>,
}

impl ContentQuery {
    /// Exact-title page lookup returning at most one result.
    pub fn page(title: impl Into<String>, space_key: &SpaceKey) -> Self {
        Self {
            title: title.into(),
            space_key: space_key.clone(),
            content_type: page_type(),
            limit: 1,
            expand: Vec::new(),
        }
    }

    pub fn expand(mut self, fields: &[&str]) -> Self {
        self.expand = fields.iter().map(|f| (*f).to_string()).collect();
        self
    }
}

/// Body of a create call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateContent {
    pub title: String,
    #[serde(rename = "type")]
    pub content_type: String,
    pub space: Space,
    pub body: Body,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub ancestors: Vec<Ancestor>,
}

impl CreateContent {
    /// A page with a storage body and, when given, a single parent.
    pub fn page(
        title: impl Into<String>,
        space_key: &SpaceKey,
        storage_body: impl Into<String>,
        parent: Option<&PageId>,
    ) -> Self {
        Self {
            title: title.into(),
            content_type: page_type(),
            space: Space::from(space_key),
            body: Body::storage(storage_body),
            ancestors: parent.map(Ancestor::from).into_iter().collect(),
        }
    }
}

/// Envelope of search responses.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchResults {
    #[serde(default)]
    pub results: Vec<Content>,
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
