//! Domain types shared by every md2wiki crate.
//!
//! All path fields use `PathBuf`; never `&str` or `String` for filesystem paths.

use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::frontmatter::FrontMatter;

/// Label attached to every page this tool creates.
pub const MIGRATION_LABEL: &str = "migrated-from-hugo";

// ---------------------------------------------------------------------------
// Newtypes
// ---------------------------------------------------------------------------

/// Identifier of a page in the remote store.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PageId(pub String);

impl fmt::Display for PageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<String> for PageId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for PageId {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

/// Key of the space (namespace) pages are addressed in.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SpaceKey(pub String);

impl fmt::Display for SpaceKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<String> for SpaceKey {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for SpaceKey {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

// ---------------------------------------------------------------------------
// Domain structs
// ---------------------------------------------------------------------------

/// A page label. Serialized exactly as the store expects: `{"name": "..."}`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Label {
    pub name: String,
}

impl Label {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// One local document, rendered and ready to synchronize.
///
/// Built by the orchestrator per discovered file and consumed once.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    /// Source file on disk.
    pub path: PathBuf,
    /// Title derived from the file name.
    pub title: String,
    /// Folder names from the source root down to the file, outermost first.
    pub ancestor_path: Vec<String>,
    /// Body already translated to the store's storage representation.
    pub rendered_body: String,
    pub front_matter: FrontMatter,
}

impl Document {
    /// Front-matter `title` when present, otherwise the derived title.
    pub fn effective_title(&self) -> String {
        self.front_matter
            .title()
            .unwrap_or_else(|| self.title.clone())
    }

    /// The migration marker followed by one label per front-matter tag.
    pub fn labels(&self) -> Vec<Label> {
        std::iter::once(Label::new(MIGRATION_LABEL))
            .chain(self.front_matter.tags().into_iter().map(Label::new))
            .collect()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
