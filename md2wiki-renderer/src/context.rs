//! Template contexts — serializable payloads handed to tera.

use serde::Serialize;

use md2wiki_core::{FrontMatter, ImportSource};

use crate::error::RenderError;

/// Variables available to `storage/footer.tera`.
#[derive(Debug, Clone, Serialize)]
pub struct FooterContext {
    pub source_name: String,
    pub source_url: String,
    /// Set whenever the front-matter has a `date` key, even a null or empty one.
    pub has_date: bool,
    /// Front-matter `date` as text; empty when absent or null.
    pub created_date: String,
}

impl FooterContext {
    pub fn new(source: &ImportSource, front_matter: &FrontMatter) -> Self {
        let created_date = front_matter.date();
        Self {
            source_name: source.name.clone(),
            source_url: source.url.clone(),
            has_date: created_date.is_some(),
            created_date: created_date.unwrap_or_default(),
        }
    }

    pub fn to_tera_context(&self) -> Result<tera::Context, RenderError> {
        Ok(tera::Context::from_serialize(self)?)
    }
}

/// Variables available to `storage/ancestor_page.tera`.
#[derive(Debug, Clone, Serialize)]
pub struct AncestorContext {
    /// Folder name the stub page stands for.
    pub title: String,
}

impl AncestorContext {
    pub fn to_tera_context(&self) -> Result<tera::Context, RenderError> {
        Ok(tera::Context::from_serialize(self)?)
    }
}
