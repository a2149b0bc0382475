//! Tera rendering engine — [`Template`] enum, [`TemplateEngine`] and [`Renderer`].
//!
//! | Template      | Name                          | Used for                          |
//! |---------------|-------------------------------|-----------------------------------|
//! | Footer        | `storage/footer.tera`         | attribution appended to each page |
//! | AncestorPage  | `storage/ancestor_page.tera`  | body of folder stub pages         |

use std::path::{Path, PathBuf};

use tera::Tera;

use md2wiki_core::{FrontMatter, ImportSource, SyncConfig};

use crate::context::{AncestorContext, FooterContext};
use crate::error::RenderError;
use crate::markdown;

// ---------------------------------------------------------------------------
// Embedded templates — baked into the binary at compile time via include_str!
// ---------------------------------------------------------------------------

const TPLS: &[(&str, &str)] = &[
    ("storage/footer.tera", include_str!("templates/footer.tera")),
    (
        "storage/ancestor_page.tera",
        include_str!("templates/ancestor_page.tera"),
    ),
];

// ---------------------------------------------------------------------------
// Template loading
// ---------------------------------------------------------------------------

fn io_err(path: impl Into<PathBuf>, source: std::io::Error) -> RenderError {
    RenderError::Io { path: path.into(), source }
}

/// Embedded templates, each replaced by `<dir>/<name>` when that file exists.
fn build_tera(user_template_dir: Option<&Path>) -> Result<Tera, RenderError> {
    let mut templates = Vec::with_capacity(TPLS.len());
    for (name, embedded) in TPLS {
        let content = match user_template_dir.map(|dir| dir.join(name)) {
            Some(path) if path.is_file() => {
                std::fs::read_to_string(&path).map_err(|e| io_err(&path, e))?
            }
            _ => (*embedded).to_string(),
        };
        templates.push((*name, content));
    }

    let mut tera = Tera::default();
    // Storage bodies are XHTML we assemble ourselves; values are inserted verbatim.
    tera.autoescape_on(vec![]);
    tera.add_raw_templates(templates)?;
    Ok(tera)
}

// ---------------------------------------------------------------------------
// Template
// ---------------------------------------------------------------------------

/// The templates the synchronizer renders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Template {
    Footer,
    AncestorPage,
}

impl Template {
    pub fn name(&self) -> &'static str {
        match self {
            Template::Footer => "storage/footer.tera",
            Template::AncestorPage => "storage/ancestor_page.tera",
        }
    }
}

// ---------------------------------------------------------------------------
// TemplateEngine
// ---------------------------------------------------------------------------

/// Tera-based engine for rendering templates with optional user overrides.
///
/// `user_template_dir` may hold files that override embedded defaults under the
/// same relative name, e.g. `<dir>/storage/footer.tera`. Other files are ignored.
pub struct TemplateEngine {
    tera: Tera,
}

impl TemplateEngine {
    pub fn new(user_template_dir: Option<&Path>) -> Result<Self, RenderError> {
        let tera = build_tera(user_template_dir)?;
        Ok(TemplateEngine { tera })
    }

    pub fn render(&self, template: Template, ctx: &tera::Context) -> Result<String, RenderError> {
        let rendered = self.tera.render(template.name(), ctx)?;
        Ok(rendered.replace("\r\n", "\n"))
    }
}

// ---------------------------------------------------------------------------
// Renderer
// ---------------------------------------------------------------------------

/// Everything the sync pipeline needs to produce storage bodies.
///
/// Create once per run and share by reference.
pub struct Renderer {
    engine: TemplateEngine,
    source: ImportSource,
}

impl Renderer {
    /// Embedded templates only.
    pub fn new(source: ImportSource) -> Result<Self, RenderError> {
        Self::with_template_dir(source, None)
    }

    pub fn with_template_dir(
        source: ImportSource,
        user_template_dir: Option<&Path>,
    ) -> Result<Self, RenderError> {
        Ok(Renderer {
            engine: TemplateEngine::new(user_template_dir)?,
            source,
        })
    }

    /// Import source and template overrides taken from `config`.
    pub fn from_config(config: &SyncConfig) -> Result<Self, RenderError> {
        Self::with_template_dir(config.import_source.clone(), config.templates_dir.as_deref())
    }

    /// Markdown → storage XHTML. Does not add the footer.
    pub fn render_markdown(&self, markdown: &str) -> String {
        markdown::to_storage(markdown)
    }

    /// Attribution footer, with the creation date sentence when `date` is set.
    pub fn footer(&self, front_matter: &FrontMatter) -> Result<String, RenderError> {
        let ctx = FooterContext::new(&self.source, front_matter).to_tera_context()?;
        Ok(self.engine.render(Template::Footer, &ctx)?.trim_end().to_string())
    }

    /// `rendered_body` with the footer appended.
    pub fn with_footer(
        &self,
        rendered_body: &str,
        front_matter: &FrontMatter,
    ) -> Result<String, RenderError> {
        let mut body = String::with_capacity(rendered_body.len() + 256);
        body.push_str(rendered_body);
        body.push_str(&self.footer(front_matter)?);
        Ok(body)
    }

    /// Body of the stub page standing in for folder `title`.
    pub fn ancestor_page(&self, title: &str) -> Result<String, RenderError> {
        let ctx = AncestorContext {
            title: title.to_string(),
        }
        .to_tera_context()?;
        self.engine.render(Template::AncestorPage, &ctx)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
