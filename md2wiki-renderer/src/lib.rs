//! # md2wiki-renderer
//!
//! Turns Markdown into the wiki's storage representation and renders the
//! tera templates the synchronizer needs: the attribution footer and the
//! body of folder stub pages.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use md2wiki_core::{FrontMatter, ImportSource};
//! use md2wiki_renderer::Renderer;
//!
//! fn preview(markdown: &str) {
//!     if let Ok(renderer) = Renderer::new(ImportSource::default()) {
//!         let body = renderer.render_markdown(markdown);
//!         if let Ok(page) = renderer.with_footer(&body, &FrontMatter::default()) {
//!             println!("{page}");
//!         }
//!     }
//! }
//! ```

pub mod context;
pub mod engine;
pub mod error;
pub mod markdown;

pub use context::{AncestorContext, FooterContext};
pub use engine::{Renderer, Template, TemplateEngine};
pub use error::RenderError;
