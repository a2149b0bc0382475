//! `md2wiki render <FILE>` — preview the uploaded body without touching the network.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use md2wiki_renderer::Renderer;
use md2wiki_sync::{load, SourceFile};

use super::{init_tracing, load_config, GlobalArgs};

/// Arguments for `md2wiki render`.
#[derive(Args, Debug)]
pub struct RenderArgs {
    /// Markdown file to render.
    pub file: PathBuf,
}

impl RenderArgs {
    pub fn run(self, global: &GlobalArgs) -> Result<()> {
        let config = load_config(global)?;
        init_tracing(global.debug || config.debug);
        let renderer = Renderer::from_config(&config).context("failed to load templates")?;

        let source = SourceFile {
            title: self
                .file
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_default(),
            path: self.file.clone(),
            ancestor_path: Vec::new(),
        };
        let document = load(&source, &renderer)
            .with_context(|| format!("failed to read '{}'", self.file.display()))?;
        let body = renderer
            .with_footer(&document.rendered_body, &document.front_matter)
            .context("failed to render footer")?;

        tracing::debug!(title = %document.effective_title(), labels = ?document.labels(), "rendered");
        println!("{body}");
        Ok(())
    }
}
