//! `md2wiki init [--endpoint URL] [--space S] [--force]`

use anyhow::{Context, Result};
use clap::Args;

use md2wiki_core::{config, SyncConfig};

use super::{init_tracing, GlobalArgs};

/// Write a starter config file.
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Wiki base URL to pre-fill.
    #[arg(long, value_name = "URL")]
    pub endpoint: Option<String>,

    /// Space key to pre-fill.
    #[arg(long)]
    pub space: Option<String>,

    /// Replace an existing config file.
    #[arg(long)]
    pub force: bool,
}

impl InitArgs {
    pub fn run(self, global: &GlobalArgs) -> Result<()> {
        init_tracing(global.debug);

        let starter = SyncConfig {
            endpoint: self.endpoint.unwrap_or_default(),
            space: self.space.unwrap_or_default(),
            ..SyncConfig::default()
        };

        let path = match &global.config {
            Some(path) => {
                config::save_to(path, &starter, self.force)
                    .with_context(|| format!("failed to write '{}'", path.display()))?;
                path.clone()
            }
            None => config::save(&starter, self.force)
                .context("failed to write ~/.md2wiki/config.yaml (use --force to replace)")?,
        };

        println!("✓ Wrote starter config");
        println!("  Saved to: {}", path.display());
        if starter.endpoint.is_empty() || starter.space.is_empty() {
            println!("  Fill in `endpoint` and `space` before running `md2wiki sync`.");
        }
        Ok(())
    }
}
