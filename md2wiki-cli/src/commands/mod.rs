pub mod init;
pub mod render;
pub mod sync;

use std::path::PathBuf;

use anyhow::{Context, Result};

use md2wiki_core::{config, SyncConfig};

/// Flags accepted before or after any subcommand.
#[derive(Debug, Clone, Default)]
pub struct GlobalArgs {
    pub config: Option<PathBuf>,
    pub debug: bool,
}

/// `--config` file when given (must exist), otherwise the home config or defaults.
pub fn load_config(global: &GlobalArgs) -> Result<SyncConfig> {
    match &global.config {
        Some(path) => config::load_from(path)
            .with_context(|| format!("failed to load config from '{}'", path.display())),
        None => config::load().context("failed to load ~/.md2wiki/config.yaml"),
    }
}

/// Install the stderr log subscriber. `RUST_LOG` wins over `debug`.
pub fn init_tracing(debug: bool) {
    use tracing_subscriber::{fmt, EnvFilter};

    let default = if debug { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    let _ = fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
