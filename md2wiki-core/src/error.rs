//! Error types for md2wiki-core.

use std::path::PathBuf;

use thiserror::Error;

/// All errors that can arise while loading or saving a [`SyncConfig`](crate::SyncConfig).
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Underlying I/O failure (permission denied, unreadable file, etc.).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML serialization error (save path).
    #[error("YAML serialization error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// YAML parse error on load — includes file path and line context from serde_yaml.
    #[error("failed to parse config at {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    /// `dirs::home_dir()` returned `None` — cannot locate `~/.md2wiki/`.
    #[error("cannot determine home directory; set $HOME or equivalent")]
    HomeNotFound,

    /// An explicitly requested config file does not exist.
    #[error("config not found at {}", path.display())]
    ConfigNotFound { path: PathBuf },

    /// A required setting is empty after all layers were applied.
    #[error("missing required setting `{field}` (set it in the config file, env, or CLI)")]
    Missing { field: &'static str },

    /// Refused to overwrite an existing config file.
    #[error("config already exists at {}", path.display())]
    AlreadyExists { path: PathBuf },
}

/// Errors raised while splitting or parsing a front-matter block.
#[derive(Debug, Error)]
pub enum FrontMatterError {
    /// An opening `---` line was found but no closing one.
    #[error("front-matter block is not terminated by a closing `---` line")]
    Unterminated,

    /// The block between the delimiters is not valid YAML.
    #[error("invalid front-matter YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// The block parsed, but to a list or scalar rather than a mapping.
    #[error("front-matter must be a YAML mapping")]
    NotAMapping,
}
