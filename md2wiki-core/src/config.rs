//! Sync settings and their YAML persistence.
//!
//! # Storage layout
//!
//! ```text
//! ~/.md2wiki/
//!   config.yaml   (mode 0600 — may hold credentials)
//! ```
//!
//! # API pattern
//!
//! Every function touching the filesystem has two forms:
//! - `fn_at(home: &Path, …)` — explicit home; used in tests with `TempDir`
//! - `fn(…)` — derives home from `dirs::home_dir()`, delegates to `_at`
//!
//! Precedence is applied by the caller: CLI flag > env var > file > default.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::types::SpaceKey;

const DEFAULT_SOURCE_NAME: &str = "UT Internal Documentation";
const DEFAULT_SOURCE_URL: &str = "https://github.com/usertesting/ut_internal_documentation";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

// ---------------------------------------------------------------------------
// 1. Config structs
// ---------------------------------------------------------------------------

/// Everything a synchronization run needs besides the documents themselves.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SyncConfig {
    /// Base URL of the wiki, e.g. `https://example.atlassian.net/wiki`.
    pub endpoint: String,
    /// Target space key.
    pub space: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    /// Print intermediate state while syncing. No behavioural effect.
    pub debug: bool,
    /// Replace the label set on pages that already exist.
    pub sync_labels_on_update: bool,
    /// Regexes matched against source paths relative to the root.
    pub exclude: Vec<String>,
    /// Credited in the footer appended to every page.
    pub import_source: ImportSource,
    /// Directory of `.tera` files overriding the embedded templates.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub templates_dir: Option<PathBuf>,
    /// Per-request transport timeout.
    pub timeout_secs: u64,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            endpoint: String::new(),
            space: String::new(),
            username: None,
            password: None,
            debug: false,
            sync_labels_on_update: false,
            exclude: Vec::new(),
            import_source: ImportSource::default(),
            templates_dir: None,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

/// `import_source:` section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportSource {
    pub name: String,
    pub url: String,
}

impl Default for ImportSource {
    fn default() -> Self {
        Self {
            name: DEFAULT_SOURCE_NAME.to_string(),
            url: DEFAULT_SOURCE_URL.to_string(),
        }
    }
}

impl SyncConfig {
    /// Endpoint without trailing slashes, ready for path concatenation.
    pub fn endpoint_base(&self) -> &str {
        self.endpoint.trim_end_matches('/')
    }

    pub fn space_key(&self) -> SpaceKey {
        SpaceKey::from(self.space.as_str())
    }

    /// Fail if a setting the store cannot work without is still empty.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.endpoint.trim().is_empty() {
            return Err(ConfigError::Missing { field: "endpoint" });
        }
        if self.space.trim().is_empty() {
            return Err(ConfigError::Missing { field: "space" });
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// 2. Path helpers
// ---------------------------------------------------------------------------

/// `<home>/.md2wiki/config.yaml` — pure, no I/O.
pub fn config_path_at(home: &Path) -> PathBuf {
    home.join(".md2wiki").join("config.yaml")
}


// ---------------------------------------------------------------------------
// 3. Load
// ---------------------------------------------------------------------------

/// Load config from an explicit file.
///
/// Returns `ConfigError::ConfigNotFound` if absent,
/// `ConfigError::Parse` (with path + line context) if malformed YAML.
pub fn load_from(path: &Path) -> Result<SyncConfig, ConfigError> {
    if !path.exists() {
        return Err(ConfigError::ConfigNotFound {
            path: path.to_path_buf(),
        });
    }
    let contents = std::fs::read_to_string(path)?;
    if contents.trim().is_empty() {
        return Ok(SyncConfig::default());
    }
    serde_yaml::from_str(&contents).map_err(|e| ConfigError::Parse {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Load `<home>/.md2wiki/config.yaml`, falling back to defaults when absent.
pub fn load_at(home: &Path) -> Result<SyncConfig, ConfigError> {
    let path = config_path_at(home);
    if !path.exists() {
        return Ok(SyncConfig::default());
    }
    load_from(&path)
}

/// `load_at` convenience wrapper.
pub fn load() -> Result<SyncConfig, ConfigError> {
    load_at(&home()?)
}

// ---------------------------------------------------------------------------
// 4. Save (atomic)
// ---------------------------------------------------------------------------

/// Atomically write `config` to `path`.
///
/// Write flow: serialize → `.yaml.tmp` sibling → `chmod 0600` → `rename`.
/// Refuses to replace an existing file unless `overwrite` is set.
pub fn save_to(path: &Path, config: &SyncConfig, overwrite: bool) -> Result<(), ConfigError> {
    if path.exists() && !overwrite {
        return Err(ConfigError::AlreadyExists {
            path: path.to_path_buf(),
        });
    }
    if let Some(dir) = path.parent() {
        if !dir.exists() {
            std::fs::create_dir_all(dir)?;
            set_dir_permissions(dir)?;
        }
    }

    let tmp_path = path.with_extension("yaml.tmp");
    let yaml = serde_yaml::to_string(config)?;
    std::fs::write(&tmp_path, yaml)?;
    set_file_permissions(&tmp_path)?;
    std::fs::rename(&tmp_path, path)?;
    Ok(())
}

/// Write `config` to `<home>/.md2wiki/config.yaml`.
pub fn save_at(home: &Path, config: &SyncConfig, overwrite: bool) -> Result<PathBuf, ConfigError> {
    let path = config_path_at(home);
    save_to(&path, config, overwrite)?;
    Ok(path)
}

/// `save_at` convenience wrapper.
pub fn save(config: &SyncConfig, overwrite: bool) -> Result<PathBuf, ConfigError> {
    save_at(&home()?, config, overwrite)
}

// ---------------------------------------------------------------------------
// Private helpers
// ---------------------------------------------------------------------------

fn home() -> Result<PathBuf, ConfigError> {
    dirs::home_dir().ok_or(ConfigError::HomeNotFound)
}

#[cfg(unix)]
fn set_dir_permissions(path: &Path) -> Result<(), ConfigError> {
    use std::os::unix::fs::PermissionsExt;
    std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o700))?;
    Ok(())
}
#[cfg(not(unix))]
fn set_dir_permissions(_path: &Path) -> Result<(), ConfigError> {
    Ok(())
}

#[cfg(unix)]
fn set_file_permissions(path: &Path) -> Result<(), ConfigError> {
    use std::os::unix::fs::PermissionsExt;
    std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o600))?;
    Ok(())
}
#[cfg(not(unix))]
fn set_file_permissions(_path: &Path) -> Result<(), ConfigError> {
    Ok(())
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn config_path_is_correct() {
        let home = TempDir::new().expect("tempdir");
        assert!(config_path_at(home.path()).ends_with(".md2wiki/config.yaml"));
    }

    #[test]
    fn defaults_keep_labels_off_on_update() {
        let config = SyncConfig::default();
        assert!(!config.sync_labels_on_update);
        assert_eq!(config.timeout_secs, 30);
        assert_eq!(config.import_source.name, "UT Internal Documentation");
    }

    #[test]
    fn endpoint_base_trims_trailing_slashes() {
        let config = SyncConfig {
            endpoint: "https://wiki.example.com/wiki//".into(),
            ..SyncConfig::default()
        };
        assert_eq!(config.endpoint_base(), "https://wiki.example.com/wiki");
    }

    #[test]
    fn validate_requires_endpoint_then_space() {
        let mut config = SyncConfig::default();
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Missing { field: "endpoint" })
        ));
        config.endpoint = "https://wiki".into();
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Missing { field: "space" })
        ));
        config.space = "DOC".into();
        config.validate().expect("valid");
    }

    #[test]
    fn partial_yaml_fills_remaining_defaults() {
        let config: SyncConfig = serde_yaml::from_str("space: DOC\n").expect("parse");
        assert_eq!(config.space, "DOC");
        assert_eq!(config.timeout_secs, 30);
        assert!(config.exclude.is_empty());
    }

    #[test]
    fn load_at_missing_file_returns_defaults() {
        let home = TempDir::new().expect("tempdir");
        let config = load_at(home.path()).expect("load");
        assert_eq!(config, SyncConfig::default());
    }

    #[test]
    fn home_not_found_error_message() {
        assert!(ConfigError::HomeNotFound.to_string().contains("home directory"));
    }
}
