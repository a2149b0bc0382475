//! Markdown source discovery and loading.

use std::path::{Component, Path, PathBuf};

use regex::Regex;
use walkdir::WalkDir;

use md2wiki_core::{frontmatter, Document};
use md2wiki_renderer::Renderer;

use crate::error::{io_err, SyncError};

const EXTENSIONS: &[&str] = &["md", "markdown"];

/// A Markdown file found under the source root, not yet read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    pub path: PathBuf,
    /// File stem, used when front-matter has no `title`.
    pub title: String,
    /// Directories between the root and the file, outermost first.
    pub ancestor_path: Vec<String>,
}

/// Compile `--exclude` / `exclude:` patterns.
pub fn compile_excludes(patterns: &[String]) -> Result<Vec<Regex>, SyncError> {
    patterns
        .iter()
        .map(|p| Regex::new(p).map_err(SyncError::from))
        .collect()
}

/// Every Markdown file under `root`, sorted by path.
///
/// Files whose root-relative path (forward slashes) matches any of `excludes`
/// are dropped.
pub fn discover(root: &Path, excludes: &[Regex]) -> Result<Vec<SourceFile>, SyncError> {
    if !root.is_dir() {
        return Err(io_err(
            root,
            std::io::Error::new(std::io::ErrorKind::NotFound, "source directory not found"),
        ));
    }

    let mut files = Vec::new();
    for entry in WalkDir::new(root).follow_links(true) {
        let entry = entry.map_err(|e| {
            let path = e.path().unwrap_or(root).to_path_buf();
            io_err(path, e.into())
        })?;
        if !entry.file_type().is_file() || !is_markdown(entry.path()) {
            continue;
        }

        let relative = entry.path().strip_prefix(root).unwrap_or(entry.path());
        let relative_str = slash_path(relative);
        if let Some(pattern) = excludes.iter().find(|re| re.is_match(&relative_str)) {
            tracing::debug!(path = %relative_str, pattern = %pattern, "excluded");
            continue;
        }

        files.push(SourceFile {
            path: entry.path().to_path_buf(),
            title: stem(relative),
            ancestor_path: folders(relative),
        });
    }

    files.sort_by(|a, b| a.path.cmp(&b.path));
    Ok(files)
}

/// Read, split and render one source file.
pub fn load(source: &SourceFile, renderer: &Renderer) -> Result<Document, SyncError> {
    let raw = std::fs::read_to_string(&source.path).map_err(|e| io_err(&source.path, e))?;
    let (front_matter, body) =
        frontmatter::split(&raw).map_err(|e| SyncError::FrontMatter {
            path: source.path.clone(),
            source: e,
        })?;

    Ok(Document {
        path: source.path.clone(),
        title: source.title.clone(),
        ancestor_path: source.ancestor_path.clone(),
        rendered_body: renderer.render_markdown(body),
        front_matter,
    })
}

fn is_markdown(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| EXTENSIONS.iter().any(|x| e.eq_ignore_ascii_case(x)))
        .unwrap_or(false)
}

fn stem(relative: &Path) -> String {
    relative
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default()
}

fn folders(relative: &Path) -> Vec<String> {
    relative
        .parent()
        .map(|dir| {
            dir.components()
                .filter_map(|c| match c {
                    Component::Normal(name) => Some(name.to_string_lossy().into_owned()),
                    _ => None,
                })
                .collect()
        })
        .unwrap_or_default()
}

fn slash_path(relative: &Path) -> String {
    relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
