//! Whole-tree sync run shared by `md2wiki sync` and its dry-run mode.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};

use md2wiki_core::SyncConfig;
use md2wiki_renderer::Renderer;
use md2wiki_store::ContentStore;

use crate::error::SyncError;
use crate::source::{compile_excludes, discover, load};
use crate::uploader::{Synchronizer, UploadAction, UploadOutcome};

/// Outcome of one source file.
#[derive(Debug)]
pub struct FileReport {
    pub path: PathBuf,
    pub result: Result<UploadOutcome, SyncError>,
}

/// Everything that happened during one run, in processing order.
#[derive(Debug)]
pub struct RunReport {
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub files: Vec<FileReport>,
}

impl RunReport {
    pub fn created(&self) -> usize {
        self.count(UploadAction::Created)
    }

    pub fn updated(&self) -> usize {
        self.count(UploadAction::Updated)
    }

    pub fn failed(&self) -> usize {
        self.files.iter().filter(|f| f.result.is_err()).count()
    }

    pub fn is_success(&self) -> bool {
        self.failed() == 0
    }

    fn count(&self, action: UploadAction) -> usize {
        self.files
            .iter()
            .filter(|f| matches!(&f.result, Ok(o) if o.action == action))
            .count()
    }
}

/// Discover every Markdown file under `root` and upload each in path order.
///
/// Discovery problems (missing root, bad exclude pattern) fail the run. A
/// failure on one file is recorded in its [`FileReport`] and the run moves on;
/// pages already written stay written.
pub fn run<S: ContentStore>(
    store: &S,
    renderer: &Renderer,
    config: &SyncConfig,
    root: &Path,
) -> Result<RunReport, SyncError> {
    let started_at = Utc::now();
    let excludes = compile_excludes(&config.exclude)?;
    let sources = discover(root, &excludes)?;
    tracing::debug!(root = %root.display(), count = sources.len(), "discovered sources");

    let mut synchronizer = Synchronizer::new(store, renderer, config);
    let mut files = Vec::with_capacity(sources.len());
    for source in &sources {
        let result = load(source, renderer).and_then(|doc| synchronizer.upload(&doc));
        if let Err(err) = &result {
            tracing::warn!(path = %source.path.display(), "sync failed: {err}");
        }
        files.push(FileReport {
            path: source.path.clone(),
            result,
        });
    }

    Ok(RunReport {
        started_at,
        finished_at: Utc::now(),
        files,
    })
}
