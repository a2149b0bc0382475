//! `md2wiki sync <SOURCE>` — create or update one page per Markdown file.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use chrono::{DateTime, Utc};
use clap::Args;
use colored::Colorize;
use serde::Serialize;
use tabled::{settings::Style, Table, Tabled};

use md2wiki_core::SyncConfig;
use md2wiki_renderer::Renderer;
use md2wiki_store::{ConfluenceClient, InMemoryStore};
use md2wiki_sync::{run, RunReport, UploadAction};

use super::{init_tracing, load_config, GlobalArgs};

/// Arguments for `md2wiki sync`.
#[derive(Args, Debug)]
pub struct SyncArgs {
    /// Root directory of the Markdown tree.
    pub source: PathBuf,

    /// Target space key.
    #[arg(long, env = "CONFLUENCE_SPACE")]
    pub space: Option<String>,

    /// Wiki base URL, e.g. https://example.atlassian.net/wiki
    #[arg(long, env = "CONFLUENCE_ENDPOINT", value_name = "URL")]
    pub endpoint: Option<String>,

    #[arg(long, env = "CONFLUENCE_USERNAME")]
    pub username: Option<String>,

    #[arg(long, env = "CONFLUENCE_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,

    /// Skip files whose path relative to SOURCE matches. Repeatable.
    #[arg(long = "exclude", value_name = "REGEX")]
    pub exclude: Vec<String>,

    /// Replace the label set of pages that already exist.
    #[arg(long)]
    pub sync_labels_on_update: bool,

    /// Run against an empty in-memory store; nothing is sent anywhere.
    #[arg(long)]
    pub dry_run: bool,

    /// Emit a machine-readable JSON report.
    #[arg(long)]
    pub json: bool,
}

impl SyncArgs {
    pub fn run(self, global: &GlobalArgs) -> Result<()> {
        let mut config = load_config(global)?;
        self.apply(&mut config);
        init_tracing(global.debug || config.debug);

        if !self.dry_run {
            config.validate().context("incomplete sync settings")?;
        }
        let renderer = Renderer::from_config(&config).context("failed to load templates")?;

        let report = if self.dry_run {
            let store = InMemoryStore::new();
            sync_tree(&store, &renderer, &config, &self.source)?
        } else {
            let client = ConfluenceClient::from_config(&config);
            sync_tree(&client, &renderer, &config, &self.source)?
        };

        if self.json {
            print_json(&report)?;
        } else {
            print_report(&report, &self.source, self.dry_run);
        }

        if !report.is_success() {
            bail!(
                "{} of {} files failed to sync",
                report.failed(),
                report.files.len()
            );
        }
        Ok(())
    }

    /// Layer flags (and their env fallbacks) over the file config.
    fn apply(&self, config: &mut SyncConfig) {
        if let Some(space) = &self.space {
            config.space = space.clone();
        }
        if let Some(endpoint) = &self.endpoint {
            config.endpoint = endpoint.clone();
        }
        if let Some(username) = &self.username {
            config.username = Some(username.clone());
        }
        if let Some(password) = &self.password {
            config.password = Some(password.clone());
        }
        config.exclude.extend(self.exclude.iter().cloned());
        config.sync_labels_on_update |= self.sync_labels_on_update;
    }
}

fn sync_tree<S: md2wiki_store::ContentStore>(
    store: &S,
    renderer: &Renderer,
    config: &SyncConfig,
    source: &Path,
) -> Result<RunReport> {
    run(store, renderer, config, source)
        .with_context(|| format!("sync failed for '{}'", source.display()))
}

// ---------------------------------------------------------------------------
// Output
// ---------------------------------------------------------------------------

#[derive(Tabled)]
struct FileRow {
    #[tabled(rename = "file")]
    file: String,
    #[tabled(rename = "result")]
    result: String,
    #[tabled(rename = "title")]
    title: String,
    #[tabled(rename = "link / error")]
    detail: String,
}

fn print_report(report: &RunReport, root: &Path, dry_run: bool) {
    let prefix = if dry_run { "[dry-run] " } else { "" };

    if report.files.is_empty() {
        println!("{prefix}✓ '{}' — no Markdown files found", root.display());
        return;
    }

    let rows: Vec<FileRow> = report
        .files
        .iter()
        .map(|file| {
            let path = file.path.strip_prefix(root).unwrap_or(&file.path);
            match &file.result {
                Ok(outcome) => FileRow {
                    file: path.display().to_string(),
                    result: action_label(outcome.action).to_string(),
                    title: outcome.title.clone(),
                    detail: outcome.url.clone(),
                },
                Err(err) => FileRow {
                    file: path.display().to_string(),
                    result: "failed".to_string(),
                    title: String::new(),
                    detail: err.to_string(),
                },
            }
        })
        .collect();
    let mut table = Table::new(rows);
    table.with(Style::rounded());
    println!("{table}");

    let summary = format!(
        "{} files ({} created, {} updated, {} failed)",
        report.files.len(),
        report.created(),
        report.updated(),
        report.failed()
    );
    if report.is_success() {
        println!("{prefix}✓ synced {summary}");
    } else {
        println!("{prefix}{} {summary}", "✗".red().bold());
    }
}

fn action_label(action: UploadAction) -> &'static str {
    match action {
        UploadAction::Created => "created",
        UploadAction::Updated => "updated",
    }
}

#[derive(Serialize)]
struct ReportJson {
    started_at: DateTime<Utc>,
    finished_at: DateTime<Utc>,
    created: usize,
    updated: usize,
    failed: usize,
    files: Vec<FileJson>,
}

#[derive(Serialize)]
struct FileJson {
    path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    action: Option<UploadAction>,
    #[serde(skip_serializing_if = "Option::is_none")]
    title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    version: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

fn print_json(report: &RunReport) -> Result<()> {
    let payload = ReportJson {
        started_at: report.started_at,
        finished_at: report.finished_at,
        created: report.created(),
        updated: report.updated(),
        failed: report.failed(),
        files: report
            .files
            .iter()
            .map(|file| {
                let path = file.path.display().to_string();
                match &file.result {
                    Ok(outcome) => FileJson {
                        path,
                        action: Some(outcome.action),
                        title: Some(outcome.title.clone()),
                        url: Some(outcome.url.clone()),
                        version: Some(outcome.version),
                        error: None,
                    },
                    Err(err) => FileJson {
                        path,
                        action: None,
                        title: None,
                        url: None,
                        version: None,
                        error: Some(err.to_string()),
                    },
                }
            })
            .collect(),
    };
    println!(
        "{}",
        serde_json::to_string_pretty(&payload).context("failed to serialize sync report")?
    );
    Ok(())
}
