//! md2wiki — mirror a tree of Markdown documents into a wiki space.
//!
//! # Usage
//!
//! ```text
//! md2wiki sync <SOURCE> [--space S] [--endpoint URL] [--username U] [--password P]
//!                       [--exclude REGEX]... [--sync-labels-on-update] [--dry-run] [--json]
//! md2wiki render <FILE>
//! md2wiki init [--endpoint URL] [--space S] [--force]
//! ```
//!
//! Global flags: `--config <PATH>`, `--debug`.

mod commands;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use commands::{init::InitArgs, render::RenderArgs, sync::SyncArgs, GlobalArgs};

// ---------------------------------------------------------------------------
// CLI entry point
// ---------------------------------------------------------------------------

#[derive(Parser, Debug)]
#[command(
    name = "md2wiki",
    version,
    about = "Synchronize a directory of Markdown documents into a wiki space",
    long_about = None,
)]
struct Cli {
    /// Config file to use instead of ~/.md2wiki/config.yaml.
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Log intermediate state (titles, front-matter, labels, requests).
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Create or update one page per Markdown file under SOURCE.
    Sync(SyncArgs),

    /// Print the storage body that would be uploaded for one file.
    Render(RenderArgs),

    /// Write a starter config file.
    Init(InitArgs),
}

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

fn main() -> Result<()> {
    let cli = Cli::parse();
    let global = GlobalArgs {
        config: cli.config,
        debug: cli.debug,
    };
    match cli.command {
        Commands::Sync(args) => args.run(&global),
        Commands::Render(args) => args.run(&global),
        Commands::Init(args) => args.run(&global),
    }
}
