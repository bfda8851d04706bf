//! Driftwatch CLI - dw command

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use owo_colors::OwoColorize;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

use driftwatch_sync::{DirStore, FolderMonitor, MonitorConfig};
use driftwatch_watcher::DirWatcher;

mod config;

use config::{ConfigFile, Settings};

/// Driftwatch - mirror a folder's churn into an object store
#[derive(Parser)]
#[command(name = "dw")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Watch a directory and sync creations/deletions to the mirror
    Watch {
        /// Directory to watch (overrides config file)
        dir: Option<PathBuf>,

        /// Mirror directory backing the store (overrides config file)
        #[arg(short, long)]
        mirror: Option<PathBuf>,

        /// Quiet period in milliseconds (default: 1000)
        #[arg(long)]
        quiet_ms: Option<u64>,

        /// Path to a TOML config file
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Watch {
            dir,
            mirror,
            quiet_ms,
            config,
        } => watch(dir, mirror, quiet_ms, config).await,
    }
}

async fn watch(
    dir: Option<PathBuf>,
    mirror: Option<PathBuf>,
    quiet_ms: Option<u64>,
    config: Option<PathBuf>,
) -> Result<()> {
    let file = match config {
        Some(path) => ConfigFile::load(&path)?,
        None => ConfigFile::default(),
    };
    let settings = Settings::resolve(file, dir, mirror, quiet_ms)?;

    let store = DirStore::open(&settings.mirror_dir)
        .await
        .with_context(|| {
            format!(
                "failed to open mirror directory {}",
                settings.mirror_dir.display()
            )
        })?;

    // Watcher startup failure is fatal; there is nothing to monitor without it
    let (watcher, events) = DirWatcher::spawn(&settings.watch_dir)?;

    let monitor = FolderMonitor::start(
        MonitorConfig::new(watcher.dir()).with_quiet_period(settings.quiet_period),
        Arc::new(store),
        events,
    );

    println!("{}", monitor.status().bold());
    let mut updates = monitor.subscribe();
    let printer = tokio::spawn(async move {
        while updates.changed().await.is_ok() {
            let message = updates.borrow_and_update().clone();
            print!("{}", message.green());
        }
    });

    tokio::signal::ctrl_c()
        .await
        .context("failed to listen for ctrl-c")?;
    info!("shutting down");

    monitor.shutdown().await;
    printer.abort();
    drop(watcher);
    Ok(())
}
