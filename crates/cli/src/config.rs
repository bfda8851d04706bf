//! CLI configuration
//!
//! Settings come from an optional TOML file with CLI flags taking
//! precedence. Only three knobs exist: what to watch, where to mirror,
//! and how long the quiet period is.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// On-disk configuration file contents
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    /// Directory to watch
    pub watch_dir: Option<PathBuf>,
    /// Mirror directory backing the object store
    pub mirror_dir: Option<PathBuf>,
    /// Quiet period in milliseconds (default 1000)
    pub quiet_ms: Option<u64>,
}

impl ConfigFile {
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        toml::from_str(&raw)
            .with_context(|| format!("failed to parse config file {}", path.display()))
    }
}

/// Fully resolved settings for a watch session
#[derive(Debug, Clone)]
pub struct Settings {
    pub watch_dir: PathBuf,
    pub mirror_dir: PathBuf,
    pub quiet_period: Duration,
}

impl Settings {
    /// Merge CLI flags over config-file values
    pub fn resolve(
        file: ConfigFile,
        watch_dir: Option<PathBuf>,
        mirror_dir: Option<PathBuf>,
        quiet_ms: Option<u64>,
    ) -> Result<Self> {
        let watch_dir = watch_dir
            .or(file.watch_dir)
            .context("no watch directory given (flag or config file)")?;
        let mirror_dir = mirror_dir
            .or(file.mirror_dir)
            .context("no mirror directory given (flag or config file)")?;
        let quiet_ms = quiet_ms.or(file.quiet_ms).unwrap_or(1000);

        Ok(Self {
            watch_dir,
            mirror_dir,
            quiet_period: Duration::from_millis(quiet_ms),
        })
    }
}
