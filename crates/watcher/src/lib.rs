//! Filesystem notification source for driftwatch
//!
//! Wraps a platform watcher (notify) into a stream of `ChangeEvent`s:
//! non-recursive, creations and deletions only. Renames and content
//! modifications are not consumed.

use driftwatch_core::{ChangeEvent, ChangeKind, IngestionError};
use notify::{Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use std::path::{Path, PathBuf};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

/// Live watch on a single directory
///
/// Events are delivered on the returned channel; dropping the
/// `DirWatcher` stops delivery and closes the channel.
#[derive(Debug)]
pub struct DirWatcher {
    // Held for its Drop; the backend unwatches when this goes away.
    _watcher: RecommendedWatcher,
    dir: PathBuf,
}

impl DirWatcher {
    /// Start watching `dir` for created/deleted entries
    ///
    /// Only entries directly inside `dir` are reported. A failure to
    /// start the platform watcher is fatal (`IngestionError`).
    pub fn spawn(
        dir: &Path,
    ) -> Result<(Self, mpsc::UnboundedReceiver<ChangeEvent>), IngestionError> {
        if !dir.is_dir() {
            return Err(IngestionError::NotADirectory(dir.to_path_buf()));
        }

        let (tx, rx) = mpsc::unbounded_channel();
        let watched = dir.to_path_buf();

        let mut watcher = notify::recommended_watcher(move |res: notify::Result<Event>| {
            let event = match res {
                Ok(event) => event,
                Err(e) => {
                    warn!("watch backend error: {e}");
                    return;
                }
            };
            let kind = match event.kind {
                EventKind::Create(_) => ChangeKind::Created,
                EventKind::Remove(_) => ChangeKind::Deleted,
                _ => return,
            };
            for path in event.paths {
                // The watch is non-recursive, but some backends still
                // surface events for deeper paths; keep direct children only.
                if path.parent() != Some(watched.as_path()) {
                    debug!(path = %path.display(), "dropping non-direct child event");
                    continue;
                }
                // Receiver gone means the monitor is shutting down.
                let _ = tx.send(ChangeEvent { path, kind });
            }
        })
        .map_err(|e| IngestionError::WatcherStart {
            path: dir.to_path_buf(),
            source: Box::new(e),
        })?;

        watcher
            .watch(dir, RecursiveMode::NonRecursive)
            .map_err(|e| IngestionError::WatcherStart {
                path: dir.to_path_buf(),
                source: Box::new(e),
            })?;

        info!(dir = %dir.display(), "watching directory");
        Ok((
            Self {
                _watcher: watcher,
                dir: dir.to_path_buf(),
            },
            rx,
        ))
    }

    /// Directory being watched
    pub fn dir(&self) -> &Path {
        &self.dir
    }
}
