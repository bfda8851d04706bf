//! Batch status messages
//!
//! Each completed non-empty batch replaces the published status string
//! wholesale; nothing is appended across batches.

use crate::accumulator::ChangeSet;
use std::path::Path;
use tokio::sync::watch;

/// Compose the human-readable summary of a drained batch
///
/// Returns `None` for an empty batch. Base names are listed in arrival
/// order, once per event received (no deduplication). A path with no
/// extractable base name is skipped from the line but never aborts
/// composition.
pub fn compose_message(set: &ChangeSet) -> Option<String> {
    let mut message = String::new();

    if let Some(names) = join_base_names(&set.created) {
        message.push_str(&format!("Files created: {names}\n"));
    }
    if let Some(names) = join_base_names(&set.deleted) {
        message.push_str(&format!("Files removed: {names}\n"));
    }

    if message.is_empty() {
        None
    } else {
        Some(message)
    }
}

fn join_base_names(paths: &[std::path::PathBuf]) -> Option<String> {
    let names: Vec<&str> = paths.iter().filter_map(|p| base_name(p)).collect();
    if names.is_empty() {
        None
    } else {
        Some(names.join(", "))
    }
}

/// Base name of a path, used as the remote key (flat namespace)
pub fn base_name(path: &Path) -> Option<&str> {
    path.file_name().and_then(|n| n.to_str())
}

/// Holds the latest status string and wakes subscribers on change
///
/// Seeded with a placeholder before the first batch completes.
#[derive(Debug)]
pub struct StatusPublisher {
    tx: watch::Sender<String>,
}

impl StatusPublisher {
    /// Create a publisher seeded with the given initial status
    pub fn new(initial: impl Into<String>) -> Self {
        let (tx, _rx) = watch::channel(initial.into());
        Self { tx }
    }

    /// Replace the current status and notify all subscribers
    pub fn publish(&self, message: impl Into<String>) {
        self.tx.send_replace(message.into());
    }

    /// Latest published status
    pub fn current(&self) -> String {
        self.tx.borrow().clone()
    }

    /// Subscribe to status changes
    ///
    /// The receiver observes the value current at subscription time and
    /// every replacement thereafter.
    pub fn subscribe(&self) -> watch::Receiver<String> {
        self.tx.subscribe()
    }
}
