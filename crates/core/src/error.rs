//! Error taxonomy
//!
//! `IngestionError` is the only fatal condition; a `SyncError` is
//! contained at single-file granularity and never aborts a batch.

use std::path::PathBuf;
use thiserror::Error;

/// The notification source failed; monitoring must stop
#[derive(Debug, Error)]
pub enum IngestionError {
    #[error("watched directory does not exist or is not a directory: {}", .0.display())]
    NotADirectory(PathBuf),

    #[error("failed to start filesystem watcher on {}: {source}", .path.display())]
    WatcherStart {
        path: PathBuf,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("filesystem event stream ended unexpectedly")]
    StreamClosed,
}

/// A backend-level object store failure
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("local file unreadable: {0}")]
    Io(#[from] std::io::Error),

    #[error("store rejected key {key:?}: {reason}")]
    Rejected { key: String, reason: String },
}

/// A single file's upload or delete failed
#[derive(Debug, Error)]
pub enum SyncError {
    #[error("failed to upload {key:?} from {}: {source}", .path.display())]
    Upload {
        path: PathBuf,
        key: String,
        #[source]
        source: StoreError,
    },

    #[error("failed to delete {key:?}: {source}")]
    Delete {
        key: String,
        #[source]
        source: StoreError,
    },
}

impl SyncError {
    /// Remote key of the file this failure concerns
    pub fn key(&self) -> &str {
        match self {
            SyncError::Upload { key, .. } | SyncError::Delete { key, .. } => key,
        }
    }
}
