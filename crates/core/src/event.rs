//! Change event model

use std::path::PathBuf;

/// Type of filesystem change
///
/// Only creation and deletion are tracked; renames and modifications
/// are not consumed by the monitor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeKind {
    /// File created
    Created,
    /// File deleted
    Deleted,
}

/// A single filesystem change inside the watched directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeEvent {
    /// Full path of the affected entry
    pub path: PathBuf,
    /// Kind of change
    pub kind: ChangeKind,
}

impl ChangeEvent {
    pub fn created(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            kind: ChangeKind::Created,
        }
    }

    pub fn deleted(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            kind: ChangeKind::Deleted,
        }
    }
}
