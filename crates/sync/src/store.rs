//! Remote object store seam and shipped backends
//!
//! The store exposes a flat namespace keyed by file base name. Uploads
//! overwrite existing keys silently; deleting a missing key succeeds.

use async_trait::async_trait;
use dashmap::DashMap;
use driftwatch_core::StoreError;
use std::path::{Path, PathBuf};

/// Object store accepting uploads and deletions by key
#[async_trait]
pub trait RemoteStore: Send + Sync {
    /// Upload the file at `local` under `key`, overwriting any existing object
    async fn put(&self, local: &Path, key: &str) -> Result<(), StoreError>;

    /// Remove the object under `key`; absent keys are not an error
    async fn delete(&self, key: &str) -> Result<(), StoreError>;
}

/// Keys must be plain base names; anything with a path separator would
/// escape the flat namespace.
fn validate_key(key: &str) -> Result<(), StoreError> {
    if key.is_empty() || key.contains('/') || key.contains('\\') {
        return Err(StoreError::Rejected {
            key: key.to_string(),
            reason: "key must be a plain file name".to_string(),
        });
    }
    Ok(())
}

/// Store backend that mirrors objects into a local directory
#[derive(Debug, Clone)]
pub struct DirStore {
    root: PathBuf,
}

impl DirStore {
    /// Open (creating if needed) a mirror directory
    pub async fn open(root: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let root = root.into();
        tokio::fs::create_dir_all(&root).await?;
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

#[async_trait]
impl RemoteStore for DirStore {
    async fn put(&self, local: &Path, key: &str) -> Result<(), StoreError> {
        validate_key(key)?;
        tokio::fs::copy(local, self.root.join(key)).await?;
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<(), StoreError> {
        validate_key(key)?;
        match tokio::fs::remove_file(self.root.join(key)).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// In-memory store backend, used by tests and dry runs
#[derive(Debug, Default)]
pub struct MemoryStore {
    objects: DashMap<String, Vec<u8>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.objects.contains_key(key)
    }

    pub fn get(&self, key: &str) -> Option<Vec<u8>> {
        self.objects.get(key).map(|v| v.value().clone())
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }
}

#[async_trait]
impl RemoteStore for MemoryStore {
    async fn put(&self, local: &Path, key: &str) -> Result<(), StoreError> {
        validate_key(key)?;
        let bytes = tokio::fs::read(local).await?;
        self.objects.insert(key.to_string(), bytes);
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<(), StoreError> {
        validate_key(key)?;
        self.objects.remove(key);
        Ok(())
    }
}
