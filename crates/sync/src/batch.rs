//! Batch processing: drain, sync, publish
//!
//! Runs once per debounce fire. Remote calls happen outside any lock
//! and are awaited to completion before the status message goes out.

use crate::store::RemoteStore;
use driftwatch_core::status::{base_name, compose_message};
use driftwatch_core::{EventAccumulator, StatusPublisher, SyncError};
use std::sync::Arc;
use tracing::{debug, warn};

/// Outcome of one processed batch
///
/// Failures are the per-file error channel; they never abort the batch.
#[derive(Debug, Default)]
pub struct BatchReport {
    /// Files uploaded successfully
    pub uploaded: usize,
    /// Remote keys deleted successfully
    pub removed: usize,
    /// Per-file sync failures, in the order they occurred
    pub failures: Vec<SyncError>,
}

impl BatchReport {
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Drains the accumulator and syncs the batch to the remote store
#[derive(Clone)]
pub struct BatchProcessor {
    accumulator: Arc<EventAccumulator>,
    store: Arc<dyn RemoteStore>,
    publisher: Arc<StatusPublisher>,
}

impl BatchProcessor {
    pub fn new(
        accumulator: Arc<EventAccumulator>,
        store: Arc<dyn RemoteStore>,
        publisher: Arc<StatusPublisher>,
    ) -> Self {
        Self {
            accumulator,
            store,
            publisher,
        }
    }

    /// Process everything accumulated since the previous drain
    ///
    /// Uploads created files then deletes removed keys, each in arrival
    /// order, best-effort per file. Publishes the batch summary only if
    /// the batch was non-empty. An empty drain is a no-op.
    pub async fn process(&self) -> BatchReport {
        let set = self.accumulator.drain();
        let mut report = BatchReport::default();

        if set.is_empty() {
            return report;
        }
        debug!(
            created = set.created.len(),
            deleted = set.deleted.len(),
            "processing batch"
        );

        for path in &set.created {
            let Some(key) = base_name(path) else {
                debug!(path = %path.display(), "skipping path with no base name");
                continue;
            };
            match self.store.put(path, key).await {
                Ok(()) => report.uploaded += 1,
                Err(source) => {
                    let err = SyncError::Upload {
                        path: path.clone(),
                        key: key.to_string(),
                        source,
                    };
                    warn!("{err}");
                    report.failures.push(err);
                }
            }
        }

        for path in &set.deleted {
            let Some(key) = base_name(path) else {
                debug!(path = %path.display(), "skipping path with no base name");
                continue;
            };
            match self.store.delete(key).await {
                Ok(()) => report.removed += 1,
                Err(source) => {
                    let err = SyncError::Delete {
                        key: key.to_string(),
                        source,
                    };
                    warn!("{err}");
                    report.failures.push(err);
                }
            }
        }

        if let Some(message) = compose_message(&set) {
            self.publisher.publish(message);
        }

        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use driftwatch_core::StoreError;
    use std::path::{Path, PathBuf};
    use tempfile::TempDir;

    /// Store that fails every operation touching a chosen key
    struct FlakyStore {
        inner: crate::store::MemoryStore,
        poison_key: String,
    }

    #[async_trait]
    impl RemoteStore for FlakyStore {
        async fn put(&self, local: &Path, key: &str) -> Result<(), StoreError> {
            if key == self.poison_key {
                return Err(StoreError::Rejected {
                    key: key.to_string(),
                    reason: "injected failure".to_string(),
                });
            }
            self.inner.put(local, key).await
        }

        async fn delete(&self, key: &str) -> Result<(), StoreError> {
            if key == self.poison_key {
                return Err(StoreError::Rejected {
                    key: key.to_string(),
                    reason: "injected failure".to_string(),
                });
            }
            self.inner.delete(key).await
        }
    }

    fn fixture(store: Arc<dyn RemoteStore>) -> (Arc<EventAccumulator>, Arc<StatusPublisher>, BatchProcessor) {
        let accumulator = Arc::new(EventAccumulator::new());
        let publisher = Arc::new(StatusPublisher::new("Monitoring folder: /watch"));
        let processor = BatchProcessor::new(accumulator.clone(), store, publisher.clone());
        (accumulator, publisher, processor)
    }

    fn touch(dir: &TempDir, name: &str) -> PathBuf {
        let path = dir.path().join(name);
        std::fs::write(&path, name.as_bytes()).unwrap();
        path
    }

    #[tokio::test]
    async fn test_empty_batch_is_a_no_op() {
        let store = Arc::new(crate::store::MemoryStore::new());
        let (_acc, publisher, processor) = fixture(store);

        let report = processor.process().await;
        assert_eq!(report.uploaded + report.removed, 0);
        assert!(report.is_clean());
        assert_eq!(publisher.current(), "Monitoring folder: /watch");
    }

    #[tokio::test]
    async fn test_mixed_batch_syncs_and_publishes() {
        let dir = TempDir::new().unwrap();
        let store = Arc::new(crate::store::MemoryStore::new());
        let (acc, publisher, processor) = fixture(store.clone());

        acc.record_created(touch(&dir, "file1.txt"));
        acc.record_created(touch(&dir, "file2.txt"));
        acc.record_deleted(dir.path().join("deletedfile.txt"));

        let report = processor.process().await;
        assert_eq!(report.uploaded, 2);
        assert_eq!(report.removed, 1);
        assert!(report.is_clean());
        assert!(store.contains("file1.txt"));
        assert!(store.contains("file2.txt"));

        assert_eq!(
            publisher.current().trim_end(),
            "Files created: file1.txt, file2.txt\nFiles removed: deletedfile.txt"
        );
    }

    #[tokio::test]
    async fn test_one_upload_failure_does_not_stop_the_batch() {
        let dir = TempDir::new().unwrap();
        let store = Arc::new(FlakyStore {
            inner: crate::store::MemoryStore::new(),
            poison_key: "b.txt".to_string(),
        });
        let (acc, publisher, processor) = fixture(store);

        acc.record_created(touch(&dir, "a.txt"));
        acc.record_created(touch(&dir, "b.txt"));
        acc.record_created(touch(&dir, "c.txt"));

        let report = processor.process().await;
        assert_eq!(report.uploaded, 2);
        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.failures[0].key(), "b.txt");

        // The message still lists the whole batch
        assert_eq!(
            publisher.current().trim_end(),
            "Files created: a.txt, b.txt, c.txt"
        );
    }

    #[tokio::test]
    async fn test_second_process_after_drain_publishes_nothing_new() {
        let dir = TempDir::new().unwrap();
        let store = Arc::new(crate::store::MemoryStore::new());
        let (acc, publisher, processor) = fixture(store);

        acc.record_created(touch(&dir, "once.txt"));
        processor.process().await;
        let first = publisher.current();

        let report = processor.process().await;
        assert_eq!(report.uploaded, 0);
        assert_eq!(publisher.current(), first);
    }
}
