//! Pending-change accumulation between drains
//!
//! Created and deleted paths are buffered in arrival order until the
//! debounce timer fires and the batch processor drains them.

use crate::event::{ChangeEvent, ChangeKind};
use parking_lot::Mutex;
use std::mem;
use std::path::PathBuf;

/// The drained contents of one batch
///
/// Paths appear as many times as events arrived for them; order within
/// each list is arrival order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChangeSet {
    /// Paths of files created since the previous drain
    pub created: Vec<PathBuf>,
    /// Paths of files deleted since the previous drain
    pub deleted: Vec<PathBuf>,
}

impl ChangeSet {
    pub fn is_empty(&self) -> bool {
        self.created.is_empty() && self.deleted.is_empty()
    }

    /// Total number of buffered events
    pub fn len(&self) -> usize {
        self.created.len() + self.deleted.len()
    }
}

/// Thread-safe buffers for pending created/deleted paths
///
/// The two buffers are guarded independently so create and delete
/// callbacks never contend with each other. Buffers are unbounded;
/// a burst that never goes quiet grows them without limit.
#[derive(Debug, Default)]
pub struct EventAccumulator {
    created: Mutex<Vec<PathBuf>>,
    deleted: Mutex<Vec<PathBuf>>,
}

impl EventAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a created-file path in arrival order
    pub fn record_created(&self, path: PathBuf) {
        self.created.lock().push(path);
    }

    /// Append a deleted-file path in arrival order
    pub fn record_deleted(&self, path: PathBuf) {
        self.deleted.lock().push(path);
    }

    /// Record an event by its kind
    pub fn record(&self, event: ChangeEvent) {
        match event.kind {
            ChangeKind::Created => self.record_created(event.path),
            ChangeKind::Deleted => self.record_deleted(event.path),
        }
    }

    /// Take ownership of all buffered paths, leaving both buffers empty
    ///
    /// Events appended before the locks are taken land in the returned
    /// set; events appended after start a fresh accumulation. Locks are
    /// held only for the swap, never across any I/O.
    pub fn drain(&self) -> ChangeSet {
        let created = mem::take(&mut *self.created.lock());
        let deleted = mem::take(&mut *self.deleted.lock());
        ChangeSet { created, deleted }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;
    use std::sync::Arc;

    #[test]
    fn test_drain_preserves_arrival_order() {
        let acc = EventAccumulator::new();
        acc.record_created(PathBuf::from("/watch/a.txt"));
        acc.record_created(PathBuf::from("/watch/b.txt"));
        acc.record_deleted(PathBuf::from("/watch/c.txt"));

        let set = acc.drain();
        assert_eq!(set.created, vec![Path::new("/watch/a.txt"), Path::new("/watch/b.txt")]);
        assert_eq!(set.deleted, vec![Path::new("/watch/c.txt")]);
    }

    #[test]
    fn test_drain_is_idempotent_when_no_new_events() {
        let acc = EventAccumulator::new();
        acc.record_created(PathBuf::from("/watch/a.txt"));

        assert_eq!(acc.drain().len(), 1);
        assert!(acc.drain().is_empty());
    }

    #[test]
    fn test_duplicate_events_are_kept() {
        let acc = EventAccumulator::new();
        acc.record_created(PathBuf::from("/watch/a.txt"));
        acc.record_created(PathBuf::from("/watch/a.txt"));

        let set = acc.drain();
        assert_eq!(set.created.len(), 2);
    }

    #[test]
    fn test_concurrent_appends_are_not_lost() {
        let acc = Arc::new(EventAccumulator::new());
        let mut handles = Vec::new();

        for i in 0..8 {
            let acc = Arc::clone(&acc);
            handles.push(std::thread::spawn(move || {
                for j in 0..100 {
                    let path = PathBuf::from(format!("/watch/{i}-{j}.txt"));
                    if i % 2 == 0 {
                        acc.record_created(path);
                    } else {
                        acc.record_deleted(path);
                    }
                }
            }));
        }
        for handle in handles {
            handle.join().unwrap();
        }

        let set = acc.drain();
        assert_eq!(set.created.len(), 400);
        assert_eq!(set.deleted.len(), 400);

        // Every distinct path shows up exactly once
        let mut all: Vec<_> = set.created.iter().chain(set.deleted.iter()).collect();
        all.sort();
        all.dedup();
        assert_eq!(all.len(), 800);
    }

    #[test]
    fn test_record_dispatches_by_kind() {
        let acc = EventAccumulator::new();
        acc.record(ChangeEvent::created("/watch/new.txt"));
        acc.record(ChangeEvent::deleted("/watch/old.txt"));

        let set = acc.drain();
        assert_eq!(set.created, vec![Path::new("/watch/new.txt")]);
        assert_eq!(set.deleted, vec![Path::new("/watch/old.txt")]);
    }
}
