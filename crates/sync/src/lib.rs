//! Batch synchronization engine for driftwatch
//!
//! This crate provides:
//! - The `RemoteStore` seam plus directory and in-memory backends
//! - Debounce scheduling (reset-on-activity quiet-period timer)
//! - Batch processing (drain, per-file sync, status publication)
//! - The `FolderMonitor` coordinator tying the pieces together

pub mod batch;
pub mod debounce;
pub mod monitor;
pub mod store;

// Re-exports
pub use batch::{BatchProcessor, BatchReport};
pub use debounce::{DebounceHandle, DebounceScheduler, DEFAULT_QUIET_PERIOD};
pub use monitor::{FolderMonitor, MonitorConfig};
pub use store::{DirStore, MemoryStore, RemoteStore};
