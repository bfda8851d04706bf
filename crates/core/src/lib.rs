//! Core types for driftwatch
//!
//! This crate provides:
//! - Change event model (created/deleted paths)
//! - Thread-safe event accumulation with atomic drain
//! - Batch status message composition
//! - Status publication over a watch channel
//! - Error taxonomy shared across the workspace

pub mod accumulator;
pub mod error;
pub mod event;
pub mod status;

// Re-exports
pub use accumulator::{ChangeSet, EventAccumulator};
pub use error::{IngestionError, StoreError, SyncError};
pub use event::{ChangeEvent, ChangeKind};
pub use status::{compose_message, StatusPublisher};
