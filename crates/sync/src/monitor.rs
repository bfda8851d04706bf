//! Folder monitor coordinator
//!
//! Owns the accumulator, debounce scheduler, and status publisher as one
//! instance with explicit start/shutdown, instead of process-wide state.

use crate::batch::BatchProcessor;
use crate::debounce::{DebounceScheduler, DEFAULT_QUIET_PERIOD};
use crate::store::RemoteStore;
use driftwatch_core::{ChangeEvent, EventAccumulator, IngestionError, StatusPublisher};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tracing::{error, info, trace, warn};

/// Monitor settings
#[derive(Debug, Clone)]
pub struct MonitorConfig {
    /// Directory being watched (used for the initial status line)
    pub folder: PathBuf,
    /// Quiet period required before a batch closes
    pub quiet_period: Duration,
}

impl MonitorConfig {
    pub fn new(folder: impl Into<PathBuf>) -> Self {
        Self {
            folder: folder.into(),
            quiet_period: DEFAULT_QUIET_PERIOD,
        }
    }

    pub fn with_quiet_period(mut self, quiet_period: Duration) -> Self {
        self.quiet_period = quiet_period;
        self
    }
}

/// Running monitor: ingest task + debounce/process task
///
/// Events flow: channel -> accumulator append + timer kick -> quiet
/// period elapses -> drain, sync, publish. If the event stream ends on
/// its own the monitor logs an ingestion error and winds down; pending
/// undrained events are abandoned (batches are not persisted).
pub struct FolderMonitor {
    publisher: Arc<StatusPublisher>,
    ingest: JoinHandle<()>,
    process: JoinHandle<()>,
}

impl FolderMonitor {
    /// Start monitoring the given event stream
    pub fn start(
        config: MonitorConfig,
        store: Arc<dyn RemoteStore>,
        mut events: mpsc::UnboundedReceiver<ChangeEvent>,
    ) -> Self {
        let accumulator = Arc::new(EventAccumulator::new());
        let publisher = Arc::new(StatusPublisher::new(format!(
            "Monitoring folder: {}",
            config.folder.display()
        )));

        let (handle, scheduler) = DebounceScheduler::new(config.quiet_period);
        let processor = BatchProcessor::new(accumulator.clone(), store, publisher.clone());

        info!(
            folder = %config.folder.display(),
            quiet_ms = config.quiet_period.as_millis() as u64,
            "starting folder monitor"
        );

        let process = tokio::spawn(scheduler.run(move || {
            let processor = processor.clone();
            async move {
                let report = processor.process().await;
                if !report.is_clean() {
                    warn!(
                        failures = report.failures.len(),
                        "batch completed with sync failures"
                    );
                }
            }
        }));

        let ingest = tokio::spawn(async move {
            while let Some(event) = events.recv().await {
                trace!(path = %event.path.display(), kind = ?event.kind, "event");
                accumulator.record(event);
                handle.kick();
            }
            // Dropping `handle` here lets the scheduler wind down too.
            error!("{}", IngestionError::StreamClosed);
        });

        Self {
            publisher,
            ingest,
            process,
        }
    }

    /// Latest published status
    pub fn status(&self) -> String {
        self.publisher.current()
    }

    /// Subscribe to status changes
    pub fn subscribe(&self) -> watch::Receiver<String> {
        self.publisher.subscribe()
    }

    /// Stop monitoring
    ///
    /// An in-flight batch runs to completion; an armed-but-unfired batch
    /// is abandoned.
    pub async fn shutdown(self) {
        self.ingest.abort();
        let _ = self.ingest.await;
        let _ = self.process.await;
        info!("folder monitor stopped");
    }
}
