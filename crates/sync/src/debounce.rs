//! Quiet-period debounce scheduling
//!
//! True debounce, not throttle: every event pushes the deadline back by
//! the full quiet period, so a stream of events arriving faster than
//! the quiet period postpones processing indefinitely. That trade-off
//! is intentional and load-bearing for batch coalescing.

use std::future::Future;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::timeout;
use tracing::trace;

/// Reference quiet period
pub const DEFAULT_QUIET_PERIOD: Duration = Duration::from_millis(1000);

/// Cheap, cloneable trigger for the scheduler
///
/// `kick` is callable from any thread, including non-async notification
/// callbacks.
#[derive(Debug, Clone)]
pub struct DebounceHandle {
    tx: mpsc::UnboundedSender<()>,
}

impl DebounceHandle {
    /// (Re)arm the timer: the next fire happens one quiet period after
    /// the last kick.
    pub fn kick(&self) {
        // Send only fails when the scheduler is gone; nothing to arm then.
        let _ = self.tx.send(());
    }
}

/// Restartable single-shot timer driving batch processing
///
/// The loop owns the only execution context that invokes the callback,
/// so a fire can never overlap a previous one. Kicks arriving while a
/// run is in flight stay buffered and re-arm the timer as soon as the
/// run yields.
pub struct DebounceScheduler {
    rx: mpsc::UnboundedReceiver<()>,
    quiet: Duration,
}

impl DebounceScheduler {
    pub fn new(quiet: Duration) -> (DebounceHandle, Self) {
        let (tx, rx) = mpsc::unbounded_channel();
        (DebounceHandle { tx }, Self { rx, quiet })
    }

    /// Drive the debounce loop until every handle is dropped
    ///
    /// `fire` runs exactly once per quiet gap. A pending (armed but not
    /// yet fired) batch is abandoned at teardown.
    pub async fn run<F, Fut>(mut self, mut fire: F)
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = ()>,
    {
        'idle: while self.rx.recv().await.is_some() {
            trace!("debounce armed");
            loop {
                match timeout(self.quiet, self.rx.recv()).await {
                    // Quiet period elapsed without a kick
                    Err(_) => break,
                    // Another kick: push the deadline back
                    Ok(Some(())) => continue,
                    // Handles dropped while armed
                    Ok(None) => break 'idle,
                }
            }
            trace!("debounce fired");
            fire().await;
        }
    }
}
