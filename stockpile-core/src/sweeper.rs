//! Background task that periodically purges expired items.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc::{self, error::TrySendError};
use tokio::sync::watch;
use tokio::time::MissedTickBehavior;
use tracing::{debug, trace};

use crate::error::StoreError;

/// Something the sweeper can purge
pub(crate) trait Sweepable: Send + Sync + 'static {
    /// Removes every item expired as of one captured instant, returning how many went
    fn evict_expired(&self) -> usize;

    /// Removes `key` if it is present and still expired
    fn remove_if_expired(&self, key: &str);
}

/// Lifecycle of a sweeper. A stopped sweeper is never restarted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SweeperState {
    Running,
    Stopped,
}

/// Handle to a running sweep task
///
/// Besides ticking, the task drains a bounded queue of keys that readers found
/// expired, so lazy deletes never need a task of their own.
/// Dropping the handle stops the task.
pub(crate) struct Sweeper {
    interval: Duration,
    shutdown_tx: watch::Sender<bool>,
    lazy_tx: mpsc::Sender<String>,
}

impl Sweeper {
    /// Spawns the sweep task on the current Tokio runtime
    pub(crate) fn start<T: Sweepable>(
        target: Arc<T>,
        interval: Duration,
        lazy_capacity: usize,
    ) -> Result<Self, StoreError> {
        let runtime = tokio::runtime::Handle::try_current().map_err(|_| StoreError::NoRuntime)?;

        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        let (lazy_tx, lazy_rx) = mpsc::channel(lazy_capacity.max(1));

        runtime.spawn(Self::run(target, interval, shutdown_rx, lazy_rx));
        debug!(?interval, "sweeper started");

        Ok(Self {
            interval,
            shutdown_tx,
            lazy_tx,
        })
    }

    async fn run<T: Sweepable>(
        target: Arc<T>,
        interval: Duration,
        mut shutdown_rx: watch::Receiver<bool>,
        mut lazy_rx: mpsc::Receiver<String>,
    ) {
        let mut ticker = tokio::time::interval(interval);
        // A slow pass delays the next tick instead of queueing a burst of them
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // Skip the first immediate tick - we want to wait for the interval first
        ticker.tick().await;

        loop {
            tokio::select! {
                biased;
                changed = shutdown_rx.changed() => {
                    if changed.is_err() || *shutdown_rx.borrow() {
                        break;
                    }
                }
                _ = ticker.tick() => {
                    let removed = target.evict_expired();
                    if removed > 0 {
                        trace!(removed, "sweep pass evicted expired items");
                    }
                }
                key = lazy_rx.recv() => match key {
                    Some(key) => target.remove_if_expired(&key),
                    None => break,
                },
            }
        }

        debug!("sweeper stopped");
    }

    pub(crate) fn interval(&self) -> Duration {
        self.interval
    }

    pub(crate) fn state(&self) -> SweeperState {
        if *self.shutdown_tx.borrow() || self.lazy_tx.is_closed() {
            SweeperState::Stopped
        } else {
            SweeperState::Running
        }
    }

    /// Signals the task to exit. Idempotent.
    pub(crate) fn stop(&self) {
        self.shutdown_tx.send_replace(true);
    }

    /// Hands an expired key to the task for removal
    ///
    /// Never blocks. Gives the key back if the task is stopped or its queue is full,
    /// in which case the caller removes it inline.
    pub(crate) fn dispatch(&self, key: String) -> Result<(), String> {
        if *self.shutdown_tx.borrow() {
            return Err(key);
        }
        self.lazy_tx.try_send(key).map_err(|err| match err {
            TrySendError::Full(key) => {
                debug!("lazy-delete queue full, removing inline");
                key
            }
            TrySendError::Closed(key) => key,
        })
    }
}

impl Drop for Sweeper {
    fn drop(&mut self) {
        // Signal the sweep task to stop when the handle is dropped
        self.stop();
    }
}
