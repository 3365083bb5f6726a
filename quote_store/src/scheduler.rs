//! Periodic sync.
//!
//! `SyncScheduler::start` spawns a thread that calls `SyncService::sync_with_remote`
//! on every tick of a `crossbeam_channel::tick` timer until it is stopped. Failures
//! are logged and the thread waits for the next tick; there is no other retry.
use crate::service::{SyncOutcome, SyncService};
use crossbeam_channel::{Sender, select, tick, unbounded};
use log::{debug, error, info};
use quote_common::{QuoteError, Result};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

/// Handle to the periodic sync thread.
pub struct SyncScheduler {
    shutdown_tx: Sender<()>,
    handle: JoinHandle<()>,
}

impl SyncScheduler {
    /// Start syncing `service` every `interval`. The first sync happens after one interval.
    pub fn start(service: Arc<SyncService>, interval: Duration) -> Self {
        let (shutdown_tx, shutdown_rx) = unbounded::<()>();
        let handle = thread::spawn(move || {
            info!("Sync scheduler started (every {:?})", interval);
            let ticker = tick(interval);
            loop {
                select! {
                    recv(shutdown_rx) -> _ => break,
                    recv(ticker) -> _ => match service.sync_with_remote() {
                        Ok(SyncOutcome::Synced(report)) => {
                            debug!("Scheduled sync done: {} quotes", report.total)
                        }
                        Ok(SyncOutcome::Skipped) => debug!("Scheduled sync skipped"),
                        Err(e) => error!("Scheduled sync failed, retrying next tick: {}", e),
                    },
                }
            }
            info!("Sync scheduler stopping...");
        });
        Self {
            shutdown_tx,
            handle,
        }
    }

    /// Stop the thread and wait for it. A sync in progress finishes first.
    pub fn stop(self) -> Result<()> {
        let _ = self.shutdown_tx.send(());
        self.handle
            .join()
            .map_err(|_| QuoteError::ChannelRecv("sync scheduler panicked".into()))
    }
}
