//! Outbound push queue.
//!
//! Newly added quotes are posted to the remote in the background. A worker thread
//! drains `PushJob`s from a `crossbeam_channel` and reports every attempt as a
//! `PushOutcome` on a second channel, so callers can observe failures instead of
//! losing them. Pushes are never retried and never touch the collection.
use crate::remote::{PushReceipt, RemoteSource};
use crossbeam_channel::{Receiver, Sender, unbounded};
use log::{debug, info, warn};
use quote_common::{Quote, QuoteError, Result};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

/// A quote waiting to be pushed.
#[derive(Debug, Clone)]
pub struct PushJob {
    /// Quote to send.
    pub quote: Quote,
}

/// Result of one push attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PushOutcome {
    /// Id of the local quote that was pushed.
    pub quote_id: u64,
    /// Remote acknowledgement, or the error message.
    pub result: std::result::Result<PushReceipt, String>,
}

/// Handle to the background push worker.
pub struct PushQueue {
    tx: Sender<PushJob>,
    worker: JoinHandle<()>,
}

impl PushQueue {
    /// Spawn the worker and return the queue with the receiver of push outcomes.
    pub fn start(remote: Arc<dyn RemoteSource>) -> (Self, Receiver<PushOutcome>) {
        let (tx, rx) = unbounded::<PushJob>();
        let (outcome_tx, outcome_rx) = unbounded::<PushOutcome>();

        let worker = thread::spawn(move || {
            debug!("Push worker started");
            for job in rx.iter() {
                let result = remote.push(&job.quote).map_err(|e| e.to_string());
                match &result {
                    Ok(receipt) => info!(
                        "Pushed quote {} to remote (remote id {:?})",
                        job.quote.id, receipt.id
                    ),
                    Err(e) => warn!("Push of quote {} failed: {}", job.quote.id, e),
                }
                let outcome = PushOutcome {
                    quote_id: job.quote.id,
                    result,
                };
                if outcome_tx.send(outcome).is_err() {
                    debug!("Push outcome dropped, nobody is listening");
                }
            }
            debug!("Push worker stopping...");
        });

        (Self { tx, worker }, outcome_rx)
    }

    /// Queue `quote` for pushing. Returns as soon as the job is queued.
    pub fn enqueue(&self, quote: Quote) -> Result<()> {
        self.tx
            .send(PushJob { quote })
            .map_err(|e| QuoteError::ChannelSend(format!("push queue closed: {}", e)))
    }

    /// Stop accepting jobs and wait until the queued ones are done.
    pub fn shutdown(self) -> Result<()> {
        drop(self.tx);
        self.worker
            .join()
            .map_err(|_| QuoteError::ChannelRecv("push worker panicked".into()))
    }
}
