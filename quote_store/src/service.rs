//! Sync service: the single owner of the quote book.
//!
//! All operations go through `SyncService`, which holds the book behind a `Mutex` and
//! the remote source behind an `Arc`. The remote fetch runs without holding the lock;
//! only the merge and the write happen under it.
//!
//! Overlapping syncs do not interleave. A sync requested while another one is in
//! flight returns `SyncOutcome::Skipped` right away without touching the remote.
use crate::book::{Pick, QuoteBook};
use crate::config::SyncConfig;
use crate::event::{QuoteEvent, SyncReport};
use crate::merge;
use crate::outbox::PushQueue;
use crate::remote::RemoteSource;
use crossbeam_channel::Sender;
use log::{debug, error, info, warn};
use quote_common::{CategoryFilter, Quote, Result};
use rand::Rng;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

/// What a sync request ended up doing.
#[derive(Debug, Clone, PartialEq)]
pub enum SyncOutcome {
    /// The remote batch was merged and persisted.
    Synced(SyncReport),
    /// Another sync was already running.
    Skipped,
}

/// Coordinates the quote book, the remote source and the push queue.
pub struct SyncService {
    book: Mutex<QuoteBook>,
    remote: Arc<dyn RemoteSource>,
    config: SyncConfig,
    in_flight: AtomicBool,
    push_queue: Option<PushQueue>,
}

/// Clears the in-flight flag when a sync ends, however it ends.
struct FlightGuard<'a>(&'a AtomicBool);

impl<'a> FlightGuard<'a> {
    fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| FlightGuard(flag))
    }
}

impl Drop for FlightGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

impl SyncService {
    /// Create a service around an already loaded book.
    pub fn new(book: QuoteBook, remote: Arc<dyn RemoteSource>, config: SyncConfig) -> Self {
        Self {
            book: Mutex::new(book),
            remote,
            config,
            in_flight: AtomicBool::new(false),
            push_queue: None,
        }
    }

    /// Push every added quote to the remote through `queue`.
    pub fn with_push_queue(mut self, queue: PushQueue) -> Self {
        self.push_queue = Some(queue);
        self
    }

    /// Settings the service was created with.
    pub fn config(&self) -> &SyncConfig {
        &self.config
    }

    /// Register a subscriber for [`QuoteEvent`]s.
    pub fn subscribe(&self, tx: Sender<QuoteEvent>) -> Result<()> {
        self.lock()?.subscribe(tx);
        Ok(())
    }

    /// Copy of the current collection.
    pub fn quotes(&self) -> Result<Vec<Quote>> {
        Ok(self.lock()?.quotes().to_vec())
    }

    /// Add a quote, then queue it for pushing if a push queue is attached.
    pub fn add_quote(&self, text: &str, category: &str) -> Result<Quote> {
        let quote = self.lock()?.add_quote(text, category)?;
        if let Some(queue) = &self.push_queue {
            if let Err(e) = queue.enqueue(quote.clone()) {
                warn!("Could not queue quote {} for pushing: {}", quote.id, e);
            }
        }
        Ok(quote)
    }

    /// Import a JSON array of quotes.
    pub fn import_quotes(&self, raw: &[u8]) -> Result<usize> {
        self.lock()?.import_quotes(raw)
    }

    /// Pretty JSON of the whole collection.
    pub fn export_quotes(&self) -> Result<Vec<u8>> {
        self.lock()?.export_quotes()
    }

    /// Select and persist the category filter.
    pub fn select_category(&self, filter: CategoryFilter) -> Result<()> {
        self.lock()?.select_category(filter)
    }

    /// Currently selected category filter.
    pub fn filter(&self) -> Result<CategoryFilter> {
        Ok(self.lock()?.filter().clone())
    }

    /// Distinct categories in order of first appearance.
    pub fn categories(&self) -> Result<Vec<String>> {
        Ok(self.lock()?.categories())
    }

    /// Pick a random quote under the current filter.
    pub fn pick_random(&self) -> Result<Pick> {
        self.pick_random_with(&mut rand::rng())
    }

    /// Pick a random quote using the given generator.
    pub fn pick_random_with<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<Pick> {
        Ok(self.lock()?.pick_random(rng))
    }

    /// Fetch one remote batch and merge it over the collection.
    ///
    /// On a remote failure the collection and the store are left untouched, the error
    /// is logged and announced as [`QuoteEvent::SyncFailed`], and then returned.
    pub fn sync_with_remote(&self) -> Result<SyncOutcome> {
        let Some(_guard) = FlightGuard::acquire(&self.in_flight) else {
            info!("Sync already in progress, skipping");
            return Ok(SyncOutcome::Skipped);
        };

        debug!("Sync started");
        let records = match self.remote.fetch_batch() {
            Ok(records) => records,
            Err(e) => {
                error!("Server sync failed: {}", e);
                self.lock()?.notify(QuoteEvent::SyncFailed(e.to_string()));
                return Err(e);
            }
        };

        let remote_quotes = merge::to_quotes(records, self.config.batch_limit);
        let report = self.lock()?.apply_remote(remote_quotes)?;
        info!("Quotes synced with server ({} total)", report.total);
        Ok(SyncOutcome::Synced(report))
    }

    /// Stop the push worker after it has drained its queue.
    pub fn shutdown(self) -> Result<()> {
        match self.push_queue {
            Some(queue) => queue.shutdown(),
            None => Ok(()),
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, QuoteBook>> {
        Ok(self.book.lock()?)
    }
}
