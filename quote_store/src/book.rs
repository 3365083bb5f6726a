//! The quote book: the in-memory collection, the category filter, and their persistence.
//!
//! Every mutating method builds the next collection, writes it to the store and only
//! then swaps it in. If the write fails the book keeps its previous state, so memory
//! and store never disagree after an error.
//!
//! - `QuoteBook::load(store)` — read state from the store, falling back to seed quotes.
//! - `add_quote` / `import_quotes` / `apply_remote` — mutate and persist.
//! - `export_quotes` — pretty JSON of the whole collection.
//! - `select_category` / `pick_random` — filter state and random selection.
use crate::event::{QuoteEvent, SyncReport};
use crate::merge::{self, MergeStats};
use crate::store::KeyValueStore;
use chrono::Utc;
use crossbeam_channel::Sender;
use log::{debug, info, warn};
use quote_common::quote::{ImportRecord, next_id, validate_fields};
use quote_common::{CategoryFilter, Quote, QuoteError, Result, StoreKey};
use rand::Rng;
use rand::seq::IndexedRandom;
use serde_json::Value;
use std::sync::Arc;

/// Outcome of a random pick.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Pick {
    /// A quote from the filtered pool.
    Quote(Quote),
    /// The collection holds no quotes at all.
    EmptyCollection,
    /// The collection is not empty but the selected category has no quotes.
    EmptyCategory,
}

/// Quote collection bound to its store.
pub struct QuoteBook {
    store: Arc<dyn KeyValueStore>,
    quotes: Vec<Quote>,
    filter: CategoryFilter,
    subscribers: Vec<Sender<QuoteEvent>>,
}

impl QuoteBook {
    /// Load the collection and the selected category from `store`.
    ///
    /// A missing or unreadable collection is replaced by the seed quotes; this never fails.
    pub fn load(store: Arc<dyn KeyValueStore>) -> Self {
        let quotes = match store.get(StoreKey::Quotes) {
            Ok(Some(raw)) => match serde_json::from_str::<Vec<Quote>>(&raw) {
                Ok(quotes) => quotes,
                Err(e) => {
                    warn!("Stored quotes are not valid, using defaults: {}", e);
                    Quote::seed()
                }
            },
            Ok(None) => {
                debug!("No stored quotes, using defaults");
                Quote::seed()
            }
            Err(e) => {
                warn!("Could not read stored quotes, using defaults: {}", e);
                Quote::seed()
            }
        };

        let filter = match store.get(StoreKey::LastCategory) {
            Ok(Some(raw)) => raw.parse::<CategoryFilter>().unwrap_or_default(),
            Ok(None) => CategoryFilter::All,
            Err(e) => {
                warn!("Could not read stored category, showing all: {}", e);
                CategoryFilter::All
            }
        };

        info!("Loaded {} quotes (filter: {})", quotes.len(), filter);
        Self {
            store,
            quotes,
            filter,
            subscribers: Vec::new(),
        }
    }

    /// Current collection in display order.
    pub fn quotes(&self) -> &[Quote] {
        &self.quotes
    }

    /// Currently selected category filter.
    pub fn filter(&self) -> &CategoryFilter {
        &self.filter
    }

    /// Register a subscriber for [`QuoteEvent`]s.
    pub fn subscribe(&mut self, tx: Sender<QuoteEvent>) {
        self.subscribers.push(tx);
    }

    /// Write the current collection to the store.
    pub fn persist(&self) -> Result<()> {
        write_quotes(self.store.as_ref(), &self.quotes)
    }

    /// Append a quote entered by the user and return it.
    pub fn add_quote(&mut self, text: &str, category: &str) -> Result<Quote> {
        let (text, category) = validate_fields(text, category)?;
        let id = next_id(&self.quotes)
            .ok_or_else(|| QuoteError::Validation("no quote id left after u64::MAX".into()))?;
        let quote = Quote::new(id, text, category);

        let mut next = self.quotes.clone();
        next.push(quote.clone());
        self.commit(next)?;

        info!("Added quote {} in {}", quote.id, quote.category);
        self.notify_categories();
        Ok(quote)
    }

    /// Append the quotes contained in a JSON array and return how many were imported.
    pub fn import_quotes(&mut self, raw: &[u8]) -> Result<usize> {
        let records = parse_import(raw)?;
        self.import_records(records)
    }

    /// Append already-parsed import records.
    ///
    /// Records without an id get consecutive ids after the current maximum, in input
    /// order. Ids present in the records are kept as they are, even if they collide.
    pub fn import_records(&mut self, records: Vec<ImportRecord>) -> Result<usize> {
        let mut free_id = next_id(&self.quotes);
        let mut imported = Vec::with_capacity(records.len());
        for (index, record) in records.into_iter().enumerate() {
            let (text, category) = validate_fields(&record.text, &record.category)
                .map_err(|e| match e {
                    QuoteError::Validation(msg) => {
                        QuoteError::Validation(format!("record {}: {}", index, msg))
                    }
                    other => other,
                })?;
            let id = match record.given_id() {
                Some(id) => id,
                None => {
                    let id = free_id.ok_or_else(|| {
                        QuoteError::Format(format!("record {}: no quote id left to assign", index))
                    })?;
                    free_id = id.checked_add(1);
                    id
                }
            };
            imported.push(Quote::new(id, text, category));
        }

        let count = imported.len();
        let mut next = self.quotes.clone();
        next.extend(imported);
        self.commit(next)?;

        info!("Imported {} quotes", count);
        self.notify_categories();
        Ok(count)
    }

    /// Pretty-printed JSON of the whole collection.
    pub fn export_quotes(&self) -> Result<Vec<u8>> {
        Ok(serde_json::to_vec_pretty(&self.quotes)?)
    }

    /// Merge remote quotes over the collection, persist, and announce the result.
    pub fn apply_remote(&mut self, remote: Vec<Quote>) -> Result<SyncReport> {
        let (merged, stats) = merge::remote_wins(remote, &self.quotes);
        self.commit(merged)?;

        let report = SyncReport {
            stats,
            total: self.quotes.len(),
            finished_at: Utc::now(),
        };
        log_merge(&stats, report.total);
        self.notify_categories();
        self.notify(QuoteEvent::Synced(report));
        Ok(report)
    }

    /// Select and persist the category filter.
    pub fn select_category(&mut self, filter: CategoryFilter) -> Result<()> {
        self.store.set(StoreKey::LastCategory, &filter.to_string())?;
        debug!("Category filter set to {}", filter);
        self.filter = filter;
        Ok(())
    }

    /// Distinct categories in order of first appearance.
    pub fn categories(&self) -> Vec<String> {
        let mut seen: Vec<String> = Vec::new();
        for quote in &self.quotes {
            if !seen.contains(&quote.category) {
                seen.push(quote.category.clone());
            }
        }
        seen
    }

    /// Quotes that pass the current filter.
    pub fn filtered(&self) -> Vec<&Quote> {
        self.quotes.iter().filter(|q| self.filter.matches(q)).collect()
    }

    /// Pick a quote uniformly from the filtered pool.
    pub fn pick_random<R: Rng + ?Sized>(&self, rng: &mut R) -> Pick {
        if self.quotes.is_empty() {
            return Pick::EmptyCollection;
        }
        match self.filtered().choose(rng) {
            Some(quote) => Pick::Quote((*quote).clone()),
            None => Pick::EmptyCategory,
        }
    }

    /// Broadcast `event` to all subscribers, dropping the ones that went away.
    pub(crate) fn notify(&mut self, event: QuoteEvent) {
        self.subscribers.retain(|tx| tx.send(event.clone()).is_ok());
    }

    fn notify_categories(&mut self) {
        let categories = self.categories();
        self.notify(QuoteEvent::CategoriesChanged(categories));
    }

    fn commit(&mut self, next: Vec<Quote>) -> Result<()> {
        write_quotes(self.store.as_ref(), &next)?;
        self.quotes = next;
        Ok(())
    }
}

fn write_quotes(store: &dyn KeyValueStore, quotes: &[Quote]) -> Result<()> {
    let json = serde_json::to_string(quotes)?;
    store.set(StoreKey::Quotes, &json)
}

fn parse_import(raw: &[u8]) -> Result<Vec<ImportRecord>> {
    let value: Value = serde_json::from_slice(raw)
        .map_err(|e| QuoteError::Format(format!("import is not valid JSON: {}", e)))?;
    let Value::Array(items) = value else {
        return Err(QuoteError::Format("import must be a JSON array".into()));
    };
    items
        .into_iter()
        .enumerate()
        .map(|(index, item)| {
            serde_json::from_value(item)
                .map_err(|e| QuoteError::Format(format!("record {}: {}", index, e)))
        })
        .collect()
}

fn log_merge(stats: &MergeStats, total: usize) {
    info!(
        "Merged {} remote quotes: {} local kept, {} replaced, {} total",
        stats.remote, stats.kept, stats.replaced, total
    );
}
