//! Notifications emitted by the store.
//!
//! Subscribers register a `Sender<QuoteEvent>`; a category list or a status line can
//! refresh itself from these instead of polling the collection.
use crate::merge::MergeStats;
use chrono::{DateTime, Utc};

/// Message broadcast to every subscriber.
#[derive(Debug, Clone, PartialEq)]
pub enum QuoteEvent {
    /// The set of categories may have changed; carries the current list.
    CategoriesChanged(Vec<String>),
    /// A sync finished and its result was persisted.
    Synced(SyncReport),
    /// A sync failed; the collection is unchanged.
    SyncFailed(String),
}

/// Summary of a completed sync.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SyncReport {
    /// Merge counts.
    pub stats: MergeStats,
    /// Collection size after the merge.
    pub total: usize,
    /// Completion time.
    pub finished_at: DateTime<Utc>,
}
