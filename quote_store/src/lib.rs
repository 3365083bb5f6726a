//!
//! Quote store and sync engine.
//!
//! Keeps a collection of quotes in a key-value store, shows random quotes under a
//! category filter, imports and exports JSON, and merges a remote batch over the
//! collection on a timer or on demand (remote wins by id).
//!
//! - `store` — `KeyValueStore` trait with memory and file backends.
//! - `book` — `QuoteBook`, the collection and filter with persist-after-mutate.
//! - `merge` — the remote-wins merge rule.
//! - `remote` — `RemoteSource` trait and its HTTP client.
//! - `outbox` — background queue pushing new quotes to the remote.
//! - `service` — `SyncService`, the single owner of the book, with a single-flight sync.
//! - `scheduler` — periodic sync thread.
//! - `event` — notifications for subscribers.
//! - `config` — runtime settings.
#![warn(missing_docs)]
pub mod book;
pub mod config;
pub mod event;
pub mod merge;
pub mod outbox;
pub mod remote;
pub mod scheduler;
pub mod service;
pub mod store;

pub use book::{Pick, QuoteBook};
pub use config::SyncConfig;
pub use event::{QuoteEvent, SyncReport};
pub use outbox::{PushOutcome, PushQueue};
pub use remote::{HttpRemote, PushReceipt, RemoteRecord, RemoteSource};
pub use scheduler::SyncScheduler;
pub use service::{SyncOutcome, SyncService};
pub use store::{FileStore, KeyValueStore, MemoryStore};
