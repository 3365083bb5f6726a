//!
//! Common types and utilities shared by the quote store and the command-line client.
//!
//! This crate aggregates:
//! - `error` — unified error type `QuoteError` used across the workspace.
//! - `result` — handy `Result<T, QuoteError>` alias.
//! - `quote` — the `Quote` record and the shapes it is imported from.
//! - `category` — category filter state and the `all` sentinel.
//! - `keys` — names of the entries kept in the key-value store.
//! - `net` — remote endpoint and timing constants.
#![warn(missing_docs)]
pub mod category;
pub mod error;
pub mod keys;
pub mod net;
pub mod quote;
pub mod result;

pub use category::CategoryFilter;
pub use error::QuoteError;
pub use keys::StoreKey;
pub use quote::Quote;
pub use result::Result;
