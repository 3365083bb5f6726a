//! Quote record and the shapes quotes arrive in.
//!
//! A `Quote` is what the store keeps and exports. An `ImportRecord` is the looser
//! shape accepted from user-supplied files, where the id may be missing.
use serde::{Deserialize, Serialize};

use crate::error::QuoteError;

/// A single quote with its category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quote {
    /// Identifier, unique within the collection after a merge.
    pub id: u64,
    /// Quote text.
    pub text: String,
    /// Category name used by the filter.
    pub category: String,
}

impl Quote {
    /// Create a quote from its parts.
    pub fn new(id: u64, text: impl Into<String>, category: impl Into<String>) -> Self {
        Quote {
            id,
            text: text.into(),
            category: category.into(),
        }
    }

    /// The quotes a fresh store starts with.
    pub fn seed() -> Vec<Quote> {
        vec![
            Quote::new(
                1,
                "The best way to get started is to quit talking and begin doing.",
                "Motivation",
            ),
            Quote::new(2, "Don’t let yesterday take up too much of today.", "Inspiration"),
            Quote::new(
                3,
                "It’s not whether you get knocked down, it’s whether you get up.",
                "Resilience",
            ),
        ]
    }
}

/// Quote-like record read from an import file.
///
/// `id` is optional; an absent, `null` or zero id is filled in by the store.
#[derive(Debug, Clone, Deserialize)]
pub struct ImportRecord {
    /// Identifier supplied by the file, if any.
    #[serde(default)]
    pub id: Option<u64>,
    /// Quote text.
    pub text: String,
    /// Category name.
    pub category: String,
}

impl ImportRecord {
    /// Id carried by the record, treating zero as absent.
    pub fn given_id(&self) -> Option<u64> {
        self.id.filter(|id| *id != 0)
    }
}

/// Trim `text` and `category` and reject either one when it ends up empty.
pub fn validate_fields(text: &str, category: &str) -> Result<(String, String), QuoteError> {
    let text = text.trim();
    let category = category.trim();
    if text.is_empty() {
        return Err(QuoteError::Validation("quote text must not be empty".into()));
    }
    if category.is_empty() {
        return Err(QuoteError::Validation("quote category must not be empty".into()));
    }
    Ok((text.to_string(), category.to_string()))
}

/// Largest id in `quotes`, or zero for an empty collection.
pub fn max_id(quotes: &[Quote]) -> u64 {
    quotes.iter().map(|q| q.id).max().unwrap_or(0)
}

/// Id following the largest one in `quotes`, or `None` once `u64::MAX` is taken.
pub fn next_id(quotes: &[Quote]) -> Option<u64> {
    max_id(quotes).checked_add(1)
}
