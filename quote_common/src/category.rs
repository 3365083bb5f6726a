//! Category filter state.
//!
//! The filter is either the `all` sentinel or one category name. It is persisted as a
//! plain string, so `all` doubles as its stored form.
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use crate::quote::Quote;

/// Stored form of [`CategoryFilter::All`].
pub const ALL: &str = "all";

/// Restricts which quotes are eligible for random selection.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    /// No restriction.
    #[default]
    All,
    /// Only quotes whose category equals the name exactly.
    Only(String),
}

impl CategoryFilter {
    /// Returns `true` if `quote` passes the filter.
    pub fn matches(&self, quote: &Quote) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(name) => quote.category == *name,
        }
    }
}

impl FromStr for CategoryFilter {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() || trimmed == ALL {
            Ok(CategoryFilter::All)
        } else {
            Ok(CategoryFilter::Only(trimmed.to_string()))
        }
    }
}

impl fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CategoryFilter::All => f.write_str(ALL),
            CategoryFilter::Only(name) => f.write_str(name),
        }
    }
}
