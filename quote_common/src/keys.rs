//! Names of the entries kept in the key-value store.
use strum_macros::{AsRefStr, Display, EnumString};

/// Key under which a piece of state is persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, AsRefStr)]
pub enum StoreKey {
    /// JSON-encoded array of quotes.
    #[strum(serialize = "quotes")]
    Quotes,
    /// Last selected category filter, as a plain string.
    #[strum(serialize = "lastCategory")]
    LastCategory,
}
