//! Command-line arguments for the quote client.
//!
//! This module defines the CLI interface using `clap`. See `main` for end-to-end usage.
use clap::{Parser, Subcommand};
use quote_common::net::{BATCH_LIMIT, REMOTE_BASE_URL, SYNC_INTERVAL_SECS};
use quote_store::SyncConfig;
use std::time::Duration;

/// Parsed command-line arguments.
#[derive(Debug, Parser)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Directory holding the stored quotes and the selected category.
    /// Defaults to the per-user data directory.
    #[clap(long)]
    pub data_dir: Option<String>,

    /// Base URL of the remote quote source.
    #[clap(long, default_value = REMOTE_BASE_URL)]
    pub remote_url: String,

    /// Seconds between scheduled syncs in `watch` mode.
    #[clap(long, default_value_t = SYNC_INTERVAL_SECS)]
    pub interval_secs: u64,

    /// Maximum number of remote records merged per sync.
    #[clap(long, default_value_t = BATCH_LIMIT)]
    pub batch_limit: usize,

    /// Never contact the remote: syncs fail and new quotes are not pushed.
    #[clap(long)]
    pub offline: bool,

    /// Action to perform.
    #[command(subcommand)]
    pub command: CliCommand,
}

/// Actions offered by the client.
#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Print a random quote from the selected category.
    Show,
    /// Add a quote.
    Add {
        /// Quote text.
        text: String,
        /// Category of the quote.
        category: String,
    },
    /// Append quotes from a JSON file.
    Import {
        /// Path to a JSON array of `{text, category, id?}` records.
        path: String,
    },
    /// Write all quotes to a JSON file.
    Export {
        /// Output file.
        #[clap(long)]
        out: Option<String>,
    },
    /// List categories.
    Categories,
    /// Select a category (`all` for no filter) and print a quote from it.
    Filter {
        /// Category name or `all`.
        category: String,
    },
    /// Sync with the remote once.
    Sync,
    /// Sync on a timer until Ctrl+C.
    Watch,
}

impl Args {
    /// Engine settings derived from the arguments.
    pub fn sync_config(&self) -> SyncConfig {
        SyncConfig {
            remote_base_url: self.remote_url.trim().to_string(),
            interval: Duration::from_secs(self.interval_secs.max(1)),
            batch_limit: self.batch_limit,
            ..SyncConfig::default()
        }
    }
}
