//! Runtime configuration of the sync engine.
use quote_common::net::{BATCH_LIMIT, REMOTE_BASE_URL, REQUEST_TIMEOUT_SECS, SYNC_INTERVAL_SECS};
use std::time::Duration;

/// Settings for remote access and the sync schedule.
#[derive(Debug, Clone)]
pub struct SyncConfig {
    /// Base URL of the remote source.
    pub remote_base_url: String,
    /// Time between scheduled syncs.
    pub interval: Duration,
    /// Maximum number of remote records merged per sync.
    pub batch_limit: usize,
    /// Timeout for each remote request.
    pub request_timeout: Duration,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            remote_base_url: REMOTE_BASE_URL.to_string(),
            interval: Duration::from_secs(SYNC_INTERVAL_SECS),
            batch_limit: BATCH_LIMIT,
            request_timeout: Duration::from_secs(REQUEST_TIMEOUT_SECS),
        }
    }
}
