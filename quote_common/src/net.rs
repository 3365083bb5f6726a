//! Remote endpoint, timing and naming constants shared by the store and the client.

/// Base URL of the public test API used as the remote quote source.
pub const REMOTE_BASE_URL: &str = "https://jsonplaceholder.typicode.com";
/// Path of the collection endpoint under [`REMOTE_BASE_URL`].
pub const POSTS_PATH: &str = "/posts";
/// Seconds between two scheduled syncs.
pub const SYNC_INTERVAL_SECS: u64 = 60;
/// Maximum number of remote records merged per sync.
pub const BATCH_LIMIT: usize = 100;
/// Timeout applied to every remote request.
pub const REQUEST_TIMEOUT_SECS: u64 = 15;
/// Category given to every quote that arrives through a sync.
pub const REMOTE_CATEGORY: &str = "Server";
/// File name offered for exported collections.
pub const EXPORT_FILE_NAME: &str = "quotes.json";

/// Helper to join a base URL and a path like "base/path".
pub fn endpoint(base: &str, path: &str) -> String {
    format!("{}/{}", base.trim_end_matches('/'), path.trim_start_matches('/'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_joins_single_slash() {
        assert_eq!(
            endpoint("https://example.org/", "/posts"),
            "https://example.org/posts"
        );
        assert_eq!(endpoint(REMOTE_BASE_URL, POSTS_PATH), format!("{}/posts", REMOTE_BASE_URL));
    }
}
