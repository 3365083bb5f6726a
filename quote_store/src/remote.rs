//! Remote quote source.
//!
//! The remote is a public test API exposing a collection of posts. A sync reads one
//! batch of posts and keeps only their `id` and `title`; newly added local quotes are
//! posted back as best-effort writes whose answer is only logged.
use crate::config::SyncConfig;
use log::{debug, info};
use quote_common::net::{POSTS_PATH, endpoint};
use quote_common::{Quote, QuoteError, Result};
use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};

/// Record returned by the remote collection endpoint. Extra fields are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteRecord {
    /// Remote identifier, kept verbatim as the quote id.
    pub id: u64,
    /// Remote title, used as the quote text.
    pub title: String,
}

/// Acknowledgement of a pushed quote.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PushReceipt {
    /// Id the remote assigned to the created record, if it reported one.
    #[serde(default)]
    pub id: Option<u64>,
}

/// Body posted for a newly added quote.
#[derive(Debug, Serialize)]
struct PushBody<'a> {
    title: &'a str,
    body: &'a str,
    #[serde(rename = "userId")]
    user_id: u64,
}

/// Source of remote quotes.
pub trait RemoteSource: Send + Sync {
    /// Fetch one batch of remote records. No pagination, no retry.
    fn fetch_batch(&self) -> Result<Vec<RemoteRecord>>;

    /// Send a local quote to the remote.
    fn push(&self, quote: &Quote) -> Result<PushReceipt>;
}

/// [`RemoteSource`] over HTTP.
pub struct HttpRemote {
    client: Client,
    posts_url: String,
}

impl HttpRemote {
    /// Build a client for the base URL and timeout in `config`.
    pub fn new(config: &SyncConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.request_timeout)
            .user_agent(concat!("quote_store/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(remote_error)?;
        Ok(Self::with_client(client, &config.remote_base_url))
    }

    /// Use an already configured `client` against `base_url`.
    pub fn with_client(client: Client, base_url: &str) -> Self {
        Self {
            client,
            posts_url: endpoint(base_url, POSTS_PATH),
        }
    }
}

impl RemoteSource for HttpRemote {
    fn fetch_batch(&self) -> Result<Vec<RemoteRecord>> {
        debug!("GET {}", self.posts_url);
        let records: Vec<RemoteRecord> = self
            .client
            .get(&self.posts_url)
            .send()
            .and_then(|resp| resp.error_for_status())
            .and_then(|resp| resp.json())
            .map_err(remote_error)?;
        info!("Fetched {} remote records", records.len());
        Ok(records)
    }

    fn push(&self, quote: &Quote) -> Result<PushReceipt> {
        let body = PushBody {
            title: &quote.text,
            body: &quote.category,
            user_id: 1,
        };
        debug!("POST {} for quote {}", self.posts_url, quote.id);
        self.client
            .post(&self.posts_url)
            .json(&body)
            .send()
            .and_then(|resp| resp.error_for_status())
            .and_then(|resp| resp.json())
            .map_err(remote_error)
    }
}

fn remote_error(err: reqwest::Error) -> QuoteError {
    QuoteError::Remote(err.to_string())
}
