//! Fakes shared by the integration tests.
#![allow(dead_code)]
use crossbeam_channel::{Receiver, Sender};
use quote_common::{Quote, QuoteError, Result};
use quote_store::{PushReceipt, RemoteRecord, RemoteSource};
use std::collections::VecDeque;
use std::sync::Mutex;

/// Remote that answers fetches from a script and records pushes.
#[derive(Default)]
pub struct ScriptedRemote {
    batches: Mutex<VecDeque<std::result::Result<Vec<RemoteRecord>, String>>>,
    pub pushed: Mutex<Vec<Quote>>,
    pub fail_pushes: bool,
}

impl ScriptedRemote {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing_pushes() -> Self {
        Self {
            fail_pushes: true,
            ..Self::default()
        }
    }

    pub fn then_ok(self, records: Vec<RemoteRecord>) -> Self {
        self.batches.lock().unwrap().push_back(Ok(records));
        self
    }

    pub fn then_err(self, message: &str) -> Self {
        self.batches.lock().unwrap().push_back(Err(message.to_string()));
        self
    }
}

impl RemoteSource for ScriptedRemote {
    fn fetch_batch(&self) -> Result<Vec<RemoteRecord>> {
        match self.batches.lock()?.pop_front() {
            Some(Ok(records)) => Ok(records),
            Some(Err(message)) => Err(QuoteError::Remote(message)),
            None => Err(QuoteError::Remote("no scripted batch left".into())),
        }
    }

    fn push(&self, quote: &Quote) -> Result<PushReceipt> {
        if self.fail_pushes {
            return Err(QuoteError::Remote("push refused".into()));
        }
        let mut pushed = self.pushed.lock()?;
        pushed.push(quote.clone());
        Ok(PushReceipt {
            id: Some(100 + pushed.len() as u64),
        })
    }
}

/// Remote whose fetch blocks until released, to hold a sync in flight.
pub struct GatedRemote {
    pub entered: Sender<()>,
    pub release: Receiver<()>,
    pub records: Vec<RemoteRecord>,
}

impl RemoteSource for GatedRemote {
    fn fetch_batch(&self) -> Result<Vec<RemoteRecord>> {
        let _ = self.entered.send(());
        self.release
            .recv()
            .map_err(|e| QuoteError::ChannelRecv(e.to_string()))?;
        Ok(self.records.clone())
    }

    fn push(&self, _quote: &Quote) -> Result<PushReceipt> {
        Ok(PushReceipt { id: None })
    }
}

pub fn record(id: u64, title: &str) -> RemoteRecord {
    RemoteRecord {
        id,
        title: title.to_string(),
    }
}
