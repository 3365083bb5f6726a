//! Quote Client — a command-line front end for the quote store.
//!
//! It keeps quotes in a data directory, prints a random quote from the selected
//! category, adds, imports and exports quotes, and merges quotes from the remote test
//! API either once (`sync`) or on a timer (`watch`). Newly added quotes are posted to
//! the remote in the background.
//!
//! Usage example (CLI):
//! ```bash
//! quote_cli add "Simplicity is prerequisite for reliability." Engineering
//! quote_cli filter Engineering
//! quote_cli --interval-secs 30 watch
//! ```
#![warn(missing_docs)]
mod args;

use crate::args::{Args, CliCommand};
use clap::Parser;
use crossbeam_channel::{Receiver, never, select, unbounded};
use log::{debug, error, info, warn};
use quote_common::net::EXPORT_FILE_NAME;
use quote_common::{CategoryFilter, Quote, QuoteError, Result};
use quote_store::{
    FileStore, HttpRemote, Pick, PushOutcome, PushQueue, PushReceipt, QuoteBook, QuoteEvent,
    RemoteRecord, RemoteSource, SyncOutcome, SyncScheduler, SyncService,
};
use std::fs;
use std::io;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

/// Remote used with `--offline`: every call fails.
struct OfflineRemote;

impl RemoteSource for OfflineRemote {
    fn fetch_batch(&self) -> Result<Vec<RemoteRecord>> {
        Err(QuoteError::Remote("offline mode".into()))
    }

    fn push(&self, _quote: &Quote) -> Result<PushReceipt> {
        Err(QuoteError::Remote("offline mode".into()))
    }
}

fn main() -> Result<(), QuoteError> {
    init_logger();
    let args = Args::parse();
    let config = args.sync_config();

    let data_dir = match &args.data_dir {
        Some(raw) => normalize_path(raw),
        None => default_data_dir()
            .ok_or_else(|| QuoteError::Store("no data directory available".into()))?,
    };
    let store = Arc::new(FileStore::open(&data_dir)?);
    info!("Using data directory {}", data_dir.display());

    let remote: Arc<dyn RemoteSource> = if args.offline {
        Arc::new(OfflineRemote)
    } else {
        Arc::new(HttpRemote::new(&config)?)
    };

    let mut service = SyncService::new(QuoteBook::load(store), Arc::clone(&remote), config);
    let mut outcomes = None;
    if !args.offline && matches!(args.command, CliCommand::Add { .. } | CliCommand::Watch) {
        let (queue, outcome_rx) = PushQueue::start(remote);
        service = service.with_push_queue(queue);
        outcomes = Some(outcome_rx);
    }

    run(service, args.command, outcomes)
}

fn run(
    service: SyncService,
    command: CliCommand,
    outcomes: Option<Receiver<PushOutcome>>,
) -> Result<(), QuoteError> {
    match command {
        CliCommand::Show => print_pick(service.pick_random()?),
        CliCommand::Add { text, category } => {
            let quote = service.add_quote(&text, &category)?;
            println!("Quote added successfully! (#{})", quote.id);
            if let Some(outcomes) = outcomes {
                let wait = service.config().request_timeout + Duration::from_secs(1);
                match outcomes.recv_timeout(wait) {
                    Ok(outcome) => log_push(&outcome),
                    Err(_) => warn!("No answer from remote for quote {}", quote.id),
                }
            }
            print_pick(service.pick_random()?);
        }
        CliCommand::Import { path } => {
            let raw = fs::read(normalize_path(&path))?;
            let count = service.import_quotes(&raw)?;
            println!("Quotes imported successfully! ({})", count);
        }
        CliCommand::Export { out } => {
            let path = out
                .as_deref()
                .map(normalize_path)
                .unwrap_or_else(|| PathBuf::from(EXPORT_FILE_NAME));
            fs::write(&path, service.export_quotes()?)?;
            println!("Exported quotes to {}", path.display());
        }
        CliCommand::Categories => {
            let selected = service.filter()?;
            let marker = |filter: &CategoryFilter| if *filter == selected { "*" } else { " " };
            println!("{} all", marker(&CategoryFilter::All));
            for category in service.categories()? {
                let filter = CategoryFilter::Only(category);
                println!("{} {}", marker(&filter), filter);
            }
        }
        CliCommand::Filter { category } => {
            let filter = category.parse::<CategoryFilter>().unwrap_or_default();
            service.select_category(filter)?;
            print_pick(service.pick_random()?);
        }
        CliCommand::Sync => match service.sync_with_remote()? {
            SyncOutcome::Synced(report) => println!(
                "Quotes synced with server successfully! ({} remote, {} local kept, {} total)",
                report.stats.remote, report.stats.kept, report.total
            ),
            SyncOutcome::Skipped => println!("A sync is already running."),
        },
        CliCommand::Watch => return watch(service, outcomes),
    }
    service.shutdown()
}

/// Run scheduled syncs until Ctrl+C, printing what happens.
fn watch(service: SyncService, outcomes: Option<Receiver<PushOutcome>>) -> Result<(), QuoteError> {
    let (stop_tx, stop_rx) = unbounded::<()>();
    ctrlc::set_handler(move || {
        info!("Ctrl+C received. Shutting down client...");
        let _ = stop_tx.send(());
    })
    .map_err(|e| QuoteError::Io(io::Error::other(e.to_string())))?;

    let (event_tx, event_rx) = unbounded::<QuoteEvent>();
    service.subscribe(event_tx)?;
    let interval = service.config().interval;
    let service = Arc::new(service);
    let scheduler = SyncScheduler::start(Arc::clone(&service), interval);
    let outcomes = outcomes.unwrap_or_else(never);

    info!("Client is running. Press Ctrl+C to exit.");
    show_random(&service);
    loop {
        select! {
            recv(stop_rx) -> _ => break,
            recv(event_rx) -> msg => match msg {
                Ok(QuoteEvent::Synced(report)) => {
                    println!(
                        "Quotes synced with server successfully! ({} total)",
                        report.total
                    );
                    show_random(&service);
                }
                Ok(QuoteEvent::SyncFailed(reason)) => println!("Sync failed: {}", reason),
                Ok(QuoteEvent::CategoriesChanged(categories)) => {
                    debug!("Categories: {}", categories.join(", "))
                }
                Err(e) => {
                    error!("Event channel closed: {}", e);
                    break;
                }
            },
            recv(outcomes) -> msg => if let Ok(outcome) = msg {
                log_push(&outcome);
            },
        }
    }

    scheduler.stop()?;
    match Arc::try_unwrap(service) {
        Ok(service) => service.shutdown(),
        Err(_) => {
            warn!("Sync service still shared at exit");
            Ok(())
        }
    }
}

/// Print a random quote, logging instead of returning a failure so `watch` keeps running.
fn show_random(service: &SyncService) {
    match service.pick_random() {
        Ok(pick) => print_pick(pick),
        Err(e) => error!("Could not pick a quote: {}", e),
    }
}

fn print_pick(pick: Pick) {
    match pick {
        Pick::Quote(quote) => println!("\"{}\"\n  - {}", quote.text, quote.category),
        Pick::EmptyCollection => println!("No quotes available."),
        Pick::EmptyCategory => println!("No quotes in this category."),
    }
}

fn log_push(outcome: &PushOutcome) {
    match &outcome.result {
        Ok(receipt) => info!(
            "Quote {} posted to server (remote id {:?})",
            outcome.quote_id, receipt.id
        ),
        Err(e) => warn!("Quote {} was not posted: {}", outcome.quote_id, e),
    }
}

fn init_logger() {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();
}

/// Per-user data directory, e.g. `~/.local/share/quote_cli` on Linux.
fn default_data_dir() -> Option<PathBuf> {
    directories::ProjectDirs::from("com", "QuoteStore", "quote_cli")
        .map(|dirs| dirs.data_dir().to_path_buf())
}

/// Normalize a CLI-provided path string by trimming whitespace and matching quotes.
///
/// This allows passing Windows paths in quotes without breaking parsing.
fn normalize_path(raw: &str) -> PathBuf {
    let trimmed = raw.trim();
    let no_quotes = trimmed
        .strip_prefix('"')
        .and_then(|s| s.strip_suffix('"'))
        .unwrap_or(trimmed);
    PathBuf::from(no_quotes)
}
