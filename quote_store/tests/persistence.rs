use quote_common::{CategoryFilter, Quote, StoreKey};
use quote_store::{FileStore, KeyValueStore, MemoryStore, Pick, QuoteBook};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::collections::HashSet;
use std::sync::Arc;

#[test]
fn test_import_then_reload_from_store() {
    let dir = tempfile::tempdir().unwrap();
    let store = Arc::new(FileStore::open(dir.path()).unwrap());
    let mut book = QuoteBook::load(store.clone());
    let old_len = book.quotes().len();

    let raw = br#"[
        {"text": "Simplicity is the soul of efficiency.", "category": "Engineering"},
        {"text": "Make it work, make it right, make it fast.", "category": "Engineering"}
    ]"#;
    book.import_quotes(raw).unwrap();

    let reloaded = QuoteBook::load(Arc::new(FileStore::open(dir.path()).unwrap()));
    assert_eq!(reloaded.quotes().len(), old_len + 2);
    let ids: Vec<u64> = reloaded.quotes()[old_len..].iter().map(|q| q.id).collect();
    assert_eq!(ids, vec![4, 5]);
}

#[test]
fn test_export_import_round_trip_keeps_pairs() {
    let source_store = Arc::new(MemoryStore::new());
    let mut source = QuoteBook::load(source_store);
    source.add_quote("Ship it", "Work").unwrap();
    let exported = source.export_quotes().unwrap();

    let target_store = Arc::new(MemoryStore::new());
    target_store.set(StoreKey::Quotes, "[]").unwrap();
    let mut target = QuoteBook::load(target_store);
    target.import_quotes(&exported).unwrap();

    let pairs = |book: &QuoteBook| -> HashSet<(String, String)> {
        book.quotes()
            .iter()
            .map(|q| (q.text.clone(), q.category.clone()))
            .collect()
    };
    assert_eq!(pairs(&source), pairs(&target));
    assert_eq!(source.quotes(), target.quotes());
}

#[test]
fn test_category_survives_restart() {
    let dir = tempfile::tempdir().unwrap();
    {
        let mut book = QuoteBook::load(Arc::new(FileStore::open(dir.path()).unwrap()));
        book.select_category(CategoryFilter::Only("Resilience".into()))
            .unwrap();
    }
    let book = QuoteBook::load(Arc::new(FileStore::open(dir.path()).unwrap()));
    assert_eq!(book.filter(), &CategoryFilter::Only("Resilience".into()));

    let mut rng = StdRng::seed_from_u64(3);
    assert_eq!(
        book.pick_random(&mut rng),
        Pick::Quote(Quote::seed()[2].clone())
    );
}

#[test]
fn test_corrupt_file_falls_back_to_seed() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("quotes"), "[{\"id\": \"oops\"}]").unwrap();
    let book = QuoteBook::load(Arc::new(FileStore::open(dir.path()).unwrap()));
    assert_eq!(book.quotes(), Quote::seed().as_slice());
}
