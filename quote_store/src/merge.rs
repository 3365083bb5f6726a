//! Remote-wins merge.
//!
//! The merged collection is every remote quote in remote order, followed by the local
//! quotes whose id the remote batch does not carry, in their original order. A local
//! quote sharing an id with a remote one is dropped regardless of which is newer.
use crate::remote::RemoteRecord;
use quote_common::Quote;
use quote_common::net::REMOTE_CATEGORY;
use std::collections::HashSet;

/// Counts describing one merge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MergeStats {
    /// Remote quotes placed at the front of the collection.
    pub remote: usize,
    /// Local quotes kept because their id is absent remotely.
    pub kept: usize,
    /// Local quotes dropped in favour of a remote quote with the same id.
    pub replaced: usize,
}

/// Map remote records to quotes, keeping at most `limit` of them.
///
/// A repeated remote id keeps its first record only.
pub fn to_quotes(records: Vec<RemoteRecord>, limit: usize) -> Vec<Quote> {
    let mut seen = HashSet::new();
    records
        .into_iter()
        .filter(|record| seen.insert(record.id))
        .take(limit)
        .map(|record| Quote::new(record.id, record.title, REMOTE_CATEGORY))
        .collect()
}

/// Merge `remote` over `local`.
pub fn remote_wins(remote: Vec<Quote>, local: &[Quote]) -> (Vec<Quote>, MergeStats) {
    let remote_ids: HashSet<u64> = remote.iter().map(|q| q.id).collect();
    let mut stats = MergeStats {
        remote: remote.len(),
        ..MergeStats::default()
    };

    let mut merged = remote;
    for quote in local {
        if remote_ids.contains(&quote.id) {
            stats.replaced += 1;
        } else {
            merged.push(quote.clone());
            stats.kept += 1;
        }
    }
    (merged, stats)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_remote_replaces_shared_id() {
        let local = vec![Quote::new(1, "One", "Life"), Quote::new(2, "Two", "Life")];
        let remote = vec![Quote::new(2, "New", "Server")];

        let (merged, stats) = remote_wins(remote, &local);

        assert_eq!(
            merged,
            vec![Quote::new(2, "New", "Server"), Quote::new(1, "One", "Life")]
        );
        assert_eq!(
            stats,
            MergeStats {
                remote: 1,
                kept: 1,
                replaced: 1
            }
        );
    }

    #[test]
    fn test_local_only_quotes_keep_order() {
        let local = vec![
            Quote::new(30, "c", "x"),
            Quote::new(10, "a", "x"),
            Quote::new(20, "b", "x"),
        ];
        let remote = vec![Quote::new(1, "r", "Server")];
        let (merged, _) = remote_wins(remote, &local);
        let ids: Vec<u64> = merged.iter().map(|q| q.id).collect();
        assert_eq!(ids, vec![1, 30, 10, 20]);
    }

    #[test]
    fn test_merge_is_idempotent_for_same_batch() {
        let local = vec![Quote::new(1, "mine", "Life"), Quote::new(7, "other", "Work")];
        let remote = vec![Quote::new(1, "r1", "Server"), Quote::new(2, "r2", "Server")];
        let (once, _) = remote_wins(remote.clone(), &local);
        let (twice, stats) = remote_wins(remote, &once);
        assert_eq!(once, twice);
        assert_eq!(stats.replaced, 2);
    }

    #[test]
    fn test_empty_remote_keeps_everything() {
        let local = vec![Quote::new(1, "a", "x")];
        let (merged, stats) = remote_wins(Vec::new(), &local);
        assert_eq!(merged, local);
        assert_eq!(stats.kept, 1);
    }

    #[test]
    fn test_to_quotes_keeps_first_of_repeated_id() {
        let records = vec![
            RemoteRecord {
                id: 1,
                title: "a".into(),
            },
            RemoteRecord {
                id: 2,
                title: "b".into(),
            },
            RemoteRecord {
                id: 1,
                title: "again".into(),
            },
            RemoteRecord {
                id: 3,
                title: "c".into(),
            },
        ];
        let quotes = to_quotes(records, 3);
        assert_eq!(
            quotes,
            vec![
                Quote::new(1, "a", "Server"),
                Quote::new(2, "b", "Server"),
                Quote::new(3, "c", "Server"),
            ]
        );

        let local = vec![Quote::new(1, "mine", "Life"), Quote::new(9, "kept", "Life")];
        let (merged, stats) = remote_wins(quotes, &local);
        let ids: Vec<u64> = merged.iter().map(|q| q.id).collect();
        assert_eq!(ids, vec![1, 2, 3, 9]);
        assert_eq!(stats.replaced, 1);
    }

    #[test]
    fn test_to_quotes_maps_and_truncates() {
        let records = (1..=5)
            .map(|id| RemoteRecord {
                id,
                title: format!("title {}", id),
            })
            .collect();
        let quotes = to_quotes(records, 3);
        assert_eq!(quotes.len(), 3);
        assert_eq!(quotes[2], Quote::new(3, "title 3", "Server"));
    }
}
