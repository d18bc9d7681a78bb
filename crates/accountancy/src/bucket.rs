use std::collections::BTreeMap;

use chrono::{DateTime, Utc};

use crate::{Interval, LedgerEntry};

/// Entries grouped by the partition interval that contains them, in
/// chronological key order.
pub type Buckets = BTreeMap<Interval, Vec<LedgerEntry>>;

/// Sorts `entries` into `intervals`.
///
/// `intervals` must be chronological and may only touch at shared boundary
/// instants, as returned by [`partition`](crate::partition). Every interval
/// gets a key, even when no entry falls into it.
///
/// An entry dated exactly on the boundary between two intervals goes to the
/// earlier one. Entries outside every interval, or without a timestamp, are
/// dropped.
pub fn assign(entries: impl IntoIterator<Item = LedgerEntry>, intervals: &[Interval]) -> Buckets {
    debug_assert!(intervals.windows(2).all(|w| w[0].end() <= w[1].start()));

    let mut buckets: Buckets = intervals
        .iter()
        .map(|interval| (*interval, Vec::new()))
        .collect();

    for entry in entries {
        let Some(at) = entry.timestamp() else {
            tracing::debug!(entry_id = %entry.id(), "undated entry dropped from buckets");
            continue;
        };
        match locate(intervals, at).and_then(|interval| buckets.get_mut(interval)) {
            Some(bucket) => bucket.push(entry),
            None => {
                tracing::debug!(entry_id = %entry.id(), %at, "entry outside every interval dropped");
            }
        }
    }
    buckets
}

/// First interval, in ascending order, whose closed span contains `at`.
fn locate(intervals: &[Interval], at: DateTime<Utc>) -> Option<&Interval> {
    let index = intervals.partition_point(|interval| interval.end() < at);
    intervals.get(index).filter(|interval| interval.contains(at))
}
