use std::collections::BTreeMap;

use crate::{Buckets, Currency, Interval, LedgerEntry, Money, ResultAccountancy};

/// Bucket totals keyed by their partition interval.
pub type Volumes = BTreeMap<Interval, Money>;

/// Sums the amounts of `entries` in `currency`.
///
/// An empty input yields `Money::zero(currency)`. Any entry in another
/// currency fails the whole sum with
/// [`AccountancyError::CurrencyMismatch`](crate::AccountancyError::CurrencyMismatch).
pub fn sum<'a>(
    currency: Currency,
    entries: impl IntoIterator<Item = &'a LedgerEntry>,
) -> ResultAccountancy<Money> {
    entries
        .into_iter()
        .try_fold(Money::zero(currency), |total, entry| {
            total.checked_add(entry.amount())
        })
}

/// Reduces every bucket to its total. Fails on the first bucket that cannot be
/// summed.
pub fn sum_buckets(currency: Currency, buckets: &Buckets) -> ResultAccountancy<Volumes> {
    buckets
        .iter()
        .map(|(interval, entries)| sum(currency, entries).map(|total| (*interval, total)))
        .collect()
}
