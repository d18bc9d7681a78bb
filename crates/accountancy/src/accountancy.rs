use std::sync::Arc;

use chrono::{DateTime, TimeDelta, Utc};

use crate::{
    AccountancyError, Buckets, Clock, Currency, EntryId, EntryKind, EntryStore, LedgerEntry,
    Money, ResultAccountancy, SystemClock, Volumes, aggregate, assign, interval::ensure_ordered,
    partition,
};

/// Append-only ledger with range, kind and period queries.
///
/// The facade owns nothing but its store handle, the working currency and a
/// clock: every query result is a fresh, owned copy.
pub struct Accountancy<S> {
    store: S,
    currency: Currency,
    clock: Arc<dyn Clock>,
}

impl<S: EntryStore> Accountancy<S> {
    /// Return a builder for `Accountancy` over `store`.
    pub fn builder(store: S) -> AccountancyBuilder<S> {
        AccountancyBuilder {
            store,
            currency: Currency::default(),
            clock: Arc::new(SystemClock),
        }
    }

    /// The single currency this ledger accepts and reports in.
    pub fn currency(&self) -> Currency {
        self.currency
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Posts one entry.
    ///
    /// An undated entry is dated with the clock's current time. Fails with
    /// [`AccountancyError::CurrencyMismatch`] for a foreign amount and with
    /// [`AccountancyError::DuplicateEntry`] when the id is already stored.
    pub async fn add_entry(&self, mut entry: LedgerEntry) -> ResultAccountancy<LedgerEntry> {
        if entry.amount().currency() != self.currency {
            return Err(AccountancyError::CurrencyMismatch(format!(
                "ledger currency is {}, got {}",
                self.currency.code(),
                entry.amount().currency().code()
            )));
        }
        if !entry.has_timestamp() {
            entry.set_timestamp(self.clock.now())?;
        }

        let id = entry.id();
        match self.store.add(entry).await {
            Ok(posted) => {
                tracing::debug!(entry_id = %id, kind = %posted.kind(), "entry posted");
                Ok(posted)
            }
            Err(err) => {
                tracing::debug!(entry_id = %id, "entry rejected: {err}");
                Err(err)
            }
        }
    }

    /// Posts entries one by one.
    ///
    /// Each add commits on its own: on the first failure the error is returned
    /// and the entries before it stay posted.
    pub async fn add_entries(
        &self,
        entries: impl IntoIterator<Item = LedgerEntry>,
    ) -> ResultAccountancy<Vec<LedgerEntry>> {
        let mut posted = Vec::new();
        for entry in entries {
            posted.push(self.add_entry(entry).await?);
        }
        Ok(posted)
    }

    pub async fn entry(&self, id: EntryId) -> ResultAccountancy<Option<LedgerEntry>> {
        self.store.find(id).await
    }

    /// Every posted entry, oldest first.
    pub async fn entries(&self) -> ResultAccountancy<Vec<LedgerEntry>> {
        self.store.query_all().await
    }

    /// Entries dated within `[from, to]`.
    pub async fn entries_between(
        &self,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> ResultAccountancy<Vec<LedgerEntry>> {
        ensure_ordered(from, to)?;
        self.store.query_range(from, to).await
    }

    pub async fn entries_of_kind(&self, kind: EntryKind) -> ResultAccountancy<Vec<LedgerEntry>> {
        self.store.query_kind(kind).await
    }

    /// Entries of `kind` dated within `[from, to]`.
    pub async fn entries_of_kind_between(
        &self,
        kind: EntryKind,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> ResultAccountancy<Vec<LedgerEntry>> {
        ensure_ordered(from, to)?;
        self.store.query_range_and_kind(kind, from, to).await
    }

    /// Entries of `kind` in `[from, to]`, grouped by `period`-long intervals.
    ///
    /// The range is split with [`partition`] and entries are placed with
    /// [`assign`]; every interval is present in the result.
    pub async fn entries_by_period(
        &self,
        kind: EntryKind,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
        period: TimeDelta,
    ) -> ResultAccountancy<Buckets> {
        let intervals = partition(from, to, period)?;
        let entries = self.store.query_range_and_kind(kind, from, to).await?;
        Ok(assign(entries, &intervals))
    }

    /// Like [`Self::entries_by_period`], with each bucket summed.
    pub async fn sales_volume(
        &self,
        kind: EntryKind,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
        period: TimeDelta,
    ) -> ResultAccountancy<Volumes> {
        let buckets = self.entries_by_period(kind, from, to, period).await?;
        aggregate::sum_buckets(self.currency, &buckets)
    }

    /// Total of the entries of `kind` dated within `[from, to]`.
    pub async fn sales_total(
        &self,
        kind: EntryKind,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> ResultAccountancy<Money> {
        let entries = self.entries_of_kind_between(kind, from, to).await?;
        aggregate::sum(self.currency, &entries)
    }
}

/// The builder for `Accountancy`.
pub struct AccountancyBuilder<S> {
    store: S,
    currency: Currency,
    clock: Arc<dyn Clock>,
}

impl<S: EntryStore> AccountancyBuilder<S> {
    /// Working currency, `EUR` unless set.
    pub fn currency(mut self, currency: Currency) -> Self {
        self.currency = currency;
        self
    }

    /// Clock used to date undated entries, wall-clock time unless set.
    pub fn clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Arc::new(clock);
        self
    }

    /// Construct `Accountancy`
    pub fn build(self) -> Accountancy<S> {
        tracing::info!(currency = %self.currency, "accountancy ready");
        Accountancy {
            store: self.store,
            currency: self.currency,
            clock: self.clock,
        }
    }
}
