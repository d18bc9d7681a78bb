//! Append-only entry persistence.
//!
//! [`EntryStore`] is the only shared mutable resource of the accountancy. An
//! implementation must:
//!
//! - accept each entry id once, atomically: of two concurrent adds with the
//!   same id exactly one succeeds, the other gets
//!   [`AccountancyError::DuplicateEntry`](crate::AccountancyError::DuplicateEntry);
//! - post the entry (see [`LedgerEntry::post`]) while accepting it;
//! - answer every query from a consistent snapshot, ordered by
//!   `(timestamp, id)`, returning owned copies.
//!
//! Range bounds are inclusive on both ends.

use std::future::Future;

use chrono::{DateTime, Utc};

use crate::{EntryId, EntryKind, LedgerEntry, ResultAccountancy};

mod database;
mod memory;

pub use database::DatabaseEntryStore;
pub use memory::InMemoryEntryStore;

pub trait EntryStore: Send + Sync {
    /// Persists a dated entry and returns it posted. Fails with
    /// [`AccountancyError::DuplicateEntry`](crate::AccountancyError::DuplicateEntry)
    /// when the id is already stored, whatever the entry's state.
    fn add(
        &self,
        entry: LedgerEntry,
    ) -> impl Future<Output = ResultAccountancy<LedgerEntry>> + Send;

    fn find(
        &self,
        id: EntryId,
    ) -> impl Future<Output = ResultAccountancy<Option<LedgerEntry>>> + Send;

    fn query_all(&self) -> impl Future<Output = ResultAccountancy<Vec<LedgerEntry>>> + Send;

    /// Entries with `from <= timestamp <= to`.
    fn query_range(
        &self,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> impl Future<Output = ResultAccountancy<Vec<LedgerEntry>>> + Send;

    fn query_kind(
        &self,
        kind: EntryKind,
    ) -> impl Future<Output = ResultAccountancy<Vec<LedgerEntry>>> + Send;

    fn query_range_and_kind(
        &self,
        kind: EntryKind,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> impl Future<Output = ResultAccountancy<Vec<LedgerEntry>>> + Send;
}
