use std::{
    collections::HashMap,
    sync::{RwLock, RwLockReadGuard, RwLockWriteGuard},
};

use chrono::{DateTime, Utc};

use crate::{AccountancyError, EntryId, EntryKind, LedgerEntry, ResultAccountancy};

use super::EntryStore;

/// Process-local store, mostly for tests and embedding.
///
/// The duplicate check and the insert happen under one write lock, so adds
/// of the same id cannot both succeed.
#[derive(Debug, Default)]
pub struct InMemoryEntryStore {
    entries: RwLock<HashMap<EntryId, LedgerEntry>>,
}

impl InMemoryEntryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored entries.
    pub fn len(&self) -> ResultAccountancy<usize> {
        Ok(self.read()?.len())
    }

    pub fn is_empty(&self) -> ResultAccountancy<bool> {
        Ok(self.read()?.is_empty())
    }

    fn read(&self) -> ResultAccountancy<RwLockReadGuard<'_, HashMap<EntryId, LedgerEntry>>> {
        self.entries
            .read()
            .map_err(|_| AccountancyError::Store("entry lock poisoned".to_string()))
    }

    fn write(&self) -> ResultAccountancy<RwLockWriteGuard<'_, HashMap<EntryId, LedgerEntry>>> {
        self.entries
            .write()
            .map_err(|_| AccountancyError::Store("entry lock poisoned".to_string()))
    }

    fn select(&self, predicate: impl Fn(&LedgerEntry) -> bool) -> ResultAccountancy<Vec<LedgerEntry>> {
        let mut out: Vec<LedgerEntry> = self
            .read()?
            .values()
            .filter(|entry| predicate(*entry))
            .cloned()
            .collect();
        out.sort_by_key(|entry| (entry.timestamp(), entry.id()));
        Ok(out)
    }
}

fn in_range(entry: &LedgerEntry, from: DateTime<Utc>, to: DateTime<Utc>) -> bool {
    entry
        .timestamp()
        .is_some_and(|at| from <= at && at <= to)
}

impl EntryStore for InMemoryEntryStore {
    async fn add(&self, entry: LedgerEntry) -> ResultAccountancy<LedgerEntry> {
        let posted = entry.post()?;
        let mut entries = self.write()?;
        if entries.contains_key(&posted.id()) {
            return Err(AccountancyError::DuplicateEntry(posted.id()));
        }
        entries.insert(posted.id(), posted.clone());
        Ok(posted)
    }

    async fn find(&self, id: EntryId) -> ResultAccountancy<Option<LedgerEntry>> {
        Ok(self.read()?.get(&id).cloned())
    }

    async fn query_all(&self) -> ResultAccountancy<Vec<LedgerEntry>> {
        self.select(|_| true)
    }

    async fn query_range(
        &self,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> ResultAccountancy<Vec<LedgerEntry>> {
        self.select(|entry| in_range(entry, from, to))
    }

    async fn query_kind(&self, kind: EntryKind) -> ResultAccountancy<Vec<LedgerEntry>> {
        self.select(|entry| entry.kind() == kind)
    }

    async fn query_range_and_kind(
        &self,
        kind: EntryKind,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> ResultAccountancy<Vec<LedgerEntry>> {
        self.select(|entry| entry.kind() == kind && in_range(entry, from, to))
    }
}
