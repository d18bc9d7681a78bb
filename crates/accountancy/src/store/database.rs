use chrono::{DateTime, Utc};
use sea_orm::{
    DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Select, SqlErr,
    prelude::*,
};

use crate::{AccountancyError, EntryId, EntryKind, LedgerEntry, ResultAccountancy, entry};

use super::EntryStore;

/// Store backed by the `ledger_entries` table (see the `migration` crate).
///
/// Ids are the primary key and the insert is the only duplicate check: a
/// primary-key violation, from a re-add or a concurrent add of the same id,
/// becomes [`AccountancyError::DuplicateEntry`].
#[derive(Debug, Clone)]
pub struct DatabaseEntryStore {
    database: DatabaseConnection,
}

impl DatabaseEntryStore {
    pub fn new(database: DatabaseConnection) -> Self {
        Self { database }
    }

    async fn fetch(&self, query: Select<entry::Entity>) -> ResultAccountancy<Vec<LedgerEntry>> {
        let models = query
            .order_by_asc(entry::Column::PostedAt)
            .order_by_asc(entry::Column::Id)
            .all(&self.database)
            .await?;
        models.into_iter().map(LedgerEntry::try_from).collect()
    }
}

fn map_insert_error(err: DbErr, id: EntryId) -> AccountancyError {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => AccountancyError::DuplicateEntry(id),
        _ => AccountancyError::Database(err),
    }
}

impl EntryStore for DatabaseEntryStore {
    async fn add(&self, entry: LedgerEntry) -> ResultAccountancy<LedgerEntry> {
        let posted = entry.post()?;
        let id = posted.id();
        let model = entry::ActiveModel::try_from(&posted)?;

        entry::Entity::insert(model)
            .exec_without_returning(&self.database)
            .await
            .map_err(|err| map_insert_error(err, id))?;
        tracing::debug!(entry_id = %id, "entry inserted");

        Ok(posted)
    }

    async fn find(&self, id: EntryId) -> ResultAccountancy<Option<LedgerEntry>> {
        entry::Entity::find_by_id(id.to_string())
            .one(&self.database)
            .await?
            .map(LedgerEntry::try_from)
            .transpose()
    }

    async fn query_all(&self) -> ResultAccountancy<Vec<LedgerEntry>> {
        self.fetch(entry::Entity::find()).await
    }

    async fn query_range(
        &self,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> ResultAccountancy<Vec<LedgerEntry>> {
        self.fetch(
            entry::Entity::find()
                .filter(entry::Column::PostedAt.gte(from))
                .filter(entry::Column::PostedAt.lte(to)),
        )
        .await
    }

    async fn query_kind(&self, kind: EntryKind) -> ResultAccountancy<Vec<LedgerEntry>> {
        self.fetch(entry::Entity::find().filter(entry::Column::Kind.eq(kind.as_str())))
            .await
    }

    async fn query_range_and_kind(
        &self,
        kind: EntryKind,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> ResultAccountancy<Vec<LedgerEntry>> {
        self.fetch(
            entry::Entity::find()
                .filter(entry::Column::Kind.eq(kind.as_str()))
                .filter(entry::Column::PostedAt.gte(from))
                .filter(entry::Column::PostedAt.lte(to)),
        )
        .await
    }
}
