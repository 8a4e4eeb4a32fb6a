//! Persistent paste store backed by redb.

use crate::error::AppError;
use crate::expiry;
use crate::models::paste::Paste;
use crate::store::PasteStore;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use redb::{ReadableDatabase, ReadableTable, ReadableTableMetadata, TableDefinition};
use std::path::Path;
use std::sync::Arc;

/// File name for the redb database within the configured DB directory.
const REDB_FILE_NAME: &str = "pastes.redb";

/// Canonical paste rows (`Paste`, bincode-encoded).
const PASTES: TableDefinition<&str, &[u8]> = TableDefinition::new("pastes");

/// Paste store persisting bincode-encoded rows in a single redb table.
///
/// redb serializes write transactions, so the read-modify-write inside
/// [`PasteStore::increment_views`] is linearizable per id without extra
/// coordination.
pub struct RedbStore {
    db: Arc<redb::Database>,
}

fn deserialize_paste(bytes: &[u8]) -> Result<Paste, AppError> {
    Ok(bincode::deserialize(bytes)?)
}

impl RedbStore {
    /// Open (or create) the database under `path` and initialize the table.
    ///
    /// # Arguments
    /// - `path`: Directory that holds the database file.
    ///
    /// # Returns
    /// A ready [`RedbStore`].
    ///
    /// # Errors
    /// Returns an error when the directory cannot be created or redb fails
    /// to open or initialize the table.
    pub fn open(path: &str) -> Result<Self, AppError> {
        let dir = Path::new(path);
        std::fs::create_dir_all(dir)
            .map_err(|e| AppError::StorageMessage(format!("create {}: {}", path, e)))?;

        let db = redb::Database::create(dir.join(REDB_FILE_NAME))?;
        let write_txn = db.begin_write()?;
        write_txn.open_table(PASTES)?;
        write_txn.commit()?;

        Ok(Self { db: Arc::new(db) })
    }
}

#[async_trait]
impl PasteStore for RedbStore {
    async fn insert(&self, paste: Paste) -> Result<(), AppError> {
        let encoded = bincode::serialize(&paste)?;

        let write_txn = self.db.begin_write()?;
        {
            let mut pastes = write_txn.open_table(PASTES)?;
            if pastes.get(paste.id.as_str())?.is_some() {
                return Err(AppError::DuplicateId(paste.id));
            }
            pastes.insert(paste.id.as_str(), encoded.as_slice())?;
        }
        write_txn.commit()?;
        Ok(())
    }

    async fn get(&self, id: &str) -> Result<Option<Paste>, AppError> {
        let read_txn = self.db.begin_read()?;
        let pastes = read_txn.open_table(PASTES)?;
        match pastes.get(id)? {
            Some(value) => Ok(Some(deserialize_paste(value.value())?)),
            None => Ok(None),
        }
    }

    async fn delete(&self, id: &str) -> Result<bool, AppError> {
        let write_txn = self.db.begin_write()?;
        let removed = {
            let mut pastes = write_txn.open_table(PASTES)?;
            let removed = pastes.remove(id)?.is_some();
            removed
        };
        write_txn.commit()?;
        Ok(removed)
    }

    async fn increment_views(&self, id: &str) -> Result<Option<u64>, AppError> {
        let write_txn = self.db.begin_write()?;
        let new_count = {
            let mut pastes = write_txn.open_table(PASTES)?;

            let Some(guard) = pastes.get(id)? else {
                return Ok(None);
            };
            let mut paste = deserialize_paste(guard.value())?;
            drop(guard);

            paste.views += 1;
            let encoded = bincode::serialize(&paste)?;
            pastes.insert(id, encoded.as_slice())?;
            paste.views
        };
        write_txn.commit()?;
        Ok(Some(new_count))
    }

    async fn count(&self) -> Result<u64, AppError> {
        let read_txn = self.db.begin_read()?;
        let pastes = read_txn.open_table(PASTES)?;
        Ok(pastes.len()?)
    }

    async fn scan_expired(&self, now: DateTime<Utc>) -> Result<Vec<String>, AppError> {
        let read_txn = self.db.begin_read()?;
        let pastes = read_txn.open_table(PASTES)?;
        let mut expired = Vec::new();

        for item in pastes.iter()? {
            let (_, value) = item?;
            let paste = deserialize_paste(value.value())?;
            if !expiry::is_live(paste.created_at, paste.ttl_seconds, now) {
                expired.push(paste.id);
            }
        }

        Ok(expired)
    }

    fn backend_name(&self) -> &'static str {
        "redb"
    }
}
