//! Paste storage abstraction and backends.
//!
//! The store is a dumb key-value layer: it never filters by expiry and
//! never decides record visibility. Those policy calls belong to
//! [`crate::service::PasteService`], which drives every backend through
//! the same [`PasteStore`] contract. Backends are selected once at process
//! startup from configuration; nothing downstream branches on backend
//! identity.

/// Reference in-memory backend.
pub mod memory;
/// Persistent redb backend.
pub mod redb;

use crate::config::{Config, StoreBackend};
use crate::error::AppError;
use crate::models::paste::Paste;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::Arc;

pub use self::memory::MemoryStore;
pub use self::redb::RedbStore;

/// Backend-agnostic paste storage contract.
///
/// Every method is a potential I/O suspension point and an independent
/// failure point; callers must not hold in-process locks across a call.
/// `increment_views` must be linearizable per id: concurrent increments on
/// the same id are all reflected in the stored count.
#[async_trait]
pub trait PasteStore: Send + Sync {
    /// Insert a new paste.
    ///
    /// # Errors
    /// [`AppError::DuplicateId`] when the id is already present; the store
    /// never silently overwrites.
    async fn insert(&self, paste: Paste) -> Result<(), AppError>;

    /// Fetch a paste by id. No side effects, no expiry filtering.
    ///
    /// # Returns
    /// `Ok(Some(paste))` when found, `Ok(None)` when missing.
    async fn get(&self, id: &str) -> Result<Option<Paste>, AppError>;

    /// Delete a paste by id. Idempotent: deleting an absent id is a no-op.
    ///
    /// # Returns
    /// `true` when a record was deleted, `false` when it was absent.
    async fn delete(&self, id: &str) -> Result<bool, AppError>;

    /// Atomically increment the view counter for one record.
    ///
    /// # Returns
    /// The new count, or `None` when the record is absent (deleted
    /// concurrently).
    async fn increment_views(&self, id: &str) -> Result<Option<u64>, AppError>;

    /// Count all currently stored records, live or not. Callers wanting
    /// "active" semantics run a sweep first.
    async fn count(&self) -> Result<u64, AppError>;

    /// Ids of records that are not live as of `now`, as a fresh snapshot.
    /// Used by cleanup sweeps; safe to call repeatedly and concurrently.
    async fn scan_expired(&self, now: DateTime<Utc>) -> Result<Vec<String>, AppError>;

    /// Static identifier for logs and diagnostics.
    fn backend_name(&self) -> &'static str;
}

/// Open the store selected by `config.store_backend`.
///
/// # Errors
/// Returns an error when the persistent backend cannot be opened.
pub fn open_store(config: &Config) -> Result<Arc<dyn PasteStore>, AppError> {
    let store: Arc<dyn PasteStore> = match config.store_backend {
        StoreBackend::Memory => Arc::new(MemoryStore::new()),
        StoreBackend::Redb => Arc::new(RedbStore::open(&config.db_path)?),
    };
    tracing::info!("Opened {} paste store", store.backend_name());
    Ok(store)
}

#[cfg(test)]
mod tests;
