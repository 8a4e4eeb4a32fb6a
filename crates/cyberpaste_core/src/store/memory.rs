//! Reference in-memory paste store.

use crate::error::AppError;
use crate::expiry;
use crate::models::paste::Paste;
use crate::store::PasteStore;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::RwLock;

/// Process-local map backend.
///
/// The map lock is only held across synchronous critical sections, never
/// across an await. View increments happen under the write lock, which
/// makes them linearizable per id.
#[derive(Default)]
pub struct MemoryStore {
    pastes: RwLock<HashMap<String, Paste>>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    fn read_guard(&self) -> Result<std::sync::RwLockReadGuard<'_, HashMap<String, Paste>>, AppError> {
        self.pastes
            .read()
            .map_err(|_| AppError::StorageMessage("paste map lock poisoned".to_string()))
    }

    fn write_guard(
        &self,
    ) -> Result<std::sync::RwLockWriteGuard<'_, HashMap<String, Paste>>, AppError> {
        self.pastes
            .write()
            .map_err(|_| AppError::StorageMessage("paste map lock poisoned".to_string()))
    }
}

#[async_trait]
impl PasteStore for MemoryStore {
    async fn insert(&self, paste: Paste) -> Result<(), AppError> {
        let mut pastes = self.write_guard()?;
        if pastes.contains_key(&paste.id) {
            return Err(AppError::DuplicateId(paste.id));
        }
        pastes.insert(paste.id.clone(), paste);
        Ok(())
    }

    async fn get(&self, id: &str) -> Result<Option<Paste>, AppError> {
        Ok(self.read_guard()?.get(id).cloned())
    }

    async fn delete(&self, id: &str) -> Result<bool, AppError> {
        Ok(self.write_guard()?.remove(id).is_some())
    }

    async fn increment_views(&self, id: &str) -> Result<Option<u64>, AppError> {
        let mut pastes = self.write_guard()?;
        match pastes.get_mut(id) {
            Some(paste) => {
                paste.views += 1;
                Ok(Some(paste.views))
            }
            None => Ok(None),
        }
    }

    async fn count(&self) -> Result<u64, AppError> {
        Ok(self.read_guard()?.len() as u64)
    }

    async fn scan_expired(&self, now: DateTime<Utc>) -> Result<Vec<String>, AppError> {
        let pastes = self.read_guard()?;
        Ok(pastes
            .values()
            .filter(|paste| !expiry::is_live(paste.created_at, paste.ttl_seconds, now))
            .map(|paste| paste.id.clone())
            .collect())
    }

    fn backend_name(&self) -> &'static str {
        "memory"
    }
}
