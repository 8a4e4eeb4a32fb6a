//! Paste lifecycle orchestration.
//!
//! [`PasteService`] is the only entry point the outside world calls. It
//! owns policy (validation, liveness, purge decisions) and drives the
//! backend exclusively through the [`PasteStore`] contract; it never
//! touches storage representation directly.

use crate::error::AppError;
use crate::expiry;
use crate::ids;
use crate::models::paste::{Paste, Tab};
use crate::notify::{NoopNotifier, StaleNotifier};
use crate::store::PasteStore;
use chrono::Utc;
use std::sync::Arc;

/// Pluggable id source. Defaults to [`ids::generate_paste_id`]; tests
/// substitute deterministic generators.
pub type IdGenerator = dyn Fn() -> String + Send + Sync;

/// One regeneration after a collision; a second collision means the
/// generator's collision resistance is violated and is surfaced as fatal.
const MAX_ID_ATTEMPTS: u32 = 2;

/// Lifecycle orchestrator over an interchangeable paste store.
pub struct PasteService {
    store: Arc<dyn PasteStore>,
    notifier: Arc<dyn StaleNotifier>,
    id_generator: Arc<IdGenerator>,
}

fn validate_tabs(tabs: &[Tab]) -> Result<(), AppError> {
    if tabs.is_empty() {
        return Err(AppError::BadRequest(
            "Paste must contain at least one tab".to_string(),
        ));
    }
    if tabs.iter().any(|t| t.content.trim().is_empty()) {
        return Err(AppError::BadRequest(
            "Tab content cannot be empty".to_string(),
        ));
    }
    Ok(())
}

impl PasteService {
    /// Construct a service with no stale-signal subscriber.
    pub fn new(store: Arc<dyn PasteStore>) -> Self {
        Self::with_notifier(store, Arc::new(NoopNotifier))
    }

    /// Construct a service wired to a stale-signal subscriber.
    pub fn with_notifier(store: Arc<dyn PasteStore>, notifier: Arc<dyn StaleNotifier>) -> Self {
        Self {
            store,
            notifier,
            id_generator: Arc::new(ids::generate_paste_id),
        }
    }

    /// Replace the id source. Intended for tests and embedding callers.
    pub fn with_id_generator(mut self, id_generator: Arc<IdGenerator>) -> Self {
        self.id_generator = id_generator;
        self
    }

    /// Create a paste from validated tabs and return its fresh id.
    ///
    /// Runs an opportunistic expired-record sweep first; sweep failures are
    /// logged and never block creation.
    ///
    /// # Arguments
    /// - `tabs`: Ordered tab contents; every tab must be non-blank.
    /// - `ttl_seconds`: Lifetime in seconds; 0 for unlimited.
    /// - `encrypted`: Whether the tabs hold client-side ciphertext.
    ///
    /// # Returns
    /// The generated paste id.
    ///
    /// # Errors
    /// [`AppError::BadRequest`] when validation fails,
    /// [`AppError::DuplicateId`] when the id generator collides twice in a
    /// row, or any storage error from the insert.
    pub async fn create_paste(
        &self,
        tabs: Vec<Tab>,
        ttl_seconds: u64,
        encrypted: bool,
    ) -> Result<String, AppError> {
        validate_tabs(&tabs)?;

        self.sweep_expired().await;

        let mut paste = Paste::new((self.id_generator)(), tabs, ttl_seconds, encrypted);
        for attempt in 1..=MAX_ID_ATTEMPTS {
            match self.store.insert(paste.clone()).await {
                Ok(()) => {
                    tracing::debug!("Created paste '{}' (ttl {}s)", paste.id, ttl_seconds);
                    self.notifier.notify_stale();
                    return Ok(paste.id);
                }
                Err(AppError::DuplicateId(id)) if attempt < MAX_ID_ATTEMPTS => {
                    tracing::warn!("Generated paste id '{}' collided; regenerating", id);
                    paste.id = (self.id_generator)();
                }
                Err(AppError::DuplicateId(id)) => {
                    tracing::error!(
                        "Paste id '{}' collided after {} attempts; id generator is unhealthy",
                        id,
                        MAX_ID_ATTEMPTS
                    );
                    return Err(AppError::DuplicateId(id));
                }
                Err(err) => return Err(err),
            }
        }
        Err(AppError::Internal)
    }

    /// Fetch a live paste by id.
    ///
    /// An expired record found here is purged (lazy expiry) and reported as
    /// absent. A live record's view counter is incremented, but the
    /// returned snapshot predates this view's own increment: the next fetch
    /// observes it.
    ///
    /// # Returns
    /// `Ok(Some(paste))` for a live record, `Ok(None)` when the id is
    /// unknown, expired, or vanished concurrently.
    ///
    /// # Errors
    /// Storage errors from the fetch or the increment. A failed purge of an
    /// expired record is logged, not surfaced; the record stays dead to
    /// callers and the next access retries the purge.
    pub async fn get_paste(&self, id: &str) -> Result<Option<Paste>, AppError> {
        let Some(paste) = self.store.get(id).await? else {
            return Ok(None);
        };

        let now = Utc::now();
        if !expiry::is_live(paste.created_at, paste.ttl_seconds, now) {
            match self.store.delete(id).await {
                Ok(_) => self.notifier.notify_stale(),
                Err(err) => {
                    tracing::warn!("Failed to purge expired paste '{}': {}", id, err);
                }
            }
            return Ok(None);
        }

        match self.store.increment_views(id).await? {
            Some(_) => {
                self.notifier.notify_stale();
                Ok(Some(paste))
            }
            // Deleted between the fetch and the increment; treat as absent.
            None => Ok(None),
        }
    }

    /// Count live pastes after purging expired ones.
    ///
    /// # Errors
    /// Storage errors from the count. Callers that must not fail (header
    /// displays) degrade the error to a reported count of 0.
    pub async fn active_paste_count(&self) -> Result<u64, AppError> {
        self.sweep_expired().await;
        self.store.count().await
    }

    /// Purge expired records. Best-effort: every failure is logged and
    /// swallowed, and deletes are idempotent, so concurrent or repeated
    /// sweeps are safe.
    ///
    /// # Returns
    /// The number of records purged.
    pub async fn sweep_expired(&self) -> u64 {
        let now = Utc::now();
        let expired = match self.store.scan_expired(now).await {
            Ok(ids) => ids,
            Err(err) => {
                tracing::warn!("Expiry scan failed: {}", err);
                return 0;
            }
        };

        let mut purged = 0u64;
        for id in expired {
            match self.store.delete(&id).await {
                Ok(true) => purged += 1,
                Ok(false) => {}
                Err(err) => {
                    tracing::warn!("Failed to purge expired paste '{}': {}", id, err);
                }
            }
        }

        if purged > 0 {
            tracing::debug!("Purged {} expired paste(s)", purged);
            self.notifier.notify_stale();
        }
        purged
    }
}
