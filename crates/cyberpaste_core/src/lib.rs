//! Core domain library for Cyberpaste (config, models, storage, lifecycle).

/// Configuration loading and defaults.
pub mod config;
/// Shared constants.
pub mod constants;
/// Application error types (storage/domain).
pub mod error;
/// Pure TTL expiration policy.
pub mod expiry;
/// Paste identifier generation.
pub mod ids;
/// Data models for API requests and persistence.
pub mod models;
/// Stale-aggregate notification seam.
pub mod notify;
/// Paste lifecycle orchestration.
pub mod service;
/// Storage abstraction and backends.
pub mod store;

pub use config::{Config, StoreBackend};
pub use constants::DEFAULT_PORT;
pub use error::AppError;
pub use notify::{NoopNotifier, StaleNotifier};
pub use service::PasteService;
pub use store::{open_store, MemoryStore, PasteStore, RedbStore};
