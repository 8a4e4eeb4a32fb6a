//! Paste-related data models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One named content blob within a paste.
///
/// `content` is opaque end-to-end: when the parent paste is encrypted it
/// holds client-produced ciphertext, and the core never inspects it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tab {
    /// Display filename; may be empty.
    pub name: String,
    /// Free-form language tag.
    pub lang: String,
    /// Opaque text payload (ciphertext when the paste is encrypted).
    pub content: String,
}

/// Paste record stored by the backend and returned by the API.
///
/// The wire shape matches the persisted logical contract:
/// `{ id, createdAt, ttlSeconds, encrypted, views, tabs }`, with
/// `createdAt` as milliseconds since the epoch.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Paste {
    pub id: String,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub created_at: DateTime<Utc>,
    /// Seconds from creation until expiry; 0 means the paste never expires.
    pub ttl_seconds: u64,
    /// Set when the tabs hold client-side ciphertext. The core only carries
    /// the flag; it never encrypts or decrypts.
    pub encrypted: bool,
    pub views: u64,
    /// Ordered tabs; always at least one.
    pub tabs: Vec<Tab>,
}

/// Request payload for creating a paste.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePasteRequest {
    pub tabs: Vec<Tab>,
    pub ttl_seconds: u64,
    #[serde(default)]
    pub encrypted: bool,
}

/// Response payload for a created paste.
#[derive(Debug, Serialize)]
pub struct CreatePasteResponse {
    pub id: String,
}

impl Paste {
    /// Create a new unviewed paste stamped with the current instant.
    ///
    /// # Arguments
    /// - `id`: Generated identifier.
    /// - `tabs`: Ordered tab contents.
    /// - `ttl_seconds`: Lifetime in seconds; 0 for unlimited.
    /// - `encrypted`: Whether the tabs hold ciphertext.
    pub fn new(id: String, tabs: Vec<Tab>, ttl_seconds: u64, encrypted: bool) -> Self {
        Self {
            id,
            created_at: Utc::now(),
            ttl_seconds,
            encrypted,
            views: 0,
            tabs,
        }
    }
}
