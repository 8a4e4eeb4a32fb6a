//! Data models shared by the storage and API layers.

/// Paste and tab records plus request payloads.
pub mod paste;
