//! HTTP request handlers.

/// Paste-related endpoints.
pub mod paste;
/// Stats endpoints.
pub mod stats;
