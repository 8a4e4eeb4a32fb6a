//! Pure TTL expiration policy.
//!
//! All decisions are made over a single `now` captured by the caller, so a
//! logical check never observes two different clock reads.

use chrono::{DateTime, TimeZone, Utc};

/// Whether a record is still live as of `now`.
///
/// A TTL of 0 means the record never expires. Otherwise the record is live
/// strictly before `created_at + ttl_seconds`.
pub fn is_live(created_at: DateTime<Utc>, ttl_seconds: u64, now: DateTime<Utc>) -> bool {
    if ttl_seconds == 0 {
        return true;
    }
    // Millisecond math in i128 so absurd TTLs cannot overflow.
    let expires_ms = created_at.timestamp_millis() as i128 + ttl_seconds as i128 * 1000;
    expires_ms > now.timestamp_millis() as i128
}

/// Absolute expiry instant, for backends that delegate expiry natively.
///
/// Returns `None` when the record never expires, either because the TTL is
/// 0 or because the instant is beyond the representable range.
pub fn expires_at(created_at: DateTime<Utc>, ttl_seconds: u64) -> Option<DateTime<Utc>> {
    if ttl_seconds == 0 {
        return None;
    }
    let expires_ms = created_at.timestamp_millis() as i128 + ttl_seconds as i128 * 1000;
    let expires_ms = i64::try_from(expires_ms).ok()?;
    Utc.timestamp_millis_opt(expires_ms).single()
}
