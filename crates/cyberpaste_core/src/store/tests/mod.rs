//! Store contract tests, run against every backend.

use super::*;
use crate::models::paste::{Paste, Tab};
use chrono::Duration;
use tempfile::TempDir;

fn tab(name: &str, content: &str) -> Tab {
    Tab {
        name: name.to_string(),
        lang: "plaintext".to_string(),
        content: content.to_string(),
    }
}

fn sample_paste(id: &str, ttl_seconds: u64) -> Paste {
    Paste::new(
        id.to_string(),
        vec![tab("a.txt", "sample content")],
        ttl_seconds,
        false,
    )
}

/// A paste whose creation instant lies `age_secs` in the past.
fn backdated_paste(id: &str, ttl_seconds: u64, age_secs: i64) -> Paste {
    let mut paste = sample_paste(id, ttl_seconds);
    paste.created_at = Utc::now() - Duration::seconds(age_secs);
    paste
}

fn redb_store() -> (RedbStore, TempDir) {
    let temp_dir = TempDir::new().unwrap();
    let store = RedbStore::open(temp_dir.path().to_str().unwrap()).unwrap();
    (store, temp_dir)
}
