//! API integration tests over the in-memory backend.

use axum::http::StatusCode;
use axum_test::TestServer;
use cyberpaste_core::config::StoreBackend;
use cyberpaste_core::{open_store, Config, PasteService};
use cyberpaste_server::{create_app, AppState, CountCache};
use serde_json::json;
use std::sync::Arc;

fn test_config() -> Config {
    Config {
        db_path: String::from("/tmp/cyberpaste-test-db"),
        port: 0, // Let OS assign port
        max_paste_size: 10_000_000,
        store_backend: StoreBackend::Memory,
        sweep_interval_secs: 0, // No background sweeper in tests
    }
}

fn setup_test_server() -> TestServer {
    let config = test_config();
    let store = open_store(&config).unwrap();
    let counts = Arc::new(CountCache::default());
    let service = Arc::new(PasteService::with_notifier(store, counts.clone()));
    let state = AppState::new(config, service, counts);
    TestServer::new(create_app(state, false)).unwrap()
}

#[tokio::test]
async fn test_paste_lifecycle() {
    let server = setup_test_server();

    // Create a paste
    let create_response = server
        .post("/api/paste")
        .json(&json!({
            "tabs": [{"name": "a.txt", "lang": "plaintext", "content": "hi"}],
            "ttlSeconds": 3600,
            "encrypted": false,
        }))
        .await;

    assert_eq!(create_response.status_code(), StatusCode::CREATED);
    let created: serde_json::Value = create_response.json();
    let paste_id = created["id"].as_str().unwrap();
    assert_eq!(paste_id.len(), 10);

    // First fetch returns the pre-increment snapshot
    let get_response = server.get(&format!("/api/paste/{}", paste_id)).await;
    assert_eq!(get_response.status_code(), StatusCode::OK);
    let retrieved: serde_json::Value = get_response.json();
    assert_eq!(retrieved["id"], paste_id);
    assert_eq!(retrieved["ttlSeconds"], 3600);
    assert_eq!(retrieved["encrypted"], false);
    assert_eq!(retrieved["views"], 0);
    assert_eq!(retrieved["tabs"][0]["name"], "a.txt");
    assert_eq!(retrieved["tabs"][0]["lang"], "plaintext");
    assert_eq!(retrieved["tabs"][0]["content"], "hi");

    // The second fetch observes the first view
    let second: serde_json::Value = server
        .get(&format!("/api/paste/{}", paste_id))
        .await
        .json();
    assert_eq!(second["views"], 1);
}

#[tokio::test]
async fn test_create_rejects_empty_tab_list() {
    let server = setup_test_server();

    let response = server
        .post("/api/paste")
        .json(&json!({
            "tabs": [],
            "ttlSeconds": 0,
            "encrypted": false,
        }))
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = response.json();
    assert!(
        body["error"].as_str().unwrap().contains("at least one tab"),
        "error should name the violated constraint: {}",
        body
    );
}

#[tokio::test]
async fn test_create_rejects_blank_tab_content() {
    let server = setup_test_server();

    let response = server
        .post("/api/paste")
        .json(&json!({
            "tabs": [{"name": "x", "lang": "plaintext", "content": "   \n  "}],
            "ttlSeconds": 0,
        }))
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_create_rejects_negative_ttl() {
    let server = setup_test_server();

    // ttlSeconds is unsigned on the wire; negative input fails deserialization.
    let response = server
        .post("/api/paste")
        .json(&json!({
            "tabs": [{"name": "x", "lang": "plaintext", "content": "hi"}],
            "ttlSeconds": -5,
        }))
        .await;

    assert!(
        response.status_code().is_client_error(),
        "negative TTL must be rejected, got {}",
        response.status_code()
    );
}

#[tokio::test]
async fn test_get_unknown_id_returns_not_found() {
    let server = setup_test_server();

    let response = server.get("/api/paste/does-not-exist").await;
    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);

    let raw_response = server.get("/api/paste/does-not-exist/raw").await;
    assert_eq!(raw_response.status_code(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_raw_export_concatenates_tabs() {
    let server = setup_test_server();

    let created: serde_json::Value = server
        .post("/api/paste")
        .json(&json!({
            "tabs": [
                {"name": "a.txt", "lang": "plaintext", "content": "first"},
                {"name": "", "lang": "rust", "content": "fn main() {}"},
            ],
            "ttlSeconds": 0,
        }))
        .await
        .json();
    let paste_id = created["id"].as_str().unwrap();

    let response = server.get(&format!("/api/paste/{}/raw", paste_id)).await;
    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(
        response.text(),
        "--- a.txt (plaintext) ---\n\nfirst\n\n--- Pasty (rust) ---\n\nfn main() {}"
    );
}

#[tokio::test]
async fn test_raw_export_refuses_encrypted_pastes() {
    let server = setup_test_server();

    let ciphertext = "bm9uY2UtYW5kLWNpcGhlcnRleHQ=";
    let created: serde_json::Value = server
        .post("/api/paste")
        .json(&json!({
            "tabs": [{"name": "secret.txt", "lang": "plaintext", "content": ciphertext}],
            "ttlSeconds": 0,
            "encrypted": true,
        }))
        .await
        .json();
    let paste_id = created["id"].as_str().unwrap();

    let response = server.get(&format!("/api/paste/{}/raw", paste_id)).await;
    assert_eq!(response.status_code(), StatusCode::FORBIDDEN);
    assert!(
        !response.text().contains(ciphertext),
        "refusal must not leak ciphertext"
    );

    // The JSON endpoint still serves the opaque ciphertext for the viewer UI.
    let get_response = server.get(&format!("/api/paste/{}", paste_id)).await;
    assert_eq!(get_response.status_code(), StatusCode::OK);
    let retrieved: serde_json::Value = get_response.json();
    assert_eq!(retrieved["encrypted"], true);
    assert_eq!(retrieved["tabs"][0]["content"], ciphertext);
}

#[tokio::test]
async fn test_active_count_tracks_creates_and_expiries() {
    let server = setup_test_server();

    let initial: serde_json::Value = server.get("/api/stats/active-count").await.json();
    assert_eq!(initial["count"], 0);

    for _ in 0..3 {
        let response = server
            .post("/api/paste")
            .json(&json!({
                "tabs": [{"name": "n", "lang": "plaintext", "content": "hi"}],
                "ttlSeconds": 0,
            }))
            .await;
        assert_eq!(response.status_code(), StatusCode::CREATED);
    }

    let after: serde_json::Value = server.get("/api/stats/active-count").await.json();
    assert_eq!(after["count"], 3);
}

#[tokio::test]
async fn test_expired_paste_reads_as_not_found() {
    let server = setup_test_server();

    // TTL of 1 second, then a fetch after expiry must 404 and the active
    // count must exclude the record.
    let created: serde_json::Value = server
        .post("/api/paste")
        .json(&json!({
            "tabs": [{"name": "t", "lang": "plaintext", "content": "short-lived"}],
            "ttlSeconds": 1,
        }))
        .await
        .json();
    let paste_id = created["id"].as_str().unwrap();

    tokio::time::sleep(std::time::Duration::from_millis(1100)).await;

    let response = server.get(&format!("/api/paste/{}", paste_id)).await;
    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);

    let count: serde_json::Value = server.get("/api/stats/active-count").await.json();
    assert_eq!(count["count"], 0);
}
