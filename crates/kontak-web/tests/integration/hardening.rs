//! Behavior when the contact store fails.

use std::sync::Arc;

use http::StatusCode;
use kontak_core::messages;

use crate::common::{FlakyStore, TestHarness};

fn flaky() -> (Arc<FlakyStore>, TestHarness) {
    let store = Arc::new(FlakyStore::new());
    let harness = TestHarness::with_store(store.clone());
    (store, harness)
}

#[tokio::test]
async fn test_failed_reads_render_500() {
    let (store, mut harness) = flaky();
    store.set_failing(true);

    for path in ["/contact", "/contact/Alice", "/contact/edit/Alice"] {
        let resp = harness.get(path).await;
        assert_eq!(resp.status, StatusCode::INTERNAL_SERVER_ERROR, "{path}");
        assert_eq!(resp.body, "<h1>500</h1>");
    }

    // Pages that never touch the store still work.
    assert_eq!(harness.get("/").await.status, StatusCode::OK);
}

#[tokio::test]
async fn test_failed_create_redirects_with_failure_flash() {
    let (store, mut harness) = flaky();
    store.set_failing(true);

    let resp = harness
        .add_contact("Alice", "alice@example.com", "081234567890")
        .await;
    assert_eq!(resp.status, StatusCode::SEE_OTHER);
    assert_eq!(resp.location.as_deref(), Some("/contact"));

    store.set_failing(false);
    let list = harness.get("/contact").await;
    assert!(list.body.contains(messages::STORE_FAILURE));
    assert_eq!(harness.stored_count().await, 0);
}

#[tokio::test]
async fn test_failed_edit_redirects_with_failure_flash() {
    let (store, mut harness) = flaky();
    harness
        .add_contact("Alice", "alice@example.com", "081234567890")
        .await;
    let id = harness.stored("Alice").await.unwrap().id.to_string();

    store.set_failing(true);
    let resp = harness
        .edit_contact(&id, "Alice", "Alice", "alice@work.example", "081234567890")
        .await;
    assert_eq!(resp.location.as_deref(), Some("/contact"));

    store.set_failing(false);
    let list = harness.get("/contact").await;
    assert!(list.body.contains(messages::STORE_FAILURE));
    assert_eq!(
        harness.stored("Alice").await.unwrap().email,
        "alice@example.com"
    );
}

#[tokio::test]
async fn test_failed_delete_redirects_with_failure_flash() {
    let (store, mut harness) = flaky();
    harness
        .add_contact("Alice", "alice@example.com", "081234567890")
        .await;

    store.set_failing(true);
    let resp = harness.delete_contact("Alice").await;
    assert_eq!(resp.status, StatusCode::SEE_OTHER);
    assert_eq!(resp.location.as_deref(), Some("/contact"));

    store.set_failing(false);
    let list = harness.get("/contact").await;
    assert!(list.body.contains(messages::STORE_FAILURE));
    assert!(harness.stored("Alice").await.is_some());
}
