//! Contact create, edit, delete, and view flows.

use http::StatusCode;
use kontak_core::messages;

use crate::common::TestHarness;

const ALICE: (&str, &str, &str) = ("Alice", "alice@example.com", "081234567890");

async fn with_alice() -> TestHarness {
    let mut harness = TestHarness::new();
    let (name, email, nohp) = ALICE;
    let resp = harness.add_contact(name, email, nohp).await;
    assert_eq!(resp.status, StatusCode::SEE_OTHER);
    harness
}

#[tokio::test]
async fn test_create_stores_trimmed_values_and_flashes_once() {
    let mut harness = TestHarness::new();

    let resp = harness
        .add_contact("  Alice ", " alice@example.com", "081234567890  ")
        .await;
    assert_eq!(resp.status, StatusCode::SEE_OTHER);
    assert_eq!(resp.location.as_deref(), Some("/contact"));

    let stored = harness.stored("Alice").await.expect("contact stored");
    assert_eq!(stored.email, "alice@example.com");
    assert_eq!(stored.phone, "081234567890");
    assert!(stored.last_modified.is_none());

    let list = harness.get("/contact").await;
    assert_eq!(list.status, StatusCode::OK);
    assert!(list.body.contains(messages::CONTACT_ADDED));
    assert!(list.body.contains("Alice"));

    let again = harness.get("/contact").await;
    assert!(!again.body.contains(messages::CONTACT_ADDED));
    assert!(again.body.contains("Alice"));
}

#[tokio::test]
async fn test_flash_belongs_to_the_session_that_set_it() {
    let mut harness = with_alice().await;
    harness.clear_cookie();

    let list = harness.get("/contact").await;
    assert!(!list.body.contains(messages::CONTACT_ADDED));
}

#[tokio::test]
async fn test_create_duplicate_name_is_rejected() {
    let mut harness = with_alice().await;

    let resp = harness
        .add_contact("Alice", "other@example.com", "081398765432")
        .await;
    assert_eq!(resp.status, StatusCode::OK);
    assert!(resp.body.contains(messages::NAME_TAKEN));
    assert!(resp.body.contains("Form Tambah Kontak"));
    assert_eq!(harness.stored_count().await, 1);
    assert_eq!(
        harness.stored("Alice").await.unwrap().email,
        "alice@example.com"
    );
}

#[tokio::test]
async fn test_create_duplicate_name_reported_with_other_errors() {
    let mut harness = with_alice().await;

    let resp = harness
        .add_contact("Alice", "not-an-email", "081234567890")
        .await;
    assert_eq!(resp.status, StatusCode::OK);
    assert!(resp.body.contains(messages::NAME_TAKEN));
    assert!(resp.body.contains(messages::EMAIL_INVALID));
    assert_eq!(harness.stored_count().await, 1);
}

#[tokio::test]
async fn test_create_collects_every_error() {
    let mut harness = TestHarness::new();

    let resp = harness.add_contact("", "not-an-email", "abc").await;
    assert_eq!(resp.status, StatusCode::OK);
    assert!(resp.body.contains(messages::NAME_REQUIRED));
    assert!(resp.body.contains(messages::EMAIL_INVALID));
    assert!(resp.body.contains(messages::PHONE_NOT_NUMERIC));
    assert!(resp.body.contains(messages::PHONE_INVALID));
    assert_eq!(harness.stored_count().await, 0);
}

#[tokio::test]
async fn test_create_phone_rules() {
    let mut harness = TestHarness::new();

    let resp = harness.add_contact("Budi", "budi@example.com", "12345").await;
    assert!(resp.body.contains(messages::PHONE_INVALID));
    assert!(!resp.body.contains(messages::PHONE_NOT_NUMERIC));

    let resp = harness
        .add_contact("Budi", "budi@example.com", "081298765432")
        .await;
    assert_eq!(resp.status, StatusCode::SEE_OTHER);
    assert!(harness.stored("Budi").await.is_some());
}

#[tokio::test]
async fn test_create_email_rules() {
    let mut harness = TestHarness::new();

    let resp = harness.add_contact("Citra", "not-an-email", "081234567890").await;
    assert!(resp.body.contains(messages::EMAIL_INVALID));

    let resp = harness.add_contact("Citra", "a@b.co", "081234567890").await;
    assert_eq!(resp.status, StatusCode::SEE_OTHER);
}

#[tokio::test]
async fn test_round_trip_detail_page() {
    let mut harness = with_alice().await;

    let resp = harness.get("/contact/Alice").await;
    assert_eq!(resp.status, StatusCode::OK);
    assert!(resp.body.contains("Alice"));
    assert!(resp.body.contains("alice@example.com"));
    assert!(resp.body.contains("081234567890"));
    assert!(resp.body.contains("<title>Detail Alice</title>"));
}

#[tokio::test]
async fn test_names_with_spaces_are_linked_and_reachable() {
    let mut harness = TestHarness::new();
    harness
        .add_contact("Budi Santoso", "budi@example.com", "081234567890")
        .await;

    let list = harness.get("/contact").await;
    assert!(list.body.contains("href=\"/contact/Budi%20Santoso\""));

    let detail = harness.get("/contact/Budi%20Santoso").await;
    assert_eq!(detail.status, StatusCode::OK);
    assert!(detail.body.contains("href=\"/contact/edit/Budi%20Santoso\""));
}

#[tokio::test]
async fn test_edit_keeping_own_name_succeeds() {
    let mut harness = with_alice().await;
    let id = harness.stored("Alice").await.unwrap().id.to_string();

    let resp = harness
        .edit_contact(&id, "Alice", "Alice", "alice@work.example", "081234567890")
        .await;
    assert_eq!(resp.status, StatusCode::SEE_OTHER);
    assert_eq!(resp.location.as_deref(), Some("/contact"));

    let stored = harness.stored("Alice").await.unwrap();
    assert_eq!(stored.email, "alice@work.example");
    assert!(stored.last_modified.is_some());

    let list = harness.get("/contact").await;
    assert!(list.body.contains(messages::CONTACT_UPDATED));
}

#[tokio::test]
async fn test_edit_rename() {
    let mut harness = with_alice().await;
    let id = harness.stored("Alice").await.unwrap().id.to_string();

    let resp = harness
        .edit_contact(&id, "Alice", "Alicia", "alice@example.com", "081234567890")
        .await;
    assert_eq!(resp.status, StatusCode::SEE_OTHER);
    assert!(harness.stored("Alice").await.is_none());
    assert_eq!(harness.stored("Alicia").await.unwrap().id.to_string(), id);
}

#[tokio::test]
async fn test_edit_rename_onto_existing_contact_is_rejected() {
    let mut harness = with_alice().await;
    harness
        .add_contact("Budi", "budi@example.com", "081298765432")
        .await;
    let id = harness.stored("Alice").await.unwrap().id.to_string();

    let resp = harness
        .edit_contact(&id, "Alice", "Budi", "alice@example.com", "081234567890")
        .await;
    assert_eq!(resp.status, StatusCode::SEE_OTHER);
    assert_eq!(resp.location.as_deref(), Some("/contact/edit/Alice"));

    let form = harness.get("/contact/edit/Alice").await;
    assert_eq!(form.status, StatusCode::OK);
    assert!(form.body.contains(messages::NAME_TAKEN));

    let form = harness.get("/contact/edit/Alice").await;
    assert!(!form.body.contains(messages::NAME_TAKEN));

    assert_eq!(harness.stored("Alice").await.unwrap().id.to_string(), id);
    assert_eq!(harness.stored("Budi").await.unwrap().email, "budi@example.com");
}

#[tokio::test]
async fn test_edit_rename_collision_reported_with_other_errors() {
    let mut harness = with_alice().await;
    harness
        .add_contact("Budi", "budi@example.com", "081298765432")
        .await;
    let id = harness.stored("Alice").await.unwrap().id.to_string();

    let resp = harness
        .edit_contact(&id, "Alice", "Budi", "alice@example.com", "12345")
        .await;
    assert_eq!(resp.location.as_deref(), Some("/contact/edit/Alice"));

    let form = harness.get("/contact/edit/Alice").await;
    assert!(form.body.contains(messages::NAME_TAKEN));
    assert!(form.body.contains(messages::PHONE_INVALID));
    assert_eq!(harness.stored("Alice").await.unwrap().phone, "081234567890");
}

#[tokio::test]
async fn test_edit_validation_errors_round_trip_through_flash() {
    let mut harness = with_alice().await;
    let id = harness.stored("Alice").await.unwrap().id.to_string();

    let resp = harness
        .edit_contact(&id, "Alice", "Alice", "broken", "12345")
        .await;
    assert_eq!(resp.location.as_deref(), Some("/contact/edit/Alice"));

    let form = harness.get("/contact/edit/Alice").await;
    assert!(form.body.contains(messages::EMAIL_INVALID));
    assert!(form.body.contains(messages::PHONE_INVALID));
    assert_eq!(
        harness.stored("Alice").await.unwrap().email,
        "alice@example.com"
    );
}

#[tokio::test]
async fn test_edit_unknown_id_reports_not_found() {
    let mut harness = with_alice().await;

    let resp = harness
        .edit_contact(
            "00000000-0000-4000-8000-000000000000",
            "Alice",
            "Alice",
            "alice@example.com",
            "081234567890",
        )
        .await;
    assert_eq!(resp.location.as_deref(), Some("/contact"));
    let list = harness.get("/contact").await;
    assert!(list.body.contains(messages::CONTACT_NOT_FOUND));

    let resp = harness
        .edit_contact("garbage", "Alice", "Alice", "alice@example.com", "081234567890")
        .await;
    assert_eq!(resp.location.as_deref(), Some("/contact"));
    let list = harness.get("/contact").await;
    assert!(list.body.contains(messages::CONTACT_NOT_FOUND));
}

#[tokio::test]
async fn test_delete_existing_contact() {
    let mut harness = with_alice().await;
    harness
        .add_contact("Budi", "budi@example.com", "081298765432")
        .await;

    let resp = harness.delete_contact("Alice").await;
    assert_eq!(resp.status, StatusCode::SEE_OTHER);
    assert_eq!(resp.location.as_deref(), Some("/contact"));
    assert!(harness.stored("Alice").await.is_none());
    assert_eq!(harness.stored_count().await, 1);

    let list = harness.get("/contact").await;
    assert!(list.body.contains(messages::CONTACT_DELETED));
}

#[tokio::test]
async fn test_delete_missing_contact() {
    let mut harness = with_alice().await;

    let resp = harness.delete_contact("Nobody").await;
    assert_eq!(resp.status, StatusCode::SEE_OTHER);
    assert_eq!(resp.location.as_deref(), Some("/contact"));
    assert_eq!(harness.stored_count().await, 1);

    let list = harness.get("/contact").await;
    assert!(list.body.contains(messages::CONTACT_NOT_FOUND));
}

#[tokio::test]
async fn test_unknown_contact_pages_are_404() {
    let mut harness = TestHarness::new();

    let detail = harness.get("/contact/Nobody").await;
    assert_eq!(detail.status, StatusCode::NOT_FOUND);
    assert_eq!(detail.body, "<h1>404</h1>");

    let edit = harness.get("/contact/edit/Nobody").await;
    assert_eq!(edit.status, StatusCode::NOT_FOUND);
}
