//! Static pages, fallbacks, assets, and the session cookie.

use http::{Method, StatusCode};

use crate::common::TestHarness;

#[tokio::test]
async fn test_home_page() {
    let mut harness = TestHarness::new();
    let resp = harness.get("/").await;
    assert_eq!(resp.status, StatusCode::OK);
    assert!(resp.body.contains("<title>Home</title>"));
    assert!(resp.body.contains("Halaman Utama"));
}

#[tokio::test]
async fn test_product_page() {
    let mut harness = TestHarness::new();
    let resp = harness.get("/product").await;
    assert_eq!(resp.status, StatusCode::OK);
    assert!(resp.body.contains("<title>Produk</title>"));
}

#[tokio::test]
async fn test_about_page_has_no_layout() {
    let mut harness = TestHarness::new();
    let resp = harness.get("/about").await;
    assert_eq!(resp.status, StatusCode::OK);
    assert!(resp.body.contains("<title>About</title>"));
    assert!(!resp.body.contains("navbar"));
}

#[tokio::test]
async fn test_empty_contact_list() {
    let mut harness = TestHarness::new();
    let resp = harness.get("/contact").await;
    assert_eq!(resp.status, StatusCode::OK);
    assert!(resp.body.contains("Data kontak masih kosong!"));
}

#[tokio::test]
async fn test_add_form_is_not_a_contact_name() {
    let mut harness = TestHarness::new();
    harness
        .add_contact("add", "add@example.com", "081234567890")
        .await;

    let resp = harness.get("/contact/add").await;
    assert_eq!(resp.status, StatusCode::OK);
    assert!(resp.body.contains("Form Tambah Kontak"));
}

#[tokio::test]
async fn test_unknown_path_is_404() {
    let mut harness = TestHarness::new();
    let resp = harness.get("/does/not/exist").await;
    assert_eq!(resp.status, StatusCode::NOT_FOUND);
    assert_eq!(resp.body, "<h1>404</h1>");
}

#[tokio::test]
async fn test_unrouted_methods_are_404() {
    let mut harness = TestHarness::new();

    let resp = harness.form(Method::POST, "/about", &[]).await;
    assert_eq!(resp.status, StatusCode::NOT_FOUND);
    assert_eq!(resp.body, "<h1>404</h1>");

    let resp = harness
        .form(Method::POST, "/contact?_method=PATCH", &[("name", "Alice")])
        .await;
    assert_eq!(resp.status, StatusCode::NOT_FOUND);

    let resp = harness.form(Method::POST, "/nowhere", &[]).await;
    assert_eq!(resp.status, StatusCode::NOT_FOUND);
    assert_eq!(resp.body, "<h1>404</h1>");
}

#[tokio::test]
async fn test_static_assets_are_served() {
    let mut harness = TestHarness::new();
    let resp = harness.get("/css/style.css").await;
    assert_eq!(resp.status, StatusCode::OK);
    assert!(resp.body.contains(".navbar"));

    let resp = harness.get("/css/missing.css").await;
    assert_eq!(resp.status, StatusCode::NOT_FOUND);
    assert_eq!(resp.body, "<h1>404</h1>");
}

#[tokio::test]
async fn test_session_cookie_attributes() {
    let mut harness = TestHarness::new();
    let resp = harness.get("/").await;
    let cookie = resp.set_cookie.expect("session cookie");
    assert!(cookie.starts_with("kontak.sid="));
    assert!(cookie.contains("HttpOnly"));
    assert!(cookie.contains("SameSite=Lax"));
    assert!(cookie.contains("Max-Age=6"));
}

#[tokio::test]
async fn test_session_is_kept_across_requests() {
    let mut harness = TestHarness::new();
    let first = harness.get("/").await.set_cookie.unwrap();
    let second = harness.get("/").await.set_cookie.unwrap();
    assert_eq!(
        first.split(';').next().unwrap(),
        second.split(';').next().unwrap()
    );
}
