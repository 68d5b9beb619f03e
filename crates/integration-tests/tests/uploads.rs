//! Integration tests for product image uploads.
//!
//! These tests require:
//! - A running `PostgreSQL` database with migrations applied
//!   (`VILA_DATABASE_URL` for admin promotion)
//! - The server running (cargo run -p vila-server)
//!
//! Run with: cargo test -p vila-integration-tests -- --ignored

use reqwest::multipart;
use serde_json::json;

use vila_integration_tests::{TestContext, promote_to_admin, unique_email};

/// Tiny valid-enough PNG payload for upload tests.
const PNG_BYTES: &[u8] = &[
    0x89, b'P', b'N', b'G', 0x0d, 0x0a, 0x1a, 0x0a, 0x00, 0x00, 0x00, 0x0d,
];

/// Set up an approved store owner with an approved store and one product.
/// Returns (owner context, store id, product id).
async fn store_with_product() -> (TestContext, i64, i64) {
    let owner = TestContext::new();
    let owner_email = unique_email("upload-owner");
    let body = owner
        .register(&owner_email, "Upload Owner", "store_owner")
        .await;
    let profile_id = body["profile"]["id"].as_i64().expect("profile id");

    let admin = TestContext::new();
    let admin_email = unique_email("upload-admin");
    admin.register(&admin_email, "Upload Admin", "client").await;
    promote_to_admin(&admin_email).await;

    let resp = admin
        .client
        .post(admin.url(&format!("/admin/profiles/{profile_id}/approve")))
        .send()
        .await
        .expect("Failed to approve owner");
    assert_eq!(resp.status(), 200);

    let store: serde_json::Value = owner
        .client
        .post(owner.url("/account/stores"))
        .json(&json!({ "name": "Foto Loja", "address": "Rua A, 2" }))
        .send()
        .await
        .expect("Failed to create store")
        .json()
        .await
        .expect("Failed to parse store");
    let store_id = store["id"].as_i64().expect("store id");

    let product: serde_json::Value = owner
        .client
        .post(owner.url(&format!("/account/stores/{store_id}/products")))
        .json(&json!({
            "title": "Camera antiga",
            "price": { "amount": "120.00", "currency": "BRL" },
        }))
        .send()
        .await
        .expect("Failed to create product")
        .json()
        .await
        .expect("Failed to parse product");
    let product_id = product["id"].as_i64().expect("product id");

    (owner, store_id, product_id)
}

#[tokio::test]
#[ignore = "Requires running server and database access"]
async fn test_upload_missing_file_field_is_rejected() {
    let (owner, store_id, product_id) = store_with_product().await;

    // A form without the `file` part: 400, and the image list stays empty,
    // so no metadata row (and no object) was created.
    let form = multipart::Form::new().text("note", "no file here");
    let resp = owner
        .client
        .post(owner.url(&format!(
            "/account/stores/{store_id}/products/{product_id}/images"
        )))
        .multipart(form)
        .send()
        .await
        .expect("Failed to send upload");
    assert_eq!(resp.status(), 400);

    let images: serde_json::Value = owner
        .client
        .get(owner.url(&format!(
            "/account/stores/{store_id}/products/{product_id}/images"
        )))
        .send()
        .await
        .expect("Failed to list images")
        .json()
        .await
        .expect("Failed to parse images");
    assert_eq!(images.as_array().map(Vec::len), Some(0));
}

#[tokio::test]
#[ignore = "Requires running server and database access"]
async fn test_successful_upload_creates_object_and_row() {
    let (owner, store_id, product_id) = store_with_product().await;

    let part = multipart::Part::bytes(PNG_BYTES.to_vec())
        .file_name("camera.png")
        .mime_str("image/png")
        .expect("valid mime");
    let form = multipart::Form::new().part("file", part);

    let resp = owner
        .client
        .post(owner.url(&format!(
            "/account/stores/{store_id}/products/{product_id}/images"
        )))
        .multipart(form)
        .send()
        .await
        .expect("Failed to upload");
    assert_eq!(resp.status(), 201);

    let body: serde_json::Value = resp.json().await.expect("Failed to parse response");
    let public_url = body["publicUrl"].as_str().expect("publicUrl present");
    assert!(public_url.starts_with("/media/"));

    // Exactly one metadata row was recorded.
    let images: serde_json::Value = owner
        .client
        .get(owner.url(&format!(
            "/account/stores/{store_id}/products/{product_id}/images"
        )))
        .send()
        .await
        .expect("Failed to list images")
        .json()
        .await
        .expect("Failed to parse images");
    assert_eq!(images.as_array().map(Vec::len), Some(1));

    // The returned URL dereferences to the stored object's bytes.
    let resp = owner
        .client
        .get(owner.url(public_url))
        .send()
        .await
        .expect("Failed to fetch object");
    assert_eq!(resp.status(), 200);
    let fetched = resp.bytes().await.expect("Failed to read object");
    assert_eq!(fetched.as_ref(), PNG_BYTES);
}

#[tokio::test]
#[ignore = "Requires running server and database access"]
async fn test_upload_to_unowned_store_is_not_found() {
    let (_owner, store_id, product_id) = store_with_product().await;

    // A different signed-in profile cannot upload into someone else's store.
    let intruder = TestContext::new();
    intruder
        .register(&unique_email("intruder"), "Intruder", "client")
        .await;

    let part = multipart::Part::bytes(PNG_BYTES.to_vec())
        .file_name("sneaky.png")
        .mime_str("image/png")
        .expect("valid mime");
    let form = multipart::Form::new().part("file", part);

    let resp = intruder
        .client
        .post(intruder.url(&format!(
            "/account/stores/{store_id}/products/{product_id}/images"
        )))
        .multipart(form)
        .send()
        .await
        .expect("Failed to send upload");
    assert_eq!(resp.status(), 404);
}
