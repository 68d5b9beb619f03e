//! Integration tests for the authorization gate and moderation flow.
//!
//! These tests require:
//! - A running `PostgreSQL` database with migrations applied
//!   (`VILA_DATABASE_URL` for admin promotion)
//! - The server running (cargo run -p vila-server)
//!
//! Run with: cargo test -p vila-integration-tests -- --ignored

use serde_json::json;

use vila_integration_tests::{TestContext, promote_to_admin, unique_email};

#[tokio::test]
#[ignore = "Requires running server"]
async fn test_admin_area_requires_authentication() {
    let ctx = TestContext::new();

    let resp = ctx
        .client
        .get(ctx.url("/admin/dashboard"))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(resp.status(), 401);
}

#[tokio::test]
#[ignore = "Requires running server"]
async fn test_admin_area_rejects_non_admin_roles() {
    let ctx = TestContext::new();
    ctx.register(&unique_email("notadmin"), "Not Admin", "client")
        .await;

    let resp = ctx
        .client
        .get(ctx.url("/admin/dashboard"))
        .send()
        .await
        .expect("Failed to send request");

    // The gate fails closed: authenticated but not admin.
    assert_eq!(resp.status(), 403);
}

#[tokio::test]
#[ignore = "Requires running server and database access"]
async fn test_role_change_takes_effect_on_next_request() {
    let ctx = TestContext::new();
    let email = unique_email("promoted");
    ctx.register(&email, "Soon Admin", "client").await;

    // Before promotion the gate rejects.
    let resp = ctx
        .client
        .get(ctx.url("/admin/dashboard"))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(resp.status(), 403);

    promote_to_admin(&email).await;

    // Same session, no re-login: the gate reads the live profile row, so
    // the promotion is visible immediately.
    let resp = ctx
        .client
        .get(ctx.url("/admin/dashboard"))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(resp.status(), 200);
}

#[tokio::test]
#[ignore = "Requires running server and database access"]
async fn test_store_approval_flow() {
    // Store owner registers (pending) and cannot create a store yet.
    let owner = TestContext::new();
    let owner_email = unique_email("flow-owner");
    let body = owner.register(&owner_email, "Flow Owner", "store_owner").await;
    let owner_profile_id = body["profile"]["id"].as_i64().expect("profile id");

    let resp = owner
        .client
        .post(owner.url("/account/stores"))
        .json(&json!({ "name": "Mercadinho", "address": "Av. Brasil, 1" }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(resp.status(), 403, "pending owner cannot create a store");

    // Admin approves the owner profile.
    let admin = TestContext::new();
    let admin_email = unique_email("flow-admin");
    admin.register(&admin_email, "Flow Admin", "client").await;
    promote_to_admin(&admin_email).await;

    let resp = admin
        .client
        .post(admin.url(&format!("/admin/profiles/{owner_profile_id}/approve")))
        .send()
        .await
        .expect("Failed to approve profile");
    assert_eq!(resp.status(), 200);
    let approved: serde_json::Value = resp.json().await.expect("Failed to parse profile");
    assert_eq!(approved["status"], "active");

    // Approving twice violates the transition policy.
    let resp = admin
        .client
        .post(admin.url(&format!("/admin/profiles/{owner_profile_id}/approve")))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(resp.status(), 409);

    // The approved owner creates a store; it starts pending and is not
    // publicly visible.
    let resp = owner
        .client
        .post(owner.url("/account/stores"))
        .json(&json!({ "name": "Mercadinho", "address": "Av. Brasil, 1" }))
        .send()
        .await
        .expect("Failed to create store");
    assert_eq!(resp.status(), 201);
    let store: serde_json::Value = resp.json().await.expect("Failed to parse store");
    assert_eq!(store["status"], "pending");
    let store_id = store["id"].as_i64().expect("store id");

    // Anonymously, the pending store does not exist; its owner can see it.
    let anon = TestContext::new();
    let resp = anon
        .client
        .get(anon.url(&format!("/stores/{store_id}")))
        .send()
        .await
        .expect("Failed to fetch store");
    assert_eq!(resp.status(), 404, "pending stores are not public");

    let resp = owner
        .client
        .get(owner.url(&format!("/stores/{store_id}")))
        .send()
        .await
        .expect("Failed to fetch store");
    assert_eq!(resp.status(), 200, "owners see their own pending store");

    // Admin approves the store; now it is public.
    let resp = admin
        .client
        .post(admin.url(&format!("/admin/stores/{store_id}/approve")))
        .send()
        .await
        .expect("Failed to approve store");
    assert_eq!(resp.status(), 200);

    let resp = owner
        .client
        .get(owner.url(&format!("/stores/{store_id}")))
        .send()
        .await
        .expect("Failed to fetch store");
    assert_eq!(resp.status(), 200);
}

#[tokio::test]
#[ignore = "Requires running server and database access"]
async fn test_blocked_profile_loses_access() {
    let ctx = TestContext::new();
    let email = unique_email("blockee");
    let body = ctx.register(&email, "Blockee", "client").await;
    let profile_id = body["profile"]["id"].as_i64().expect("profile id");

    let admin = TestContext::new();
    let admin_email = unique_email("blocker");
    admin.register(&admin_email, "Blocker", "client").await;
    promote_to_admin(&admin_email).await;

    let resp = admin
        .client
        .post(admin.url(&format!("/admin/profiles/{profile_id}/block")))
        .send()
        .await
        .expect("Failed to block profile");
    assert_eq!(resp.status(), 200);

    // The blocked profile's existing session is useless on the very next
    // request; no waiting for session expiry.
    let resp = ctx
        .client
        .get(ctx.url("/account/profile"))
        .send()
        .await
        .expect("Failed to fetch profile");
    assert_eq!(resp.status(), 403);
}
