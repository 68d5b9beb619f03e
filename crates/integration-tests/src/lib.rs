//! Integration tests for Vila.
//!
//! # Running Tests
//!
//! ```bash
//! # Start the database and apply migrations
//! cargo run -p vila-cli -- migrate
//!
//! # Start the server
//! cargo run -p vila-server
//!
//! # Run integration tests
//! cargo test -p vila-integration-tests -- --ignored
//! ```
//!
//! Tests are `#[ignore]`d by default because they need a running server
//! (`VILA_BASE_URL`, default `http://localhost:3000`) and, for admin
//! promotion, direct database access (`VILA_DATABASE_URL`).

#![cfg_attr(not(test), forbid(unsafe_code))]

use reqwest::Client;
use serde_json::{Value, json};

/// Shared context for HTTP-level tests.
pub struct TestContext {
    /// Cookie-keeping HTTP client: one client is one browser session.
    pub client: Client,
    /// Base URL of the running server.
    pub base_url: String,
}

impl TestContext {
    /// Create a context with a fresh cookie jar.
    ///
    /// # Panics
    ///
    /// Panics if the HTTP client cannot be constructed.
    #[must_use]
    pub fn new() -> Self {
        let client = Client::builder()
            .cookie_store(true)
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            base_url: base_url(),
        }
    }

    /// Build an absolute URL from a path.
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// Register a profile and sign this context's session in.
    ///
    /// # Panics
    ///
    /// Panics if the request fails or the server rejects the registration.
    pub async fn register(&self, email: &str, display_name: &str, role: &str) -> Value {
        let resp = self
            .client
            .post(self.url("/auth/register"))
            .json(&json!({
                "email": email,
                "password": TEST_PASSWORD,
                "display_name": display_name,
                "role": role,
            }))
            .send()
            .await
            .expect("Failed to register");

        assert_eq!(resp.status(), 201, "registration should succeed");
        resp.json().await.expect("Failed to parse response")
    }

    /// Sign in an existing profile.
    ///
    /// # Panics
    ///
    /// Panics if the request fails or the credentials are rejected.
    pub async fn login(&self, email: &str) -> Value {
        let resp = self
            .client
            .post(self.url("/auth/login"))
            .json(&json!({ "email": email, "password": TEST_PASSWORD }))
            .send()
            .await
            .expect("Failed to login");

        assert_eq!(resp.status(), 200, "login should succeed");
        resp.json().await.expect("Failed to parse response")
    }
}

impl Default for TestContext {
    fn default() -> Self {
        Self::new()
    }
}

/// Password used for all test accounts.
pub const TEST_PASSWORD: &str = "integration-test-pw-1";

/// Base URL for the portal (configurable via environment).
#[must_use]
pub fn base_url() -> String {
    std::env::var("VILA_BASE_URL").unwrap_or_else(|_| "http://localhost:3000".to_string())
}

/// Generate a unique test email so repeated runs never collide.
#[must_use]
pub fn unique_email(prefix: &str) -> String {
    format!("{prefix}-{}@test.example.com", uuid::Uuid::new_v4())
}

/// Promote a registered profile to an active admin, bypassing the API.
///
/// Admin creation is CLI-only in production; tests shortcut it with a
/// direct database update using `VILA_DATABASE_URL`.
///
/// # Panics
///
/// Panics if the database is unreachable or the email does not exist.
pub async fn promote_to_admin(email: &str) {
    let database_url = std::env::var("VILA_DATABASE_URL")
        .or_else(|_| std::env::var("DATABASE_URL"))
        .expect("VILA_DATABASE_URL must be set for admin promotion");

    let pool = sqlx::postgres::PgPoolOptions::new()
        .max_connections(1)
        .connect(&database_url)
        .await
        .expect("Failed to connect for admin promotion");

    let result = sqlx::query(
        r"
        UPDATE portal.profile
        SET role = 'admin', status = 'active', updated_at = now()
        WHERE account_id = (SELECT id FROM portal.account WHERE email = $1)
        ",
    )
    .bind(email.to_lowercase())
    .execute(&pool)
    .await
    .expect("Failed to promote profile");

    assert_eq!(result.rows_affected(), 1, "exactly one profile promoted");
}
