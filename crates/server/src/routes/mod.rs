//! HTTP route handlers for the portal.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                 - Liveness check
//! GET  /health/ready           - Readiness check (database)
//!
//! # Public content (active records only)
//! GET  /news                   - News listing
//! GET  /news/{id}              - News article
//! GET  /classifieds            - Classified ads listing
//! GET  /classifieds/{id}       - Classified ad
//! GET  /professionals          - Professional directory
//! GET  /professionals/{id}     - Directory entry
//! GET  /stores                 - Store directory
//! GET  /stores/{id}            - Store detail
//! GET  /stores/{id}/products   - Store product listing
//! GET  /media/*                - Uploaded objects (ServeDir)
//!
//! # Auth (rate limited)
//! POST /auth/register          - Create account + profile, sign in
//! POST /auth/login             - Sign in
//! POST /auth/logout            - Sign out (flushes the session)
//!
//! # Content creation (requires active profile)
//! POST /classifieds            - Post a classified ad (starts pending)
//! POST /professionals          - Register a directory entry (starts pending)
//!
//! # Account (requires auth)
//! GET  /account/profile        - Own profile
//! PUT  /account/profile        - Self-edit contact fields
//! GET  /account/stores         - Own stores
//! POST /account/stores         - Create store (store owner, starts pending)
//! PUT  /account/stores/{id}    - Update own store
//! GET  /account/stores/{id}/products           - Own store's products
//! POST /account/stores/{id}/products           - Create product
//! PUT  /account/stores/{id}/products/{pid}     - Update product
//! DELETE /account/stores/{id}/products/{pid}   - Delete product
//! GET  /account/stores/{id}/products/{pid}/images  - List images
//! POST /account/stores/{id}/products/{pid}/images  - Upload image (multipart)
//!
//! # Admin (requires admin role)
//! GET  /admin/dashboard        - Pending counts per entity
//! GET  /admin/{entity}?status= - Moderation queues
//! POST /admin/{entity}/{id}/approve - pending -> active
//! POST /admin/{entity}/{id}/block   - pending/active -> blocked
//! POST /admin/news             - Publish a news article
//! ```

pub mod account;
pub mod admin;
pub mod auth;
pub mod classifieds;
pub mod news;
pub mod professionals;
pub mod stores;
pub mod uploads;

use axum::Router;

use crate::middleware::{auth_rate_limiter, write_rate_limiter};
use crate::state::AppState;

/// Create all routes for the portal.
pub fn routes() -> Router<AppState> {
    Router::new()
        // Public content
        .nest("/news", news::router())
        .nest("/classifieds", classifieds::router())
        .nest("/professionals", professionals::router())
        .nest("/stores", stores::router())
        // Auth (strict rate limit)
        .nest("/auth", auth::router().layer(auth_rate_limiter()))
        // Account self-service (relaxed rate limit)
        .nest("/account", account::router().layer(write_rate_limiter()))
        // Admin dashboard
        .nest("/admin", admin::router())
}
