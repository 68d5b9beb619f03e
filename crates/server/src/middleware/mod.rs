//! Middleware and extractors for the portal server.

pub mod auth;
pub mod rate_limit;
pub mod request_id;
pub mod session;

pub use auth::{CurrentProfile, OptionalAuth, RequireAdmin, RequireAuth};
pub use rate_limit::{auth_rate_limiter, write_rate_limiter};
pub use request_id::request_id_middleware;
pub use session::create_session_layer;
