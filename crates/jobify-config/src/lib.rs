//! # Jobify Config
//!
//! Configuration types for the Jobify API, each loaded from environment
//! variables by a `from_env()` constructor with sensible defaults:
//!
//! - [`server`]: listen port, runtime environment, database settings
//! - [`jwt`]: session token signing secret and validity window
//! - [`session`]: session cookie attributes
//! - [`cors`]: allowed browser origins
//! - [`rate_limit`]: per-IP limits for the auth endpoints
//!
//! Configuration is read once in `main` and handed to the components that
//! need it; nothing here is a global.

pub mod cors;
pub mod jwt;
pub mod rate_limit;
pub mod server;
pub mod session;

// Re-export commonly used types at crate root
pub use cors::CorsConfig;
pub use jwt::JwtConfig;
pub use rate_limit::RateLimitConfig;
pub use server::{AppEnvironment, DatabaseConfig, ServerConfig};
pub use session::SessionCookieConfig;

pub(crate) fn env_parse<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}
