//! # Jobify Auth
//!
//! Session tokens for the Jobify API.
//!
//! - [`claims`]: the `{userId, role, iat, exp}` payload
//! - [`jwt`]: [`SessionTokenCodec`], which signs and verifies HS256 tokens
//!
//! # Example
//!
//! ```ignore
//! use jobify_auth::SessionTokenCodec;
//! use jobify_config::JwtConfig;
//!
//! let codec = SessionTokenCodec::new(&JwtConfig::from_env());
//! let token = codec.issue(user.id, user.role)?;
//! let claims = codec.verify(&token)?;
//! assert_eq!(claims.user_id, user.id);
//! ```

pub mod claims;
pub mod jwt;

// Re-export commonly used types at crate root
pub use claims::SessionClaims;
pub use jwt::{INVALID_SESSION_MESSAGE, SessionTokenCodec};
