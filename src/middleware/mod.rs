//! Middleware and extractors for cross-cutting request concerns.
//!
//! - [`auth`]: the [`auth::AuthUser`] extractor, which reads the session cookie
//! - [`guard`]: owner-or-admin checks on job records
//! - [`role`]: admin-only route layer
//! - [`rate_limit`]: per-IP limiter for register and login
//!
//! # Authentication Flow
//!
//! 1. Login sets an HttpOnly `token` cookie holding a signed session token
//! 2. `AuthUser` reads and verifies it on every protected route
//! 3. Job routes additionally run the ownership guard on the target record
//! 4. Handler executes if all checks pass
//!
//! # Example
//!
//! ```ignore
//! use crate::middleware::auth::AuthUser;
//! use crate::middleware::guard::authorize;
//!
//! async fn delete_job(AuthUser(claims): AuthUser, ...) -> Result<impl IntoResponse, AppError> {
//!     authorize(&claims, job.created_by)?;
//!     // ...
//! }
//! ```

pub mod auth;
pub mod guard;
pub mod rate_limit;
pub mod role;
