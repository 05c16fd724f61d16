//! Auth request and response bodies, plus the messages the auth routes emit.

pub use jobify_models::auth::{AuthUserResponse, LoginRequest, MessageResponse, RegisterRequest};

pub const MIN_PASSWORD_LENGTH: usize = 8;

pub const USER_CREATED_MESSAGE: &str = "user created";
pub const LOGGED_IN_MESSAGE: &str = "user logged in";
pub const LOGGED_OUT_MESSAGE: &str = "user logged out!";
/// Shared by unknown email and wrong password.
pub const INVALID_CREDENTIALS_MESSAGE: &str = "invalid credentials";
