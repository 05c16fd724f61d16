//! Session cookie attributes.
//!
//! The session token travels in an HttpOnly, SameSite=Strict cookie that
//! expires 24 hours after login. `Secure` is set only in production so the
//! cookie still works over plain HTTP during development.

use crate::server::AppEnvironment;

pub const SESSION_COOKIE_NAME: &str = "token";
/// Value written over the session cookie on logout.
pub const LOGGED_OUT_PLACEHOLDER: &str = "logout";
pub const SESSION_COOKIE_MAX_AGE_SECS: i64 = 60 * 60 * 24;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SessionCookieConfig {
    pub name: String,
    pub secure: bool,
    pub max_age_secs: i64,
}

impl SessionCookieConfig {
    pub fn for_environment(environment: AppEnvironment) -> Self {
        Self {
            name: SESSION_COOKIE_NAME.to_string(),
            secure: environment.is_production(),
            max_age_secs: SESSION_COOKIE_MAX_AGE_SECS,
        }
    }

    pub fn from_env() -> Self {
        Self::for_environment(AppEnvironment::from_env())
    }
}

impl Default for SessionCookieConfig {
    fn default() -> Self {
        Self::for_environment(AppEnvironment::Development)
    }
}
