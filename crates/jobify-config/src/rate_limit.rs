//! Rate limiting configuration for the authentication endpoints.
//!
//! Register and login share a per-client budget: by default 20 requests per
//! 15-minute fixed window. The window opens with a client's first request and
//! the full budget comes back only when it closes.
//!
//! Clients are keyed by the connection's peer address. Forwarding headers
//! (`X-Forwarded-For`, `X-Real-IP`) are only honoured when the service sits
//! behind a trusted reverse proxy, otherwise any client could pick its own key.
//!
//! # Environment Variables
//!
//! - `RATE_LIMIT_AUTH_MAX_REQUESTS`: requests allowed per window (default: 20)
//! - `RATE_LIMIT_AUTH_WINDOW_SECS`: window length in seconds (default: 900)
//! - `RATE_LIMIT_TRUST_PROXY`: read the client address from forwarding headers (default: false)

use std::time::Duration;

pub const DEFAULT_AUTH_MAX_REQUESTS: u32 = 20;
pub const DEFAULT_AUTH_WINDOW_SECS: u64 = 15 * 60;
pub const AUTH_RATE_LIMIT_MESSAGE: &str = "IP rate limit exceeded, retry in 15 minutes.";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RateLimitConfig {
    /// Requests allowed per client within one window.
    pub auth_max_requests: u32,
    /// Window length in seconds.
    pub auth_window_secs: u64,
    /// Key clients by forwarding headers instead of the peer address.
    pub trust_proxy: bool,
    /// Body `msg` of the 429 response.
    pub rejection_message: String,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            auth_max_requests: DEFAULT_AUTH_MAX_REQUESTS,
            auth_window_secs: DEFAULT_AUTH_WINDOW_SECS,
            trust_proxy: false,
            rejection_message: AUTH_RATE_LIMIT_MESSAGE.to_string(),
        }
    }
}

impl RateLimitConfig {
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            auth_max_requests: crate::env_parse(
                "RATE_LIMIT_AUTH_MAX_REQUESTS",
                DEFAULT_AUTH_MAX_REQUESTS,
            ),
            auth_window_secs: crate::env_parse(
                "RATE_LIMIT_AUTH_WINDOW_SECS",
                DEFAULT_AUTH_WINDOW_SECS,
            ),
            trust_proxy: crate::env_parse("RATE_LIMIT_TRUST_PROXY", false),
            ..Self::default()
        }
    }

    /// Requests allowed per window, at least 1.
    #[must_use]
    pub fn auth_budget(&self) -> u32 {
        self.auth_max_requests.max(1)
    }

    #[must_use]
    pub fn auth_window(&self) -> Duration {
        Duration::from_secs(self.auth_window_secs.max(1))
    }
}
