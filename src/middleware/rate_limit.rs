//! Per-IP rate limiting for the credential endpoints.
//!
//! Register and login share one fixed-window counter per client, so a client
//! has a single budget across both routes. A window opens on the client's
//! first request; once `auth_max_requests` have been counted, every further
//! request is rejected until the window closes and the budget resets in full.

use axum::{
    extract::{ConnectInfo, Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};
use dashmap::DashMap;
use std::{
    net::SocketAddr,
    sync::Arc,
    time::{Duration, Instant},
};

use jobify_config::RateLimitConfig;
use jobify_core::AppError;

use crate::state::AppState;

const CLEANUP_INTERVAL: Duration = Duration::from_secs(60);

#[derive(Debug, Clone, Copy)]
struct Window {
    opened_at: Instant,
    hits: u32,
}

#[derive(Clone)]
pub struct AuthRateLimiter {
    windows: Arc<DashMap<String, Window>>,
    budget: u32,
    window: Duration,
    trust_proxy: bool,
    message: String,
}

impl std::fmt::Debug for AuthRateLimiter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthRateLimiter")
            .field("tracked_keys", &self.windows.len())
            .field("budget", &self.budget)
            .field("window", &self.window)
            .field("trust_proxy", &self.trust_proxy)
            .finish()
    }
}

impl AuthRateLimiter {
    pub fn new(config: &RateLimitConfig) -> Self {
        Self {
            windows: Arc::new(DashMap::new()),
            budget: config.auth_budget(),
            window: config.auth_window(),
            trust_proxy: config.trust_proxy,
            message: config.rejection_message.clone(),
        }
    }

    /// Counts one request against `key`. `false` when the window's budget is
    /// already spent.
    pub fn check(&self, key: &str) -> bool {
        self.check_at(key, Instant::now())
    }

    pub(crate) fn check_at(&self, key: &str, now: Instant) -> bool {
        let mut entry = self.windows.entry(key.to_string()).or_insert(Window {
            opened_at: now,
            hits: 0,
        });

        if now.saturating_duration_since(entry.opened_at) >= self.window {
            *entry = Window {
                opened_at: now,
                hits: 0,
            };
        }

        if entry.hits >= self.budget {
            return false;
        }
        entry.hits += 1;
        true
    }

    pub fn rejection_message(&self) -> &str {
        &self.message
    }

    /// Client key for `req`, see [`client_ip`].
    pub fn key_for(&self, req: &Request) -> String {
        client_ip(req, self.trust_proxy)
    }

    fn evict_closed(&self, now: Instant) {
        let window = self.window;
        self.windows
            .retain(|_, w| now.saturating_duration_since(w.opened_at) < window);
    }

    /// Periodically drops keys whose window has closed.
    pub fn start_cleanup_task(&self) -> tokio::task::JoinHandle<()> {
        let limiter = self.clone();
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(CLEANUP_INTERVAL);
            loop {
                interval.tick().await;
                limiter.evict_closed(Instant::now());
            }
        })
    }
}

/// Client address used as the limiter key.
///
/// The peer address of the connection, unless `trust_proxy` is set, in which
/// case the first `X-Forwarded-For` hop wins, then `X-Real-IP`, then the peer.
pub fn client_ip(req: &Request, trust_proxy: bool) -> String {
    if trust_proxy {
        if let Some(ip) = forwarded_ip(req) {
            return ip;
        }
    }

    if let Some(ConnectInfo(addr)) = req.extensions().get::<ConnectInfo<SocketAddr>>() {
        return addr.ip().to_string();
    }

    "unknown".to_string()
}

fn forwarded_ip(req: &Request) -> Option<String> {
    let headers = req.headers();

    let forwarded_for = headers
        .get("X-Forwarded-For")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(str::trim)
        .filter(|ip| !ip.is_empty());

    let real_ip = || {
        headers
            .get("X-Real-IP")
            .and_then(|v| v.to_str().ok())
            .map(str::trim)
            .filter(|ip| !ip.is_empty())
    };

    forwarded_for.or_else(real_ip).map(str::to_string)
}

pub async fn auth_rate_limit(State(state): State<AppState>, req: Request, next: Next) -> Response {
    let key = state.auth_limiter.key_for(&req);

    if !state.auth_limiter.check(&key) {
        tracing::warn!(client = %key, path = %req.uri().path(), "Auth rate limit exceeded");
        return AppError::too_many_requests(state.auth_limiter.rejection_message()).into_response();
    }

    next.run(req).await
}
