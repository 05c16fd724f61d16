use anyhow::Context;
use std::sync::Arc;

use jobify_auth::SessionTokenCodec;
use jobify_config::{
    AppEnvironment, CorsConfig, DatabaseConfig, JwtConfig, RateLimitConfig, SessionCookieConfig,
};
use jobify_db::{JobStore, PgJobStore, PgUserStore, UserStore, init_db_pool, run_migrations};
use jobify_observability::PrometheusHandle;

use crate::middleware::rate_limit::AuthRateLimiter;

/// Shared, read-only application state. Built once at startup.
#[derive(Clone)]
pub struct AppState {
    pub users: Arc<dyn UserStore>,
    pub jobs: Arc<dyn JobStore>,
    pub tokens: Arc<SessionTokenCodec>,
    pub session_cookie: SessionCookieConfig,
    pub cors_config: CorsConfig,
    pub rate_limit_config: RateLimitConfig,
    pub auth_limiter: AuthRateLimiter,
    pub metrics_handle: Option<PrometheusHandle>,
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("tokens", &self.tokens)
            .field("session_cookie", &self.session_cookie)
            .field("cors_config", &self.cors_config)
            .field("rate_limit_config", &self.rate_limit_config)
            .finish_non_exhaustive()
    }
}

impl AppState {
    pub fn new(
        users: Arc<dyn UserStore>,
        jobs: Arc<dyn JobStore>,
        jwt_config: &JwtConfig,
        session_cookie: SessionCookieConfig,
        cors_config: CorsConfig,
        rate_limit_config: RateLimitConfig,
    ) -> Self {
        Self {
            users,
            jobs,
            tokens: Arc::new(SessionTokenCodec::new(jwt_config)),
            session_cookie,
            cors_config,
            auth_limiter: AuthRateLimiter::new(&rate_limit_config),
            rate_limit_config,
            metrics_handle: None,
        }
    }

    /// Connects to PostgreSQL, applies migrations and reads every config
    /// from the environment.
    ///
    /// # Errors
    ///
    /// Any failure here is fatal at startup.
    pub async fn from_env(environment: AppEnvironment) -> anyhow::Result<Self> {
        let db_config = DatabaseConfig::from_env().context("DATABASE_URL must be set")?;
        let pool = init_db_pool(&db_config)
            .await
            .context("Failed to connect to database")?;
        run_migrations(&pool)
            .await
            .context("Failed to run database migrations")?;

        Ok(Self::new(
            Arc::new(PgUserStore::new(pool.clone())),
            Arc::new(PgJobStore::new(pool)),
            &JwtConfig::from_env(),
            SessionCookieConfig::for_environment(environment),
            CorsConfig::from_env(),
            RateLimitConfig::from_env(),
        ))
    }

    pub fn with_metrics(mut self, handle: Option<PrometheusHandle>) -> Self {
        self.metrics_handle = handle;
        self
    }
}

#[cfg(feature = "test-utils")]
impl AppState {
    /// State backed by in-memory stores, for tests.
    pub fn in_memory(jwt_config: &JwtConfig, rate_limit_config: RateLimitConfig) -> Self {
        use jobify_db::memory::{MemoryJobStore, MemoryUserStore};

        Self::new(
            Arc::new(MemoryUserStore::new()),
            Arc::new(MemoryJobStore::new()),
            jwt_config,
            SessionCookieConfig::default(),
            CorsConfig {
                allowed_origins: vec!["http://localhost:5173".to_string()],
            },
            rate_limit_config,
        )
    }
}
