use std::env;

/// Development-only fallback secret. A warning is logged when it is used.
pub const DEFAULT_DEV_SECRET: &str = "jobify-dev-secret-change-in-production";

#[derive(Clone, Debug)]
pub struct JwtConfig {
    pub secret: String,
    /// Session token validity in seconds.
    pub expires_in: i64,
}

impl JwtConfig {
    pub fn from_env() -> Self {
        let secret = env::var("JWT_SECRET").unwrap_or_else(|_| {
            tracing::warn!("JWT_SECRET is not set, using the development secret");
            DEFAULT_DEV_SECRET.to_string()
        });

        Self {
            secret,
            expires_in: crate::env_parse("JWT_EXPIRES_IN", 86_400), // 1 day
        }
    }
}
