//! Process-level settings: where to listen, which environment we run in,
//! and how to reach the database.

use std::env;
use std::fmt;

/// Runtime environment. Only `Production` changes behavior: session cookies
/// get the `Secure` attribute.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AppEnvironment {
    #[default]
    Development,
    Production,
}

impl AppEnvironment {
    pub fn from_env() -> Self {
        env::var("APP_ENV")
            .map(|v| Self::parse(&v))
            .unwrap_or_default()
    }

    pub fn parse(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "production" | "prod" => AppEnvironment::Production,
            _ => AppEnvironment::Development,
        }
    }

    pub fn is_production(self) -> bool {
        self == AppEnvironment::Production
    }
}

impl fmt::Display for AppEnvironment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppEnvironment::Development => f.write_str("development"),
            AppEnvironment::Production => f.write_str("production"),
        }
    }
}

#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub port: u16,
    pub environment: AppEnvironment,
}

impl ServerConfig {
    pub fn from_env() -> Self {
        Self {
            port: crate::env_parse("PORT", 5100),
            environment: AppEnvironment::from_env(),
        }
    }
}

#[derive(Clone, Debug)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
}

impl DatabaseConfig {
    /// # Errors
    ///
    /// Fails when `DATABASE_URL` is not set.
    pub fn from_env() -> Result<Self, env::VarError> {
        Ok(Self {
            url: env::var("DATABASE_URL")?,
            max_connections: crate::env_parse("DATABASE_MAX_CONNECTIONS", 10),
        })
    }
}
