//! Jobify Observability
//!
//! Provides configurable observability features including:
//! - Tracing and distributed tracing via OpenTelemetry
//! - Metrics collection via Prometheus
//! - HTTP request/response logging
//!
//! Everything beyond console logging sits behind the `observability` feature
//! (on by default). At runtime the `OBSERVABILITY_ENABLED` environment
//! variable can switch it off again, in which case only the basic console
//! logger from [`basic_logging`] is installed.
//!
//! # Examples
//!
//! ```no_run
//! use jobify_observability::{init_tracing, shutdown_tracer};
//!
//! #[tokio::main]
//! async fn main() {
//!     init_tracing();
//!     // ... application code ...
//!     shutdown_tracer().await;
//! }
//! ```

pub mod basic_logging;
#[cfg(feature = "observability")]
pub mod logging;
#[cfg(feature = "observability")]
pub mod metrics;

pub use basic_logging::init_basic_console_logging;

#[cfg(feature = "observability")]
pub use metrics_exporter_prometheus::PrometheusHandle;

#[cfg(feature = "observability")]
pub use logging::{init_tracing, logging_middleware, shutdown_tracer};
#[cfg(feature = "observability")]
pub use metrics::{
    init_metrics, is_observability_enabled, metrics_middleware, track_job_created,
    track_session_token_issued, track_user_login, track_user_registered,
};

// No-op stubs when observability is disabled
#[cfg(not(feature = "observability"))]
pub mod stubs {
    use axum::{extract::Request, middleware::Next, response::Response};

    /// Stand-in for the Prometheus handle; never constructed.
    #[derive(Clone, Debug)]
    pub struct PrometheusHandle;

    impl PrometheusHandle {
        pub fn render(&self) -> String {
            String::new()
        }
    }

    pub fn is_observability_enabled() -> bool {
        false
    }

    pub async fn logging_middleware(req: Request, next: Next) -> Response {
        next.run(req).await
    }

    pub async fn metrics_middleware(req: Request, next: Next) -> Response {
        next.run(req).await
    }

    /// Console logging only.
    pub fn init_tracing() {
        super::basic_logging::init_basic_console_logging();
    }

    pub async fn shutdown_tracer() {}

    pub fn init_metrics() -> Option<PrometheusHandle> {
        None
    }

    pub fn track_user_registered(_role: &str) {}
    pub fn track_user_login(_outcome: &str) {}
    pub fn track_session_token_issued() {}
    pub fn track_job_created() {}
}

#[cfg(not(feature = "observability"))]
pub use stubs::*;
