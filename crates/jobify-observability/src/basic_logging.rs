use tracing_subscriber::{EnvFilter, Layer, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Filter used when `RUST_LOG` is not set: `LOG_LEVEL` (default `info`) for
/// everything, with noisy dependencies held at `warn`.
pub fn default_env_filter() -> EnvFilter {
    let log_level = std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

    EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "{},tower_http=warn,hyper=warn,tonic=warn,h2=warn,sqlx=warn",
            log_level
        ))
    })
}

/// Initialize basic console logging when observability is disabled.
///
/// Compact format with module targets, file and line. Safe to call more than
/// once; later calls are ignored.
pub fn init_basic_console_logging() {
    let console_layer = fmt::layer()
        .compact()
        .with_target(true)
        .with_thread_ids(false)
        .with_thread_names(false)
        .with_file(true)
        .with_line_number(true)
        .with_ansi(true)
        .with_filter(default_env_filter());

    if tracing_subscriber::registry()
        .with(console_layer)
        .try_init()
        .is_ok()
    {
        eprintln!(
            "ℹ️  Observability disabled - console logging only (OBSERVABILITY_ENABLED=false or feature not compiled)"
        );
    }
}
