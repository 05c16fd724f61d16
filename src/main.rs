use dotenvy::dotenv;
use std::net::SocketAddr;

use jobify::router::init_router;
use jobify::state::AppState;
use jobify_config::ServerConfig;
use jobify_observability::{init_metrics, init_tracing, shutdown_tracer};

#[tokio::main]
async fn main() {
    dotenv().ok();
    init_tracing();

    let config = ServerConfig::from_env();

    let state = match AppState::from_env(config.environment).await {
        Ok(state) => state.with_metrics(init_metrics()),
        Err(e) => {
            tracing::error!(error = ?e, "Failed to initialize application state");
            shutdown_tracer().await;
            std::process::exit(1);
        }
    };

    let _cleanup = state.auth_limiter.start_cleanup_task();
    let app = init_router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = match tokio::net::TcpListener::bind(addr).await {
        Ok(listener) => listener,
        Err(e) => {
            tracing::error!(error = %e, %addr, "Failed to bind listener");
            shutdown_tracer().await;
            std::process::exit(1);
        }
    };

    tracing::info!(
        port = config.port,
        environment = %config.environment,
        "🚀 Server running on http://localhost:{}",
        config.port
    );
    tracing::info!("📚 Swagger UI available at http://localhost:{}/swagger-ui", config.port);
    tracing::info!("📖 Scalar UI available at http://localhost:{}/scalar", config.port);

    if let Err(e) = axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await
    {
        tracing::error!(error = %e, "Server error");
    }

    shutdown_tracer().await;
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
