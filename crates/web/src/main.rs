//! Rolodex web server.
//!
//! Serves the personal contact manager: session-backed auth, per-user
//! contact trees persisted as YAML files, and the rule engine from
//! `rolodex-core` behind every mutation.

#![cfg_attr(not(test), forbid(unsafe_code))]

use tower_http::services::ServeDir;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use rolodex_web::config::RolodexConfig;
use rolodex_web::state::AppState;

#[tokio::main]
async fn main() {
    // Defaults to info level for our crates if RUST_LOG is not set
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "rolodex_web=info,rolodex_core=info,tower_http=debug".into());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = RolodexConfig::from_env().expect("Failed to load configuration");

    let state = AppState::new(config).expect("Failed to initialize application state");
    tracing::info!(dir = %state.config().data_dir.display(), "Data directory ready");

    let app = rolodex_web::app(state.clone())
        .nest_service("/static", ServeDir::new("crates/web/static"));

    let addr = state.config().socket_addr();
    tracing::info!("rolodex listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");
}

/// Wait for Ctrl+C or SIGTERM so in-flight requests can finish.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown");
}
