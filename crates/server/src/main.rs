//! jshop backend - catalog and storefront API.
//!
//! This binary serves the public storefront API and the admin panel API on
//! one port (default 8000).
//!
//! # Architecture
//!
//! - Axum web framework, JSON in and out
//! - SQLite via sqlx (file-backed by default, `JSHOP_DATABASE_URL` to
//!   override)
//! - Embedded migrations plus an idempotent seed run on every startup

#![cfg_attr(not(test), forbid(unsafe_code))]

use jshop_server::config::ServerConfig;
use jshop_server::state::AppState;
use jshop_server::{db, routes, seed};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    // Initialize tracing with EnvFilter.
    // Defaults to info level for our crate if RUST_LOG is not set.
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "jshop_server=info,tower_http=debug".into());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ServerConfig::from_env().expect("Failed to load configuration");

    let pool = db::create_pool(&config.database_url)
        .await
        .expect("Failed to create database pool");
    tracing::info!("Database pool created");

    db::MIGRATOR
        .run(&pool)
        .await
        .expect("Failed to run migrations");

    let bundle = seed::load_bundle().expect("Bundled seed data is invalid");
    let summary = seed::run(&pool, &bundle)
        .await
        .expect("Failed to seed database");
    tracing::info!(
        site_texts = summary.site_texts,
        metrics = summary.metrics,
        lots = summary.lots,
        "Seed procedure finished"
    );

    let state = AppState::new(pool, bundle.glitch_backgrounds.clone());
    let app = routes::router(state);

    let addr = config.socket_addr();
    tracing::info!("jshop backend listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM).
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
