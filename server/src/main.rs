//! StayHub HTTP server.
//!
//! Wires the PostgreSQL repositories, the credential service, and the Axum
//! router, then serves with graceful shutdown.

mod config;

use anyhow::Context;
use axum::http::{HeaderValue, Method, header};
use config::Config;
use std::sync::Arc;
use stayhub_auth::TokenService;
use stayhub_postgres::{PgBookingRepository, PgRoomRepository, PgUserRepository};
use stayhub_web::{AppState, build_router};
use tokio::signal;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "stayhub=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env();
    info!(
        address = %config.server.bind_address(),
        environment = ?config.server.environment,
        "configuration loaded"
    );

    let pool = stayhub_postgres::connect(&config.database.url)
        .await
        .context("database connection failed")?;
    stayhub_postgres::migrate(&pool)
        .await
        .context("migration failed")?;
    info!("database ready");

    let state = AppState::new(
        Arc::new(PgRoomRepository::new(pool.clone())),
        Arc::new(PgBookingRepository::new(pool.clone())),
        Arc::new(PgUserRepository::new(pool)),
        TokenService::new(&config.auth.token_secret),
        config.server.environment,
    );
    let app = build_router(state).layer(cors_layer(&config.server.allowed_origins));

    let listener = tokio::net::TcpListener::bind(config.server.bind_address())
        .await
        .context("failed to bind listener")?;
    info!(address = %config.server.bind_address(), "listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    info!("shutdown complete");
    Ok(())
}

/// Credentialed CORS: the browser client sends the token cookie cross-site,
/// so origins must be listed explicitly rather than wildcarded.
fn cors_layer(origins: &[String]) -> CorsLayer {
    let parsed: Vec<HeaderValue> = origins.iter().filter_map(|o| o.parse().ok()).collect();
    CorsLayer::new()
        .allow_origin(AllowOrigin::list(parsed))
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
        ])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
        .allow_credentials(true)
}

/// Waits for Ctrl+C (SIGINT) or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            info!("received Ctrl+C, shutting down gracefully");
        },
        () = terminate => {
            info!("received SIGTERM, shutting down gracefully");
        },
    }
}
