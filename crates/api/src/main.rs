//! JLPT Tutor backend server.

use std::sync::Arc;

use jlpt_tutor_api::{AppState, build_router};
use jlpt_tutor_config::AppConfig;
use jlpt_tutor_storage::{SessionRepository, create_pool, run_migrations};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::from_env()?;

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("{},sqlx=warn", config.log_level).into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting JLPT Tutor backend...");

    let pool = create_pool(&config.database_url).await?;
    tracing::info!("Database connection pool created");

    run_migrations(&pool).await?;
    tracing::info!("Database migrations complete");

    let swept = SessionRepository::new(pool.clone())
        .sweep_stale_on_startup(chrono::Utc::now())
        .await?;
    if swept > 0 {
        tracing::warn!(swept, "Closed stale open sessions left over from a previous run");
    }

    let bind_address = config.bind_address();
    let state = Arc::new(AppState::new(pool.clone(), config));
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(&bind_address).await?;
    tracing::info!("Server listening on {}", bind_address);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(pool))
        .await?;

    Ok(())
}

/// Waits for Ctrl+C, then sweeps any sessions still open at shutdown (spec §4.3).
async fn shutdown_signal(pool: sqlx::PgPool) {
    tokio::signal::ctrl_c()
        .await
        .expect("failed to install Ctrl+C handler");

    tracing::info!("Shutdown signal received, sweeping open sessions...");
    if let Err(e) = SessionRepository::new(pool)
        .sweep_open_on_shutdown(chrono::Utc::now())
        .await
    {
        tracing::error!("Failed to sweep open sessions on shutdown: {}", e);
    }
}
