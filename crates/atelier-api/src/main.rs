//! # atelier-api — Binary Entry Point
//!
//! Starts the Axum HTTP server for the Atelier production backend.
//! Binds to a configurable port (default 8080) over a SQLite database
//! (default `sqlite:atelier.db`, created when missing).

use atelier_api::state::{AppConfig, AppState};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize structured tracing.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    // Build configuration from environment.
    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(8080);

    let database_url =
        std::env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite:atelier.db".to_string());

    let pool = atelier_api::db::init_pool(&database_url).await.map_err(|e| {
        tracing::error!("database initialization failed: {e}");
        e
    })?;

    let config = AppConfig { port, database_url };
    let state = AppState::new(pool, config);
    let app = atelier_api::app(state);

    let addr = std::net::SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("Atelier API listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
