//! MindMate - mood journaling core.
//!
//! # API Endpoints
//!
//! - `POST /entries` - Classify and record a mood entry
//! - `GET /entries` - Full mood history
//! - `GET /stats` - Headline stats
//! - `GET /insights` - Distribution, weekly pattern and trend
//! - `GET /history?range=7d|30d|all` - Time-ranged chart data and streak
//! - `GET /tips/:mood` - Coping tips for a mood
//! - `POST /api/analyze` - Stub remote analysis
//! - `GET /health` - Health check

use std::env;
use std::net::SocketAddr;

use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use mindmate::api::{AppState, router};
use mindmate::storage::Storage;

/// Default port if not specified via environment variable.
const DEFAULT_PORT: u16 = 3000;

/// Default database path if not specified via environment variable.
const DEFAULT_DB_PATH: &str = "sqlite:mindmate.db?mode=rwc";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Journal text is never logged at any level
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_default_env().add_directive("mindmate=info".parse()?))
        .init();

    let port: u16 = env::var("MINDMATE_PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(DEFAULT_PORT);

    let db_url = env::var("MINDMATE_DATABASE_URL").unwrap_or_else(|_| DEFAULT_DB_PATH.to_string());

    info!(port, db_url = %db_url, "Starting MindMate server");

    let storage = Storage::new(&db_url).await?;
    let history = storage.load().await?;
    info!(entries = history.len(), "Mood history loaded");

    let app = router(AppState { storage });

    let addr = SocketAddr::from(([127, 0, 0, 1], port));
    let listener = TcpListener::bind(addr).await?;

    info!(%addr, "MindMate is listening");

    axum::serve(listener, app).await?;

    Ok(())
}
