//! Raum HTTP Server Binary
//!
//! Main entry point for the occupancy analytics REST API server. It sets up
//! the dataset store, optionally preloads a CSV file, and starts serving.
//!
//! # Usage
//!
//! ```bash
//! cargo run --bin raum-server
//!
//! # Preload a dataset at startup
//! DATA_FILE=data/auslastung_hs23.csv cargo run --bin raum-server
//! ```
//!
//! # Environment Variables
//!
//! - `HOST`: Server host (default: 0.0.0.0)
//! - `PORT`: Server port (default: 8080)
//! - `DATA_FILE`: Optional CSV file to load into the store at startup
//! - `RUST_LOG`: Log level (default: info)

use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use tracing::{info, warn, Level};
use tracing_subscriber::FmtSubscriber;

use raum_rust::http::{create_router, AppState};
use raum_rust::store::DatasetStore;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    FmtSubscriber::builder()
        .with_max_level(
            env::var("RUST_LOG")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(Level::INFO),
        )
        .with_target(true)
        .init();

    info!("Starting Raum HTTP Server");

    let store = Arc::new(DatasetStore::new());

    // Preload a dataset when DATA_FILE is set
    if let Ok(path) = env::var("DATA_FILE") {
        let path = PathBuf::from(path);
        let name = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "preloaded".to_string());
        let text = std::fs::read_to_string(&path)?;
        let outcome = store
            .insert(&name, &text)
            .map_err(|e| anyhow::anyhow!("failed to load {}: {}", path.display(), e))?;
        info!(
            "Preloaded dataset {} ('{}'): {} records",
            outcome.dataset.id,
            name,
            outcome.dataset.records.len()
        );
        if !outcome.dataset.issues.is_empty() {
            warn!(
                "{} rows skipped during preload; first issue: {}",
                outcome.dataset.issues.len(),
                outcome.dataset.issues[0].message
            );
        }
    }

    // Create application state and router
    let state = AppState::new(store);
    let app = create_router(state);

    // Determine bind address
    let host = env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
    let port: u16 = env::var("PORT")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(8080);
    let addr: SocketAddr = format!("{}:{}", host, port).parse()?;

    info!("Server listening on http://{}", addr);

    // Start the server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
