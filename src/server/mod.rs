//! HTTP API serving the enriched tweet collection.
//!
//! Exposes the query endpoints behind a process-local "processing done"
//! flag: until enrichment is marked complete via `POST /processing-done`,
//! the query endpoints answer with a waiting message instead of data.
//! `GET /` always answers 200 and doubles as the container health check.

mod handlers;
mod routes;

pub use routes::api_router;

use crate::db::Database;
use crate::error::Result;
use std::net::{IpAddr, SocketAddr};
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use tracing::info;

/// Port the service has always been deployed on.
pub const DEFAULT_PORT: u16 = 8001;

/// Shared state handed to every request handler.
#[derive(Clone)]
pub struct AppState {
    pub db: Database,
    pub processing_done: Arc<AtomicBool>,
}

impl AppState {
    pub fn new(db: Database) -> Self {
        Self {
            db,
            processing_done: Arc::new(AtomicBool::new(false)),
        }
    }
}

/// Binds the listener and serves the API until the process is stopped.
pub async fn serve(db: Database, host: IpAddr, port: u16) -> Result<()> {
    let state = AppState::new(db);
    let app = api_router(state);

    let addr = SocketAddr::from((host, port));
    info!("API listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
