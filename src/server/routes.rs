//! Route table for the tweet API.

use super::handlers;
use super::AppState;
use axum::routing::{get, post};
use axum::Router;

pub fn api_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::home))
        .route(
            "/antisemitic-with-weapon",
            get(handlers::antisemitic_with_weapon),
        )
        .route("/two-or-more-weapons", get(handlers::two_or_more_weapons))
        .route("/processing-done", post(handlers::mark_processing_done))
        .with_state(state)
}
