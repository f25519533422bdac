//! HTTP surface: card generation, quota lookup and a health check.

use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};
use quotecard::Compositor;

use crate::{config::OutputSettings, quota::QuotaStore, quotes::QuoteSource};

pub mod client;
pub mod error;
pub mod handlers;

/// Shared handler state.
#[derive(Clone)]
pub struct AppState {
    pub compositor: Arc<Compositor>,
    pub quotes: Arc<dyn QuoteSource>,
    pub quota: Arc<dyn QuotaStore>,
    pub output: OutputSettings,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/generate", post(handlers::generate))
        .route("/api/quota", get(handlers::quota))
        .route("/health", get(handlers::health))
        .with_state(state)
}

#[cfg(test)]
#[path = "../../tests/unit/http/client.rs"]
mod tests;
