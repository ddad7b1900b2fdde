//! API Module
//!
//! HTTP API layer for the server.

pub mod error;
pub mod health;
pub mod trigger;

use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

use crate::service::Dispatcher;

/// State shared by every handler
#[derive(Clone)]
pub struct AppState {
    pub service_name: Arc<str>,
    pub dispatcher: Arc<Dispatcher>,
}

impl AppState {
    pub fn new(service_name: impl Into<Arc<str>>, dispatcher: Dispatcher) -> Self {
        Self {
            service_name: service_name.into(),
            dispatcher: Arc::new(dispatcher),
        }
    }
}

/// Create the API router with all endpoints
///
/// Unknown paths and unsupported methods on known paths both answer 404.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route(
            "/",
            get(health::service_info).fallback(error::not_found),
        )
        .route(
            "/health",
            get(health::health_check).fallback(error::not_found),
        )
        .route(
            "/trigger",
            post(trigger::trigger_run).fallback(error::not_found),
        )
        .fallback(error::not_found)
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}
