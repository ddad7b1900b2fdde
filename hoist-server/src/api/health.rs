//! Health and metadata handlers

use std::collections::BTreeMap;

use axum::{Json, extract::State};
use hoist_core::dto::service::{HealthStatus, ServiceInfo};

use crate::api::AppState;

/// GET /health
/// Always ok while the server is up, whatever runs are in flight
pub async fn health_check(State(state): State<AppState>) -> Json<HealthStatus> {
    Json(HealthStatus::ok(&*state.service_name))
}

/// GET /
/// Service name, version and endpoint list
pub async fn service_info(State(state): State<AppState>) -> Json<ServiceInfo> {
    let endpoints = BTreeMap::from([
        ("GET /".to_string(), "Service metadata".to_string()),
        ("GET /health".to_string(), "Health check".to_string()),
        (
            "POST /trigger".to_string(),
            format!(
                "Start a deployment pipeline run ({} steps)",
                state.dispatcher.pipeline().len()
            ),
        ),
    ]);

    Json(ServiceInfo {
        service: state.service_name.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        endpoints,
    })
}
