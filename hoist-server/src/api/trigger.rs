//! Trigger handler

use axum::{Json, extract::State, http::StatusCode};
use hoist_core::dto::trigger::TriggerAck;

use crate::api::AppState;
use crate::api::error::ApiResult;

/// POST /trigger
/// Start a pipeline run and acknowledge it immediately
///
/// The run's task handle is dropped here: the response never waits for the
/// pipeline, whose outcome only shows up in the run log.
pub async fn trigger_run(
    State(state): State<AppState>,
) -> ApiResult<(StatusCode, Json<TriggerAck>)> {
    let run = state.dispatcher.trigger()?;

    tracing::info!(run_id = %run.ack.run_id, "Run accepted");

    Ok((StatusCode::ACCEPTED, Json(run.ack)))
}
