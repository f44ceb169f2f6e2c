//! Liveness endpoint for the price service.

use axum::{extract::State, Json};
use serde::Serialize;

use crate::api::routes::ApiState;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    /// "ok" when the database answers, "degraded" otherwise.
    pub status: &'static str,
    pub database: bool,
    pub uptime_secs: u64,
}

pub async fn get_health(State(state): State<ApiState>) -> Json<HealthResponse> {
    let database = state.store.ping().await;
    if !database {
        tracing::warn!("Health check: database ping failed");
    }
    Json(HealthResponse {
        status: if database { "ok" } else { "degraded" },
        database,
        uptime_secs: state.started_at.elapsed().as_secs(),
    })
}
