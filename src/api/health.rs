//! Liveness endpoint. Doesn't touch the upstream; the stats site is only
//! contacted when a dashboard is requested.

use axum::{extract::State, Json};
use serde::Serialize;

use crate::api::routes::ApiState;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub upstream: String,
    pub version: &'static str,
}

pub async fn get_health(State(state): State<ApiState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        upstream: state.fetcher.stats_url().to_string(),
        version: env!("CARGO_PKG_VERSION"),
    })
}
