use std::sync::Arc;

use axum::{
    extract::{Query, State},
    response::Html,
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::api::health::get_health;
use crate::api::page::INDEX_HTML;
use crate::dashboard::{build_dashboard, DashboardView};
use crate::error::AppError;
use crate::fetcher::StatsFetcher;
use crate::types::{BattingRecord, DashboardRequest};

#[derive(Clone)]
pub struct ApiState {
    pub fetcher: Arc<StatsFetcher>,
}

pub fn router(state: ApiState) -> Router {
    Router::new()
        .route("/", get(get_index))
        .route("/api/dashboard", get(get_dashboard))
        .route("/api/records", get(get_records))
        .route("/health", get(get_health))
        .with_state(state)
}

// ---------------------------------------------------------------------------
// Query param structs
// ---------------------------------------------------------------------------

#[derive(Deserialize)]
pub struct CountQuery {
    pub count: Option<usize>,
}

// ---------------------------------------------------------------------------
// Response types
// ---------------------------------------------------------------------------

#[derive(Serialize)]
pub struct RecordsResponse {
    pub requested: usize,
    pub records: Vec<BattingRecord>,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

async fn get_index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

async fn get_dashboard(
    State(state): State<ApiState>,
    Query(params): Query<CountQuery>,
) -> Result<Json<DashboardView>, AppError> {
    let request = DashboardRequest::from_control(params.count)?;
    info!(count = request.count, "dashboard requested");
    Ok(Json(build_dashboard(&state.fetcher, request).await))
}

async fn get_records(
    State(state): State<ApiState>,
    Query(params): Query<CountQuery>,
) -> Result<Json<RecordsResponse>, AppError> {
    let request = DashboardRequest::from_control(params.count)?;
    let records = state.fetcher.fetch_batting_records(request.count).await?;
    Ok(Json(RecordsResponse {
        requested: request.count,
        records,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::fetcher::mock::{self, Behavior};

    /// Serve the API against a mock upstream; returns the API base URL.
    async fn spawn_api(behavior: Behavior) -> (mock::MockUpstream, String) {
        let (upstream, stats_url) = mock::spawn(behavior).await;
        let fetcher = StatsFetcher::new(&Config::for_upstream(stats_url)).unwrap();
        let app = router(ApiState { fetcher: Arc::new(fetcher) });

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        (upstream, format!("http://{addr}"))
    }

    #[tokio::test]
    async fn index_serves_dashboard_page() {
        let (_upstream, base) = spawn_api(Behavior::Rows { total: 100 }).await;
        let resp = reqwest::get(format!("{base}/")).await.unwrap();
        assert!(resp.status().is_success());
        let body = resp.text().await.unwrap();
        assert!(body.contains("plotly"));
        assert!(body.contains("id=\"count\""));
    }

    #[tokio::test]
    async fn dashboard_defaults_to_twenty_records() {
        let (upstream, base) = spawn_api(Behavior::Rows { total: 100 }).await;
        let json: serde_json::Value = reqwest::get(format!("{base}/api/dashboard"))
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        assert_eq!(json["status"], "ready");
        assert_eq!(json["requested"], 20);
        assert_eq!(json["table"]["rows"].as_array().unwrap().len(), 20);
        assert_eq!(upstream.hits(), 1);
    }

    #[tokio::test]
    async fn dashboard_reports_upstream_failure_in_body() {
        let (_upstream, base) = spawn_api(Behavior::Status(500)).await;
        let resp = reqwest::get(format!("{base}/api/dashboard?count=50")).await.unwrap();
        assert!(resp.status().is_success());
        let json: serde_json::Value = resp.json().await.unwrap();
        assert_eq!(json["status"], "failed");
        assert!(json["message"].as_str().unwrap().contains("500"));
    }

    #[tokio::test]
    async fn out_of_range_count_is_bad_request() {
        let (upstream, base) = spawn_api(Behavior::Rows { total: 100 }).await;
        for q in ["count=5", "count=250", "count=15"] {
            let resp = reqwest::get(format!("{base}/api/dashboard?{q}")).await.unwrap();
            assert_eq!(resp.status().as_u16(), 400, "{q}");
        }
        assert_eq!(upstream.hits(), 0);
    }

    #[tokio::test]
    async fn records_endpoint_returns_records() {
        let (_upstream, base) = spawn_api(Behavior::Rows { total: 100 }).await;
        let json: serde_json::Value = reqwest::get(format!("{base}/api/records?count=60"))
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        assert_eq!(json["requested"], 60);
        let records = json["records"].as_array().unwrap();
        assert_eq!(records.len(), 60);
        assert_eq!(records[0]["player"], "Player 1 (IND)");
        // Player 7 has no average
        assert!(records[6]["average"].is_null());
    }

    #[tokio::test]
    async fn records_endpoint_maps_structural_failure_to_bad_gateway() {
        let (_upstream, base) = spawn_api(Behavior::TwoTables).await;
        let resp = reqwest::get(format!("{base}/api/records")).await.unwrap();
        assert_eq!(resp.status().as_u16(), 502);
        let body = resp.text().await.unwrap();
        assert!(body.contains("Unable to find player statistics data table"));
    }
}
