use serde::Serialize;
use tracing::{error, info};

use crate::charts::{build_charts, Charts};
use crate::fetcher::StatsFetcher;
use crate::types::{DashboardRequest, RecordTable, TableView};

/// Everything one render of the dashboard needs.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum DashboardView {
    Ready(Dashboard),
    /// Shown in place of the table and charts.
    Failed { message: String },
}

#[derive(Debug, Clone, Serialize)]
pub struct Dashboard {
    pub requested: usize,
    pub table: TableView,
    pub charts: Charts,
}

/// Fetch, normalize and chart. A failed fetch becomes `Failed` and no
/// chart is built; errors never escape to the caller.
pub async fn build_dashboard(fetcher: &StatsFetcher, request: DashboardRequest) -> DashboardView {
    let records = match fetcher.fetch_batting_records(request.count).await {
        Ok(records) => records,
        Err(e) => {
            error!(requested = request.count, "dashboard fetch failed: {e}");
            return DashboardView::Failed { message: e.to_string() };
        }
    };

    let table = RecordTable::new(request.count, records);
    let charts = build_charts(&table);
    info!(requested = request.count, rows = table.len(), "dashboard built");

    DashboardView::Ready(Dashboard {
        requested: request.count,
        table: table.view(),
        charts,
    })
}
