use crate::error::{AppError, Result};

pub const STATS_URL: &str = "https://stats.espncricinfo.com/ci/engine/stats/index.html";

/// Browser identification sent with every upstream request.
/// The stats engine blocks clients that don't look like a desktop browser.
pub const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/58.0.3029.110 Safari/537.3";

/// Rows per upstream results page. Pages start at offsets 1, 51, 101, ...
pub const PAGE_SIZE: usize = 50;

/// Fixed query parameters selecting the T20I batting records report.
pub mod report {
    pub const CLASS: &str = "3";
    pub const TEMPLATE: &str = "results";
    pub const STAT_TYPE: &str = "batting";
}

/// CSS class shared by all result tables on the stats page.
pub const TABLE_CLASS: &str = "engineTable";

/// Position of the data table among the `engineTable` tables (0-based).
pub const TABLE_INDEX: usize = 2;

/// A data row carries at least this many `<td>` cells.
pub const MIN_COLUMNS: usize = 15;

/// Record-count control bounds (slider).
pub mod records {
    pub const MIN: usize = 10;
    pub const MAX: usize = 200;
    pub const STEP: usize = 10;
    pub const DEFAULT: usize = 20;
}

/// The sunburst only shows the first few records.
pub const SUNBURST_RECORDS: usize = 10;

#[derive(Debug, Clone)]
pub struct Config {
    pub stats_url: String,
    pub log_level: String,
    pub api_port: u16,
    /// Per-request timeout for upstream pages (REQUEST_TIMEOUT_SECS)
    pub request_timeout_secs: u64,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            stats_url: std::env::var("STATS_URL").unwrap_or_else(|_| STATS_URL.to_string()),
            log_level: std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
            api_port: std::env::var("API_PORT")
                .unwrap_or_else(|_| "3000".to_string())
                .parse::<u16>()
                .map_err(|_| AppError::Config("API_PORT must be a valid port number".to_string()))?,
            request_timeout_secs: std::env::var("REQUEST_TIMEOUT_SECS")
                .unwrap_or_else(|_| "30".to_string())
                .parse::<u64>()
                .unwrap_or(30),
        })
    }

    /// Config pointing at an arbitrary upstream, used by tests with a local mock.
    #[cfg(test)]
    pub fn for_upstream(stats_url: impl Into<String>) -> Self {
        Self {
            stats_url: stats_url.into(),
            log_level: "debug".to_string(),
            api_port: 0,
            request_timeout_secs: 5,
        }
    }
}
