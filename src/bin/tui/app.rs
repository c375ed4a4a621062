use serde::Deserialize;

/// Record-count control, same bounds as the web slider.
pub const MIN_COUNT: usize = 10;
pub const MAX_COUNT: usize = 200;
pub const COUNT_STEP: usize = 10;
pub const DEFAULT_COUNT: usize = 20;

// ---------------------------------------------------------------------------
// API response types (mirror routes.rs shapes)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
pub struct RecordsResponse {
    pub requested: usize,
    pub records: Vec<RecordRow>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RecordRow {
    pub player: String,
    pub span: String,
    pub matches: String,
    pub innings: String,
    pub not_outs: String,
    pub runs: String,
    pub high_score: String,
    pub average: Option<f64>,
    pub balls_faced: String,
    pub strike_rate: String,
    pub hundreds: String,
    pub fifties: String,
    pub ducks: String,
    pub fours: String,
    pub sixes: String,
}

// ---------------------------------------------------------------------------
// App state
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub enum ConnectionStatus {
    Connected,
    Error(String),
    Connecting,
}

#[derive(Debug, Clone)]
pub struct AppState {
    pub status: ConnectionStatus,
    pub count: usize,
    pub records: Vec<RecordRow>,
    pub base_url: String,
}

impl AppState {
    pub fn new(base_url: String) -> Self {
        Self {
            status: ConnectionStatus::Connecting,
            count: DEFAULT_COUNT,
            records: Vec::new(),
            base_url,
        }
    }

    pub fn records_url(&self) -> String {
        format!("{}/api/records?count={}", self.base_url, self.count)
    }

    /// Returns true when the count changed and a refetch is due.
    pub fn increase_count(&mut self) -> bool {
        self.set_count(self.count + COUNT_STEP)
    }

    pub fn decrease_count(&mut self) -> bool {
        self.set_count(self.count.saturating_sub(COUNT_STEP))
    }

    fn set_count(&mut self, count: usize) -> bool {
        let count = count.clamp(MIN_COUNT, MAX_COUNT);
        let changed = count != self.count;
        self.count = count;
        changed
    }

    /// Refetch the whole table for the current count. On failure the old
    /// rows are dropped; the server keeps nothing between requests either.
    pub async fn refresh(&mut self, client: &reqwest::Client) {
        self.status = ConnectionStatus::Connecting;
        let resp = match client.get(self.records_url()).send().await {
            Ok(r) => r,
            Err(e) => {
                self.records.clear();
                self.status = ConnectionStatus::Error(format!("{e}"));
                return;
            }
        };

        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            self.records.clear();
            self.status = ConnectionStatus::Error(format!("{status}: {body}"));
            return;
        }

        match resp.json::<RecordsResponse>().await {
            Ok(r) => {
                self.count = r.requested;
                self.records = r.records;
                self.status = ConnectionStatus::Connected;
            }
            Err(e) => {
                self.records.clear();
                self.status = ConnectionStatus::Error(format!("parse error: {e}"));
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Formatting helpers
// ---------------------------------------------------------------------------

pub fn format_average(avg: Option<f64>) -> String {
    avg.map_or("—".to_string(), |a| format!("{a:.2}"))
}

pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let head: String = s.chars().take(max.saturating_sub(1)).collect();
        format!("{head}…")
    }
}
