use serde::Serialize;

use crate::config::records;
use crate::error::{AppError, Result};
use crate::normalize::parse_runs;

// ---------------------------------------------------------------------------
// BattingRecord
// ---------------------------------------------------------------------------

/// One player's aggregated batting line, as published by the stats engine.
///
/// Count columns keep the site's text (thousands separators, trailing `*`
/// on a not-out high score); charts coerce what they need. `average` is the
/// only column decoded at parse time because the site uses `-` for
/// "no dismissals".
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BattingRecord {
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

impl BattingRecord {
    /// Display cells in `TABLE_COLUMNS` order. Absent average is an empty cell.
    pub fn cells(&self) -> Vec<String> {
        vec![
            self.player.clone(),
            self.span.clone(),
            self.matches.clone(),
            self.innings.clone(),
            self.not_outs.clone(),
            self.runs.clone(),
            self.high_score.clone(),
            self.average.map(format_average).unwrap_or_default(),
            self.balls_faced.clone(),
            self.strike_rate.clone(),
            self.hundreds.clone(),
            self.fifties.clone(),
            self.ducks.clone(),
            self.fours.clone(),
            self.sixes.clone(),
        ]
    }
}

pub fn format_average(avg: f64) -> String {
    format!("{avg:.2}")
}

// ---------------------------------------------------------------------------
// Record table
// ---------------------------------------------------------------------------

pub const TABLE_COLUMNS: [&str; 15] = [
    "Player",
    "Season",
    "Matches",
    "Innings",
    "Not Outs",
    "Runs",
    "High Score",
    "Average",
    "Balls Faced",
    "Strike Rate",
    "100s",
    "50s",
    "0s",
    "4s",
    "6s",
];

/// Records for one request plus the numeric runs column charts plot.
#[derive(Debug, Clone)]
pub struct RecordTable {
    pub requested: usize,
    pub records: Vec<BattingRecord>,
    /// `records[i].runs` with separators stripped; `None` when not a number.
    pub runs: Vec<Option<u64>>,
}

impl RecordTable {
    pub fn new(requested: usize, records: Vec<BattingRecord>) -> Self {
        let runs = records.iter().map(|r| parse_runs(&r.runs)).collect();
        Self { requested, records, runs }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn view(&self) -> TableView {
        TableView {
            columns: TABLE_COLUMNS.iter().map(|c| c.to_string()).collect(),
            rows: self
                .records
                .iter()
                .enumerate()
                .map(|(i, r)| TableRow { index: i + 1, cells: r.cells() })
                .collect(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct TableView {
    pub columns: Vec<String>,
    pub rows: Vec<TableRow>,
}

/// `index` is 1-based.
#[derive(Debug, Clone, Serialize)]
pub struct TableRow {
    pub index: usize,
    pub cells: Vec<String>,
}

// ---------------------------------------------------------------------------
// Requests
// ---------------------------------------------------------------------------

/// Explicit input to the dashboard pipeline (the slider value).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DashboardRequest {
    pub count: usize,
}

impl DashboardRequest {
    /// Validate a count coming from the record-count control.
    pub fn from_control(count: Option<usize>) -> Result<Self> {
        let count = count.unwrap_or(records::DEFAULT);
        if !(records::MIN..=records::MAX).contains(&count) || count % records::STEP != 0 {
            return Err(AppError::InvalidRequest(format!(
                "count must be between {} and {} in steps of {}, got {count}",
                records::MIN,
                records::MAX,
                records::STEP,
            )));
        }
        Ok(Self { count })
    }
}

impl Default for DashboardRequest {
    fn default() -> Self {
        Self { count: records::DEFAULT }
    }
}

#[cfg(test)]
pub(crate) fn sample_record(player: &str, runs: &str, average: Option<f64>) -> BattingRecord {
    BattingRecord {
        player: player.to_string(),
        span: "2010-2024".to_string(),
        matches: "100".to_string(),
        innings: "95".to_string(),
        not_outs: "10".to_string(),
        runs: runs.to_string(),
        high_score: "100*".to_string(),
        average,
        balls_faced: "2500".to_string(),
        strike_rate: "130.50".to_string(),
        hundreds: "1".to_string(),
        fifties: "20".to_string(),
        ducks: "5".to_string(),
        fours: "300".to_string(),
        sixes: "100".to_string(),
    }
}
