//! HTML extraction for the stats engine results page.
//!
//! The page carries several `table.engineTable` elements (query summary,
//! filters, results, ...). None of them has a stable id, so finding the
//! results table is delegated to a [`TableLocator`]; the rest of the parser
//! only ever sees the located table.

use scraper::{ElementRef, Html, Selector};
use tracing::debug;

use crate::config::{MIN_COLUMNS, TABLE_CLASS, TABLE_INDEX};
use crate::error::{AppError, Result};
use crate::normalize::parse_decimal;
use crate::types::BattingRecord;

// ---------------------------------------------------------------------------
// Table location
// ---------------------------------------------------------------------------

/// Finds the results table inside a parsed page.
pub trait TableLocator: Send + Sync {
    fn locate<'a>(&self, document: &'a Html) -> Result<ElementRef<'a>>;
}

/// Picks the `index`-th (0-based) `<table>` carrying `class`.
#[derive(Debug, Clone)]
pub struct NthTableOfClass {
    pub class: String,
    pub index: usize,
}

impl Default for NthTableOfClass {
    fn default() -> Self {
        Self {
            class: TABLE_CLASS.to_string(),
            index: TABLE_INDEX,
        }
    }
}

impl TableLocator for NthTableOfClass {
    fn locate<'a>(&self, document: &'a Html) -> Result<ElementRef<'a>> {
        let selector = selector(&format!("table.{}", self.class))?;
        let tables: Vec<ElementRef<'a>> = document.select(&selector).collect();
        tables.get(self.index).copied().ok_or_else(|| {
            AppError::TableNotFound(format!(
                "found {} table(s) of class {}, expected at least {}",
                tables.len(),
                self.class,
                self.index + 1
            ))
        })
    }
}

// ---------------------------------------------------------------------------
// Row extraction
// ---------------------------------------------------------------------------

/// Records parsed from one page.
#[derive(Debug, Default)]
pub struct PageRows {
    pub records: Vec<BattingRecord>,
    /// Rows dropped for having fewer than `MIN_COLUMNS` cells.
    pub skipped: usize,
}

/// Parse one results page, stopping once `limit` records are collected.
pub fn parse_page(html: &str, locator: &dyn TableLocator, limit: usize) -> Result<PageRows> {
    let document = Html::parse_document(html);
    let table = locator.locate(&document)?;
    parse_table(table, limit)
}

/// The first row is the header and is never data.
pub fn parse_table(table: ElementRef<'_>, limit: usize) -> Result<PageRows> {
    let row_sel = selector("tr")?;
    let cell_sel = selector("td")?;

    let mut page = PageRows::default();
    for row in table.select(&row_sel).skip(1) {
        if page.records.len() >= limit {
            break;
        }
        let cells: Vec<String> = row.select(&cell_sel).map(cell_text).collect();
        match record_from_cells(&cells) {
            Some(record) => page.records.push(record),
            None => {
                debug!(cells = cells.len(), "skipping non-data row");
                page.skipped += 1;
            }
        }
    }
    Ok(page)
}

/// Build a record from a row's cell texts; `None` for rows too short to be data.
pub fn record_from_cells(cells: &[String]) -> Option<BattingRecord> {
    if cells.len() < MIN_COLUMNS {
        return None;
    }
    let text = |i: usize| cells[i].clone();
    Some(BattingRecord {
        player: text(0),
        span: text(1),
        matches: text(2),
        innings: text(3),
        not_outs: text(4),
        runs: text(5),
        high_score: text(6),
        average: parse_average(&cells[7]),
        balls_faced: text(8),
        strike_rate: text(9),
        hundreds: text(10),
        fifties: text(11),
        ducks: text(12),
        fours: text(13),
        sixes: text(14),
    })
}

/// `-` (never dismissed) and blank mean no average.
pub fn parse_average(raw: &str) -> Option<f64> {
    let raw = raw.trim();
    if raw.is_empty() || raw == "-" {
        return None;
    }
    let avg = parse_decimal(raw);
    if avg.is_none() {
        debug!(raw, "average is not a decimal, treating as absent");
    }
    avg
}

/// Element text with whitespace runs collapsed and the ends trimmed.
fn cell_text(cell: ElementRef<'_>) -> String {
    cell.text()
        .flat_map(str::split_whitespace)
        .collect::<Vec<_>>()
        .join(" ")
}

fn selector(css: &str) -> Result<Selector> {
    Selector::parse(css).map_err(|e| AppError::Selector(format!("{css}: {e}")))
}
