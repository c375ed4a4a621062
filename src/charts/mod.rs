//! Plotly figure specifications.
//!
//! Builders return plain serde structs; the dashboard page hands them to
//! `Plotly.newPlot` unchanged, so field names follow plotly.js.

mod bar;
mod scatter;
mod sunburst;

pub use bar::bar_chart;
pub use scatter::scatter_chart;
pub use sunburst::sunburst_chart;

use serde::Serialize;

use crate::types::RecordTable;

// ---------------------------------------------------------------------------
// Figure
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize)]
pub struct Figure {
    pub data: Vec<Trace>,
    pub layout: Layout,
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Trace {
    Bar(BarTrace),
    Scatter(ScatterTrace),
    Sunburst(SunburstTrace),
}

#[derive(Debug, Clone, Serialize)]
pub struct BarTrace {
    pub x: Vec<String>,
    /// `None` serializes as `null`, which plotly draws as a gap.
    pub y: Vec<Option<u64>>,
    pub hovertemplate: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ScatterTrace {
    pub x: Vec<f64>,
    pub y: Vec<f64>,
    pub mode: &'static str,
    /// Hover label per point.
    pub hovertext: Vec<String>,
    pub hovertemplate: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct SunburstTrace {
    pub ids: Vec<String>,
    pub labels: Vec<String>,
    pub parents: Vec<String>,
    pub values: Vec<f64>,
    pub branchvalues: &'static str,
    pub marker: SunburstMarker,
    /// `[high score, average]` per node, empty strings on inner nodes.
    pub customdata: Vec<[String; 2]>,
    pub hovertemplate: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct SunburstMarker {
    pub colors: Vec<Option<f64>>,
    pub colorscale: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cmid: Option<f64>,
    pub showscale: bool,
}

// ---------------------------------------------------------------------------
// Layout
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize)]
pub struct Layout {
    pub title: Title,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub xaxis: Option<Axis>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub yaxis: Option<Axis>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
    pub paper_bgcolor: &'static str,
    pub plot_bgcolor: &'static str,
}

impl Layout {
    /// White background with light grid, the look of plotly's `plotly_white`.
    pub fn white(title: impl Into<String>) -> Self {
        Self {
            title: Title { text: title.into() },
            xaxis: None,
            yaxis: None,
            width: None,
            height: None,
            paper_bgcolor: "white",
            plot_bgcolor: "white",
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Title {
    pub text: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct Axis {
    pub title: Title,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tickangle: Option<i32>,
    pub gridcolor: &'static str,
}

impl Axis {
    pub fn titled(text: &str) -> Self {
        Self {
            title: Title { text: text.to_string() },
            tickangle: None,
            gridcolor: "#ebf0f8",
        }
    }
}

// ---------------------------------------------------------------------------
// All charts
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize)]
pub struct Charts {
    pub bar: Figure,
    pub scatter: Figure,
    pub sunburst: Figure,
}

pub fn build_charts(table: &RecordTable) -> Charts {
    Charts {
        bar: bar_chart(table),
        scatter: scatter_chart(table),
        sunburst: sunburst_chart(table),
    }
}
