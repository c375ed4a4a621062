use super::{Axis, Figure, Layout, ScatterTrace, Trace};
use crate::normalize::parse_decimal;
use crate::types::RecordTable;

/// Average against strike rate. Players without an average (or with a
/// non-numeric strike rate) have no point to plot and are left out.
pub fn scatter_chart(table: &RecordTable) -> Figure {
    let mut trace = ScatterTrace {
        x: Vec::new(),
        y: Vec::new(),
        mode: "markers",
        hovertext: Vec::new(),
        hovertemplate: "<b>%{hovertext}</b><br>Average=%{x}<br>Strike Rate=%{y}<extra></extra>"
            .to_string(),
    };

    for record in &table.records {
        let (Some(avg), Some(sr)) = (record.average, parse_decimal(&record.strike_rate)) else {
            continue;
        };
        trace.x.push(avg);
        trace.y.push(sr);
        trace.hovertext.push(record.player.clone());
    }

    let mut layout = Layout::white("Average vs Strike Rate");
    layout.xaxis = Some(Axis::titled("Average"));
    layout.yaxis = Some(Axis::titled("Strike Rate"));

    Figure {
        data: vec![Trace::Scatter(trace)],
        layout,
    }
}
