use super::{Axis, BarTrace, Figure, Layout, Trace};
use crate::types::RecordTable;

const HEIGHT: u32 = 500;

/// Runs per player, in fetch order.
pub fn bar_chart(table: &RecordTable) -> Figure {
    let trace = BarTrace {
        x: table.records.iter().map(|r| r.player.clone()).collect(),
        y: table.runs.clone(),
        hovertemplate: "Player=%{x}<br>Runs=%{y}<extra></extra>".to_string(),
    };

    let mut layout = Layout::white(format!("Top {} Player Runs", table.requested));
    layout.xaxis = Some(Axis {
        tickangle: Some(-45),
        ..Axis::titled("Player")
    });
    layout.yaxis = Some(Axis::titled("Runs"));
    layout.height = Some(HEIGHT);

    Figure {
        data: vec![Trace::Bar(trace)],
        layout,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::sample_record;

    #[test]
    fn plots_normalized_runs_with_gaps() {
        let table = RecordTable::new(
            20,
            vec![
                sample_record("A", "1,234", Some(30.0)),
                sample_record("B", "—", None),
            ],
        );
        let fig = bar_chart(&table);
        let Trace::Bar(trace) = &fig.data[0] else {
            panic!("expected bar trace");
        };
        assert_eq!(trace.x, vec!["A", "B"]);
        assert_eq!(trace.y, vec![Some(1234), None]);
        assert_eq!(fig.layout.title.text, "Top 20 Player Runs");
        assert_eq!(fig.layout.height, Some(500));
        assert_eq!(fig.layout.xaxis.as_ref().unwrap().tickangle, Some(-45));
    }

    #[test]
    fn serializes_as_plotly_bar() {
        let table = RecordTable::new(10, vec![sample_record("A", "—", None)]);
        let json = serde_json::to_value(bar_chart(&table)).unwrap();
        assert_eq!(json["data"][0]["type"], "bar");
        assert!(json["data"][0]["y"][0].is_null());
        assert_eq!(json["layout"]["xaxis"]["tickangle"], -45);
        assert!(json["layout"].get("width").is_none());
    }
}
