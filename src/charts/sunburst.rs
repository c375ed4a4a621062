use std::collections::HashMap;

use tracing::debug;

use super::{Figure, Layout, SunburstMarker, SunburstTrace, Trace};
use crate::config::SUNBURST_RECORDS;
use crate::normalize::{mean, parse_count, parse_decimal};
use crate::types::{format_average, RecordTable};

const WIDTH: u32 = 900;
const HEIGHT: u32 = 700;
const ABSENT_LABEL: &str = "n/a";

#[derive(Debug, Default)]
struct Node {
    label: String,
    parent: String,
    value: f64,
    /// Sums over the leaves below this node, for the colour mean.
    color_sum: f64,
    color_weighted_sum: f64,
    color_weight: f64,
    color_count: usize,
    custom: [String; 2],
}

impl Node {
    fn add_leaf(&mut self, value: f64, color: Option<f64>) {
        self.value += value;
        if let Some(c) = color {
            self.color_sum += c;
            self.color_weighted_sum += c * value;
            self.color_weight += value;
            self.color_count += 1;
        }
    }

    /// Strike-rate weighted mean of the leaf colours, plain mean when all
    /// weights are zero.
    fn color(&self) -> Option<f64> {
        if self.color_count == 0 {
            None
        } else if self.color_weight > 0.0 {
            Some(self.color_weighted_sum / self.color_weight)
        } else {
            Some(self.color_sum / self.color_count as f64)
        }
    }
}

/// High score → average → runs → innings → matches → player, for the
/// first `SUNBURST_RECORDS` records, sized by strike rate.
///
/// Every player gets a colour of their own on a diverging scale centred at
/// the mean of the coerced matches column. Matches that don't parse are
/// left out of the mean.
pub fn sunburst_chart(table: &RecordTable) -> Figure {
    let matches: Vec<f64> = table
        .records
        .iter()
        .filter_map(|r| parse_count(&r.matches).map(|m| m as f64))
        .collect();
    let midpoint = mean(matches.iter().copied().map(Some));
    if midpoint.is_none() && !table.is_empty() {
        debug!("no numeric matches values, sunburst has no colour midpoint");
    }

    let n = table.len().min(SUNBURST_RECORDS);
    let colors = player_colors(
        table.records[..n].iter().map(|r| r.player.as_str()),
        &matches,
    );
    let mut order: Vec<String> = Vec::new();
    let mut nodes: HashMap<String, Node> = HashMap::new();

    for (record, runs) in table.records[..n].iter().zip(&table.runs[..n]) {
        let path = [
            record.high_score.clone(),
            record.average.map(format_average).unwrap_or_else(|| ABSENT_LABEL.to_string()),
            runs.map(|r| r.to_string()).unwrap_or_else(|| ABSENT_LABEL.to_string()),
            record.innings.clone(),
            record.matches.clone(),
            record.player.clone(),
        ];
        let value = parse_decimal(&record.strike_rate).unwrap_or(0.0);
        let color = colors.get(record.player.as_str()).copied();

        for depth in 0..path.len() {
            let id = path[..=depth].join("/");
            let node = nodes.entry(id.clone()).or_insert_with(|| {
                order.push(id);
                Node {
                    label: path[depth].clone(),
                    parent: if depth == 0 { String::new() } else { path[..depth].join("/") },
                    custom: [
                        path[0].clone(),
                        if depth >= 1 { path[1].clone() } else { String::new() },
                    ],
                    ..Node::default()
                }
            });
            node.add_leaf(value, color);
        }
    }

    let mut trace = SunburstTrace {
        ids: Vec::with_capacity(order.len()),
        labels: Vec::with_capacity(order.len()),
        parents: Vec::with_capacity(order.len()),
        values: Vec::with_capacity(order.len()),
        branchvalues: "total",
        marker: SunburstMarker {
            colors: Vec::with_capacity(order.len()),
            colorscale: "RdBu",
            cmid: midpoint,
            showscale: true,
        },
        customdata: Vec::with_capacity(order.len()),
        hovertemplate: "%{label}<br>Strike Rate=%{value}<br>High Score=%{customdata[0]}\
                        <br>Average=%{customdata[1]}<extra></extra>"
            .to_string(),
    };

    for id in order {
        let Some(node) = nodes.remove(&id) else { continue };
        trace.marker.colors.push(node.color());
        trace.values.push(node.value);
        trace.ids.push(id);
        trace.labels.push(node.label);
        trace.parents.push(node.parent);
        trace.customdata.push(node.custom);
    }

    let mut layout = Layout::white("High Scores by Player and Matches");
    layout.width = Some(WIDTH);
    layout.height = Some(HEIGHT);

    Figure {
        data: vec![Trace::Sunburst(trace)],
        layout,
    }
}

/// One colour value per distinct player, in order of first appearance,
/// spaced evenly over the range of the numeric matches values so the scale
/// midpoint still falls among them.
fn player_colors<'a>(
    players: impl Iterator<Item = &'a str>,
    matches: &[f64],
) -> HashMap<&'a str, f64> {
    let mut distinct: Vec<&str> = Vec::new();
    for player in players {
        if !distinct.contains(&player) {
            distinct.push(player);
        }
    }
    let spread = distinct.len().saturating_sub(1) as f64;

    let low = matches.iter().copied().reduce(f64::min);
    let high = matches.iter().copied().reduce(f64::max);
    let (low, high) = match (low, high) {
        (Some(lo), Some(hi)) if hi > lo => (lo, hi),
        (Some(lo), _) => (lo - spread / 2.0, lo + spread / 2.0),
        _ => (0.0, spread),
    };
    let step = if spread > 0.0 { (high - low) / spread } else { 0.0 };

    distinct
        .into_iter()
        .enumerate()
        .map(|(i, player)| (player, low + step * i as f64))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::sample_record;

    fn trace(fig: &Figure) -> &SunburstTrace {
        match &fig.data[0] {
            Trace::Sunburst(t) => t,
            other => panic!("expected sunburst, got {other:?}"),
        }
    }

    #[test]
    fn builds_six_level_path_per_record() {
        let table = RecordTable::new(10, vec![sample_record("A", "1,234", Some(30.0))]);
        let fig = sunburst_chart(&table);
        let t = trace(&fig);
        assert_eq!(t.ids.len(), 6);
        assert_eq!(t.labels, vec!["100*", "30.00", "1234", "95", "100", "A"]);
        assert_eq!(t.parents[0], "");
        assert_eq!(t.parents[5], "100*/30.00/1234/95/100");
        assert_eq!(t.ids[5], "100*/30.00/1234/95/100/A");
        assert!(t.values.iter().all(|v| (*v - 130.5).abs() < 1e-9));
        assert_eq!(t.customdata[5], ["100*".to_string(), "30.00".to_string()]);
        assert_eq!(t.customdata[0], ["100*".to_string(), String::new()]);
    }

    #[test]
    fn limited_to_first_ten_records() {
        let records = (0..15)
            .map(|i| sample_record(&format!("P{i}"), "100", Some(10.0)))
            .collect();
        let table = RecordTable::new(20, records);
        let t = sunburst_chart(&table);
        let t = trace(&t);
        // all share the first five levels
        assert_eq!(t.ids.len(), 5 + 10);
        assert!(t.labels.contains(&"P9".to_string()));
        assert!(!t.labels.contains(&"P10".to_string()));
        // the shared root sums its ten leaves
        assert!((t.values[0] - 1305.0).abs() < 1e-9);
    }

    #[test]
    fn midpoint_uses_coerced_matches_and_tolerates_text() {
        let mut a = sample_record("A", "10", Some(10.0));
        a.matches = "10".to_string();
        let mut b = sample_record("B", "10", None);
        b.matches = "30".to_string();
        let mut c = sample_record("C", "10", None);
        c.matches = "unknown".to_string();
        let table = RecordTable::new(10, vec![a, b, c]);

        let fig = sunburst_chart(&table);
        let t = trace(&fig);
        assert_eq!(t.marker.cmid, Some(20.0));
        assert_eq!(t.marker.colorscale, "RdBu");
        let leaf = |name: &str| {
            let i = t.labels.iter().position(|l| l == name).unwrap();
            t.marker.colors[i]
        };
        // spread over the numeric matches range 10..=30
        assert_eq!(leaf("A"), Some(10.0));
        assert_eq!(leaf("B"), Some(20.0));
        assert_eq!(leaf("C"), Some(30.0));
        assert!(t.labels.contains(&"n/a".to_string()));
    }

    #[test]
    fn players_with_equal_matches_get_distinct_colors() {
        let table = RecordTable::new(
            10,
            vec![
                sample_record("A", "500", Some(25.0)),
                sample_record("B", "400", Some(20.0)),
            ],
        );
        let fig = sunburst_chart(&table);
        let t = trace(&fig);
        let leaf = |name: &str| {
            let i = t.labels.iter().position(|l| l == name).unwrap();
            t.marker.colors[i].unwrap()
        };
        assert_ne!(leaf("A"), leaf("B"));
        // both players have 100 matches, so the midpoint sits between them
        assert_eq!(t.marker.cmid, Some(100.0));
        assert!(leaf("A") < 100.0 && leaf("B") > 100.0);
    }

    #[test]
    fn repeated_player_name_shares_one_color() {
        let colors = player_colors(["X", "Y", "X"].into_iter(), &[5.0, 15.0]);
        assert_eq!(colors.len(), 2);
        assert_eq!(colors["X"], 5.0);
        assert_eq!(colors["Y"], 15.0);
    }

    #[test]
    fn no_numeric_matches_means_no_midpoint() {
        let mut a = sample_record("A", "10", Some(10.0));
        a.matches = "-".to_string();
        let table = RecordTable::new(10, vec![a]);
        let json = serde_json::to_value(sunburst_chart(&table)).unwrap();
        assert!(json["data"][0]["marker"].get("cmid").is_none());
        assert_eq!(json["data"][0]["type"], "sunburst");
        assert_eq!(json["layout"]["width"], 900);
        assert_eq!(json["layout"]["height"], 700);
    }

    #[test]
    fn empty_table_builds_empty_trace() {
        let table = RecordTable::new(10, Vec::new());
        let fig = sunburst_chart(&table);
        assert!(trace(&fig).ids.is_empty());
    }
}
