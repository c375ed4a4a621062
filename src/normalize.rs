//! Numeric coercion for columns the stats site publishes as text.
//! Nothing here fails: text that isn't a number becomes `None`.

/// Run totals, e.g. `"4,231"` → 4231.
pub fn parse_runs(raw: &str) -> Option<u64> {
    strip_separators(raw).parse().ok()
}

/// Integer columns, tolerating separators and the trailing not-out marker
/// (`"122*"` → 122).
pub fn parse_count(raw: &str) -> Option<u64> {
    strip_separators(raw).trim_end_matches('*').parse().ok()
}

/// Finite decimal, e.g. strike rate `"139.82"`.
pub fn parse_decimal(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Average of the present values; `None` when there are none.
pub fn mean<I>(values: I) -> Option<f64>
where
    I: IntoIterator<Item = Option<f64>>,
{
    let (sum, n) = values
        .into_iter()
        .flatten()
        .fold((0.0, 0usize), |(sum, n), v| (sum + v, n + 1));
    (n > 0).then(|| sum / n as f64)
}

fn strip_separators(raw: &str) -> String {
    raw.trim().chars().filter(|c| *c != ',').collect()
}
