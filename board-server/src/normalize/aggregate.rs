//! Per-line average-delay aggregation for the chart.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::domain::DisplayRecord;

/// Maximum number of lines shown in the delay chart.
pub const MAX_CHART_LINES: usize = 15;

/// Mean delay for one line, a chart datum.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LineDelay {
    /// Line name.
    pub line: String,

    /// Arithmetic mean of the positive delays, in minutes.
    pub mean_delay_minutes: f64,
}

/// Mean delay per line over records with a positive delay, descending.
///
/// Lines whose departures all left on time are excluded entirely, not
/// shown as zero. At most [`MAX_CHART_LINES`] entries; ties keep
/// alphabetical line order (the grouping order).
pub fn average_delay_by_line(records: &[DisplayRecord]) -> Vec<LineDelay> {
    let mut by_line: BTreeMap<&str, (i64, u32)> = BTreeMap::new();

    for record in records.iter().filter(|r| r.delay_minutes > 0) {
        let entry = by_line.entry(record.line.as_str()).or_insert((0, 0));
        entry.0 += record.delay_minutes;
        entry.1 += 1;
    }

    let mut lines: Vec<LineDelay> = by_line
        .into_iter()
        .map(|(line, (total, count))| LineDelay {
            line: line.to_string(),
            mean_delay_minutes: total as f64 / f64::from(count),
        })
        .collect();

    // Stable sort over the alphabetical grouping order.
    lines.sort_by(|a, b| {
        b.mean_delay_minutes
            .partial_cmp(&a.mean_delay_minutes)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    lines.truncate(MAX_CHART_LINES);

    lines
}
