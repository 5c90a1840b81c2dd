//! Askama templates and view models for the dashboard.

use askama::Template;

use crate::domain::DisplayRecord;
use crate::normalize::LineDelay;

/// The single-page dashboard: search form, candidate list, departures
/// table, and delay chart, re-rendered in full on every action.
#[derive(Template)]
#[template(path = "index.html")]
pub struct BoardPageTemplate {
    /// Whether the app runs on demo fixtures.
    pub demo: bool,

    /// Current search query (echoed into the form).
    pub query: String,

    /// User-visible warnings for this render.
    pub warnings: Vec<String>,

    /// Selectable station candidates.
    pub candidates: Vec<CandidateView>,

    /// Currently selected station name, if any.
    pub selected: Option<String>,

    /// Departure table rows.
    pub rows: Vec<RowView>,

    /// Delay chart bars.
    pub bars: Vec<DelayBarView>,
}

/// Station candidate view model.
#[derive(Debug, Clone)]
pub struct CandidateView {
    pub id: String,
    pub name: String,
    /// Whether this candidate is the current selection.
    pub selected: bool,
}

/// Departure table row view model.
#[derive(Debug, Clone)]
pub struct RowView {
    pub line: String,
    pub direction: String,
    pub scheduled: String,
    pub expected: String,
    pub delay_minutes: i64,
    pub platform: String,
    /// Whether the row should be highlighted as delayed.
    pub delayed: bool,
}

impl RowView {
    /// Create from a canonical record.
    pub fn from_record(record: &DisplayRecord) -> Self {
        Self {
            line: record.line.clone(),
            direction: record.direction.clone(),
            scheduled: record.scheduled.clone(),
            expected: record.expected.clone(),
            delay_minutes: record.delay_minutes,
            platform: record.platform.clone(),
            delayed: record.is_delayed(),
        }
    }
}

/// One bar of the average-delay chart.
#[derive(Debug, Clone)]
pub struct DelayBarView {
    pub line: String,
    /// Mean delay formatted to one decimal, e.g. "3.5".
    pub mean_display: String,
    /// Bar width as a percentage of the largest mean.
    pub width_pct: u32,
}

impl DelayBarView {
    /// Build bars from the aggregate, scaled to the largest mean.
    pub fn build(delays: &[LineDelay]) -> Vec<Self> {
        // The aggregate is sorted descending, so the first entry is the max.
        let max = match delays.first() {
            Some(d) if d.mean_delay_minutes > 0.0 => d.mean_delay_minutes,
            _ => return Vec::new(),
        };

        delays
            .iter()
            .map(|d| Self {
                line: d.line.clone(),
                mean_display: format!("{:.1}", d.mean_delay_minutes),
                width_pct: ((d.mean_delay_minutes / max) * 100.0).round() as u32,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::NOT_AVAILABLE;

    #[test]
    fn row_view_carries_delay_flag() {
        let record = DisplayRecord {
            line: "U2".into(),
            direction: "Destination B".into(),
            scheduled: "10:17".into(),
            expected: "10:18".into(),
            delay_minutes: 1,
            platform: NOT_AVAILABLE.into(),
        };

        let row = RowView::from_record(&record);

        assert!(row.delayed);
        assert_eq!(row.expected, "10:18");
    }

    #[test]
    fn bars_scale_to_largest_mean() {
        let delays = vec![
            LineDelay {
                line: "S7".into(),
                mean_delay_minutes: 8.0,
            },
            LineDelay {
                line: "S1".into(),
                mean_delay_minutes: 4.0,
            },
            LineDelay {
                line: "U2".into(),
                mean_delay_minutes: 1.0,
            },
        ];

        let bars = DelayBarView::build(&delays);

        assert_eq!(bars[0].width_pct, 100);
        assert_eq!(bars[1].width_pct, 50);
        assert_eq!(bars[2].width_pct, 13);
        assert_eq!(bars[0].mean_display, "8.0");
    }

    #[test]
    fn no_delays_no_bars() {
        assert!(DelayBarView::build(&[]).is_empty());
    }
}
