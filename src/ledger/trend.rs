use chrono::NaiveDate;
use serde::Serialize;

use super::domain::OutreachLogEntry;

/// One entry's worth of outreach volume on the activity chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TrendPoint {
    pub date: NaiveDate,
    pub count: u32,
}

/// Re-orders the newest-first log window into chronological points for
/// display. The window is positional: the most recent `window` entries,
/// with no gap-filling for missing days. The returned iterator is lazy
/// and can be cloned to restart.
pub fn trend(
    logs: &[OutreachLogEntry],
    window: usize,
) -> impl Iterator<Item = TrendPoint> + Clone + '_ {
    logs.iter().take(window).rev().map(|log| TrendPoint {
        date: log.date,
        count: log.sent,
    })
}
