use std::collections::BTreeSet;

use chrono::{Duration, NaiveDate};

use super::domain::OutreachLogEntry;

/// Counts consecutive calendar days with at least one logged entry, ending
/// at `today` or yesterday. An inactive partner's streak reads as 0 on the
/// next evaluation; nothing is reset on a schedule.
///
/// Dates are compared as recorded day keys. Multiple entries on the same
/// day collapse into one.
pub fn streak_days(logs: &[OutreachLogEntry], today: NaiveDate) -> u32 {
    let days: BTreeSet<NaiveDate> = logs.iter().map(|log| log.date).collect();

    let mut recent = days.iter().rev();
    let latest = match recent.next() {
        Some(latest) => *latest,
        None => return 0,
    };

    if latest != today && latest != today - Duration::days(1) {
        return 0;
    }

    let mut streak = 1;
    let mut cursor = latest;
    for day in recent {
        if *day == cursor - Duration::days(1) {
            streak += 1;
            cursor = *day;
        } else {
            break;
        }
    }

    streak
}
