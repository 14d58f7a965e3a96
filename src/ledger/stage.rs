use super::domain::Stage;

/// Maps cumulative outreach volume onto a progression stage.
///
/// Thresholds are strictly greater-than and evaluated highest-first, so
/// every non-negative total lands in exactly one stage and a growing total
/// can never move a partner backwards.
pub fn classify_stage(total_outreach: u64) -> Stage {
    if total_outreach > 500 {
        Stage::ElitePartner
    } else if total_outreach > 200 {
        Stage::Closer
    } else if total_outreach > 100 {
        Stage::Builder
    } else if total_outreach > 50 {
        Stage::Connector
    } else {
        Stage::Starter
    }
}

/// Outreach total a partner must exceed to leave the given stage, or
/// `None` once there is nothing left to climb.
pub const fn next_threshold(stage: Stage) -> Option<u64> {
    match stage {
        Stage::Starter => Some(50),
        Stage::Connector => Some(100),
        Stage::Builder => Some(200),
        Stage::Closer => Some(500),
        Stage::ElitePartner => None,
    }
}

/// Percent of the way toward the next stage threshold, clamped to 100.
/// Elite partners report 100 since no further threshold exists.
pub fn progress_percent(total_outreach: u64) -> u8 {
    match next_threshold(classify_stage(total_outreach)) {
        Some(threshold) => (total_outreach * 100 / threshold).min(100) as u8,
        None => 100,
    }
}
