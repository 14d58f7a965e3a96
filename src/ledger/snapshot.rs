use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::Serialize;

use super::domain::{LeadEntry, LeadStatus, PartnerAccount, PartnerRecords, Stage};
use super::earnings::EarningsSummary;
use super::split::ChannelSplit;
use super::stage::{classify_stage, progress_percent};
use super::streak::streak_days;
use super::trend::{trend, TrendPoint};

/// Number of trend entries shown on the dashboard activity chart.
pub const DEFAULT_TREND_WINDOW: usize = 7;

/// Everything a partner dashboard displays, recomputed from the raw
/// records on every read. Never persisted; the stored account fields are
/// treated as caches that this snapshot can invalidate.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PerformanceSnapshot {
    pub total_outreach: u64,
    pub total_replies: u64,
    pub total_leads: u64,
    pub total_appointments: u64,
    pub streak_days: u32,
    pub stage: Stage,
    pub stage_progress_percent: u8,
    pub goal_completion_percent: f64,
    pub channel_split: ChannelSplit,
    pub trend: Vec<TrendPoint>,
}

impl PerformanceSnapshot {
    /// Pure fold over one partner's record snapshot. `today` anchors the
    /// streak; `goal_target` is the configured monthly earnings goal.
    pub fn compute(records: &PartnerRecords, today: NaiveDate, goal_target: u64) -> Self {
        let logs = &records.logs;

        let mut total_outreach = 0u64;
        let mut total_replies = 0u64;
        let mut total_leads = 0u64;
        let mut total_appointments = 0u64;
        for log in logs {
            total_outreach += u64::from(log.sent);
            total_replies += u64::from(log.replies);
            total_leads += u64::from(log.leads);
            total_appointments += u64::from(log.appointments_booked);
        }

        let earnings = EarningsSummary::from_entries(&records.earnings);

        Self {
            total_outreach,
            total_replies,
            total_leads,
            total_appointments,
            streak_days: streak_days(logs, today),
            stage: classify_stage(total_outreach),
            stage_progress_percent: progress_percent(total_outreach),
            goal_completion_percent: goal_completion_percent(
                earnings.paid,
                earnings.pending,
                goal_target,
            ),
            channel_split: ChannelSplit::from_logs(logs),
            trend: trend(logs, DEFAULT_TREND_WINDOW).collect(),
        }
    }

    /// Reports the recomputed stage when it disagrees with the stored one.
    /// Logs are authoritative; whether to persist the correction is the
    /// caller's decision.
    pub fn stage_drift(&self, account: &PartnerAccount) -> Option<Stage> {
        (account.stage != self.stage).then_some(self.stage)
    }
}

/// Percent of the monthly goal covered by paid plus pending earnings,
/// clamped to 100. A zero target falls back to a denominator of 1.
pub fn goal_completion_percent(paid: u64, pending: u64, goal_target: u64) -> f64 {
    let achieved = (paid + pending) as f64;
    let percent = achieved * 100.0 / goal_target.max(1) as f64;
    percent.min(100.0)
}

/// Counts a partner's tracked prospects by pipeline status.
pub fn lead_pipeline(leads: &[LeadEntry]) -> BTreeMap<LeadStatus, usize> {
    let mut pipeline = BTreeMap::new();
    for lead in leads {
        *pipeline.entry(lead.status).or_insert(0) += 1;
    }
    pipeline
}
