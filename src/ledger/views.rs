use chrono::NaiveDate;
use serde::Serialize;

use super::domain::{LeadStatus, PartnerId, PartnerRecords, Stage};
use super::earnings::EarningsSummary;
use super::snapshot::{lead_pipeline, PerformanceSnapshot};
use super::trend::TrendPoint;

#[derive(Debug, Clone, Serialize)]
pub struct ChannelShareEntry {
    pub channel_label: &'static str,
    pub percent: u8,
}

#[derive(Debug, Clone, Serialize)]
pub struct PipelineEntry {
    pub status: LeadStatus,
    pub status_label: &'static str,
    pub count: usize,
}

/// Fully labeled dashboard payload for one partner, ready for rendering.
/// The presentation layer never recomputes any of these fields.
#[derive(Debug, Clone, Serialize)]
pub struct PartnerDashboardView {
    pub partner_id: PartnerId,
    pub stage: Stage,
    pub stage_label: &'static str,
    pub stage_progress_percent: u8,
    pub total_outreach: u64,
    pub total_replies: u64,
    pub total_leads: u64,
    pub total_appointments: u64,
    pub streak_days: u32,
    pub goal_completion_percent: f64,
    pub channel_split: Vec<ChannelShareEntry>,
    pub trend: Vec<TrendPoint>,
    pub earnings: EarningsSummary,
    pub pipeline: Vec<PipelineEntry>,
    /// Set when the stored stage no longer matches the recomputed one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reconciled_stage: Option<Stage>,
    /// Set when the account's cached earnings fields lag the ledger.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reconciled_earnings: Option<EarningsSummary>,
}

impl PartnerDashboardView {
    pub fn build(records: &PartnerRecords, today: NaiveDate, goal_target: u64) -> Self {
        let snapshot = PerformanceSnapshot::compute(records, today, goal_target);
        let earnings = EarningsSummary::from_entries(&records.earnings);
        let reconciled_stage = snapshot.stage_drift(&records.account);
        let reconciled_earnings = earnings.drift(&records.account);

        let channel_split = snapshot
            .channel_split
            .entries()
            .into_iter()
            .map(|(channel_label, percent)| ChannelShareEntry {
                channel_label,
                percent,
            })
            .collect();

        let pipeline = lead_pipeline(&records.leads)
            .into_iter()
            .map(|(status, count)| PipelineEntry {
                status,
                status_label: status.label(),
                count,
            })
            .collect();

        Self {
            partner_id: records.account.id.clone(),
            stage: snapshot.stage,
            stage_label: snapshot.stage.label(),
            stage_progress_percent: snapshot.stage_progress_percent,
            total_outreach: snapshot.total_outreach,
            total_replies: snapshot.total_replies,
            total_leads: snapshot.total_leads,
            total_appointments: snapshot.total_appointments,
            streak_days: snapshot.streak_days,
            goal_completion_percent: snapshot.goal_completion_percent,
            channel_split,
            trend: snapshot.trend,
            earnings,
            pipeline,
            reconciled_stage,
            reconciled_earnings,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::domain::{
        Channel, LeadEntry, OutreachLogEntry, PartnerAccount,
    };
    use chrono::Duration;

    fn records() -> PartnerRecords {
        let partner_id = PartnerId("partner-7".to_string());
        let today = eval_date();
        PartnerRecords {
            account: PartnerAccount {
                id: partner_id.clone(),
                application_id: "app-000007".to_string(),
                stage: Stage::Starter,
                earnings_total: 0,
                earnings_paid: 0,
                earnings_pending: 0,
                bank_details: None,
            },
            logs: vec![OutreachLogEntry {
                id: "log-1".to_string(),
                partner_id: partner_id.clone(),
                date: today - Duration::days(3),
                channel: Channel::LinkedIn,
                sent: 120,
                replies: 12,
                leads: 4,
                appointments_booked: 1,
                notes: Some("cold DMs".to_string()),
                location: None,
                niche: Some("realtors".to_string()),
            }],
            leads: vec![LeadEntry {
                id: "lead-1".to_string(),
                partner_id,
                business_name: "Corner Bakery".to_string(),
                contact_person: Some("Priya".to_string()),
                source_channel: Channel::LinkedIn,
                status: LeadStatus::BookedCall,
                notes: None,
                appointment_date: None,
            }],
            earnings: Vec::new(),
        }
    }

    fn eval_date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 7, 4).expect("valid date")
    }

    #[test]
    fn view_carries_labels_alongside_raw_values() {
        let view = PartnerDashboardView::build(&records(), eval_date(), 50_000);

        assert_eq!(view.stage, Stage::Builder);
        assert_eq!(view.stage_label, "Builder");
        assert_eq!(view.streak_days, 0);
        assert_eq!(view.channel_split.len(), 3);
        assert_eq!(view.channel_split[1].channel_label, "LinkedIn");
        assert_eq!(view.channel_split[1].percent, 100);
        assert_eq!(view.pipeline.len(), 1);
        assert_eq!(view.pipeline[0].status_label, "Booked Call");
    }

    #[test]
    fn view_surfaces_the_advisory_stage_correction() {
        let view = PartnerDashboardView::build(&records(), eval_date(), 50_000);
        assert_eq!(view.reconciled_stage, Some(Stage::Builder));
        // Empty ledger against a zeroed cache is in agreement.
        assert_eq!(view.reconciled_earnings, None);
    }

    #[test]
    fn view_surfaces_stale_cached_earnings() {
        let mut stale = records();
        stale.account.earnings_total = 8_000;
        stale.account.earnings_pending = 8_000;

        let view = PartnerDashboardView::build(&stale, eval_date(), 50_000);
        let reconciled = view.reconciled_earnings.expect("drift reported");
        assert_eq!(reconciled, EarningsSummary::default());
    }
}
