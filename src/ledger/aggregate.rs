use serde::Serialize;

use super::domain::PartnerRecords;

/// Organization-wide rollup for the administrator overview.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct AggregateReport {
    pub active_partner_count: usize,
    pub total_outreach: u64,
    pub total_leads: u64,
    pub total_revenue: u64,
    pub total_pending_liability: u64,
}

impl AggregateReport {
    /// Sums outreach and lead volume from every partner's logs, and
    /// revenue and pending liability from the stored accounts.
    ///
    /// Every supplied partner counts as active regardless of recent
    /// activity, matching the established dashboard behavior.
    // TODO: add a recency window on the active count once product
    // confirms whether "active" should mean "logged recently".
    pub fn compute<'a, I>(partners: I) -> Self
    where
        I: IntoIterator<Item = &'a PartnerRecords>,
    {
        let mut report = Self::default();
        for records in partners {
            report.active_partner_count += 1;
            for log in &records.logs {
                report.total_outreach += u64::from(log.sent);
                report.total_leads += u64::from(log.leads);
            }
            report.total_revenue += records.account.earnings_total;
            report.total_pending_liability += records.account.earnings_pending;
        }
        report
    }
}
