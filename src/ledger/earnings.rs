use serde::Serialize;

use super::domain::{EarningEntry, EarningStatus, PartnerAccount};

/// Rollup of a partner's earnings ledger. `total` covers every
/// non-rejected row, so `total = paid + pending + approved` holds by
/// construction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct EarningsSummary {
    pub total: u64,
    pub paid: u64,
    pub pending: u64,
    pub approved: u64,
}

impl EarningsSummary {
    pub fn from_entries(entries: &[EarningEntry]) -> Self {
        let mut summary = Self::default();
        for entry in entries {
            match entry.status {
                EarningStatus::Paid => summary.paid += entry.amount,
                EarningStatus::Pending => summary.pending += entry.amount,
                EarningStatus::Approved => summary.approved += entry.amount,
                EarningStatus::Rejected => continue,
            }
            summary.total += entry.amount;
        }
        summary
    }

    /// Reports the recomputed rollup when the account's cached
    /// `earnings_*` fields no longer match the ledger. The ledger is
    /// authoritative; whether to persist the correction is the caller's
    /// decision, same as with a stale stage.
    pub fn drift(&self, account: &PartnerAccount) -> Option<EarningsSummary> {
        let stale = account.earnings_total != self.total
            || account.earnings_paid != self.paid
            || account.earnings_pending != self.pending;
        stale.then_some(*self)
    }
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum EarningStatusError {
    #[error("earning entry cannot move from {} to {}", from.label(), to.label())]
    InvalidTransition {
        from: EarningStatus,
        to: EarningStatus,
    },
}

impl EarningStatus {
    /// The only lawful paths are pending -> approved -> paid and
    /// pending -> rejected; paid and rejected are terminal.
    pub const fn can_transition_to(self, next: EarningStatus) -> bool {
        matches!(
            (self, next),
            (EarningStatus::Pending, EarningStatus::Approved)
                | (EarningStatus::Pending, EarningStatus::Rejected)
                | (EarningStatus::Approved, EarningStatus::Paid)
        )
    }
}

impl EarningEntry {
    /// Applies an administrator-driven status change, rejecting any move
    /// the ledger lifecycle does not allow.
    pub fn set_status(&mut self, next: EarningStatus) -> Result<(), EarningStatusError> {
        if !self.status.can_transition_to(next) {
            return Err(EarningStatusError::InvalidTransition {
                from: self.status,
                to: next,
            });
        }
        self.status = next;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::domain::PartnerId;
    use chrono::NaiveDate;

    fn entry(amount: u64, status: EarningStatus) -> EarningEntry {
        EarningEntry {
            id: format!("earn-{amount}"),
            partner_id: PartnerId("partner-1".to_string()),
            amount,
            date: NaiveDate::from_ymd_opt(2026, 2, 14).expect("valid date"),
            client_name: "Acme Studio".to_string(),
            service_type: Some("Web Design".to_string()),
            deal_value: Some(amount * 4),
            commission_percent: Some(25.0),
            status,
        }
    }

    #[test]
    fn summary_excludes_rejected_rows() {
        let entries = vec![
            entry(1_000, EarningStatus::Paid),
            entry(500, EarningStatus::Pending),
            entry(250, EarningStatus::Approved),
            entry(9_999, EarningStatus::Rejected),
        ];

        let summary = EarningsSummary::from_entries(&entries);
        assert_eq!(summary.paid, 1_000);
        assert_eq!(summary.pending, 500);
        assert_eq!(summary.approved, 250);
        assert_eq!(summary.total, 1_750);
        assert_eq!(summary.total, summary.paid + summary.pending + summary.approved);
    }

    #[test]
    fn empty_ledger_rolls_up_to_zero() {
        assert_eq!(EarningsSummary::from_entries(&[]), EarningsSummary::default());
    }

    fn account_with(total: u64, paid: u64, pending: u64) -> PartnerAccount {
        PartnerAccount {
            id: PartnerId("partner-1".to_string()),
            application_id: "app-000001".to_string(),
            stage: crate::ledger::domain::Stage::Starter,
            earnings_total: total,
            earnings_paid: paid,
            earnings_pending: pending,
            bank_details: None,
        }
    }

    #[test]
    fn drift_flags_stale_cached_earnings() {
        let entries = vec![
            entry(1_000, EarningStatus::Paid),
            entry(500, EarningStatus::Pending),
        ];
        let summary = EarningsSummary::from_entries(&entries);

        // Cache still shows the pre-approval totals.
        let stale = account_with(1_000, 1_000, 0);
        assert_eq!(summary.drift(&stale), Some(summary));

        let fresh = account_with(1_500, 1_000, 500);
        assert_eq!(summary.drift(&fresh), None);
    }

    #[test]
    fn lifecycle_accepts_only_the_defined_paths() {
        let mut row = entry(100, EarningStatus::Pending);
        row.set_status(EarningStatus::Approved).expect("pending approves");
        row.set_status(EarningStatus::Paid).expect("approved pays out");

        let err = row.set_status(EarningStatus::Pending).expect_err("paid is terminal");
        assert_eq!(
            err,
            EarningStatusError::InvalidTransition {
                from: EarningStatus::Paid,
                to: EarningStatus::Pending,
            }
        );
    }

    #[test]
    fn pending_can_be_rejected_but_not_reopened() {
        let mut row = entry(100, EarningStatus::Pending);
        row.set_status(EarningStatus::Rejected).expect("pending rejects");
        assert!(row.set_status(EarningStatus::Approved).is_err());
    }

    #[test]
    fn approved_cannot_skip_back_or_be_rejected() {
        let mut row = entry(100, EarningStatus::Pending);
        row.set_status(EarningStatus::Approved).expect("pending approves");
        assert!(row.set_status(EarningStatus::Rejected).is_err());
        assert!(row.set_status(EarningStatus::Pending).is_err());
    }
}
