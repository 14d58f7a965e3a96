use serde::Serialize;

use super::domain::{Channel, OutreachLogEntry};

/// Share of lead generation by channel, in whole percent.
///
/// Instagram and LinkedIn are tracked individually; everything else is
/// folded into `other`, which is defined as the remainder to 100 rather
/// than computed from its own totals. That keeps the three-way split
/// summing to exactly 100 under rounding, with `other` absorbing the
/// rounding error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ChannelSplit {
    pub instagram: u8,
    pub linkedin: u8,
    pub other: u8,
}

impl ChannelSplit {
    pub fn from_logs(logs: &[OutreachLogEntry]) -> Self {
        let mut instagram = 0u64;
        let mut linkedin = 0u64;
        let mut total = 0u64;

        for log in logs {
            let leads = u64::from(log.leads);
            total += leads;
            match log.channel {
                Channel::Instagram => instagram += leads,
                Channel::LinkedIn => linkedin += leads,
                _ => {}
            }
        }

        // Zero leads would divide by zero; a denominator of 1 pushes the
        // whole split into the remainder bucket.
        let denominator = total.max(1);
        let instagram = (instagram * 100 / denominator) as u8;
        let linkedin = (linkedin * 100 / denominator) as u8;

        Self {
            instagram,
            linkedin,
            other: 100 - instagram - linkedin,
        }
    }

    pub const fn entries(self) -> [(&'static str, u8); 3] {
        [
            ("Instagram", self.instagram),
            ("LinkedIn", self.linkedin),
            ("Other", self.other),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::domain::PartnerId;
    use chrono::NaiveDate;

    fn leads_via(channel: Channel, leads: u32) -> OutreachLogEntry {
        OutreachLogEntry {
            id: format!("log-{leads}-{}", channel.label()),
            partner_id: PartnerId("partner-1".to_string()),
            date: NaiveDate::from_ymd_opt(2026, 3, 1).expect("valid date"),
            channel,
            sent: leads * 4,
            replies: leads * 2,
            leads,
            appointments_booked: 0,
            notes: None,
            location: None,
            niche: None,
        }
    }

    fn assert_sums_to_100(split: ChannelSplit) {
        assert_eq!(
            u32::from(split.instagram) + u32::from(split.linkedin) + u32::from(split.other),
            100,
            "split must always total 100: {split:?}"
        );
    }

    #[test]
    fn zero_leads_reports_everything_as_other() {
        let split = ChannelSplit::from_logs(&[leads_via(Channel::Instagram, 0)]);
        assert_eq!(split.instagram, 0);
        assert_eq!(split.linkedin, 0);
        assert_eq!(split.other, 100);
        assert_sums_to_100(split);
    }

    #[test]
    fn even_split_between_tracked_channels() {
        let logs = vec![
            leads_via(Channel::Instagram, 10),
            leads_via(Channel::LinkedIn, 10),
        ];
        let split = ChannelSplit::from_logs(&logs);
        assert_eq!(split.instagram, 50);
        assert_eq!(split.linkedin, 50);
        assert_eq!(split.other, 0);
    }

    #[test]
    fn untracked_channels_land_in_other() {
        let logs = vec![
            leads_via(Channel::Instagram, 5),
            leads_via(Channel::WhatsApp, 3),
            leads_via(Channel::Email, 2),
        ];
        let split = ChannelSplit::from_logs(&logs);
        assert_eq!(split.instagram, 50);
        assert_eq!(split.linkedin, 0);
        assert_eq!(split.other, 50);
    }

    #[test]
    fn other_absorbs_rounding_remainder() {
        let logs = vec![
            leads_via(Channel::Instagram, 1),
            leads_via(Channel::LinkedIn, 1),
            leads_via(Channel::Calls, 1),
        ];
        let split = ChannelSplit::from_logs(&logs);
        assert_eq!(split.instagram, 33);
        assert_eq!(split.linkedin, 33);
        assert_eq!(split.other, 34);
    }

    #[test]
    fn split_totals_100_for_arbitrary_distributions() {
        let distributions: [(u32, u32, u32); 5] =
            [(0, 0, 0), (1, 0, 0), (7, 11, 3), (99, 1, 0), (13, 29, 58)];
        for (ig, li, rest) in distributions {
            let logs = vec![
                leads_via(Channel::Instagram, ig),
                leads_via(Channel::LinkedIn, li),
                leads_via(Channel::Calls, rest),
            ];
            assert_sums_to_100(ChannelSplit::from_logs(&logs));
        }
    }
}
