use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Identifier wrapper linking records back to an approved partner account.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PartnerId(pub String);

/// Outreach medium a partner used for a logged activity batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Channel {
    Instagram,
    LinkedIn,
    WhatsApp,
    Email,
    Calls,
    Other,
}

impl Channel {
    pub const fn ordered() -> [Self; 6] {
        [
            Self::Instagram,
            Self::LinkedIn,
            Self::WhatsApp,
            Self::Email,
            Self::Calls,
            Self::Other,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Instagram => "Instagram",
            Self::LinkedIn => "LinkedIn",
            Self::WhatsApp => "WhatsApp",
            Self::Email => "Email",
            Self::Calls => "Calls",
            Self::Other => "Other",
        }
    }

    /// Maps a free-form export label onto the enum; anything unrecognized
    /// lands in the Other bucket rather than failing the row.
    pub fn from_label(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "instagram" | "ig" => Self::Instagram,
            "linkedin" => Self::LinkedIn,
            "whatsapp" => Self::WhatsApp,
            "email" | "e-mail" => Self::Email,
            "calls" | "call" | "phone" => Self::Calls,
            _ => Self::Other,
        }
    }
}

/// Ordered progression tier derived from a partner's cumulative outreach.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    Starter,
    Connector,
    Builder,
    Closer,
    ElitePartner,
}

impl Stage {
    pub const fn ordered() -> [Self; 5] {
        [
            Self::Starter,
            Self::Connector,
            Self::Builder,
            Self::Closer,
            Self::ElitePartner,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Starter => "Starter",
            Self::Connector => "Connector",
            Self::Builder => "Builder",
            Self::Closer => "Closer",
            Self::ElitePartner => "Elite Partner",
        }
    }
}

/// A single outreach submission. Append-only; multiple entries per day are
/// expected when a partner works several channels.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutreachLogEntry {
    pub id: String,
    pub partner_id: PartnerId,
    /// Calendar day the activity happened, trusted as recorded.
    pub date: NaiveDate,
    pub channel: Channel,
    pub sent: u32,
    pub replies: u32,
    pub leads: u32,
    pub appointments_booked: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub niche: Option<String>,
}

/// Pipeline status of an individual prospect a partner is working.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LeadStatus {
    Contacted,
    BookedCall,
    ProposalSent,
    Converted,
    Lost,
}

impl LeadStatus {
    pub const fn ordered() -> [Self; 5] {
        [
            Self::Contacted,
            Self::BookedCall,
            Self::ProposalSent,
            Self::Converted,
            Self::Lost,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Contacted => "Contacted",
            Self::BookedCall => "Booked Call",
            Self::ProposalSent => "Proposal Sent",
            Self::Converted => "Converted",
            Self::Lost => "Lost",
        }
    }
}

/// Prospect tracked by a partner. Owned by its creator; status is mutable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeadEntry {
    pub id: String,
    pub partner_id: PartnerId,
    pub business_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact_person: Option<String>,
    pub source_channel: Channel,
    pub status: LeadStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub appointment_date: Option<NaiveDate>,
}

/// Lifecycle of an earnings ledger row. Transitions are administrator-only;
/// `Paid` and `Rejected` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EarningStatus {
    Pending,
    Approved,
    Paid,
    Rejected,
}

impl EarningStatus {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Paid => "paid",
            Self::Rejected => "rejected",
        }
    }
}

/// Append-only earnings ledger row. Amounts are whole currency units.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EarningEntry {
    pub id: String,
    pub partner_id: PartnerId,
    pub amount: u64,
    pub date: NaiveDate,
    pub client_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deal_value: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub commission_percent: Option<f32>,
    pub status: EarningStatus,
}

/// Payout destination captured once a partner is approved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BankDetails {
    pub account_holder: String,
    pub bank_name: String,
    pub account_number: String,
    pub ifsc: String,
}

/// Stored partner account. `stage` and the `earnings_*` fields are caches
/// of derived values; the logs and the earnings ledger stay authoritative.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PartnerAccount {
    pub id: PartnerId,
    pub application_id: String,
    pub stage: Stage,
    pub earnings_total: u64,
    pub earnings_paid: u64,
    pub earnings_pending: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bank_details: Option<BankDetails>,
}

/// Point-in-time bundle of everything the engine needs for one partner,
/// as fetched by the record store collaborator. Logs arrive newest-first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PartnerRecords {
    pub account: PartnerAccount,
    pub logs: Vec<OutreachLogEntry>,
    #[serde(default)]
    pub leads: Vec<LeadEntry>,
    #[serde(default)]
    pub earnings: Vec<EarningEntry>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stages_order_from_starter_to_elite() {
        let ordered = Stage::ordered();
        assert!(ordered.windows(2).all(|pair| pair[0] < pair[1]));
        assert_eq!(ordered[4].label(), "Elite Partner");
    }

    #[test]
    fn channel_labels_round_trip_through_from_label() {
        for channel in Channel::ordered() {
            assert_eq!(Channel::from_label(channel.label()), channel);
        }
    }

    #[test]
    fn unknown_channel_labels_fall_back_to_other() {
        assert_eq!(Channel::from_label("carrier pigeon"), Channel::Other);
        assert_eq!(Channel::from_label(""), Channel::Other);
    }
}
