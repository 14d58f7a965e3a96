//! Partner performance ledger: pure recomputation of dashboard metrics
//! from append-only activity records.

pub mod aggregate;
pub mod domain;
pub mod earnings;
pub mod import;
pub mod repository;
pub mod snapshot;
pub mod split;
pub mod stage;
pub mod streak;
pub mod trend;
pub mod views;

pub use aggregate::AggregateReport;
pub use domain::{
    BankDetails, Channel, EarningEntry, EarningStatus, LeadEntry, LeadStatus, OutreachLogEntry,
    PartnerAccount, PartnerId, PartnerRecords, Stage,
};
pub use earnings::{EarningStatusError, EarningsSummary};
pub use import::{OutreachCsvImporter, OutreachImportError};
pub use repository::{InMemoryRecordStore, RecordStore, RecordStoreError};
pub use snapshot::{goal_completion_percent, PerformanceSnapshot, DEFAULT_TREND_WINDOW};
pub use split::ChannelSplit;
pub use stage::{classify_stage, next_threshold, progress_percent};
pub use streak::streak_days;
pub use trend::{trend, TrendPoint};
pub use views::{ChannelShareEntry, PartnerDashboardView, PipelineEntry};
