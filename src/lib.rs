//! Partner performance ledger and progression engine for the growth
//! partner referral program, plus the thin HTTP/CLI surface around it.

pub mod config;
pub mod error;
pub mod ledger;
pub mod telemetry;
