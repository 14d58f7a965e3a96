use std::io::Read;
use std::path::Path;

use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Deserializer};

use super::domain::{Channel, OutreachLogEntry, PartnerId};

#[derive(Debug, thiserror::Error)]
pub enum OutreachImportError {
    #[error("failed to read outreach export: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid outreach CSV data: {0}")]
    Csv(#[from] csv::Error),
    #[error("row {row}: '{value}' is not a recognizable date")]
    Date { row: usize, value: String },
}

/// Turns an exported outreach-log CSV into engine-ready entries for one
/// partner. Row shape: `Date, Channel, Sent, Replies, Leads,
/// Appointments, Notes, Location, Niche` with the last three optional.
pub struct OutreachCsvImporter;

impl OutreachCsvImporter {
    pub fn from_path<P: AsRef<Path>>(
        path: P,
        partner_id: &PartnerId,
    ) -> Result<Vec<OutreachLogEntry>, OutreachImportError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file, partner_id)
    }

    pub fn from_reader<R: Read>(
        reader: R,
        partner_id: &PartnerId,
    ) -> Result<Vec<OutreachLogEntry>, OutreachImportError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);

        let mut entries = Vec::new();
        for (index, record) in csv_reader.deserialize::<OutreachRow>().enumerate() {
            let row = record?;
            let date = parse_date(&row.date).ok_or_else(|| OutreachImportError::Date {
                row: index + 1,
                value: row.date.clone(),
            })?;

            entries.push(OutreachLogEntry {
                id: format!("import-{:04}", index + 1),
                partner_id: partner_id.clone(),
                date,
                channel: Channel::from_label(&row.channel),
                sent: row.sent,
                replies: row.replies,
                leads: row.leads,
                appointments_booked: row.appointments,
                notes: row.notes,
                location: row.location,
                niche: row.niche,
            });
        }

        // Engine functions expect record-store ordering.
        entries.sort_by(|a, b| b.date.cmp(&a.date));
        Ok(entries)
    }
}

#[derive(Debug, Deserialize)]
struct OutreachRow {
    #[serde(rename = "Date")]
    date: String,
    #[serde(rename = "Channel")]
    channel: String,
    #[serde(rename = "Sent", default)]
    sent: u32,
    #[serde(rename = "Replies", default)]
    replies: u32,
    #[serde(rename = "Leads", default)]
    leads: u32,
    #[serde(rename = "Appointments", default)]
    appointments: u32,
    #[serde(rename = "Notes", default, deserialize_with = "empty_string_as_none")]
    notes: Option<String>,
    #[serde(rename = "Location", default, deserialize_with = "empty_string_as_none")]
    location: Option<String>,
    #[serde(rename = "Niche", default, deserialize_with = "empty_string_as_none")]
    niche: Option<String>,
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}

fn parse_date(value: &str) -> Option<NaiveDate> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return Some(date);
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(dt.date_naive());
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    const SAMPLE: &str = "\
Date,Channel,Sent,Replies,Leads,Appointments,Notes
2026-03-02,Instagram,25,4,2,1,story replies
2026-03-03T18:30:00Z,LinkedIn,15,2,1,0,
2026-03-01,Carrier Pigeon,3,0,0,0,
";

    fn partner_id() -> PartnerId {
        PartnerId("partner-1".to_string())
    }

    #[test]
    fn parses_rows_and_orders_newest_first() {
        let entries = OutreachCsvImporter::from_reader(Cursor::new(SAMPLE), &partner_id())
            .expect("sample parses");

        assert_eq!(entries.len(), 3);
        assert_eq!(
            entries[0].date,
            NaiveDate::from_ymd_opt(2026, 3, 3).expect("valid date")
        );
        assert_eq!(entries[0].channel, Channel::LinkedIn);
        assert!(entries[0].notes.is_none());
        assert_eq!(entries[1].sent, 25);
        assert_eq!(entries[1].notes.as_deref(), Some("story replies"));
        assert_eq!(entries[2].channel, Channel::Other);
        assert!(entries.windows(2).all(|pair| pair[0].date >= pair[1].date));
    }

    #[test]
    fn unparseable_dates_fail_with_row_context() {
        let bad = "Date,Channel,Sent,Replies,Leads,Appointments\nnot-a-date,Email,1,0,0,0\n";
        let err = OutreachCsvImporter::from_reader(Cursor::new(bad), &partner_id())
            .expect_err("bad date rejected");
        match err {
            OutreachImportError::Date { row, value } => {
                assert_eq!(row, 1);
                assert_eq!(value, "not-a-date");
            }
            other => panic!("expected date error, got {other:?}"),
        }
    }

    #[test]
    fn malformed_numeric_fields_surface_as_csv_errors() {
        let bad = "Date,Channel,Sent,Replies,Leads,Appointments\n2026-03-02,Email,lots,0,0,0\n";
        let err = OutreachCsvImporter::from_reader(Cursor::new(bad), &partner_id())
            .expect_err("bad count rejected");
        assert!(matches!(err, OutreachImportError::Csv(_)));
    }
}
