use std::collections::BTreeMap;
use std::sync::{Mutex, PoisonError};

use super::domain::{PartnerId, PartnerRecords};

/// Collaborator boundary to whatever holds the records. The engine never
/// queries it; callers fetch a consistent snapshot and hand it over.
pub trait RecordStore: Send + Sync {
    fn partner_records(&self, id: &PartnerId) -> Result<Option<PartnerRecords>, RecordStoreError>;
    fn all_partner_records(&self) -> Result<Vec<PartnerRecords>, RecordStoreError>;
}

#[derive(Debug, thiserror::Error)]
pub enum RecordStoreError {
    #[error("record store unavailable: {0}")]
    Unavailable(String),
}

/// Map-backed store used by tests and the demo wiring.
#[derive(Debug, Default)]
pub struct InMemoryRecordStore {
    partners: Mutex<BTreeMap<String, PartnerRecords>>,
}

impl InMemoryRecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn upsert(&self, records: PartnerRecords) {
        let mut partners = self.partners.lock().unwrap_or_else(PoisonError::into_inner);
        partners.insert(records.account.id.0.clone(), records);
    }
}

impl RecordStore for InMemoryRecordStore {
    fn partner_records(&self, id: &PartnerId) -> Result<Option<PartnerRecords>, RecordStoreError> {
        let partners = self.partners.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(partners.get(&id.0).cloned())
    }

    fn all_partner_records(&self) -> Result<Vec<PartnerRecords>, RecordStoreError> {
        let partners = self.partners.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(partners.values().cloned().collect())
    }
}
