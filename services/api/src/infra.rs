use kyc_review::error::AppError;
use kyc_review::review::{
    KycId, KycRecord, KycStatus, KycStore, Notification, Notifier, NotifyError, StoreError,
};
use metrics_exporter_prometheus::PrometheusHandle;
use std::collections::HashMap;
use std::io;
use std::path::Path;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};
use tracing::info;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

#[derive(Default, Clone)]
pub(crate) struct InMemoryKycStore {
    records: Arc<Mutex<HashMap<KycId, KycRecord>>>,
}

impl InMemoryKycStore {
    pub(crate) fn seeded(records: Vec<KycRecord>) -> Self {
        let store = Self::default();
        {
            let mut guard = store.records.lock().expect("store mutex poisoned");
            for record in records {
                guard.insert(record.id.clone(), record);
            }
        }
        store
    }
}

impl KycStore for InMemoryKycStore {
    fn fetch(&self, id: &KycId) -> Result<Option<KycRecord>, StoreError> {
        let guard = self.records.lock().expect("store mutex poisoned");
        Ok(guard.get(id).cloned())
    }

    fn list(&self) -> Result<Vec<KycRecord>, StoreError> {
        let guard = self.records.lock().expect("store mutex poisoned");
        let mut records: Vec<KycRecord> = guard.values().cloned().collect();
        records.sort_by(|a, b| a.id.0.cmp(&b.id.0));
        Ok(records)
    }

    fn update_status(&self, id: &KycId, status: KycStatus) -> Result<(), StoreError> {
        let mut guard = self.records.lock().expect("store mutex poisoned");
        let record = guard.get_mut(id).ok_or(StoreError::NotFound)?;
        record.kyc_status = status;
        Ok(())
    }
}

/// Emits reviewer-facing notifications on the service log. The HTTP response
/// already carries the same copy for the dashboard toast.
#[derive(Default, Clone)]
pub(crate) struct LogNotifier;

impl Notifier for LogNotifier {
    fn publish(&self, notification: Notification) -> Result<(), NotifyError> {
        info!(kind = ?notification.kind, message = %notification.message, "review notification");
        Ok(())
    }
}

pub(crate) fn load_records(path: &Path) -> Result<Vec<KycRecord>, AppError> {
    let raw = std::fs::read(path)?;
    let records: Vec<KycRecord> = serde_json::from_slice(&raw)
        .map_err(|err| io::Error::new(io::ErrorKind::InvalidData, err))?;
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(id: &str) -> KycRecord {
        serde_json::from_value(serde_json::json!({
            "id": id,
            "name": "Asha Rao",
            "email": "asha.rao@example.com",
            "idNumber": "X1234567",
            "nationality": "Indian",
            "dob": "1992-04-17",
            "countryOfResidence": "India",
            "addressLine1": "14 Lakeview Road",
            "city": "Pune",
            "state": "MH",
            "zipCode": "411001",
            "documentType": "Passport",
            "documentImage": "https://cdn.example.com/docs/x1234567.jpg",
            "idIssueDate": "2019-06-01",
            "idIssuingCountry": "India",
            "selfieImage": "https://cdn.example.com/selfies/x1234567.jpg",
            "kycStatus": "Pending"
        }))
        .expect("record parses")
    }

    #[test]
    fn seeded_store_lists_records_in_id_order() {
        let store = InMemoryKycStore::seeded(vec![sample("kyc-2"), sample("kyc-1")]);
        let ids: Vec<String> = store
            .list()
            .expect("list succeeds")
            .into_iter()
            .map(|record| record.id.0)
            .collect();
        assert_eq!(ids, vec!["kyc-1".to_string(), "kyc-2".to_string()]);
    }

    #[test]
    fn update_on_a_missing_record_reports_not_found() {
        let store = InMemoryKycStore::default();
        let result = store.update_status(&KycId("ghost".to_string()), KycStatus::Verified);
        assert!(matches!(result, Err(StoreError::NotFound)));
    }
}
