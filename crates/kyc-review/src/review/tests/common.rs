use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::response::Response;
use chrono::NaiveDate;
use serde_json::{json, Value};

use crate::review::domain::{KycId, KycRecord, KycStatus};
use crate::review::moderation::Moderation;
use crate::review::router::review_router;
use crate::review::store::{
    KycStore, Notification, Notifier, NotifyError, StoreError,
};
use crate::review::workflow::ReviewService;

pub(super) fn record(id: &str, status: KycStatus) -> KycRecord {
    KycRecord {
        id: KycId(id.to_string()),
        name: "Asha Rao".to_string(),
        email: "asha.rao@example.com".to_string(),
        id_number: "X1234567".to_string(),
        nationality: "Indian".to_string(),
        dob: NaiveDate::from_ymd_opt(1992, 4, 17).expect("valid date"),
        country_of_residence: "India".to_string(),
        address_line1: "14 Lakeview Road".to_string(),
        city: "Pune".to_string(),
        state: "MH".to_string(),
        zip_code: "411001".to_string(),
        document_type: "Passport".to_string(),
        document_image: "https://cdn.example.com/docs/x1234567.jpg".to_string(),
        id_issue_date: NaiveDate::from_ymd_opt(2019, 6, 1).expect("valid date"),
        id_expiry_date: Some(NaiveDate::from_ymd_opt(2029, 6, 1).expect("valid date")),
        id_issuing_country: "India".to_string(),
        selfie_image: "https://cdn.example.com/selfies/x1234567.jpg".to_string(),
        kyc_status: status,
        moderation: None,
    }
}

pub(super) fn record_with_moderation(
    id: &str,
    status: KycStatus,
    moderation: Moderation,
) -> KycRecord {
    let mut record = record(id, status);
    record.moderation = Some(moderation);
    record
}

/// Fully populated payload in the backend's wire shape, parsed through serde
/// so fixtures exercise the same path as production data.
pub(super) fn completed_moderation_json() -> Value {
    json!({
        "status": "Completed",
        "document": {
            "ocr": {
                "isMatch": true,
                "recognitionResult": {
                    "data": [{
                        "data": {
                            "score": 0.93,
                            "ocr": {
                                "name": "ASHA RAO",
                                "documentNumber": "X1234567",
                                "dateOfBirth": "1992-04-17",
                                "validState": true
                            },
                            "image": {
                                "portrait": "cG9ydHJhaXQ=",
                                "ghostPortrait": "Z2hvc3Q=",
                                "documentFrontSide": "ZnJvbnQ="
                            }
                        }
                    }]
                }
            },
            "liveness": {
                "data": [{ "data": { "liveness_score": 0.91, "result": "Genuine" } }]
            }
        },
        "face": {
            "comparison": {
                "data": [{ "data": { "similarity": 0.87, "result": "Same" } }]
            },
            "liveness": {
                "data": [{ "data": { "liveness_score": 0.76, "result": "real" } }]
            }
        }
    })
}

pub(super) fn completed_moderation() -> Moderation {
    serde_json::from_value(completed_moderation_json()).expect("moderation parses")
}

pub(super) fn mismatched_moderation() -> Moderation {
    serde_json::from_value(json!({
        "status": "Completed",
        "document": {
            "ocr": {
                "isMatch": false,
                "mismatchResults": {
                    "name": {
                        "ocrValue": "ASHA RAOO",
                        "kycValue": "Asha Rao",
                        "reason": "Edit distance above threshold"
                    },
                    "address": {
                        "ocrValue": "14 Lakeview Rd",
                        "kycValue": "14 Lakeview Road",
                        "reason": "Partial match",
                        "similarityScore": 0.82
                    }
                }
            }
        }
    }))
    .expect("moderation parses")
}

pub(super) fn pending_moderation() -> Moderation {
    serde_json::from_value(json!({ "status": "Pending" })).expect("moderation parses")
}

#[derive(Default)]
pub(super) struct MemoryStore {
    records: Mutex<HashMap<KycId, KycRecord>>,
    update_calls: Mutex<Vec<(KycId, KycStatus)>>,
}

impl MemoryStore {
    pub(super) fn with_records(records: impl IntoIterator<Item = KycRecord>) -> Self {
        let store = Self::default();
        {
            let mut guard = store.records.lock().expect("store mutex poisoned");
            for record in records {
                guard.insert(record.id.clone(), record);
            }
        }
        store
    }

    pub(super) fn update_calls(&self) -> Vec<(KycId, KycStatus)> {
        self.update_calls
            .lock()
            .expect("store mutex poisoned")
            .clone()
    }
}

impl KycStore for MemoryStore {
    fn fetch(&self, id: &KycId) -> Result<Option<KycRecord>, StoreError> {
        let guard = self.records.lock().expect("store mutex poisoned");
        Ok(guard.get(id).cloned())
    }

    fn list(&self) -> Result<Vec<KycRecord>, StoreError> {
        let guard = self.records.lock().expect("store mutex poisoned");
        Ok(guard.values().cloned().collect())
    }

    fn update_status(&self, id: &KycId, status: KycStatus) -> Result<(), StoreError> {
        let mut guard = self.records.lock().expect("store mutex poisoned");
        let record = guard.get_mut(id).ok_or(StoreError::NotFound)?;
        record.kyc_status = status;
        self.update_calls
            .lock()
            .expect("store mutex poisoned")
            .push((id.clone(), status));
        Ok(())
    }
}

pub(super) struct UnavailableStore;

impl KycStore for UnavailableStore {
    fn fetch(&self, _id: &KycId) -> Result<Option<KycRecord>, StoreError> {
        Err(StoreError::Unavailable("backend offline".to_string()))
    }

    fn list(&self) -> Result<Vec<KycRecord>, StoreError> {
        Err(StoreError::Unavailable("backend offline".to_string()))
    }

    fn update_status(&self, _id: &KycId, _status: KycStatus) -> Result<(), StoreError> {
        Err(StoreError::Unavailable("backend offline".to_string()))
    }
}

/// Store whose reads succeed but whose update command always fails; used to
/// assert the no-partial-mutation contract.
pub(super) struct ReadOnlyStore {
    pub(super) inner: MemoryStore,
}

impl KycStore for ReadOnlyStore {
    fn fetch(&self, id: &KycId) -> Result<Option<KycRecord>, StoreError> {
        self.inner.fetch(id)
    }

    fn list(&self) -> Result<Vec<KycRecord>, StoreError> {
        self.inner.list()
    }

    fn update_status(&self, _id: &KycId, _status: KycStatus) -> Result<(), StoreError> {
        Err(StoreError::Unavailable("write path down".to_string()))
    }
}

#[derive(Default, Clone)]
pub(super) struct MemoryNotifier {
    events: Arc<Mutex<Vec<Notification>>>,
}

impl MemoryNotifier {
    pub(super) fn events(&self) -> Vec<Notification> {
        self.events.lock().expect("notifier mutex poisoned").clone()
    }
}

impl Notifier for MemoryNotifier {
    fn publish(&self, notification: Notification) -> Result<(), NotifyError> {
        self.events
            .lock()
            .expect("notifier mutex poisoned")
            .push(notification);
        Ok(())
    }
}

pub(super) fn build_service(
    records: impl IntoIterator<Item = KycRecord>,
) -> (Arc<ReviewService<MemoryStore>>, Arc<MemoryStore>) {
    let store = Arc::new(MemoryStore::with_records(records));
    (Arc::new(ReviewService::new(store.clone())), store)
}

pub(super) fn router_with(
    records: impl IntoIterator<Item = KycRecord>,
) -> (axum::Router, Arc<MemoryStore>, Arc<MemoryNotifier>) {
    let (service, store) = build_service(records);
    let notifier = Arc::new(MemoryNotifier::default());
    (review_router(service, notifier.clone()), store, notifier)
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
