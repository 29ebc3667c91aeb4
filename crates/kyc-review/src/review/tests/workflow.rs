use std::sync::Arc;

use super::common::*;
use crate::review::domain::{KycId, KycStatus};
use crate::review::store::{NotificationKind, StoreError};
use crate::review::workflow::{
    failure_notification, ReviewService, ReviewServiceError, StatusChangeOutcome,
};

#[test]
fn approving_an_already_verified_record_short_circuits() {
    let (service, store) = build_service([record("kyc-1", KycStatus::Verified)]);

    let outcome = service
        .submit_status_change(&KycId("kyc-1".to_string()), KycStatus::Verified)
        .expect("guarded no-op succeeds");

    assert_eq!(outcome, StatusChangeOutcome::AlreadyInState(KycStatus::Verified));
    assert!(store.update_calls().is_empty(), "no store call may be made");

    let notification = outcome.notification();
    assert_eq!(notification.kind, NotificationKind::Info);
    assert_eq!(notification.message, "User's KYC is already verified");
}

#[test]
fn approving_a_pending_record_issues_one_update() {
    let (service, store) = build_service([record("kyc-1", KycStatus::Pending)]);
    let id = KycId("kyc-1".to_string());

    let outcome = service
        .submit_status_change(&id, KycStatus::Verified)
        .expect("update succeeds");

    assert_eq!(outcome, StatusChangeOutcome::Updated(KycStatus::Verified));
    assert_eq!(store.update_calls(), vec![(id.clone(), KycStatus::Verified)]);
    assert_eq!(
        service.record(&id).expect("record refetches").kyc_status,
        KycStatus::Verified
    );

    let notification = outcome.notification();
    assert_eq!(notification.kind, NotificationKind::Success);
    assert_eq!(notification.message, "KYC status updated to Verified");
}

#[test]
fn declining_a_verified_record_moves_it_to_rejected() {
    let (service, store) = build_service([record("kyc-1", KycStatus::Verified)]);
    let id = KycId("kyc-1".to_string());

    let outcome = service
        .submit_status_change(&id, KycStatus::Rejected)
        .expect("update succeeds");

    assert_eq!(outcome, StatusChangeOutcome::Updated(KycStatus::Rejected));
    assert_eq!(store.update_calls().len(), 1);
}

#[test]
fn pending_is_not_a_reviewer_decision() {
    let (service, store) = build_service([record("kyc-1", KycStatus::Pending)]);

    match service.submit_status_change(&KycId("kyc-1".to_string()), KycStatus::Pending) {
        Err(ReviewServiceError::UnreviewableTarget(KycStatus::Pending)) => {}
        other => panic!("expected unreviewable target, got {other:?}"),
    }
    assert!(store.update_calls().is_empty());
}

#[test]
fn missing_record_propagates_not_found() {
    let (service, _) = build_service([]);

    match service.submit_status_change(&KycId("ghost".to_string()), KycStatus::Verified) {
        Err(ReviewServiceError::RecordNotFound(id)) => assert_eq!(id, "ghost"),
        other => panic!("expected not found, got {other:?}"),
    }
}

#[test]
fn store_failure_leaves_the_record_untouched() {
    let store = Arc::new(ReadOnlyStore {
        inner: MemoryStore::with_records([record("kyc-1", KycStatus::Pending)]),
    });
    let service = ReviewService::new(store.clone());
    let id = KycId("kyc-1".to_string());

    match service.submit_status_change(&id, KycStatus::Verified) {
        Err(ReviewServiceError::Store(StoreError::Unavailable(_))) => {}
        other => panic!("expected store failure, got {other:?}"),
    }

    // The displayed status stays on its previous value.
    assert_eq!(
        service.record(&id).expect("read path still works").kyc_status,
        KycStatus::Pending
    );

    let notification = failure_notification();
    assert_eq!(notification.kind, NotificationKind::Error);
    assert_eq!(
        notification.message,
        "Failed to update KYC status. Please try again."
    );
}

#[test]
fn unavailable_store_fails_reads_too() {
    let service = ReviewService::new(Arc::new(UnavailableStore));

    match service.record(&KycId("kyc-1".to_string())) {
        Err(ReviewServiceError::Store(StoreError::Unavailable(_))) => {}
        other => panic!("expected store failure, got {other:?}"),
    }
    match service.all_records() {
        Err(ReviewServiceError::Store(StoreError::Unavailable(_))) => {}
        other => panic!("expected store failure, got {other:?}"),
    }
}
