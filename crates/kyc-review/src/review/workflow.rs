use std::sync::Arc;

use super::domain::{KycId, KycRecord, KycStatus};
use super::store::{KycStore, Notification, StoreError};

/// Result of a guarded status change. The workflow itself performs no
/// notification side effects; callers map the outcome through
/// [`StatusChangeOutcome::notification`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusChangeOutcome {
    /// The record already carried the requested status; no store call was
    /// made.
    AlreadyInState(KycStatus),
    /// Exactly one update command was issued and acknowledged.
    Updated(KycStatus),
}

impl StatusChangeOutcome {
    pub fn notification(&self) -> Notification {
        match self {
            StatusChangeOutcome::AlreadyInState(status) => Notification::info(format!(
                "User's KYC is already {}",
                status.lower_label()
            )),
            StatusChangeOutcome::Updated(status) => {
                Notification::success(format!("KYC status updated to {}", status.label()))
            }
        }
    }
}

/// Copy shown when the update command fails; the displayed status stays on
/// its previous value until a successful retry.
pub fn failure_notification() -> Notification {
    Notification::error("Failed to update KYC status. Please try again.")
}

/// Error raised by the review service.
#[derive(Debug, thiserror::Error)]
pub enum ReviewServiceError {
    #[error("kyc record '{0}' not found")]
    RecordNotFound(String),
    #[error("status '{}' is not a reviewer decision", .0.label())]
    UnreviewableTarget(KycStatus),
    #[error(transparent)]
    Store(StoreError),
}

/// Service composing the store collaborator behind the reviewer-facing
/// operations: record reads and the guarded status-update workflow.
pub struct ReviewService<S> {
    store: Arc<S>,
}

impl<S> ReviewService<S>
where
    S: KycStore + 'static,
{
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Fetch a single record for the admin detail view.
    pub fn record(&self, id: &KycId) -> Result<KycRecord, ReviewServiceError> {
        self.store
            .fetch(id)
            .map_err(ReviewServiceError::Store)?
            .ok_or_else(|| ReviewServiceError::RecordNotFound(id.0.clone()))
    }

    /// Fetch every record for the list view.
    pub fn all_records(&self) -> Result<Vec<KycRecord>, ReviewServiceError> {
        self.store.list().map_err(ReviewServiceError::Store)
    }

    /// Submit an approve/decline decision.
    ///
    /// Requested status must be `Verified` or `Rejected`. When the record
    /// already carries the requested status the workflow short-circuits with
    /// zero store calls; otherwise exactly one update command is issued. A
    /// store failure propagates without mutating any local state.
    pub fn submit_status_change(
        &self,
        id: &KycId,
        requested: KycStatus,
    ) -> Result<StatusChangeOutcome, ReviewServiceError> {
        if !requested.is_reviewer_decision() {
            return Err(ReviewServiceError::UnreviewableTarget(requested));
        }

        let record = self.record(id)?;
        if record.kyc_status == requested {
            return Ok(StatusChangeOutcome::AlreadyInState(requested));
        }

        self.store
            .update_status(id, requested)
            .map_err(|err| match err {
                StoreError::NotFound => ReviewServiceError::RecordNotFound(id.0.clone()),
                other => ReviewServiceError::Store(other),
            })?;

        Ok(StatusChangeOutcome::Updated(requested))
    }
}
