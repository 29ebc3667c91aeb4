use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, put},
    Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::warn;

use super::domain::{KycId, KycRecord, KycStatus};
use super::store::{KycStore, Notification, Notifier};
use super::verdicts::ModerationVerdicts;
use super::workflow::{failure_notification, ReviewService, ReviewServiceError};

/// Shared handler state: the review service plus the notification surface
/// the outcome copy is published through.
pub struct ReviewState<S, N> {
    pub service: Arc<ReviewService<S>>,
    pub notifier: Arc<N>,
}

impl<S, N> Clone for ReviewState<S, N> {
    fn clone(&self) -> Self {
        Self {
            service: Arc::clone(&self.service),
            notifier: Arc::clone(&self.notifier),
        }
    }
}

/// Router builder exposing the reviewer-facing HTTP endpoints.
pub fn review_router<S, N>(service: Arc<ReviewService<S>>, notifier: Arc<N>) -> Router
where
    S: KycStore + 'static,
    N: Notifier + 'static,
{
    let state = ReviewState { service, notifier };
    Router::new()
        .route("/api/v1/kyc", get(list_handler::<S, N>))
        .route("/api/v1/kyc/:id/admin", get(record_handler::<S, N>))
        .route("/api/v1/kyc/:id/status", put(status_handler::<S, N>))
        .with_state(state)
}

/// Sanitized row for the submission list screen.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct KycSummaryView {
    pub id: KycId,
    pub name: String,
    pub email: String,
    pub kyc_status: &'static str,
    pub moderation_pending: bool,
}

impl KycSummaryView {
    fn from_record(record: &KycRecord) -> Self {
        Self {
            id: record.id.clone(),
            name: record.name.clone(),
            email: record.email.clone(),
            kyc_status: record.kyc_status.label(),
            moderation_pending: record
                .moderation
                .as_ref()
                .map(|m| m.status.blocks_results())
                .unwrap_or(true),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct StatusChangeRequest {
    kyc_status: KycStatus,
}

pub(crate) async fn list_handler<S, N>(State(state): State<ReviewState<S, N>>) -> Response
where
    S: KycStore + 'static,
    N: Notifier + 'static,
{
    match state.service.all_records() {
        Ok(records) => {
            let rows: Vec<KycSummaryView> =
                records.iter().map(KycSummaryView::from_record).collect();
            (StatusCode::OK, axum::Json(rows)).into_response()
        }
        Err(error) => service_error_response(error),
    }
}

pub(crate) async fn record_handler<S, N>(
    State(state): State<ReviewState<S, N>>,
    Path(id): Path<String>,
) -> Response
where
    S: KycStore + 'static,
    N: Notifier + 'static,
{
    let id = KycId(id);
    match state.service.record(&id) {
        Ok(record) => {
            let summary = ModerationVerdicts::derive(record.moderation.as_ref()).summary_view();
            let payload = json!({
                "kyc": record,
                "moderationSummary": summary,
            });
            (StatusCode::OK, axum::Json(payload)).into_response()
        }
        Err(error) => service_error_response(error),
    }
}

pub(crate) async fn status_handler<S, N>(
    State(state): State<ReviewState<S, N>>,
    Path(id): Path<String>,
    axum::Json(request): axum::Json<StatusChangeRequest>,
) -> Response
where
    S: KycStore + 'static,
    N: Notifier + 'static,
{
    let id = KycId(id);
    match state.service.submit_status_change(&id, request.kyc_status) {
        Ok(outcome) => {
            let notification = outcome.notification();
            publish(&*state.notifier, notification.clone());
            let payload = json!({
                "outcome": match outcome {
                    super::workflow::StatusChangeOutcome::AlreadyInState(_) => "already_in_state",
                    super::workflow::StatusChangeOutcome::Updated(_) => "updated",
                },
                "kycStatus": request.kyc_status.label(),
                "notification": notification,
            });
            (StatusCode::OK, axum::Json(payload)).into_response()
        }
        Err(error) => {
            if matches!(error, ReviewServiceError::Store(_)) {
                publish(&*state.notifier, failure_notification());
            }
            service_error_response(error)
        }
    }
}

fn publish<N: Notifier>(notifier: &N, notification: Notification) {
    if let Err(err) = notifier.publish(notification) {
        warn!(%err, "notification dropped");
    }
}

fn service_error_response(error: ReviewServiceError) -> Response {
    let status = match &error {
        ReviewServiceError::RecordNotFound(_) => StatusCode::NOT_FOUND,
        ReviewServiceError::UnreviewableTarget(_) => StatusCode::UNPROCESSABLE_ENTITY,
        ReviewServiceError::Store(_) => StatusCode::SERVICE_UNAVAILABLE,
    };
    let payload = json!({
        "error": error.to_string(),
    });
    (status, axum::Json(payload)).into_response()
}
