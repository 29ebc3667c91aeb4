//! KYC review core: the moderation payload schema, verdict derivation, the
//! reviewer session state machine, and the status-update workflow.

pub mod domain;
pub mod moderation;
pub mod router;
pub mod session;
pub mod store;
pub mod verdicts;
pub mod workflow;

#[cfg(test)]
mod tests;

pub use domain::{KycId, KycRecord, KycStatus};
pub use moderation::{
    CheckEntry, CheckPayload, CheckSeries, DocumentChecks, ExtractedImages, FaceChecks,
    MismatchDetail, Moderation, ModerationStatus, OcrCheck,
};
pub use router::review_router;
pub use session::{ModalView, ReviewSession, SelectedCard, SessionEffect};
pub use store::{
    KycStore, Notification, NotificationKind, Notifier, NotifyError, StoreError,
};
pub use verdicts::{
    indicator_severity, ComparisonVerdict, LivenessVerdict, ModerationSummaryView,
    ModerationVerdicts, Severity,
};
pub use workflow::{ReviewService, ReviewServiceError, StatusChangeOutcome};
