use serde::{Deserialize, Serialize};

use super::domain::{KycId, KycRecord, KycStatus};

/// Data-fetching collaborator owning KYC records. Reads are cacheable on the
/// caller's side; a successful status update must leave both the single
/// record and the list stale so the next read observes the new status.
pub trait KycStore: Send + Sync {
    fn fetch(&self, id: &KycId) -> Result<Option<KycRecord>, StoreError>;
    fn list(&self) -> Result<Vec<KycRecord>, StoreError>;
    fn update_status(&self, id: &KycId, status: KycStatus) -> Result<(), StoreError>;
}

/// Error enumeration for store failures.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("record not found")]
    NotFound,
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

/// Trait describing the transient notification surface (toast rendering or
/// an equivalent adapter).
pub trait Notifier: Send + Sync {
    fn publish(&self, notification: Notification) -> Result<(), NotifyError>;
}

/// Notification dispatch error.
#[derive(Debug, thiserror::Error)]
pub enum NotifyError {
    #[error("notification transport unavailable: {0}")]
    Transport(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    Info,
    Success,
    Error,
}

/// Transient reviewer-facing message. The rendering layer decides how it is
/// shown; this crate only decides the kind and the copy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub kind: NotificationKind,
    pub message: String,
}

impl Notification {
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            kind: NotificationKind::Info,
            message: message.into(),
        }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self {
            kind: NotificationKind::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: NotificationKind::Error,
            message: message.into(),
        }
    }
}
