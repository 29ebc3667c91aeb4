use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::moderation::Moderation;

/// Identifier wrapper for KYC submissions.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct KycId(pub String);

/// Review status tracked on every KYC submission.
///
/// Serialized with the backend's capitalized labels so payloads round-trip
/// unchanged through the admin API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum KycStatus {
    Pending,
    Verified,
    Rejected,
}

impl KycStatus {
    pub const fn label(self) -> &'static str {
        match self {
            KycStatus::Pending => "Pending",
            KycStatus::Verified => "Verified",
            KycStatus::Rejected => "Rejected",
        }
    }

    /// Lower-case form used in reviewer-facing notification copy.
    pub const fn lower_label(self) -> &'static str {
        match self {
            KycStatus::Pending => "pending",
            KycStatus::Verified => "verified",
            KycStatus::Rejected => "rejected",
        }
    }

    /// Statuses a reviewer may request through the approve/decline controls.
    pub const fn is_reviewer_decision(self) -> bool {
        matches!(self, KycStatus::Verified | KycStatus::Rejected)
    }
}

/// Snapshot of a KYC submission as returned by the backend pipeline.
///
/// The view layer holds a read-only, possibly-stale copy refreshed on demand;
/// the only mutation this crate ever sends back is a status change. The
/// `moderation` branch may be absent or partially populated while the
/// pipeline is still running.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KycRecord {
    pub id: KycId,
    pub name: String,
    pub email: String,
    pub id_number: String,
    pub nationality: String,
    pub dob: NaiveDate,
    pub country_of_residence: String,
    pub address_line1: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
    pub document_type: String,
    pub document_image: String,
    pub id_issue_date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id_expiry_date: Option<NaiveDate>,
    pub id_issuing_country: String,
    pub selfie_image: String,
    pub kyc_status: KycStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub moderation: Option<Moderation>,
}

impl KycRecord {
    /// Single-line address used by list views.
    pub fn address_line(&self) -> String {
        format!(
            "{}, {}, {} - {}",
            self.address_line1, self.city, self.state, self.zip_code
        )
    }
}
