//! Explicit schema for the backend's moderation payload.
//!
//! The pipeline writes this structure incrementally, so every nested field is
//! optional and deserialization must succeed for any partially populated
//! document. Default substitution for display lives in [`super::verdicts`],
//! not here; this module only models the wire shape.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Moderation payload attached to a KYC record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Moderation {
    #[serde(default)]
    pub status: ModerationStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub document: Option<DocumentChecks>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub face: Option<FaceChecks>,
}

/// Top-level pipeline status. Only `Pending` and `Failed` block the results
/// view; every other label the backend may emit reads as completed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ModerationStatus {
    Pending,
    Failed,
    #[default]
    #[serde(other)]
    Completed,
}

impl ModerationStatus {
    pub const fn blocks_results(self) -> bool {
        matches!(self, ModerationStatus::Pending | ModerationStatus::Failed)
    }
}

/// Document-side checks: OCR field matching and document liveness.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentChecks {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ocr: Option<OcrCheck>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub liveness: Option<CheckSeries>,
}

/// Face-side checks: selfie-to-document comparison and face liveness.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FaceChecks {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comparison: Option<CheckSeries>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub liveness: Option<CheckSeries>,
}

/// OCR check result. `mismatch_results` is authoritative only when
/// `is_match` is false; when the fields matched it is absent or ignored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OcrCheck {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_match: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recognition_result: Option<CheckSeries>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mismatch_results: Option<BTreeMap<String, MismatchDetail>>,
}

/// Disagreement between an OCR-extracted field and the applicant-submitted
/// value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MismatchDetail {
    #[serde(default)]
    pub ocr_value: String,
    #[serde(default)]
    pub kyc_value: String,
    #[serde(default)]
    pub reason: String,
    /// Present on fuzzy-compared fields such as the address.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub similarity_score: Option<f64>,
}

/// The backend wraps every check result in a `data` array; display only ever
/// consumes the first entry.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CheckSeries {
    #[serde(default)]
    pub data: Vec<CheckEntry>,
}

impl CheckSeries {
    pub fn first_payload(&self) -> Option<&CheckPayload> {
        self.data.first().and_then(|entry| entry.data.as_ref())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CheckEntry {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<CheckPayload>,
}

/// Union of the per-check payload fields. Which fields are populated depends
/// on the check that produced the entry (OCR carries `score`/`ocr`/`image`,
/// comparison carries `similarity`, liveness carries `liveness_score`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CheckPayload {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub similarity: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub liveness_score: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<String>,
    /// Recognized field mapping. Values are left as raw JSON since the OCR
    /// engine mixes strings, numbers, and booleans (`validState`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ocr: Option<BTreeMap<String, serde_json::Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<ExtractedImages>,
}

/// Base64-encoded crops the OCR engine extracts from the document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractedImages {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub portrait: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ghost_portrait: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub document_front_side: Option<String>,
}

impl ExtractedImages {
    pub fn is_empty(&self) -> bool {
        self.portrait.is_none() && self.ghost_portrait.is_none() && self.document_front_side.is_none()
    }
}
