//! Pure projection of the moderation payload into display verdicts.
//!
//! Every accessor is total: missing data at any depth degrades to a default
//! instead of failing, so the dashboard renders even for a record that is
//! still mid-pipeline. Scores default to 0 and match verdicts default to the
//! negative outcome. Liveness is the one deliberate exception: an absent
//! result reads as genuine, matching the backend's existing behavior.

use std::collections::BTreeMap;

use serde::Serialize;

use super::moderation::{
    CheckPayload, ExtractedImages, MismatchDetail, Moderation, OcrCheck,
};

/// Anti-spoof judgment for a document or face image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LivenessVerdict {
    Genuine,
    Spoof,
}

impl LivenessVerdict {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Genuine => "genuine",
            Self::Spoof => "spoof",
        }
    }

    pub const fn is_spoof(self) -> bool {
        matches!(self, Self::Spoof)
    }

    fn from_result(result: Option<&str>) -> Self {
        match result {
            Some(value) if value.trim().eq_ignore_ascii_case("spoof") => Self::Spoof,
            _ => Self::Genuine,
        }
    }
}

/// Selfie-to-document face comparison judgment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ComparisonVerdict {
    Same,
    Different,
}

impl ComparisonVerdict {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Same => "same",
            Self::Different => "different",
        }
    }

    pub const fn is_match(self) -> bool {
        matches!(self, Self::Same)
    }

    fn from_result(result: Option<&str>) -> Self {
        match result {
            Some(value) if value.trim().eq_ignore_ascii_case("same") => Self::Same,
            _ => Self::Different,
        }
    }
}

/// Gauge coloring bucket shared by every circular score indicator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Low,
    Medium,
    High,
}

impl Severity {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

/// Low below 0.5, medium below 0.8, high from 0.8 upward.
pub fn indicator_severity(score: f64) -> Severity {
    if score < 0.5 {
        Severity::Low
    } else if score < 0.8 {
        Severity::Medium
    } else {
        Severity::High
    }
}

/// Recognized-field key the OCR engine uses for its own bookkeeping; never a
/// displayable field.
const VALID_STATE_KEY: &str = "validState";

/// The fixed set of verdicts derived from a moderation payload.
#[derive(Debug, Clone, PartialEq)]
pub struct ModerationVerdicts {
    pub ocr_score: f64,
    pub ocr_is_match: bool,
    pub mismatch_fields: BTreeMap<String, MismatchDetail>,
    pub recognized_fields: BTreeMap<String, String>,
    pub extracted_images: ExtractedImages,
    pub document_liveness: LivenessVerdict,
    pub face_comparison_score: f64,
    pub face_comparison: ComparisonVerdict,
    pub face_liveness_score: f64,
    pub face_liveness: LivenessVerdict,
}

impl ModerationVerdicts {
    /// Derive every verdict with safe defaults. Never panics, never returns
    /// a partially initialized value.
    pub fn derive(moderation: Option<&Moderation>) -> Self {
        let document_ocr = moderation
            .and_then(|m| m.document.as_ref())
            .and_then(|document| document.ocr.as_ref());
        let ocr_payload = document_ocr
            .and_then(|ocr| ocr.recognition_result.as_ref())
            .and_then(|series| series.first_payload());

        let ocr_is_match = document_ocr
            .and_then(|ocr| ocr.is_match)
            .unwrap_or(false);

        let document_liveness_payload = moderation
            .and_then(|m| m.document.as_ref())
            .and_then(|document| document.liveness.as_ref())
            .and_then(|series| series.first_payload());

        let face_comparison_payload = moderation
            .and_then(|m| m.face.as_ref())
            .and_then(|face| face.comparison.as_ref())
            .and_then(|series| series.first_payload());

        let face_liveness_payload = moderation
            .and_then(|m| m.face.as_ref())
            .and_then(|face| face.liveness.as_ref())
            .and_then(|series| series.first_payload());

        Self {
            ocr_score: ocr_payload.and_then(|p| p.score).unwrap_or(0.0),
            ocr_is_match,
            mismatch_fields: mismatch_fields(document_ocr, ocr_is_match),
            recognized_fields: recognized_fields(ocr_payload),
            extracted_images: ocr_payload
                .and_then(|p| p.image.clone())
                .unwrap_or_default(),
            document_liveness: LivenessVerdict::from_result(
                document_liveness_payload.and_then(|p| p.result.as_deref()),
            ),
            face_comparison_score: face_comparison_payload
                .and_then(|p| p.similarity)
                .unwrap_or(0.0),
            face_comparison: ComparisonVerdict::from_result(
                face_comparison_payload.and_then(|p| p.result.as_deref()),
            ),
            face_liveness_score: face_liveness_payload
                .and_then(|p| p.liveness_score)
                .unwrap_or(0.0),
            face_liveness: LivenessVerdict::from_result(
                face_liveness_payload.and_then(|p| p.result.as_deref()),
            ),
        }
    }

    /// Serializable summary consumed by the rendering layer: card labels,
    /// gauge severities, and the detail maps, with no layout opinions.
    pub fn summary_view(&self) -> ModerationSummaryView {
        ModerationSummaryView {
            ocr_score: self.ocr_score,
            ocr_score_severity: indicator_severity(self.ocr_score).label(),
            ocr_is_match: self.ocr_is_match,
            ocr_card_label: if self.ocr_is_match { "Matched" } else { "Mismatched" },
            mismatch_fields: self.mismatch_fields.clone(),
            recognized_fields: self.recognized_fields.clone(),
            extracted_images: self.extracted_images.clone(),
            document_liveness: self.document_liveness.label(),
            face_comparison_score: self.face_comparison_score,
            face_comparison_severity: indicator_severity(self.face_comparison_score).label(),
            face_card_label: if self.face_comparison.is_match() {
                "Matched"
            } else {
                "Not Matched"
            },
            face_liveness_score: self.face_liveness_score,
            face_liveness_severity: indicator_severity(self.face_liveness_score).label(),
            liveliness_card_label: if self.face_liveness.is_spoof() {
                "Failed"
            } else {
                "Passed"
            },
        }
    }
}

fn mismatch_fields(
    ocr: Option<&OcrCheck>,
    is_match: bool,
) -> BTreeMap<String, MismatchDetail> {
    if is_match {
        return BTreeMap::new();
    }
    ocr.and_then(|check| check.mismatch_results.clone())
        .unwrap_or_default()
}

fn recognized_fields(payload: Option<&CheckPayload>) -> BTreeMap<String, String> {
    payload
        .and_then(|p| p.ocr.as_ref())
        .map(|fields| {
            fields
                .iter()
                .filter(|(key, _)| key.as_str() != VALID_STATE_KEY)
                .map(|(key, value)| (key.clone(), display_value(value)))
                .collect()
        })
        .unwrap_or_default()
}

fn display_value(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

/// Flat, label-bearing projection for the view layer.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ModerationSummaryView {
    pub ocr_score: f64,
    pub ocr_score_severity: &'static str,
    pub ocr_is_match: bool,
    pub ocr_card_label: &'static str,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub mismatch_fields: BTreeMap<String, MismatchDetail>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub recognized_fields: BTreeMap<String, String>,
    #[serde(skip_serializing_if = "ExtractedImages::is_empty")]
    pub extracted_images: ExtractedImages,
    pub document_liveness: &'static str,
    pub face_comparison_score: f64,
    pub face_comparison_severity: &'static str,
    pub face_card_label: &'static str,
    pub face_liveness_score: f64,
    pub face_liveness_severity: &'static str,
    pub liveliness_card_label: &'static str,
}
