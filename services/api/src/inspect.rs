use crate::infra::load_records;
use chrono::Local;
use clap::Args;
use kyc_review::error::AppError;
use kyc_review::review::{
    indicator_severity, KycRecord, ModerationStatus, ModerationVerdicts,
};
use std::path::PathBuf;

#[derive(Args, Debug)]
pub(crate) struct InspectArgs {
    /// JSON file holding an array of KYC records
    #[arg(long)]
    pub(crate) records: PathBuf,
    /// Identifier of the record to inspect (defaults to every record)
    #[arg(long)]
    pub(crate) id: Option<String>,
    /// Emit the derived summary as JSON instead of the text report
    #[arg(long)]
    pub(crate) json: bool,
}

pub(crate) fn run_inspect(args: InspectArgs) -> Result<(), AppError> {
    let InspectArgs { records, id, json } = args;

    let records = load_records(&records)?;
    let selected: Vec<&KycRecord> = match &id {
        Some(id) => records.iter().filter(|record| record.id.0 == *id).collect(),
        None => records.iter().collect(),
    };

    if selected.is_empty() {
        let wanted = id.unwrap_or_else(|| "<any>".to_string());
        return Err(AppError::Review(
            kyc_review::review::ReviewServiceError::RecordNotFound(wanted),
        ));
    }

    if json {
        let summaries: Vec<serde_json::Value> = selected
            .iter()
            .map(|record| {
                let summary =
                    ModerationVerdicts::derive(record.moderation.as_ref()).summary_view();
                serde_json::json!({ "id": record.id, "summary": summary })
            })
            .collect();
        println!(
            "{}",
            serde_json::to_string_pretty(&summaries)
                .map_err(|err| std::io::Error::new(std::io::ErrorKind::InvalidData, err))?
        );
        return Ok(());
    }

    println!("KYC moderation report (generated {})", Local::now().date_naive());
    for record in selected {
        render_record(record);
    }
    Ok(())
}

fn render_record(record: &KycRecord) {
    println!("\n{} <{}>", record.name, record.email);
    println!(
        "- Record {} | status {} | {} {}",
        record.id.0,
        record.kyc_status.label(),
        record.document_type,
        record.id_number
    );
    println!("- Address: {}", record.address_line());

    let status = record
        .moderation
        .as_ref()
        .map(|m| m.status)
        .unwrap_or_default();
    match status {
        ModerationStatus::Pending => {
            println!("- Moderation still pending, no results to show");
            return;
        }
        ModerationStatus::Failed => {
            println!("- Moderation failed, record needs manual review");
            return;
        }
        ModerationStatus::Completed => {}
    }

    let verdicts = ModerationVerdicts::derive(record.moderation.as_ref());

    println!(
        "- OCR: {} (score {:.2}, {})",
        if verdicts.ocr_is_match { "Matched" } else { "Mismatched" },
        verdicts.ocr_score,
        indicator_severity(verdicts.ocr_score).label()
    );
    for (field, detail) in &verdicts.mismatch_fields {
        println!(
            "  - {} mismatch: ocr '{}' vs submitted '{}' ({})",
            field, detail.ocr_value, detail.kyc_value, detail.reason
        );
    }
    for (field, value) in &verdicts.recognized_fields {
        println!("  - recognized {}: {}", field, value);
    }

    println!(
        "- Face comparison: {} (similarity {:.2}, {})",
        verdicts.face_comparison.label(),
        verdicts.face_comparison_score,
        indicator_severity(verdicts.face_comparison_score).label()
    );
    println!(
        "- Face liveness: {} (score {:.2}) | document liveness: {}",
        verdicts.face_liveness.label(),
        verdicts.face_liveness_score,
        verdicts.document_liveness.label()
    );
}
