use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::auth::AdminUser;
use crate::errors::AppError;
use crate::import::report::{ImportReport, ERROR_SAMPLE_LIMIT};
use crate::import::sheet::SheetError;
use crate::import::{run_import, ImportOptions};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ImportRequest {
    pub sheet_url: Option<String>,
    #[serde(default = "default_skip_duplicates")]
    pub skip_duplicates: bool,
}

fn default_skip_duplicates() -> bool {
    true
}

#[derive(Debug, Serialize)]
pub struct ImportStats {
    pub total_rows: usize,
    pub valid_recruiters: usize,
    pub inserted: usize,
    pub skipped: usize,
    pub skipped_invalid: usize,
    pub errors: usize,
}

#[derive(Debug, Serialize)]
pub struct ImportErrorDetail {
    pub validation_errors: Vec<String>,
    pub insert_errors: Vec<String>,
    pub total_count: usize,
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct ImportResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub stats: ImportStats,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<ImportErrorDetail>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
}

impl From<ImportReport> for ImportResponse {
    fn from(report: ImportReport) -> Self {
        let message = format!(
            "Imported {} recruiters ({} duplicates skipped, {} invalid rows)",
            report.inserted_count, report.duplicate_skipped_count, report.invalid_skipped_count
        );

        let errors = (report.total_error_count > 0).then(|| ImportErrorDetail {
            message: format!(
                "{} rows failed; showing up to {} errors of each kind",
                report.total_error_count, ERROR_SAMPLE_LIMIT
            ),
            validation_errors: report.validation_errors,
            insert_errors: report.insert_errors,
            total_count: report.total_error_count,
        });

        ImportResponse {
            success: true,
            message: Some(message),
            stats: ImportStats {
                total_rows: report.total_rows,
                valid_recruiters: report.valid_count,
                inserted: report.inserted_count,
                skipped: report.duplicate_skipped_count,
                skipped_invalid: report.invalid_skipped_count,
                errors: report.total_error_count,
            },
            errors,
            warning: report.warning,
        }
    }
}

/// POST /api/v1/admin/recruiters/import
pub async fn handle_import(
    State(state): State<AppState>,
    admin: AdminUser,
    Json(req): Json<ImportRequest>,
) -> Result<Json<ImportResponse>, AppError> {
    let sheet_url = req
        .sheet_url
        .as_deref()
        .map(str::trim)
        .filter(|u| !u.is_empty())
        .ok_or_else(|| AppError::Validation("sheet_url is required".to_string()))?;

    info!("Recruiter import started by {} from {sheet_url}", admin.email);

    let csv_text = state
        .sheets
        .fetch_csv(sheet_url)
        .await
        .map_err(|e| match e {
            SheetError::BadUrl(_) => AppError::Validation(e.to_string()),
            SheetError::Http(_) | SheetError::Status(_) => {
                AppError::UnprocessableEntity(e.to_string())
            }
        })?;

    let options = ImportOptions {
        skip_duplicates: req.skip_duplicates,
        on_dedup_lookup_failure: state.config.dedup_failure_policy,
    };
    let report = run_import(state.recruiters.as_ref(), &csv_text, &options).await?;

    info!(
        "Recruiter import finished: {} inserted, {} duplicates skipped, {} errors",
        report.inserted_count, report.duplicate_skipped_count, report.total_error_count
    );

    Ok(Json(report.into()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::import::insert::InsertOutcome;

    #[test]
    fn test_skip_duplicates_defaults_true() {
        let req: ImportRequest = serde_json::from_str(r#"{"sheet_url": "x"}"#).unwrap();
        assert!(req.skip_duplicates);
        let req: ImportRequest =
            serde_json::from_str(r#"{"sheet_url": "x", "skip_duplicates": false}"#).unwrap();
        assert!(!req.skip_duplicates);
    }

    #[test]
    fn test_response_omits_errors_when_clean() {
        let report = ImportReport {
            total_rows: 2,
            valid_count: 2,
            inserted_count: 2,
            duplicate_skipped_count: 0,
            invalid_skipped_count: 0,
            validation_errors: vec![],
            insert_errors: vec![],
            total_error_count: 0,
            warning: None,
        };
        let response = ImportResponse::from(report);
        assert!(response.success);
        assert!(response.errors.is_none());
        assert!(response.warning.is_none());
        assert_eq!(response.stats.inserted, 2);

        let json = serde_json::to_value(&response).unwrap();
        assert!(json.get("errors").is_none());
        assert!(json.get("warning").is_none());
    }

    #[test]
    fn test_response_carries_error_detail() {
        let report = ImportReport {
            total_rows: 3,
            valid_count: 2,
            inserted_count: 1,
            duplicate_skipped_count: 0,
            invalid_skipped_count: 1,
            validation_errors: vec!["Row 2: invalid email format: bad".to_string()],
            insert_errors: vec!["x@co.com: pool timed out".to_string()],
            total_error_count: 2,
            warning: None,
        };
        let response = ImportResponse::from(report);
        let detail = response.errors.unwrap();
        assert_eq!(detail.total_count, 2);
        assert_eq!(detail.validation_errors.len(), 1);
        assert_eq!(detail.insert_errors.len(), 1);
        assert_eq!(response.stats.errors, 2);
        assert_eq!(response.stats.skipped_invalid, 1);
    }

    #[test]
    fn test_insert_outcome_feeds_stats() {
        let insert = InsertOutcome {
            inserted: 4,
            duplicate_skips: 1,
            errors: vec![],
        };
        let report = crate::import::report::build_report(6, 5, vec![], 1, insert);
        let response = ImportResponse::from(report);
        assert_eq!(response.stats.inserted, 4);
        assert_eq!(response.stats.skipped, 2);
    }
}
