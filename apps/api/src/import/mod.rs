// Bulk recruiter import pipeline:
// fetch -> parse -> validate -> dedup -> insert -> report.
// Single-pass and sequential; row-level failures accumulate, they never
// abort the run. All storage access goes through the RecruiterStore trait.

pub mod csv;
pub mod dedup;
pub mod handlers;
pub mod insert;
pub mod report;
pub mod sheet;
pub mod validate;

use tracing::info;

use crate::errors::AppError;
use crate::store::{RecruiterStore, StoreError};

use dedup::DedupFailurePolicy;
use report::ImportReport;

#[derive(Debug, Clone, Copy)]
pub struct ImportOptions {
    pub skip_duplicates: bool,
    pub on_dedup_lookup_failure: DedupFailurePolicy,
}

/// Runs the pipeline over already-fetched CSV text.
///
/// Fatal preconditions (empty document, missing `email` column) abort the
/// run; everything downstream accumulates per-row outcomes into the report.
pub async fn run_import(
    store: &dyn RecruiterStore,
    csv_text: &str,
    options: &ImportOptions,
) -> Result<ImportReport, AppError> {
    let rows = csv::parse_csv(csv_text);
    let Some((header, data_rows)) = rows.split_first() else {
        return Err(AppError::UnprocessableEntity(
            "the fetched sheet is empty".to_string(),
        ));
    };

    let columns = validate::ColumnMap::from_header(header)
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let (candidates, validation_errors) = validate::validate_rows(&columns, data_rows);
    let valid_count = candidates.len();

    let deduped = dedup::filter_duplicates(
        store,
        candidates,
        options.skip_duplicates,
        options.on_dedup_lookup_failure,
    )
    .await
    .map_err(store_error_to_app)?;

    let inserted = insert::insert_candidates(store, &deduped.to_insert).await;

    info!(
        "import pipeline done: {} rows, {} valid, {} inserted, {} duplicates, {} invalid",
        data_rows.len(),
        valid_count,
        inserted.inserted,
        deduped.duplicate_count + inserted.duplicate_skips,
        validation_errors.len()
    );

    Ok(report::build_report(
        data_rows.len(),
        valid_count,
        validation_errors,
        deduped.duplicate_count,
        inserted,
    ))
}

fn store_error_to_app(e: StoreError) -> AppError {
    match e {
        StoreError::Database(e) => AppError::Database(e),
        StoreError::UniqueViolation => {
            AppError::Internal(anyhow::anyhow!("unexpected unique violation during lookup"))
        }
    }
}
