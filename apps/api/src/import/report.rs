//! Result reporter — pure aggregation of the pipeline stages into one
//! terminal report. Error samples are capped so the response stays bounded
//! regardless of input size; true totals are reported alongside.

use crate::import::insert::InsertOutcome;
use crate::import::validate::ValidationError;

/// Errors of each kind included verbatim in the response.
pub const ERROR_SAMPLE_LIMIT: usize = 50;

/// Known row ceiling of published sheet CSV exports. Hitting it usually
/// means the export was truncated upstream.
pub const EXPORT_ROW_CAP: usize = 100_000;

#[derive(Debug)]
pub struct ImportReport {
    pub total_rows: usize,
    pub valid_count: usize,
    pub inserted_count: usize,
    pub duplicate_skipped_count: usize,
    pub invalid_skipped_count: usize,
    /// Capped samples; see `total_error_count` for the real totals.
    pub validation_errors: Vec<String>,
    pub insert_errors: Vec<String>,
    pub total_error_count: usize,
    pub warning: Option<String>,
}

/// Combines row counts, validator output, dedup counts, and inserter output.
pub fn build_report(
    total_rows: usize,
    valid_count: usize,
    validation_errors: Vec<ValidationError>,
    pre_insert_duplicates: usize,
    insert: InsertOutcome,
) -> ImportReport {
    let total_error_count = validation_errors.len() + insert.errors.len();
    let invalid_skipped_count = validation_errors.len();

    let validation_sample: Vec<String> = validation_errors
        .iter()
        .take(ERROR_SAMPLE_LIMIT)
        .map(|e| format!("Row {}: {}", e.row, e.message))
        .collect();
    let insert_sample: Vec<String> = insert
        .errors
        .iter()
        .take(ERROR_SAMPLE_LIMIT)
        .cloned()
        .collect();

    let warning = (total_rows >= EXPORT_ROW_CAP).then(|| {
        format!(
            "the sheet export returned {total_rows} rows, at the known export cap; \
             the source may have been truncated"
        )
    });

    ImportReport {
        total_rows,
        valid_count,
        inserted_count: insert.inserted,
        duplicate_skipped_count: pre_insert_duplicates + insert.duplicate_skips,
        invalid_skipped_count,
        validation_errors: validation_sample,
        insert_errors: insert_sample,
        total_error_count,
        warning,
    }
}
