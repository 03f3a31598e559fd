//! Batch inserter — writes deduplicated candidates in fixed-size chunks,
//! falling back to per-record inserts when a chunk fails.
//!
//! Every record ends in exactly one terminal state: inserted, silently
//! deduplicated at insert time (unique-constraint race with a concurrent
//! run), or recorded as an insert error. No retries beyond the single
//! per-record fallback.

use tracing::warn;

use crate::models::recruiter::CandidateRecord;
use crate::store::{RecruiterStore, StoreError};

/// Records per bulk insert statement.
pub const INSERT_CHUNK_SIZE: usize = 100;

#[derive(Debug, Default)]
pub struct InsertOutcome {
    pub inserted: usize,
    /// Unique-constraint violations hit during the per-record fallback.
    pub duplicate_skips: usize,
    /// `"<email>: <message>"` for every record dropped on a non-uniqueness
    /// failure.
    pub errors: Vec<String>,
}

/// Inserts candidates chunk by chunk. Chunks are independent: one chunk's
/// failure never blocks the others.
pub async fn insert_candidates(
    store: &dyn RecruiterStore,
    records: &[CandidateRecord],
) -> InsertOutcome {
    let mut outcome = InsertOutcome::default();

    for chunk in records.chunks(INSERT_CHUNK_SIZE) {
        match store.insert_batch(chunk).await {
            Ok(()) => outcome.inserted += chunk.len(),
            Err(e) => {
                warn!(
                    "bulk insert of {} records failed: {e}; retrying records individually",
                    chunk.len()
                );
                for record in chunk {
                    match store.insert_one(record).await {
                        Ok(()) => outcome.inserted += 1,
                        Err(StoreError::UniqueViolation) => outcome.duplicate_skips += 1,
                        Err(e) => outcome.errors.push(format!("{}: {e}", record.email)),
                    }
                }
            }
        }
    }

    outcome
}
