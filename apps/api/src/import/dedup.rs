//! Deduplication filter — drops candidates whose email already exists in
//! storage, so re-submitting a sheet is safe.

use std::collections::HashSet;

use tracing::warn;

use crate::models::recruiter::CandidateRecord;
use crate::store::{RecruiterStore, StoreError};

/// Emails per existence-lookup query. Tunable to respect backend query-size
/// limits; not correctness-relevant.
pub const LOOKUP_BATCH_SIZE: usize = 200;

/// What to do when an existence-lookup batch itself fails.
///
/// `AssumeNew` is fail-open: the batch is treated as "no matches", which can
/// let duplicates through to the insert stage, where the unique constraint
/// still catches them. `AbortRun` fails the whole import instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DedupFailurePolicy {
    AssumeNew,
    AbortRun,
}

#[derive(Debug)]
pub struct DedupOutcome {
    pub to_insert: Vec<CandidateRecord>,
    pub duplicate_count: usize,
}

/// Partitions candidates into to-insert and already-present sets.
/// Passthrough when `skip_duplicates` is false.
pub async fn filter_duplicates(
    store: &dyn RecruiterStore,
    candidates: Vec<CandidateRecord>,
    skip_duplicates: bool,
    on_lookup_failure: DedupFailurePolicy,
) -> Result<DedupOutcome, StoreError> {
    if !skip_duplicates {
        return Ok(DedupOutcome {
            to_insert: candidates,
            duplicate_count: 0,
        });
    }

    let emails: Vec<String> = candidates.iter().map(|c| c.email.clone()).collect();
    let mut existing: HashSet<String> = HashSet::new();

    for batch in emails.chunks(LOOKUP_BATCH_SIZE) {
        match store.find_existing_emails(batch).await {
            Ok(found) => existing.extend(found),
            Err(e) => match on_lookup_failure {
                DedupFailurePolicy::AssumeNew => {
                    warn!(
                        "existence lookup failed for a batch of {}: {e}; assuming no matches",
                        batch.len()
                    );
                }
                DedupFailurePolicy::AbortRun => return Err(e),
            },
        }
    }

    let mut to_insert = Vec::with_capacity(candidates.len());
    let mut duplicate_count = 0;
    for candidate in candidates {
        if existing.contains(&candidate.email) {
            duplicate_count += 1;
        } else {
            to_insert.push(candidate);
        }
    }

    Ok(DedupOutcome {
        to_insert,
        duplicate_count,
    })
}
