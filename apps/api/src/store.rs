//! Recruiter persistence — trait-based store so the import pipeline never
//! sees raw SQL or untyped rows.
//!
//! `AppState` holds an `Arc<dyn RecruiterStore>`; the Postgres implementation
//! lives beside the trait, and tests swap in an in-memory store.

use std::collections::HashSet;

use async_trait::async_trait;
use sqlx::error::ErrorKind;
use sqlx::{PgPool, Postgres, QueryBuilder};
use thiserror::Error;
use uuid::Uuid;

use crate::models::recruiter::CandidateRecord;

#[derive(Debug, Error)]
pub enum StoreError {
    /// An insert collided with the UNIQUE constraint on `email`.
    #[error("unique constraint violation")]
    UniqueViolation,

    #[error(transparent)]
    Database(sqlx::Error),
}

/// Maps a sqlx error into the store taxonomy, pulling unique-constraint
/// violations out so callers can treat them as duplicate skips.
fn classify(e: sqlx::Error) -> StoreError {
    match &e {
        sqlx::Error::Database(db) if matches!(db.kind(), ErrorKind::UniqueViolation) => {
            StoreError::UniqueViolation
        }
        _ => StoreError::Database(e),
    }
}

/// The persistence capability consumed by the import pipeline.
///
/// Carried in `AppState` as `Arc<dyn RecruiterStore>`.
#[async_trait]
pub trait RecruiterStore: Send + Sync {
    /// Returns the subset of `emails` that already exist in storage.
    async fn find_existing_emails(&self, emails: &[String]) -> Result<HashSet<String>, StoreError>;

    /// Inserts a batch in one statement. All-or-nothing: a failure anywhere
    /// in the batch fails the whole call.
    async fn insert_batch(&self, batch: &[CandidateRecord]) -> Result<(), StoreError>;

    /// Inserts a single record. Used as the fallback path after a failed
    /// batch insert.
    async fn insert_one(&self, record: &CandidateRecord) -> Result<(), StoreError>;
}

/// Postgres-backed store.
pub struct PgRecruiterStore {
    pool: PgPool,
}

impl PgRecruiterStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RecruiterStore for PgRecruiterStore {
    async fn find_existing_emails(&self, emails: &[String]) -> Result<HashSet<String>, StoreError> {
        let found: Vec<String> =
            sqlx::query_scalar("SELECT email FROM recruiters WHERE email = ANY($1)")
                .bind(emails)
                .fetch_all(&self.pool)
                .await
                .map_err(classify)?;
        Ok(found.into_iter().collect())
    }

    async fn insert_batch(&self, batch: &[CandidateRecord]) -> Result<(), StoreError> {
        if batch.is_empty() {
            return Ok(());
        }

        let mut qb: QueryBuilder<Postgres> = QueryBuilder::new(
            "INSERT INTO recruiters (id, name, email, company, domain, tier, quality_score) ",
        );
        qb.push_values(batch, |mut b, record| {
            b.push_bind(Uuid::new_v4())
                .push_bind(&record.name)
                .push_bind(&record.email)
                .push_bind(&record.company)
                .push_bind(&record.domain)
                .push_bind(record.tier.as_str())
                .push_bind(record.quality_score);
        });

        qb.build().execute(&self.pool).await.map_err(classify)?;
        Ok(())
    }

    async fn insert_one(&self, record: &CandidateRecord) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            INSERT INTO recruiters (id, name, email, company, domain, tier, quality_score)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&record.name)
        .bind(&record.email)
        .bind(&record.company)
        .bind(&record.domain)
        .bind(record.tier.as_str())
        .bind(record.quality_score)
        .execute(&self.pool)
        .await
        .map_err(classify)?;
        Ok(())
    }
}
