use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Subscription tier shown next to a recruiter in the admin UI.
/// Low-stakes display attribute: unknown values coerce to `Free`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Tier {
    #[default]
    Free,
    Pro,
    ProMax,
}

impl Tier {
    pub fn as_str(&self) -> &'static str {
        match self {
            Tier::Free => "FREE",
            Tier::Pro => "PRO",
            Tier::ProMax => "PRO_MAX",
        }
    }

    /// Parses a tier cell, coercing anything unrecognized to `Free`.
    pub fn parse_or_default(raw: &str) -> Tier {
        match raw.trim().to_uppercase().as_str() {
            "PRO" => Tier::Pro,
            "PRO_MAX" => Tier::ProMax,
            _ => Tier::Free,
        }
    }
}

/// A validated, not-yet-persisted recruiter entry produced by the row
/// validator. Email is lowercased, trimmed, and shape-checked before one of
/// these is constructed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateRecord {
    pub name: String,
    pub email: String,
    pub company: Option<String>,
    pub domain: Option<String>,
    pub tier: Tier,
    pub quality_score: Option<f64>,
}

/// A persisted recruiter row. `email` carries a UNIQUE constraint.
/// Rows are written by the import pipeline and managed by admin surfaces
/// elsewhere in the system.
#[allow(dead_code)]
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct RecruiterRow {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub company: Option<String>,
    pub domain: Option<String>,
    pub tier: String,
    pub quality_score: Option<f64>,
    pub created_at: DateTime<Utc>,
}
