use anyhow::{bail, Context, Result};

use crate::import::dedup::DedupFailurePolicy;

/// Application configuration loaded from environment variables.
/// Startup fails if required variables are missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub port: u16,
    pub rust_log: String,
    /// What the dedup filter does when an existence-lookup batch fails.
    pub dedup_failure_policy: DedupFailurePolicy,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            database_url: require_env("DATABASE_URL")?,
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            dedup_failure_policy: parse_dedup_policy(
                &std::env::var("DEDUP_LOOKUP_FAILURE").unwrap_or_else(|_| "assume-new".to_string()),
            )?,
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn parse_dedup_policy(raw: &str) -> Result<DedupFailurePolicy> {
    match raw {
        "assume-new" => Ok(DedupFailurePolicy::AssumeNew),
        "abort-run" => Ok(DedupFailurePolicy::AbortRun),
        other => bail!("DEDUP_LOOKUP_FAILURE must be 'assume-new' or 'abort-run', got '{other}'"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_dedup_policy() {
        assert_eq!(
            parse_dedup_policy("assume-new").unwrap(),
            DedupFailurePolicy::AssumeNew
        );
        assert_eq!(
            parse_dedup_policy("abort-run").unwrap(),
            DedupFailurePolicy::AbortRun
        );
        assert!(parse_dedup_policy("whatever").is_err());
    }
}
