use std::sync::Arc;

use sqlx::PgPool;

use crate::config::Config;
use crate::import::sheet::SheetClient;
use crate::store::RecruiterStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    /// Typed repository boundary for recruiter rows. Postgres in production,
    /// in-memory in tests.
    pub recruiters: Arc<dyn RecruiterStore>,
    pub sheets: SheetClient,
    pub config: Config,
}
