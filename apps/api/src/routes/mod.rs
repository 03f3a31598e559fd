pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::import::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route(
            "/api/v1/admin/recruiters/import",
            post(handlers::handle_import),
        )
        .with_state(state)
}
