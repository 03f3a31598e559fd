//! Admin authentication — bearer-credential extractor backed by the
//! `admin_members` table. Handlers that take an `AdminUser` argument are
//! admin-only; there is no global auth middleware.

use async_trait::async_trait;
use axum::{extract::FromRequestParts, http::header::AUTHORIZATION, http::request::Parts};

use crate::errors::AppError;
use crate::state::AppState;

/// An authenticated admin, resolved from the bearer token.
pub struct AdminUser {
    pub email: String,
}

fn bearer_token(header: &str) -> Option<&str> {
    header
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|t| !t.is_empty())
}

#[async_trait]
impl FromRequestParts<AppState> for AdminUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .ok_or(AppError::Unauthorized)?;
        let token = bearer_token(header).ok_or(AppError::Unauthorized)?;

        let email: Option<String> =
            sqlx::query_scalar("SELECT email FROM admin_members WHERE api_token = $1")
                .bind(token)
                .fetch_optional(&state.db)
                .await?;

        let email = email.ok_or(AppError::Forbidden)?;
        Ok(AdminUser { email })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bearer_token_extracted() {
        assert_eq!(bearer_token("Bearer abc123"), Some("abc123"));
        assert_eq!(bearer_token("Bearer   abc123  "), Some("abc123"));
    }

    #[test]
    fn test_bearer_token_rejects_other_schemes() {
        assert_eq!(bearer_token("Basic abc123"), None);
        assert_eq!(bearer_token("abc123"), None);
    }

    #[test]
    fn test_bearer_token_rejects_empty() {
        assert_eq!(bearer_token("Bearer "), None);
        assert_eq!(bearer_token("Bearer"), None);
    }
}
