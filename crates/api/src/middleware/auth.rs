//! JWT-based authentication extractor for Axum handlers.

use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use lander_core::error::CoreError;
use lander_core::types::DbId;

use crate::auth::jwt::validate_token;
use crate::error::AppError;
use crate::state::AppState;

/// Operator identity taken from a JWT Bearer token in the `Authorization` header.
///
/// Only the token is checked; use
/// [`RequireOperator`](super::operator::RequireOperator) when the account
/// itself must still be valid.
#[derive(Debug, Clone)]
pub struct AuthOperator {
    /// The operator's internal database id (from `claims.sub`).
    pub operator_id: DbId,
    pub email: String,
}

impl FromRequestParts<AppState> for AuthOperator {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| {
                AppError::Core(CoreError::Unauthorized(
                    "Missing Authorization header".into(),
                ))
            })?;

        let token = auth_header.strip_prefix("Bearer ").ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized(
                "Invalid Authorization format. Expected: Bearer <token>".into(),
            ))
        })?;

        let claims = validate_token(token, &state.config.jwt).map_err(|_| {
            AppError::Core(CoreError::Unauthorized("Invalid or expired token".into()))
        })?;

        Ok(AuthOperator {
            operator_id: claims.sub,
            email: claims.email,
        })
    }
}
