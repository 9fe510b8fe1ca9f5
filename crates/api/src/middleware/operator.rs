//! Operator gate for back office routes.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use lander_core::error::CoreError;
use lander_db::models::operator::Operator;

use super::auth::AuthOperator;
use crate::error::AppError;
use crate::state::AppState;

/// Requires a valid token for an operator that still exists and is active.
///
/// When the token is valid but the account is gone or deactivated, every
/// session of that operator is revoked and the request is rejected with 401,
/// which clients treat as "sign in again".
///
/// ```ignore
/// async fn handler(RequireOperator(operator): RequireOperator) -> AppResult<Json<()>> {
///     Ok(Json(()))
/// }
/// ```
pub struct RequireOperator(pub Operator);

impl FromRequestParts<AppState> for RequireOperator {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth = AuthOperator::from_request_parts(parts, state).await?;

        match state.operators.find_operator_by_id(auth.operator_id).await? {
            Some(operator) if operator.is_active => Ok(RequireOperator(operator)),
            found => {
                let revoked = state
                    .operators
                    .revoke_all_sessions(auth.operator_id)
                    .await?;
                tracing::warn!(
                    operator_id = auth.operator_id,
                    exists = found.is_some(),
                    revoked,
                    "Rejected token for unrecognized operator; sessions revoked",
                );
                Err(AppError::Core(CoreError::Unauthorized(
                    "Operator is not recognized. Sign in again.".into(),
                )))
            }
        }
    }
}
