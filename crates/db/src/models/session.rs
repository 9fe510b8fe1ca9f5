//! Operator session model and DTOs.

use sqlx::FromRow;
use lander_core::types::{DbId, Timestamp};

/// A refresh-token session row from the `operator_sessions` table.
#[derive(Debug, Clone, FromRow)]
pub struct OperatorSession {
    pub id: DbId,
    pub operator_id: DbId,
    pub refresh_token_hash: String,
    pub expires_at: Timestamp,
    pub is_revoked: bool,
    pub created_at: Timestamp,
}

/// DTO for creating a new operator session.
#[derive(Debug, Clone)]
pub struct CreateSession {
    pub operator_id: DbId,
    pub refresh_token_hash: String,
    pub expires_at: Timestamp,
}
