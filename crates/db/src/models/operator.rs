//! Back office operator accounts.

use serde::Serialize;
use sqlx::FromRow;
use lander_core::types::{DbId, Timestamp};

/// Full operator row from the `operators` table.
///
/// Contains the password hash -- NEVER serialize this to API responses directly.
/// Use [`OperatorResponse`] for external-facing output.
#[derive(Debug, Clone, FromRow)]
pub struct Operator {
    pub id: DbId,
    pub email: String,
    pub password_hash: String,
    pub is_active: bool,
    pub failed_login_count: i32,
    pub locked_until: Option<Timestamp>,
    pub last_login_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Safe operator representation for API responses (no password hash).
#[derive(Debug, Clone, Serialize)]
pub struct OperatorResponse {
    pub id: DbId,
    pub email: String,
    pub is_active: bool,
    pub last_login_at: Option<Timestamp>,
    pub created_at: Timestamp,
}

impl From<&Operator> for OperatorResponse {
    fn from(operator: &Operator) -> Self {
        Self {
            id: operator.id,
            email: operator.email.clone(),
            is_active: operator.is_active,
            last_login_at: operator.last_login_at,
            created_at: operator.created_at,
        }
    }
}

/// DTO for creating a new operator. The password is already hashed.
#[derive(Debug, Clone)]
pub struct CreateOperator {
    pub email: String,
    pub password_hash: String,
}
