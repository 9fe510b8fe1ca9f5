//! Repository for the `operator_sessions` table.

use sqlx::PgPool;
use lander_core::types::DbId;

use crate::models::session::{CreateSession, OperatorSession};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, operator_id, refresh_token_hash, expires_at, is_revoked, created_at";

/// Provides CRUD operations for operator sessions.
pub struct SessionRepo;

impl SessionRepo {
    /// Insert a new session, returning the created row.
    pub async fn create(
        pool: &PgPool,
        input: &CreateSession,
    ) -> Result<OperatorSession, sqlx::Error> {
        let query = format!(
            "INSERT INTO operator_sessions (operator_id, refresh_token_hash, expires_at)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, OperatorSession>(&query)
            .bind(input.operator_id)
            .bind(&input.refresh_token_hash)
            .bind(input.expires_at)
            .fetch_one(pool)
            .await
    }

    /// Find an active session by its refresh token hash.
    ///
    /// Only returns sessions that are not revoked and not expired.
    pub async fn find_by_refresh_token_hash(
        pool: &PgPool,
        hash: &str,
    ) -> Result<Option<OperatorSession>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM operator_sessions
             WHERE refresh_token_hash = $1
               AND is_revoked = false
               AND expires_at > NOW()"
        );
        sqlx::query_as::<_, OperatorSession>(&query)
            .bind(hash)
            .fetch_optional(pool)
            .await
    }

    /// Revoke a single session. Returns `true` if the row was updated.
    pub async fn revoke(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE operator_sessions SET is_revoked = true WHERE id = $1 AND is_revoked = false",
        )
        .bind(id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Revoke all active sessions for an operator. Returns the count of revoked sessions.
    pub async fn revoke_all_for_operator(
        pool: &PgPool,
        operator_id: DbId,
    ) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE operator_sessions SET is_revoked = true
             WHERE operator_id = $1 AND is_revoked = false",
        )
        .bind(operator_id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected())
    }
}
