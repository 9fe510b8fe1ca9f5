//! Repository for the `operators` table.

use lander_core::types::{DbId, Timestamp};
use sqlx::PgPool;

use crate::models::operator::{CreateOperator, Operator};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, email, password_hash, is_active, failed_login_count, \
                        locked_until, last_login_at, created_at, updated_at";

/// Advisory lock key guarding the first-operator insert.
const BOOTSTRAP_LOCK_KEY: i64 = 0x6c61_6e64_6572;

/// Provides CRUD operations for operators.
pub struct OperatorRepo;

impl OperatorRepo {
    /// Insert a new operator, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateOperator) -> Result<Operator, sqlx::Error> {
        let query = format!(
            "INSERT INTO operators (email, password_hash)
             VALUES ($1, $2)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Operator>(&query)
            .bind(&input.email)
            .bind(&input.password_hash)
            .fetch_one(pool)
            .await
    }

    /// Insert the bootstrap operator only while the table is empty.
    ///
    /// Returns `None` when an operator already exists. The transaction-scoped
    /// advisory lock serializes concurrent bootstrap attempts, so at most one
    /// of them sees the empty table.
    pub async fn create_first(
        pool: &PgPool,
        input: &CreateOperator,
    ) -> Result<Option<Operator>, sqlx::Error> {
        let mut tx = pool.begin().await?;
        sqlx::query("SELECT pg_advisory_xact_lock($1)")
            .bind(BOOTSTRAP_LOCK_KEY)
            .execute(&mut *tx)
            .await?;

        let query = format!(
            "INSERT INTO operators (email, password_hash)
             SELECT $1, $2
             WHERE NOT EXISTS (SELECT 1 FROM operators)
             RETURNING {COLUMNS}"
        );
        let created = sqlx::query_as::<_, Operator>(&query)
            .bind(&input.email)
            .bind(&input.password_hash)
            .fetch_optional(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(created)
    }

    /// Count every operator, active or not.
    pub async fn count(pool: &PgPool) -> Result<i64, sqlx::Error> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM operators")
            .fetch_one(pool)
            .await?;
        Ok(count)
    }

    /// Find an operator by internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Operator>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM operators WHERE id = $1");
        sqlx::query_as::<_, Operator>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find an operator by email (emails are stored lower-cased).
    pub async fn find_by_email(
        pool: &PgPool,
        email: &str,
    ) -> Result<Option<Operator>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM operators WHERE email = $1");
        sqlx::query_as::<_, Operator>(&query)
            .bind(email)
            .fetch_optional(pool)
            .await
    }

    /// Count a failed login, locking the account when `lock_until` is given.
    ///
    /// An expired lock is cleared and counting restarts at 1.
    pub async fn record_failed_login(
        pool: &PgPool,
        id: DbId,
        lock_until: Option<Timestamp>,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "UPDATE operators SET
                failed_login_count = CASE
                    WHEN locked_until <= NOW() THEN 1
                    ELSE failed_login_count + 1
                END,
                locked_until = COALESCE(
                    $2,
                    CASE WHEN locked_until <= NOW() THEN NULL ELSE locked_until END
                ),
                updated_at = NOW()
             WHERE id = $1",
        )
        .bind(id)
        .bind(lock_until)
        .execute(pool)
        .await?;
        Ok(())
    }

    /// Record a successful login: reset `failed_login_count` to 0, clear `locked_until`,
    /// and set `last_login_at` to now.
    pub async fn record_successful_login(pool: &PgPool, id: DbId) -> Result<(), sqlx::Error> {
        sqlx::query(
            "UPDATE operators SET
                failed_login_count = 0,
                locked_until = NULL,
                last_login_at = NOW(),
                updated_at = NOW()
             WHERE id = $1",
        )
        .bind(id)
        .execute(pool)
        .await?;
        Ok(())
    }
}
