//! Store traits consumed by the API layer.
//!
//! Handlers hold `Arc<dyn ContentStore>` / `Arc<dyn OperatorStore>` so the
//! same routes run over PostgreSQL in production and over the in-memory
//! implementations in tests or when no database is configured.

pub mod memory;
pub mod postgres;

use async_trait::async_trait;
use lander_core::types::{DbId, Timestamp};

use crate::error::StoreError;
use crate::models::content_section::ContentSection;
use crate::models::operator::{CreateOperator, Operator};
use crate::models::session::{CreateSession, OperatorSession};

/// Key-value access to landing page content, addressed by section name.
#[async_trait]
pub trait ContentStore: Send + Sync {
    /// Fetch one section row.
    ///
    /// # Errors
    ///
    /// [`StoreError::NotFound`] when no row exists for `section_name`.
    async fn fetch_section(&self, section_name: &str) -> Result<ContentSection, StoreError>;

    /// Every stored row, ordered by `section_name` ascending.
    async fn fetch_all_sections(&self) -> Result<Vec<ContentSection>, StoreError>;

    /// Replace the content of the row for `section_name`, inserting it on
    /// first save. Atomic per name.
    async fn upsert_section(
        &self,
        section_name: &str,
        content: &serde_json::Value,
    ) -> Result<ContentSection, StoreError>;

    /// Whether the backend is reachable.
    async fn health_check(&self) -> Result<(), StoreError>;
}

/// Operator accounts and refresh-token sessions.
#[async_trait]
pub trait OperatorStore: Send + Sync {
    async fn count_operators(&self) -> Result<i64, StoreError>;

    /// # Errors
    ///
    /// [`StoreError::Conflict`] when the email is already registered.
    async fn create_operator(&self, input: &CreateOperator) -> Result<Operator, StoreError>;

    /// Create the bootstrap operator, atomically with the emptiness check.
    ///
    /// Returns `None`, and stores nothing, when any operator already exists.
    async fn create_first_operator(
        &self,
        input: &CreateOperator,
    ) -> Result<Option<Operator>, StoreError>;

    async fn find_operator_by_id(&self, id: DbId) -> Result<Option<Operator>, StoreError>;

    async fn find_operator_by_email(&self, email: &str) -> Result<Option<Operator>, StoreError>;

    /// Count a failed password attempt; lock the account when `lock_until` is set.
    /// A lock that has already expired is cleared and the count restarts at 1.
    async fn record_failed_login(
        &self,
        id: DbId,
        lock_until: Option<Timestamp>,
    ) -> Result<(), StoreError>;

    async fn record_successful_login(&self, id: DbId) -> Result<(), StoreError>;

    async fn create_session(&self, input: &CreateSession) -> Result<OperatorSession, StoreError>;

    /// Session matching `hash` that is neither revoked nor expired.
    async fn find_active_session(&self, hash: &str)
        -> Result<Option<OperatorSession>, StoreError>;

    async fn revoke_session(&self, id: DbId) -> Result<bool, StoreError>;

    /// Revoke every live session of an operator, returning how many were revoked.
    async fn revoke_all_sessions(&self, operator_id: DbId) -> Result<u64, StoreError>;
}
