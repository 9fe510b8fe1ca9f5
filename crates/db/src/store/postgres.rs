//! PostgreSQL-backed stores over the sqlx repositories.

use async_trait::async_trait;
use lander_core::types::{DbId, Timestamp};
use sqlx::PgPool;

use crate::error::StoreError;
use crate::models::content_section::ContentSection;
use crate::models::operator::{CreateOperator, Operator};
use crate::models::session::{CreateSession, OperatorSession};
use crate::repositories::{ContentSectionRepo, OperatorRepo, SessionRepo};
use crate::store::{ContentStore, OperatorStore};

/// Content store over the `landing_page_content` table.
#[derive(Debug, Clone)]
pub struct PgContentStore {
    pool: PgPool,
}

impl PgContentStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ContentStore for PgContentStore {
    async fn fetch_section(&self, section_name: &str) -> Result<ContentSection, StoreError> {
        ContentSectionRepo::find_by_name(&self.pool, section_name)
            .await?
            .ok_or_else(|| StoreError::NotFound(section_name.to_string()))
    }

    async fn fetch_all_sections(&self) -> Result<Vec<ContentSection>, StoreError> {
        Ok(ContentSectionRepo::list(&self.pool).await?)
    }

    async fn upsert_section(
        &self,
        section_name: &str,
        content: &serde_json::Value,
    ) -> Result<ContentSection, StoreError> {
        let row = ContentSectionRepo::upsert(&self.pool, section_name, content).await?;
        tracing::debug!(section = %section_name, id = row.id, "Content section upserted");
        Ok(row)
    }

    async fn health_check(&self) -> Result<(), StoreError> {
        Ok(crate::health_check(&self.pool).await?)
    }
}

/// Operator store over the `operators` and `operator_sessions` tables.
#[derive(Debug, Clone)]
pub struct PgOperatorStore {
    pool: PgPool,
}

impl PgOperatorStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl OperatorStore for PgOperatorStore {
    async fn count_operators(&self) -> Result<i64, StoreError> {
        Ok(OperatorRepo::count(&self.pool).await?)
    }

    async fn create_operator(&self, input: &CreateOperator) -> Result<Operator, StoreError> {
        Ok(OperatorRepo::create(&self.pool, input).await?)
    }

    async fn create_first_operator(
        &self,
        input: &CreateOperator,
    ) -> Result<Option<Operator>, StoreError> {
        Ok(OperatorRepo::create_first(&self.pool, input).await?)
    }

    async fn find_operator_by_id(&self, id: DbId) -> Result<Option<Operator>, StoreError> {
        Ok(OperatorRepo::find_by_id(&self.pool, id).await?)
    }

    async fn find_operator_by_email(&self, email: &str) -> Result<Option<Operator>, StoreError> {
        Ok(OperatorRepo::find_by_email(&self.pool, email).await?)
    }

    async fn record_failed_login(
        &self,
        id: DbId,
        lock_until: Option<Timestamp>,
    ) -> Result<(), StoreError> {
        Ok(OperatorRepo::record_failed_login(&self.pool, id, lock_until).await?)
    }

    async fn record_successful_login(&self, id: DbId) -> Result<(), StoreError> {
        Ok(OperatorRepo::record_successful_login(&self.pool, id).await?)
    }

    async fn create_session(&self, input: &CreateSession) -> Result<OperatorSession, StoreError> {
        Ok(SessionRepo::create(&self.pool, input).await?)
    }

    async fn find_active_session(
        &self,
        hash: &str,
    ) -> Result<Option<OperatorSession>, StoreError> {
        Ok(SessionRepo::find_by_refresh_token_hash(&self.pool, hash).await?)
    }

    async fn revoke_session(&self, id: DbId) -> Result<bool, StoreError> {
        Ok(SessionRepo::revoke(&self.pool, id).await?)
    }

    async fn revoke_all_sessions(&self, operator_id: DbId) -> Result<u64, StoreError> {
        Ok(SessionRepo::revoke_all_for_operator(&self.pool, operator_id).await?)
    }
}
