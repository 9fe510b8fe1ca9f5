//! In-memory stores for tests and for running without a database.
//!
//! Data lives in `BTreeMap`s behind a `tokio::sync::RwLock` and is lost when
//! the process exits. Clones share the same underlying tables.

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use lander_core::types::{DbId, Timestamp};
use tokio::sync::RwLock;

use crate::error::StoreError;
use crate::models::content_section::ContentSection;
use crate::models::operator::{CreateOperator, Operator};
use crate::models::session::{CreateSession, OperatorSession};
use crate::store::{ContentStore, OperatorStore};

#[derive(Debug, Default)]
struct ContentTable {
    rows: BTreeMap<String, ContentSection>,
    last_id: DbId,
}

/// Content store keyed by section name.
///
/// The map is ordered by key, so [`ContentStore::fetch_all_sections`] is a
/// plain in-order walk.
#[derive(Debug, Clone, Default)]
pub struct MemoryContentStore {
    table: Arc<RwLock<ContentTable>>,
}

impl MemoryContentStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ContentStore for MemoryContentStore {
    async fn fetch_section(&self, section_name: &str) -> Result<ContentSection, StoreError> {
        let table = self.table.read().await;
        table
            .rows
            .get(section_name)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(section_name.to_string()))
    }

    async fn fetch_all_sections(&self) -> Result<Vec<ContentSection>, StoreError> {
        let table = self.table.read().await;
        Ok(table.rows.values().cloned().collect())
    }

    async fn upsert_section(
        &self,
        section_name: &str,
        content: &serde_json::Value,
    ) -> Result<ContentSection, StoreError> {
        let mut table = self.table.write().await;
        let now = Utc::now();

        if let Some(row) = table.rows.get_mut(section_name) {
            row.content = content.clone();
            row.updated_at = now;
            return Ok(row.clone());
        }

        table.last_id += 1;
        let row = ContentSection {
            id: table.last_id,
            section_name: section_name.to_string(),
            content: content.clone(),
            created_at: now,
            updated_at: now,
        };
        table.rows.insert(section_name.to_string(), row.clone());
        Ok(row)
    }

    async fn health_check(&self) -> Result<(), StoreError> {
        Ok(())
    }
}

#[derive(Debug, Default)]
struct OperatorTables {
    operators: BTreeMap<DbId, Operator>,
    sessions: BTreeMap<DbId, OperatorSession>,
    last_operator_id: DbId,
    last_session_id: DbId,
}

/// Operator and session store held in process memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryOperatorStore {
    tables: Arc<RwLock<OperatorTables>>,
}

impl MemoryOperatorStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

/// Direct table edits for tests that need states no API call produces.
#[cfg(any(test, feature = "test-support"))]
impl MemoryOperatorStore {
    /// Soft-deactivate an operator. Returns `true` if the operator was active.
    pub async fn deactivate(&self, id: DbId) -> bool {
        let mut tables = self.tables.write().await;
        match tables.operators.get_mut(&id) {
            Some(op) if op.is_active => {
                op.is_active = false;
                op.updated_at = Utc::now();
                true
            }
            _ => false,
        }
    }

    /// Delete an operator together with its sessions.
    pub async fn remove(&self, id: DbId) -> bool {
        let mut tables = self.tables.write().await;
        tables.sessions.retain(|_, s| s.operator_id != id);
        tables.operators.remove(&id).is_some()
    }

    /// Move an operator's lock into the past, as if it had run out.
    pub async fn expire_lock(&self, id: DbId) -> bool {
        let mut tables = self.tables.write().await;
        match tables.operators.get_mut(&id) {
            Some(op) if op.locked_until.is_some() => {
                op.locked_until = Some(Utc::now() - chrono::Duration::seconds(1));
                true
            }
            _ => false,
        }
    }

    /// Number of sessions for `operator_id` that are not revoked.
    pub async fn live_session_count(&self, operator_id: DbId) -> usize {
        let tables = self.tables.read().await;
        tables
            .sessions
            .values()
            .filter(|s| s.operator_id == operator_id && !s.is_revoked)
            .count()
    }
}

fn insert_operator(
    tables: &mut OperatorTables,
    input: &CreateOperator,
) -> Result<Operator, StoreError> {
    if tables.operators.values().any(|op| op.email == input.email) {
        return Err(StoreError::Conflict(
            "duplicate value violates unique constraint: uq_operators_email".to_string(),
        ));
    }

    tables.last_operator_id += 1;
    let now = Utc::now();
    let operator = Operator {
        id: tables.last_operator_id,
        email: input.email.clone(),
        password_hash: input.password_hash.clone(),
        is_active: true,
        failed_login_count: 0,
        locked_until: None,
        last_login_at: None,
        created_at: now,
        updated_at: now,
    };
    tables.operators.insert(operator.id, operator.clone());
    Ok(operator)
}

fn update_operator<F>(tables: &mut OperatorTables, id: DbId, apply: F)
where
    F: FnOnce(&mut Operator, Timestamp),
{
    if let Some(op) = tables.operators.get_mut(&id) {
        let now = Utc::now();
        apply(op, now);
        op.updated_at = now;
    }
}

#[async_trait]
impl OperatorStore for MemoryOperatorStore {
    async fn count_operators(&self) -> Result<i64, StoreError> {
        let tables = self.tables.read().await;
        Ok(tables.operators.len() as i64)
    }

    async fn create_operator(&self, input: &CreateOperator) -> Result<Operator, StoreError> {
        let mut tables = self.tables.write().await;
        insert_operator(&mut tables, input)
    }

    async fn create_first_operator(
        &self,
        input: &CreateOperator,
    ) -> Result<Option<Operator>, StoreError> {
        let mut tables = self.tables.write().await;
        if !tables.operators.is_empty() {
            return Ok(None);
        }
        insert_operator(&mut tables, input).map(Some)
    }

    async fn find_operator_by_id(&self, id: DbId) -> Result<Option<Operator>, StoreError> {
        let tables = self.tables.read().await;
        Ok(tables.operators.get(&id).cloned())
    }

    async fn find_operator_by_email(&self, email: &str) -> Result<Option<Operator>, StoreError> {
        let tables = self.tables.read().await;
        Ok(tables
            .operators
            .values()
            .find(|op| op.email == email)
            .cloned())
    }

    async fn record_failed_login(
        &self,
        id: DbId,
        lock_until: Option<Timestamp>,
    ) -> Result<(), StoreError> {
        let mut tables = self.tables.write().await;
        update_operator(&mut tables, id, |op, now| {
            if op.locked_until.is_some_and(|until| until <= now) {
                op.locked_until = None;
                op.failed_login_count = 0;
            }
            op.failed_login_count += 1;
            if lock_until.is_some() {
                op.locked_until = lock_until;
            }
        });
        Ok(())
    }

    async fn record_successful_login(&self, id: DbId) -> Result<(), StoreError> {
        let mut tables = self.tables.write().await;
        update_operator(&mut tables, id, |op, now| {
            op.failed_login_count = 0;
            op.locked_until = None;
            op.last_login_at = Some(now);
        });
        Ok(())
    }

    async fn create_session(&self, input: &CreateSession) -> Result<OperatorSession, StoreError> {
        let mut tables = self.tables.write().await;
        tables.last_session_id += 1;
        let session = OperatorSession {
            id: tables.last_session_id,
            operator_id: input.operator_id,
            refresh_token_hash: input.refresh_token_hash.clone(),
            expires_at: input.expires_at,
            is_revoked: false,
            created_at: Utc::now(),
        };
        tables.sessions.insert(session.id, session.clone());
        Ok(session)
    }

    async fn find_active_session(
        &self,
        hash: &str,
    ) -> Result<Option<OperatorSession>, StoreError> {
        let tables = self.tables.read().await;
        let now = Utc::now();
        Ok(tables
            .sessions
            .values()
            .find(|s| s.refresh_token_hash == hash && !s.is_revoked && s.expires_at > now)
            .cloned())
    }

    async fn revoke_session(&self, id: DbId) -> Result<bool, StoreError> {
        let mut tables = self.tables.write().await;
        match tables.sessions.get_mut(&id) {
            Some(session) if !session.is_revoked => {
                session.is_revoked = true;
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn revoke_all_sessions(&self, operator_id: DbId) -> Result<u64, StoreError> {
        let mut tables = self.tables.write().await;
        let mut revoked = 0;
        for session in tables.sessions.values_mut() {
            if session.operator_id == operator_id && !session.is_revoked {
                session.is_revoked = true;
                revoked += 1;
            }
        }
        Ok(revoked)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use chrono::Duration;
    use serde_json::json;

    #[tokio::test]
    async fn fetch_missing_section_is_not_found() {
        let store = MemoryContentStore::new();
        let err = store.fetch_section("hero").await.unwrap_err();
        assert_matches!(err, StoreError::NotFound(name) if name == "hero");
    }

    #[tokio::test]
    async fn upsert_twice_keeps_one_row() {
        let store = MemoryContentStore::new();
        let first = store
            .upsert_section("hero", &json!({"title": "A"}))
            .await
            .unwrap();
        let second = store
            .upsert_section("hero", &json!({"title": "B"}))
            .await
            .unwrap();

        assert_eq!(first.id, second.id);
        assert_eq!(first.created_at, second.created_at);

        let all = store.fetch_all_sections().await.unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].content, json!({"title": "B"}));
    }

    #[tokio::test]
    async fn fetch_all_is_ordered_by_name() {
        let store = MemoryContentStore::new();
        for name in ["visibility", "hero", "seo", "integrations"] {
            store.upsert_section(name, &json!({})).await.unwrap();
        }
        let names: Vec<String> = store
            .fetch_all_sections()
            .await
            .unwrap()
            .into_iter()
            .map(|row| row.section_name)
            .collect();
        assert_eq!(names, ["hero", "integrations", "seo", "visibility"]);
    }

    #[tokio::test]
    async fn clones_share_state() {
        let store = MemoryContentStore::new();
        let clone = store.clone();
        store.upsert_section("seo", &json!({"slug": "x"})).await.unwrap();
        assert!(clone.fetch_section("seo").await.is_ok());
    }

    fn new_operator(email: &str) -> CreateOperator {
        CreateOperator {
            email: email.to_string(),
            password_hash: "$argon2id$stub".to_string(),
        }
    }

    #[tokio::test]
    async fn duplicate_email_is_conflict() {
        let store = MemoryOperatorStore::new();
        store.create_operator(&new_operator("a@b.co")).await.unwrap();
        let err = store
            .create_operator(&new_operator("a@b.co"))
            .await
            .unwrap_err();
        assert_matches!(err, StoreError::Conflict(_));
        assert_eq!(store.count_operators().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn failed_logins_accumulate_and_reset() {
        let store = MemoryOperatorStore::new();
        let op = store.create_operator(&new_operator("a@b.co")).await.unwrap();
        let lock = Utc::now() + Duration::minutes(15);

        store.record_failed_login(op.id, None).await.unwrap();
        store.record_failed_login(op.id, Some(lock)).await.unwrap();
        let locked = store.find_operator_by_id(op.id).await.unwrap().unwrap();
        assert_eq!(locked.failed_login_count, 2);
        assert_eq!(locked.locked_until, Some(lock));

        store.record_successful_login(op.id).await.unwrap();
        let reset = store.find_operator_by_email("a@b.co").await.unwrap().unwrap();
        assert_eq!(reset.failed_login_count, 0);
        assert!(reset.locked_until.is_none());
        assert!(reset.last_login_at.is_some());
    }

    #[tokio::test]
    async fn failed_login_after_expired_lock_restarts_count() {
        let store = MemoryOperatorStore::new();
        let op = store.create_operator(&new_operator("a@b.co")).await.unwrap();
        for _ in 0..4 {
            store.record_failed_login(op.id, None).await.unwrap();
        }
        let lock = Utc::now() + Duration::minutes(15);
        store.record_failed_login(op.id, Some(lock)).await.unwrap();
        assert!(store.expire_lock(op.id).await);

        store.record_failed_login(op.id, None).await.unwrap();
        let reloaded = store.find_operator_by_id(op.id).await.unwrap().unwrap();
        assert_eq!(reloaded.failed_login_count, 1);
        assert!(reloaded.locked_until.is_none());
    }

    #[tokio::test]
    async fn first_operator_is_created_only_once() {
        let store = MemoryOperatorStore::new();
        let first = store
            .create_first_operator(&new_operator("a@b.co"))
            .await
            .unwrap();
        assert!(first.is_some());

        let second = store
            .create_first_operator(&new_operator("c@d.co"))
            .await
            .unwrap();
        assert!(second.is_none());
        assert_eq!(store.count_operators().await.unwrap(), 1);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_first_operator_creates_one_row() {
        let store = MemoryOperatorStore::new();
        let tasks: Vec<_> = (0..8)
            .map(|i| {
                let store = store.clone();
                tokio::spawn(async move {
                    store
                        .create_first_operator(&new_operator(&format!("op{i}@b.co")))
                        .await
                        .unwrap()
                })
            })
            .collect();

        let mut created = 0;
        for task in tasks {
            if task.await.unwrap().is_some() {
                created += 1;
            }
        }
        assert_eq!(created, 1);
        assert_eq!(store.count_operators().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn sessions_expire_and_revoke() {
        let store = MemoryOperatorStore::new();
        let op = store.create_operator(&new_operator("a@b.co")).await.unwrap();
        let live = store
            .create_session(&CreateSession {
                operator_id: op.id,
                refresh_token_hash: "live".to_string(),
                expires_at: Utc::now() + Duration::days(7),
            })
            .await
            .unwrap();
        store
            .create_session(&CreateSession {
                operator_id: op.id,
                refresh_token_hash: "stale".to_string(),
                expires_at: Utc::now() - Duration::seconds(1),
            })
            .await
            .unwrap();

        assert!(store.find_active_session("stale").await.unwrap().is_none());
        assert_eq!(
            store.find_active_session("live").await.unwrap().map(|s| s.id),
            Some(live.id)
        );

        assert!(store.revoke_session(live.id).await.unwrap());
        assert!(!store.revoke_session(live.id).await.unwrap());
        assert!(store.find_active_session("live").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn revoke_all_counts_only_live_sessions() {
        let store = MemoryOperatorStore::new();
        let op = store.create_operator(&new_operator("a@b.co")).await.unwrap();
        for hash in ["one", "two", "three"] {
            store
                .create_session(&CreateSession {
                    operator_id: op.id,
                    refresh_token_hash: hash.to_string(),
                    expires_at: Utc::now() + Duration::days(1),
                })
                .await
                .unwrap();
        }
        store.revoke_session(1).await.unwrap();

        assert_eq!(store.revoke_all_sessions(op.id).await.unwrap(), 2);
        assert_eq!(store.live_session_count(op.id).await, 0);
    }

    #[tokio::test]
    async fn deactivate_and_remove() {
        let store = MemoryOperatorStore::new();
        let op = store.create_operator(&new_operator("a@b.co")).await.unwrap();
        assert!(store.deactivate(op.id).await);
        assert!(!store.deactivate(op.id).await);
        assert!(store.remove(op.id).await);
        assert!(store.find_operator_by_id(op.id).await.unwrap().is_none());
    }
}
