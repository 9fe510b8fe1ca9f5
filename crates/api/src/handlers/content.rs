//! Handlers for the back office `/admin/content` resource.

use axum::extract::{Path, State};
use axum::Json;
use lander_core::section::{SectionContent, SectionName};
use lander_core::types::Timestamp;
use lander_db::models::content_section::ContentSection;
use lander_db::{ContentStore, StoreError};
use serde::Serialize;

use crate::error::AppResult;
use crate::middleware::operator::RequireOperator;
use crate::response::DataResponse;
use crate::state::AppState;

/// A section as the editor sees it: typed payload with defaults merged.
#[derive(Debug, Serialize)]
pub struct SectionView {
    pub section_name: SectionName,
    pub content: SectionContent,
    /// `false` when no row exists yet and `content` is all defaults.
    pub stored: bool,
    pub updated_at: Option<Timestamp>,
}

/// Fetch a row, treating a missing row as `None`.
pub(crate) async fn fetch_stored(
    store: &dyn ContentStore,
    name: SectionName,
) -> Result<Option<ContentSection>, StoreError> {
    match store.fetch_section(name.as_str()).await {
        Ok(row) => Ok(Some(row)),
        Err(StoreError::NotFound(_)) => Ok(None),
        Err(e) => Err(e),
    }
}

/// GET /api/v1/admin/content
///
/// Every stored row, ordered by section name.
pub async fn list_sections(
    RequireOperator(_operator): RequireOperator,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<ContentSection>>>> {
    let rows = state.content.fetch_all_sections().await?;
    Ok(Json(DataResponse { data: rows }))
}

/// GET /api/v1/admin/content/{name}
pub async fn get_section(
    RequireOperator(_operator): RequireOperator,
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> AppResult<Json<DataResponse<SectionView>>> {
    let name: SectionName = name.parse()?;
    let row = fetch_stored(state.content.as_ref(), name).await?;

    let view = SectionView {
        section_name: name,
        content: SectionContent::from_stored(name, row.as_ref().map(|r| &r.content)),
        stored: row.is_some(),
        updated_at: row.map(|r| r.updated_at),
    };
    Ok(Json(DataResponse { data: view }))
}

/// PUT /api/v1/admin/content/{name}
///
/// Decode, validate and normalize the submitted payload, then upsert it.
pub async fn put_section(
    RequireOperator(operator): RequireOperator,
    State(state): State<AppState>,
    Path(name): Path<String>,
    Json(payload): Json<serde_json::Value>,
) -> AppResult<Json<DataResponse<ContentSection>>> {
    let name: SectionName = name.parse()?;
    let content = SectionContent::from_submission(name, payload)?;

    let row = state
        .content
        .upsert_section(name.as_str(), &content.to_value()?)
        .await?;

    tracing::info!(
        section = %name,
        operator_id = operator.id,
        "Content section saved",
    );
    Ok(Json(DataResponse { data: row }))
}
