//! Handler for the back office SEO preview.

use axum::extract::State;
use axum::Json;
use lander_core::section::SectionName;
use lander_core::seo::{SeoPreview, SeoSettings};

use crate::error::AppResult;
use crate::handlers::content::fetch_stored;
use crate::middleware::operator::RequireOperator;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/admin/seo/preview
///
/// How the stored SEO settings would show up in a search result.
pub async fn preview(
    RequireOperator(_operator): RequireOperator,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<SeoPreview>>> {
    let row = fetch_stored(state.content.as_ref(), SectionName::Seo).await?;
    let seo = SeoSettings::from_stored(row.as_ref().map(|r| &r.content));
    Ok(Json(DataResponse {
        data: seo.preview(&state.config.public_base_url),
    }))
}
