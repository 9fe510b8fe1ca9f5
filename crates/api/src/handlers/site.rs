//! Server-rendered public page.

use askama::Template;
use axum::extract::{Path, State};
use axum::response::Html;
use lander_core::composer::PageSnapshot;
use lander_core::error::CoreError;
use lander_core::reveal::RevealGate;

use crate::error::{AppError, AppResult};
use crate::handlers::page::load_snapshot;
use crate::render::LandingPage;
use crate::state::AppState;

/// GET /
pub async fn index(State(state): State<AppState>) -> AppResult<Html<String>> {
    let snapshot = load_snapshot(state.content.as_ref()).await;
    render_snapshot(&state, &snapshot)
}

/// GET /{slug}
///
/// The same page, served only at the configured SEO slug.
pub async fn by_slug(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> AppResult<Html<String>> {
    let snapshot = load_snapshot(state.content.as_ref()).await;
    if slug != snapshot.seo.slug {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "page",
            key: slug,
        }));
    }
    render_snapshot(&state, &snapshot)
}

fn render_snapshot(state: &AppState, snapshot: &PageSnapshot) -> AppResult<Html<String>> {
    let page = LandingPage::new(snapshot, RevealGate::new(state.config.reveal_after_secs));
    let html = page
        .render()
        .map_err(|e| AppError::InternalError(format!("Template error: {e}")))?;
    Ok(Html(html))
}
