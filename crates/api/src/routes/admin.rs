//! Route definitions for the back office.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::{content, media, seo};
use crate::state::AppState;

/// Routes mounted at `/admin`. Every handler takes `RequireOperator`.
///
/// ```text
/// GET  /content         -> list_sections
/// GET  /content/{name}  -> get_section
/// PUT  /content/{name}  -> put_section
/// GET  /seo/preview     -> preview
/// POST /media/video     -> upload_video (?attach=true)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/content", get(content::list_sections))
        .route(
            "/content/{name}",
            get(content::get_section).put(content::put_section),
        )
        .route("/seo/preview", get(seo::preview))
        .route("/media/video", post(media::upload_video))
}
