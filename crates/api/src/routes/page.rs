use axum::routing::get;
use axum::Router;

use crate::handlers::page;
use crate::state::AppState;

/// Routes mounted at `/page`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(page::page_plan))
        .route("/reveal", get(page::reveal_stream))
}
