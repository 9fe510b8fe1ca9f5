use axum::routing::get;
use axum::Router;

use crate::handlers::site;
use crate::state::AppState;

/// Public HTML routes, mounted at the root.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(site::index))
        .route("/{slug}", get(site::by_slug))
}
