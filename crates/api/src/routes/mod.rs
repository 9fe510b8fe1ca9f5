pub mod admin;
pub mod auth;
pub mod health;
pub mod page;
pub mod site;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// ```text
/// /auth/*     signup, login, refresh, logout, session
/// /admin/*    content, SEO preview, media upload (operator gate)
/// /page       JSON render plan
/// /page/reveal  reveal countdown (SSE)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/admin", admin::router())
        .nest("/page", page::router())
}
