//! Landing page server library.
//!
//! Exposes config, state, error handling, handlers and routes so the
//! binary entrypoint and the integration tests build the same app.

pub mod auth;
pub mod config;
pub mod error;
pub mod handlers;
pub mod media;
pub mod middleware;
pub mod render;
pub mod response;
pub mod router;
pub mod routes;
pub mod state;
