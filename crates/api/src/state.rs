use std::sync::Arc;

use lander_db::{ContentStore, OperatorStore};

use crate::config::ServerConfig;
use crate::media::BlobStore;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheap to clone: every field is behind an `Arc`.
#[derive(Clone)]
pub struct AppState {
    /// Landing page content, addressed by section name.
    pub content: Arc<dyn ContentStore>,
    /// Operator accounts and sessions.
    pub operators: Arc<dyn OperatorStore>,
    /// Uploaded media files.
    pub media: Arc<dyn BlobStore>,
    pub config: Arc<ServerConfig>,
}
