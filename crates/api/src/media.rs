//! Blob storage for uploaded media.
//!
//! [`LocalBlobStore`] writes under `MEDIA_ROOT`; the router serves that
//! directory at `/media`, so a stored key `videos/x.mp4` is public at
//! `{PUBLIC_BASE_URL}/media/videos/x.mp4`.

use std::path::{Component, Path, PathBuf};

use async_trait::async_trait;
use lander_core::types::Timestamp;
use serde::Serialize;

/// Extensions accepted for hero video uploads.
pub const VIDEO_EXTENSIONS: [&str; 4] = ["mp4", "webm", "mov", "ogg"];

#[derive(Debug, thiserror::Error)]
pub enum BlobError {
    /// Key is empty, absolute, or escapes the storage root.
    #[error("invalid blob key '{0}'")]
    InvalidKey(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// A blob that has been written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StoredBlob {
    /// Storage key relative to the media root.
    pub path: String,
    /// Public URL the blob is served from.
    pub url: String,
    pub size: u64,
}

#[async_trait]
pub trait BlobStore: Send + Sync {
    /// Write `bytes` under `key`, replacing any existing blob.
    async fn put(&self, key: &str, bytes: &[u8]) -> Result<StoredBlob, BlobError>;
}

/// Blob store on the local filesystem.
#[derive(Debug, Clone)]
pub struct LocalBlobStore {
    root: PathBuf,
    public_base_url: String,
}

impl LocalBlobStore {
    pub fn new(root: impl Into<PathBuf>, public_base_url: &str) -> Self {
        Self {
            root: root.into(),
            public_base_url: public_base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn public_url(&self, key: &str) -> String {
        format!("{}/media/{key}", self.public_base_url)
    }
}

#[async_trait]
impl BlobStore for LocalBlobStore {
    async fn put(&self, key: &str, bytes: &[u8]) -> Result<StoredBlob, BlobError> {
        let relative = Path::new(key);
        let is_plain = !key.is_empty()
            && relative
                .components()
                .all(|component| matches!(component, Component::Normal(_)));
        if !is_plain {
            return Err(BlobError::InvalidKey(key.to_string()));
        }

        let target = self.root.join(relative);
        if let Some(parent) = target.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(&target, bytes).await?;
        tracing::info!(path = %target.display(), size = bytes.len(), "Blob stored");

        Ok(StoredBlob {
            path: key.to_string(),
            url: self.public_url(key),
            size: bytes.len() as u64,
        })
    }
}

/// Reduce a client-supplied file name to `[A-Za-z0-9._-]`.
///
/// Directory parts are dropped and leading dots stripped, so the result can
/// never address anything outside its folder.
pub fn sanitize_file_name(name: &str) -> String {
    let base = name.rsplit(['/', '\\']).next().unwrap_or_default();
    let cleaned: String = base
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
                c
            } else {
                '_'
            }
        })
        .collect();
    let cleaned = cleaned.trim_start_matches('.');
    if cleaned.is_empty() {
        "upload".to_string()
    } else {
        cleaned.to_string()
    }
}

/// Storage key for an uploaded video: `videos/{unix_millis}-{sanitized name}`.
pub fn video_key(file_name: &str, uploaded_at: Timestamp) -> String {
    format!(
        "videos/{}-{}",
        uploaded_at.timestamp_millis(),
        sanitize_file_name(file_name)
    )
}

/// Whether an upload looks like a supported video by MIME type and extension.
pub fn is_supported_video(file_name: &str, content_type: Option<&str>) -> bool {
    let mime_ok = content_type.is_some_and(|ct| ct.starts_with("video/"));
    let extension_ok = Path::new(file_name)
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            VIDEO_EXTENSIONS
                .iter()
                .any(|allowed| allowed.eq_ignore_ascii_case(ext))
        });
    mime_ok && extension_ok
}
