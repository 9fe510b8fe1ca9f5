//! Handler for back office media uploads.

use axum::extract::{Multipart, Query, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use lander_core::hero::HeroContent;
use lander_core::section::{SectionContent, SectionName};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::handlers::content::fetch_stored;
use crate::media::{is_supported_video, video_key, StoredBlob, VIDEO_EXTENSIONS};
use crate::middleware::operator::RequireOperator;
use crate::response::DataResponse;
use crate::state::AppState;

/// Multipart field carrying the file.
const FILE_FIELD: &str = "file";

#[derive(Debug, Default, Deserialize)]
pub struct UploadParams {
    /// Also point the hero video at the uploaded file.
    #[serde(default)]
    pub attach: bool,
}

#[derive(Debug, Serialize)]
pub struct UploadResponse {
    #[serde(flatten)]
    pub blob: StoredBlob,
    /// Whether the hero `videoUrl` now points at this upload.
    pub attached: bool,
}

/// POST /api/v1/admin/media/video
///
/// Store the multipart field `file` under `videos/` and return its public URL.
/// With `?attach=true` the hero row's `videoUrl` is replaced, keeping the
/// other hero fields.
pub async fn upload_video(
    RequireOperator(operator): RequireOperator,
    State(state): State<AppState>,
    Query(params): Query<UploadParams>,
    mut multipart: Multipart,
) -> AppResult<(StatusCode, Json<DataResponse<UploadResponse>>)> {
    let mut blob = None;

    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }

        let file_name = field.file_name().unwrap_or_default().to_string();
        if !is_supported_video(&file_name, field.content_type()) {
            return Err(AppError::BadRequest(format!(
                "Unsupported video file '{file_name}'. Expected a video/* upload with one of: {}",
                VIDEO_EXTENSIONS.join(", ")
            )));
        }

        let bytes = field.bytes().await?;
        if bytes.is_empty() {
            return Err(AppError::BadRequest("Uploaded file is empty".into()));
        }

        let key = video_key(&file_name, Utc::now());
        blob = Some(state.media.put(&key, &bytes).await?);
        break;
    }

    let blob = blob.ok_or_else(|| {
        AppError::BadRequest(format!("Missing multipart field '{FILE_FIELD}'"))
    })?;

    if params.attach {
        let row = fetch_stored(state.content.as_ref(), SectionName::Hero).await?;
        let hero = HeroContent {
            video_url: blob.url.clone(),
            ..HeroContent::from_stored(row.as_ref().map(|r| &r.content))
        };
        let content = SectionContent::Hero(hero);
        content.validate()?;
        state
            .content
            .upsert_section(SectionName::Hero.as_str(), &content.to_value()?)
            .await?;
    }

    tracing::info!(
        operator_id = operator.id,
        path = %blob.path,
        size = blob.size,
        attached = params.attach,
        "Video uploaded",
    );

    Ok((
        StatusCode::CREATED,
        Json(DataResponse {
            data: UploadResponse {
                blob,
                attached: params.attach,
            },
        }),
    ))
}
