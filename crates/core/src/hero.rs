//! Hero section copy and its per-field fallback merge.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::decode::{as_object, string_field};
use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Defaults
// ---------------------------------------------------------------------------

pub const DEFAULT_HERO_TITLE: &str = "De 0 a 1 Milhão com um Método Direto e Sem Enrolação";

pub const DEFAULT_HERO_SUBTITLE: &str = "Aprenda a investir do zero e construir seu patrimônio \
     com renda passiva, usando um método prático e linguagem simples";

pub const DEFAULT_HERO_VIDEO_URL: &str = "https://www.youtube.com/embed/4ZRS2CYr_Us";

/// Path prefix under which uploaded media is served by the API.
pub const MEDIA_PATH_PREFIX: &str = "/media/";

// ---------------------------------------------------------------------------
// HeroContent
// ---------------------------------------------------------------------------

/// Payload of the `hero` section.
///
/// Deserializing fills missing fields from [`Default`] but rejects fields of
/// the wrong type; use [`HeroContent::from_stored`] for the lenient merge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct HeroContent {
    pub title: String,
    pub subtitle: String,
    /// Embed URL or uploaded media URL. May be empty.
    pub video_url: String,
}

impl Default for HeroContent {
    fn default() -> Self {
        Self {
            title: DEFAULT_HERO_TITLE.to_string(),
            subtitle: DEFAULT_HERO_SUBTITLE.to_string(),
            video_url: DEFAULT_HERO_VIDEO_URL.to_string(),
        }
    }
}

impl HeroContent {
    /// Merge a stored payload over the defaults.
    ///
    /// Each field is taken from `raw` when present as a string and falls back
    /// to its default otherwise; one malformed field never discards the rest.
    pub fn from_stored(raw: Option<&Value>) -> Self {
        let obj = as_object(raw);
        let defaults = Self::default();
        Self {
            title: string_field(obj, "title").unwrap_or(defaults.title),
            subtitle: string_field(obj, "subtitle").unwrap_or(defaults.subtitle),
            video_url: string_field(obj, "videoUrl").unwrap_or(defaults.video_url),
        }
    }

    pub fn validate(&self) -> Result<(), CoreError> {
        validate_video_url(&self.video_url)
    }
}

/// Accept an empty URL, an absolute `http(s)` URL, or an uploaded media path.
pub fn validate_video_url(url: &str) -> Result<(), CoreError> {
    if url.is_empty() || url.starts_with(MEDIA_PATH_PREFIX) {
        return Ok(());
    }

    let valid = match url.split_once("://") {
        Some((scheme, rest)) => {
            matches!(scheme, "http" | "https")
                && !rest.is_empty()
                && !rest.contains(char::is_whitespace)
        }
        None => false,
    };

    if valid {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Invalid video URL '{url}'. Expected an http(s) URL or an uploaded media path"
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn absent_payload_yields_defaults() {
        assert_eq!(HeroContent::from_stored(None), HeroContent::default());
        assert_eq!(
            HeroContent::from_stored(Some(&json!(null))),
            HeroContent::default()
        );
    }

    #[test]
    fn merge_is_per_field() {
        let raw = json!({ "title": "Novo título", "subtitle": 7 });
        let hero = HeroContent::from_stored(Some(&raw));
        assert_eq!(hero.title, "Novo título");
        assert_eq!(hero.subtitle, DEFAULT_HERO_SUBTITLE);
        assert_eq!(hero.video_url, DEFAULT_HERO_VIDEO_URL);
    }

    #[test]
    fn empty_video_url_is_kept() {
        let raw = json!({ "videoUrl": "" });
        let hero = HeroContent::from_stored(Some(&raw));
        assert_eq!(hero.video_url, "");
        assert!(hero.validate().is_ok());
    }

    #[test]
    fn strict_decode_rejects_wrong_types() {
        let result = serde_json::from_value::<HeroContent>(json!({ "title": ["x"] }));
        assert!(result.is_err());
    }

    #[test]
    fn strict_decode_fills_missing_fields() {
        let hero: HeroContent = serde_json::from_value(json!({ "title": "T" })).unwrap();
        assert_eq!(hero.title, "T");
        assert_eq!(hero.subtitle, DEFAULT_HERO_SUBTITLE);
    }

    #[test]
    fn video_url_validation() {
        assert!(validate_video_url("https://www.youtube.com/embed/abc").is_ok());
        assert!(validate_video_url("http://vimeo.com/1").is_ok());
        assert!(validate_video_url("/media/videos/1-intro.mp4").is_ok());
        assert!(validate_video_url("javascript:alert(1)").is_err());
        assert!(validate_video_url("ftp://example.com/v.mp4").is_err());
        assert!(validate_video_url("https://").is_err());
        assert!(validate_video_url("https://exa mple.com").is_err());
    }
}
