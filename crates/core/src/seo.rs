//! SEO metadata for the public page.
//!
//! Provides the stored settings shape, slug normalization, and the
//! length guidance shown next to the meta title and description.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::decode::{as_object, string_field};
use crate::error::CoreError;
use crate::hero::DEFAULT_HERO_SUBTITLE;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

pub const DEFAULT_SEO_TITLE: &str = "De 0 a 1 Milhão | Curso de Investimentos";

pub const DEFAULT_SEO_KEYWORDS: &str =
    "investimentos, renda passiva, finanças pessoais, independência financeira";

pub const DEFAULT_SEO_SLUG: &str = "de-0-a-1-milhao";

/// Search engines truncate titles past roughly this many characters.
pub const TITLE_RECOMMENDED_MAX: usize = 60;

/// Search engines truncate descriptions past roughly this many characters.
pub const DESCRIPTION_RECOMMENDED_MAX: usize = 160;

static WHITESPACE_RUN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("valid regex"));

static SLUG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z0-9-]+$").expect("valid regex"));

// ---------------------------------------------------------------------------
// SeoSettings
// ---------------------------------------------------------------------------

/// Payload of the `seo` section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SeoSettings {
    pub title: String,
    pub description: String,
    /// Comma-separated keyword list, stored as typed by the operator.
    pub keywords: String,
    pub slug: String,
}

impl Default for SeoSettings {
    fn default() -> Self {
        Self {
            title: DEFAULT_SEO_TITLE.to_string(),
            description: DEFAULT_HERO_SUBTITLE.to_string(),
            keywords: DEFAULT_SEO_KEYWORDS.to_string(),
            slug: DEFAULT_SEO_SLUG.to_string(),
        }
    }
}

impl SeoSettings {
    /// Merge a stored payload over the defaults, field by field.
    pub fn from_stored(raw: Option<&Value>) -> Self {
        let obj = as_object(raw);
        let defaults = Self::default();
        Self {
            title: string_field(obj, "title").unwrap_or(defaults.title),
            description: string_field(obj, "description").unwrap_or(defaults.description),
            keywords: string_field(obj, "keywords").unwrap_or(defaults.keywords),
            slug: string_field(obj, "slug").unwrap_or(defaults.slug),
        }
    }

    /// Apply input normalization (currently: slugify the slug).
    pub fn normalized(mut self) -> Self {
        self.slug = slugify(&self.slug);
        self
    }

    pub fn validate(&self) -> Result<(), CoreError> {
        if self.title.trim().is_empty() {
            return Err(CoreError::Validation("SEO title must not be empty".into()));
        }
        if !SLUG_RE.is_match(&self.slug) {
            return Err(CoreError::Validation(format!(
                "Invalid slug '{}'. Use lowercase letters, digits and hyphens only",
                self.slug
            )));
        }
        Ok(())
    }

    /// Split the keyword string into trimmed, non-empty entries.
    pub fn keyword_list(&self) -> Vec<&str> {
        self.keywords
            .split(',')
            .map(str::trim)
            .filter(|k| !k.is_empty())
            .collect()
    }

    /// Human-readable warnings for fields past their recommended length.
    pub fn length_warnings(&self) -> Vec<String> {
        let mut warnings = Vec::new();
        let title_len = self.title.chars().count();
        if title_len > TITLE_RECOMMENDED_MAX {
            warnings.push(format!(
                "Title is {title_len} characters; recommended maximum is {TITLE_RECOMMENDED_MAX}"
            ));
        }
        let description_len = self.description.chars().count();
        if description_len > DESCRIPTION_RECOMMENDED_MAX {
            warnings.push(format!(
                "Description is {description_len} characters; recommended maximum is \
                 {DESCRIPTION_RECOMMENDED_MAX}"
            ));
        }
        warnings
    }

    /// Build the search-result preview for a site served at `base_url`.
    pub fn preview(&self, base_url: &str) -> SeoPreview {
        SeoPreview {
            title: self.title.clone(),
            url: format!("{}/{}", base_url.trim_end_matches('/'), self.slug),
            description: self.description.clone(),
            title_length: self.title.chars().count(),
            description_length: self.description.chars().count(),
            warnings: self.length_warnings(),
        }
    }
}

/// How the page would appear in a search result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SeoPreview {
    pub title: String,
    pub url: String,
    pub description: String,
    pub title_length: usize,
    pub description_length: usize,
    pub warnings: Vec<String>,
}

/// Replace each whitespace run with a single hyphen and lowercase the result.
pub fn slugify(input: &str) -> String {
    WHITESPACE_RUN_RE.replace_all(input, "-").to_lowercase()
}
