//! Third-party analytics and custom snippet settings.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::decode::{as_object, string_field};
use crate::error::CoreError;

/// `G-XXXXXXXXXX` (GA4) or `UA-XXXXXXXX-X` (Universal Analytics).
static ANALYTICS_ID_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(G-[A-Z0-9]+|UA-\d+-\d+)$").expect("valid regex"));

/// `AW-XXXXXXXXXX` conversion id.
static ADS_ID_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^AW-[A-Z0-9-]+(/[A-Za-z0-9_-]+)?$").expect("valid regex"));

/// Payload of the `integrations` section. Every field defaults to empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct IntegrationSettings {
    /// Tracking id only, no HTML.
    pub google_analytics: String,
    /// Conversion id (`AW-…`) or a full tag pasted by the operator.
    pub google_ads: String,
    /// Full `<meta name="google-site-verification">` tag.
    pub google_search_console: String,
    /// Raw HTML injected at the end of `<head>`.
    pub custom_head_code: String,
    /// Raw HTML injected before `</body>`.
    pub custom_body_code: String,
}

impl IntegrationSettings {
    /// Merge a stored payload over empty defaults, field by field.
    pub fn from_stored(raw: Option<&Value>) -> Self {
        let obj = as_object(raw);
        Self {
            google_analytics: string_field(obj, "googleAnalytics").unwrap_or_default(),
            google_ads: string_field(obj, "googleAds").unwrap_or_default(),
            google_search_console: string_field(obj, "googleSearchConsole").unwrap_or_default(),
            custom_head_code: string_field(obj, "customHeadCode").unwrap_or_default(),
            custom_body_code: string_field(obj, "customBodyCode").unwrap_or_default(),
        }
    }

    /// Trim the single-line identifier fields.
    pub fn normalized(mut self) -> Self {
        self.google_analytics = self.google_analytics.trim().to_string();
        self.google_ads = self.google_ads.trim().to_string();
        self.google_search_console = self.google_search_console.trim().to_string();
        self
    }

    pub fn validate(&self) -> Result<(), CoreError> {
        if !self.google_analytics.is_empty() && !ANALYTICS_ID_RE.is_match(&self.google_analytics) {
            return Err(CoreError::Validation(format!(
                "Invalid Google Analytics id '{}'. Expected G-XXXXXXXXXX or UA-XXXXXXXX-X",
                self.google_analytics
            )));
        }
        Ok(())
    }

    /// Ids that need a `gtag('config', …)` call, analytics first.
    ///
    /// Only well-formed ids are returned, whatever the stored row holds.
    pub fn gtag_ids(&self) -> Vec<&str> {
        let mut ids = Vec::new();
        if ANALYTICS_ID_RE.is_match(&self.google_analytics) {
            ids.push(self.google_analytics.as_str());
        }
        if ADS_ID_RE.is_match(&self.google_ads) {
            ids.push(self.google_ads.as_str());
        }
        ids
    }

    /// The Ads field when it holds something other than a bare conversion id.
    pub fn ads_raw_tag(&self) -> Option<&str> {
        if self.google_ads.is_empty() || ADS_ID_RE.is_match(&self.google_ads) {
            None
        } else {
            Some(&self.google_ads)
        }
    }
}
