//! Section names and their typed payloads.
//!
//! The content table is keyed by a free-form `section_name`, but the set of
//! names the application understands is closed. [`SectionName`] is that set
//! and [`SectionContent`] is the payload shape for each name. Payloads are
//! decoded once, here, at the store boundary:
//!
//! - [`SectionContent::from_stored`] is lenient and never fails (public page).
//! - [`SectionContent::from_submission`] is strict and validates (back office).

use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use serde_json::Value;

use crate::error::CoreError;
use crate::hero::HeroContent;
use crate::integrations::IntegrationSettings;
use crate::seo::SeoSettings;
use crate::visibility::VisibilitySettings;

/// The closed set of content section names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SectionName {
    Hero,
    Visibility,
    Seo,
    Integrations,
}

impl SectionName {
    pub const ALL: [SectionName; 4] = [
        SectionName::Hero,
        SectionName::Visibility,
        SectionName::Seo,
        SectionName::Integrations,
    ];

    /// The `section_name` column value.
    pub fn as_str(self) -> &'static str {
        match self {
            SectionName::Hero => "hero",
            SectionName::Visibility => "visibility",
            SectionName::Seo => "seo",
            SectionName::Integrations => "integrations",
        }
    }
}

impl fmt::Display for SectionName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SectionName {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SectionName::ALL
            .into_iter()
            .find(|name| name.as_str() == s)
            .ok_or_else(|| {
                CoreError::Validation(format!(
                    "Unknown section '{s}'. Must be one of: hero, visibility, seo, integrations"
                ))
            })
    }
}

/// A decoded section payload, tagged by its section name.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum SectionContent {
    Hero(HeroContent),
    Visibility(VisibilitySettings),
    Seo(SeoSettings),
    Integrations(IntegrationSettings),
}

impl SectionContent {
    pub fn name(&self) -> SectionName {
        match self {
            SectionContent::Hero(_) => SectionName::Hero,
            SectionContent::Visibility(_) => SectionName::Visibility,
            SectionContent::Seo(_) => SectionName::Seo,
            SectionContent::Integrations(_) => SectionName::Integrations,
        }
    }

    /// Decode a stored payload, merging every field over its default.
    ///
    /// `raw` is `None` when no row exists. Never fails.
    pub fn from_stored(name: SectionName, raw: Option<&Value>) -> Self {
        match name {
            SectionName::Hero => SectionContent::Hero(HeroContent::from_stored(raw)),
            SectionName::Visibility => {
                SectionContent::Visibility(VisibilitySettings::resolve(raw))
            }
            SectionName::Seo => SectionContent::Seo(SeoSettings::from_stored(raw)),
            SectionName::Integrations => {
                SectionContent::Integrations(IntegrationSettings::from_stored(raw))
            }
        }
    }

    /// Decode an operator-submitted payload.
    ///
    /// Missing fields take their defaults; fields of the wrong type are a
    /// validation error. The result is normalized and validated, ready to be
    /// persisted with [`SectionContent::to_value`].
    pub fn from_submission(name: SectionName, payload: Value) -> Result<Self, CoreError> {
        if !payload.is_object() {
            return Err(CoreError::Validation(format!(
                "Content for section '{name}' must be a JSON object"
            )));
        }

        let content = match name {
            SectionName::Hero => SectionContent::Hero(strict(name, payload)?),
            SectionName::Visibility => SectionContent::Visibility(strict(name, payload)?),
            SectionName::Seo => SectionContent::Seo(strict::<SeoSettings>(name, payload)?.normalized()),
            SectionName::Integrations => SectionContent::Integrations(
                strict::<IntegrationSettings>(name, payload)?.normalized(),
            ),
        };

        content.validate()?;
        Ok(content)
    }

    pub fn validate(&self) -> Result<(), CoreError> {
        match self {
            SectionContent::Hero(hero) => hero.validate(),
            SectionContent::Visibility(_) => Ok(()),
            SectionContent::Seo(seo) => seo.validate(),
            SectionContent::Integrations(integrations) => integrations.validate(),
        }
    }

    /// Serialize back to the stored JSON shape.
    pub fn to_value(&self) -> Result<Value, CoreError> {
        serde_json::to_value(self)
            .map_err(|e| CoreError::Internal(format!("Failed to encode section content: {e}")))
    }
}

fn strict<T: serde::de::DeserializeOwned>(name: SectionName, payload: Value) -> Result<T, CoreError> {
    serde_json::from_value(payload)
        .map_err(|e| CoreError::Validation(format!("Invalid content for section '{name}': {e}")))
}
