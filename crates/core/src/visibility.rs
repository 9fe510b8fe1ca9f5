//! Section visibility flags and the resolver that makes them total.
//!
//! The stored `visibility` payload may be partial, malformed or missing
//! entirely. [`resolve`] merges it key by key over an all-visible default so
//! the in-memory value always covers every [`SectionId`].

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::decode::{as_object, is_truthy};

/// The closed set of toggleable sections, in render order.
///
/// The hero is not listed: it always renders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SectionId {
    Benefits,
    Curriculum,
    Testimonials,
    Faq,
    Cta,
}

impl SectionId {
    /// Every section id, in the fixed render order.
    pub const ALL: [SectionId; 5] = [
        SectionId::Benefits,
        SectionId::Curriculum,
        SectionId::Testimonials,
        SectionId::Faq,
        SectionId::Cta,
    ];

    /// Key used in the stored payload.
    pub fn as_str(self) -> &'static str {
        match self {
            SectionId::Benefits => "benefits",
            SectionId::Curriculum => "curriculum",
            SectionId::Testimonials => "testimonials",
            SectionId::Faq => "faq",
            SectionId::Cta => "cta",
        }
    }
}

/// Total mapping from [`SectionId`] to "shown".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct VisibilitySettings {
    pub benefits: bool,
    pub curriculum: bool,
    pub testimonials: bool,
    pub faq: bool,
    pub cta: bool,
}

impl Default for VisibilitySettings {
    fn default() -> Self {
        Self::ALL_VISIBLE
    }
}

impl VisibilitySettings {
    pub const ALL_VISIBLE: Self = Self {
        benefits: true,
        curriculum: true,
        testimonials: true,
        faq: true,
        cta: true,
    };

    /// See [`resolve`].
    pub fn resolve(raw: Option<&Value>) -> Self {
        let obj = as_object(raw);
        let mut settings = Self::ALL_VISIBLE;
        for id in SectionId::ALL {
            if let Some(value) = obj.and_then(|o| o.get(id.as_str())) {
                settings.set(id, is_truthy(value));
            }
        }
        settings
    }

    pub fn is_visible(&self, id: SectionId) -> bool {
        match id {
            SectionId::Benefits => self.benefits,
            SectionId::Curriculum => self.curriculum,
            SectionId::Testimonials => self.testimonials,
            SectionId::Faq => self.faq,
            SectionId::Cta => self.cta,
        }
    }

    pub fn set(&mut self, id: SectionId, visible: bool) {
        let slot = match id {
            SectionId::Benefits => &mut self.benefits,
            SectionId::Curriculum => &mut self.curriculum,
            SectionId::Testimonials => &mut self.testimonials,
            SectionId::Faq => &mut self.faq,
            SectionId::Cta => &mut self.cta,
        };
        *slot = visible;
    }
}

/// Resolve a stored visibility payload into a total mapping.
///
/// For each section id: if `raw` is a JSON object containing the key, the
/// value is coerced with JavaScript truthiness; otherwise the section is
/// shown. A missing record behaves exactly like `{}`. Never fails.
pub fn resolve(raw: Option<&Value>) -> VisibilitySettings {
    VisibilitySettings::resolve(raw)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn all_except(hidden: SectionId) -> VisibilitySettings {
        let mut expected = VisibilitySettings::ALL_VISIBLE;
        expected.set(hidden, false);
        expected
    }

    #[test]
    fn null_resolves_to_all_visible() {
        assert_eq!(resolve(None), VisibilitySettings::ALL_VISIBLE);
        assert_eq!(resolve(Some(&json!(null))), VisibilitySettings::ALL_VISIBLE);
    }

    #[test]
    fn empty_object_resolves_to_all_visible() {
        assert_eq!(resolve(Some(&json!({}))), VisibilitySettings::ALL_VISIBLE);
    }

    #[test]
    fn single_key_only_affects_that_section() {
        for id in SectionId::ALL {
            let mut map = serde_json::Map::new();
            map.insert(id.as_str().to_string(), json!(false));
            let raw = Value::Object(map);
            assert_eq!(resolve(Some(&raw)), all_except(id), "hiding {id:?}");
        }
    }

    #[test]
    fn curriculum_false() {
        let resolved = resolve(Some(&json!({ "curriculum": false })));
        assert_eq!(
            resolved,
            VisibilitySettings {
                benefits: true,
                curriculum: false,
                testimonials: true,
                faq: true,
                cta: true,
            }
        );
    }

    #[test]
    fn faq_false() {
        let resolved = resolve(Some(&json!({ "faq": false })));
        assert!(!resolved.faq);
        assert!(resolved.benefits && resolved.curriculum && resolved.testimonials && resolved.cta);
    }

    #[test]
    fn values_use_truthy_coercion() {
        let raw = json!({ "faq": 0, "cta": "no", "benefits": null, "testimonials": "" });
        let resolved = resolve(Some(&raw));
        assert!(!resolved.faq);
        assert!(resolved.cta);
        assert!(!resolved.benefits);
        assert!(!resolved.testimonials);
        assert!(resolved.curriculum);
    }

    #[test]
    fn non_object_payloads_use_defaults() {
        for raw in [json!([false]), json!("faq"), json!(false), json!(0)] {
            assert_eq!(resolve(Some(&raw)), VisibilitySettings::ALL_VISIBLE);
        }
    }

    #[test]
    fn unknown_keys_are_ignored() {
        let raw = json!({ "pricing": false, "cta": false });
        assert_eq!(resolve(Some(&raw)), all_except(SectionId::Cta));
    }

    #[test]
    fn strict_decode_defaults_missing_keys_to_true() {
        let settings: VisibilitySettings = serde_json::from_value(json!({ "faq": false })).unwrap();
        assert_eq!(settings, all_except(SectionId::Faq));
        assert!(serde_json::from_value::<VisibilitySettings>(json!({ "faq": "off" })).is_err());
    }
}
