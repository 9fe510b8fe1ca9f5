//! Page composition: which sections render, in which order, with which copy.

use serde::Serialize;

use crate::hero::HeroContent;
use crate::integrations::IntegrationSettings;
use crate::reveal::RevealGate;
use crate::seo::SeoSettings;
use crate::visibility::{SectionId, VisibilitySettings};

/// One presentational section to render.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "section", rename_all = "snake_case")]
pub enum SectionRenderRequest {
    Hero {
        title: String,
        subtitle: String,
        video_url: String,
        /// Whether the primary call-to-action control is shown.
        cta_visible: bool,
        /// Seconds left on the reveal gate; zero once revealed.
        reveal_in_secs: u32,
    },
    Benefits,
    Curriculum,
    Testimonials,
    Faq,
    Cta,
}

impl SectionRenderRequest {
    /// Stable lowercase name of the section.
    pub fn name(&self) -> &'static str {
        match self {
            SectionRenderRequest::Hero { .. } => "hero",
            SectionRenderRequest::Benefits => SectionId::Benefits.as_str(),
            SectionRenderRequest::Curriculum => SectionId::Curriculum.as_str(),
            SectionRenderRequest::Testimonials => SectionId::Testimonials.as_str(),
            SectionRenderRequest::Faq => SectionId::Faq.as_str(),
            SectionRenderRequest::Cta => SectionId::Cta.as_str(),
        }
    }

    fn hero(hero: &HeroContent, gate: RevealGate) -> Self {
        SectionRenderRequest::Hero {
            title: hero.title.clone(),
            subtitle: hero.subtitle.clone(),
            video_url: hero.video_url.clone(),
            cta_visible: gate.is_revealed(),
            reveal_in_secs: gate.seconds_remaining(),
        }
    }
}

impl From<SectionId> for SectionRenderRequest {
    fn from(id: SectionId) -> Self {
        match id {
            SectionId::Benefits => SectionRenderRequest::Benefits,
            SectionId::Curriculum => SectionRenderRequest::Curriculum,
            SectionId::Testimonials => SectionRenderRequest::Testimonials,
            SectionId::Faq => SectionRenderRequest::Faq,
            SectionId::Cta => SectionRenderRequest::Cta,
        }
    }
}

/// Compose the ordered section list for one page view.
///
/// The hero is always first. The remaining sections follow the fixed order
/// of [`SectionId::ALL`]; visibility only gates presence.
pub fn compose(
    hero: &HeroContent,
    visibility: &VisibilitySettings,
    gate: RevealGate,
) -> Vec<SectionRenderRequest> {
    std::iter::once(SectionRenderRequest::hero(hero, gate))
        .chain(
            SectionId::ALL
                .into_iter()
                .filter(|id| visibility.is_visible(*id))
                .map(SectionRenderRequest::from),
        )
        .collect()
}

/// Everything a page view reads from the content store, already decoded.
///
/// A snapshot is taken once per request and never updated.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PageSnapshot {
    pub hero: HeroContent,
    pub visibility: VisibilitySettings,
    pub seo: SeoSettings,
    pub integrations: IntegrationSettings,
}

impl PageSnapshot {
    pub fn compose(&self, gate: RevealGate) -> Vec<SectionRenderRequest> {
        compose(&self.hero, &self.visibility, gate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn names(sections: &[SectionRenderRequest]) -> Vec<&'static str> {
        sections.iter().map(SectionRenderRequest::name).collect()
    }

    #[test]
    fn all_visible_renders_every_section_in_order() {
        let sections = compose(
            &HeroContent::default(),
            &VisibilitySettings::ALL_VISIBLE,
            RevealGate::default(),
        );
        assert_eq!(
            names(&sections),
            vec!["hero", "benefits", "curriculum", "testimonials", "faq", "cta"]
        );
    }

    #[test]
    fn every_subset_keeps_fixed_order() {
        let fixed: Vec<&str> = SectionId::ALL.iter().map(|id| id.as_str()).collect();

        for mask in 0u8..32 {
            let mut visibility = VisibilitySettings::ALL_VISIBLE;
            for (bit, id) in SectionId::ALL.into_iter().enumerate() {
                visibility.set(id, mask & (1 << bit) != 0);
            }

            let sections = compose(&HeroContent::default(), &visibility, RevealGate::default());
            let rendered = names(&sections);

            assert_eq!(rendered[0], "hero", "hero must be first for mask {mask:#07b}");
            let expected: Vec<&str> = fixed
                .iter()
                .copied()
                .zip(SectionId::ALL)
                .filter(|(_, id)| visibility.is_visible(*id))
                .map(|(name, _)| name)
                .collect();
            assert_eq!(&rendered[1..], expected.as_slice(), "mask {mask:#07b}");
        }
    }

    #[test]
    fn all_hidden_still_renders_hero() {
        let mut visibility = VisibilitySettings::ALL_VISIBLE;
        for id in SectionId::ALL {
            visibility.set(id, false);
        }
        let sections = compose(&HeroContent::default(), &visibility, RevealGate::default());
        assert_eq!(names(&sections), vec!["hero"]);
    }

    #[test]
    fn hero_carries_content() {
        let hero = HeroContent {
            title: "Título".into(),
            subtitle: "Sub".into(),
            video_url: String::new(),
        };
        let sections = compose(&hero, &VisibilitySettings::ALL_VISIBLE, RevealGate::default());
        assert_matches!(
            &sections[0],
            SectionRenderRequest::Hero { title, subtitle, video_url, .. }
                if title == "Título" && subtitle == "Sub" && video_url.is_empty()
        );
    }

    #[test]
    fn cta_hidden_until_gate_revealed() {
        let hero = HeroContent::default();
        let visibility = VisibilitySettings::ALL_VISIBLE;

        let mut gate = RevealGate::new(60);
        let before = compose(&hero, &visibility, gate);
        assert_matches!(
            before[0],
            SectionRenderRequest::Hero { cta_visible: false, reveal_in_secs: 60, .. }
        );

        for _ in 0..60 {
            gate = gate.tick();
        }
        let after = compose(&hero, &visibility, gate);
        assert_matches!(
            after[0],
            SectionRenderRequest::Hero { cta_visible: true, reveal_in_secs: 0, .. }
        );
    }

    #[test]
    fn render_request_serializes_with_section_tag() {
        let json = serde_json::to_value(SectionRenderRequest::Faq).unwrap();
        assert_eq!(json, serde_json::json!({ "section": "faq" }));
    }

    #[test]
    fn default_snapshot_composes_full_page() {
        let snapshot = PageSnapshot::default();
        assert_eq!(snapshot.compose(RevealGate::Revealed).len(), 6);
    }
}
