//! Public page data: snapshot loading, the JSON render plan, and the reveal
//! countdown stream.

use std::convert::Infallible;

use axum::extract::State;
use axum::response::sse::{Event, KeepAlive, Sse};
use axum::Json;
use futures::stream::{self, Stream};
use lander_core::composer::{PageSnapshot, SectionRenderRequest};
use lander_core::hero::HeroContent;
use lander_core::integrations::IntegrationSettings;
use lander_core::reveal::{spawn_countdown, RevealGate, TICK_PERIOD};
use lander_core::section::SectionName;
use lander_core::seo::SeoSettings;
use lander_core::visibility::VisibilitySettings;
use lander_db::{ContentStore, StoreError};
use serde::Serialize;
use serde_json::{json, Value};
use tokio::sync::watch;

use crate::state::AppState;

/// Read the four page sections concurrently and decode them.
///
/// Never fails: a missing row falls back to defaults quietly, a backend
/// failure falls back with a warning.
pub async fn load_snapshot(store: &dyn ContentStore) -> PageSnapshot {
    let (hero, visibility, seo, integrations) = tokio::join!(
        fetch_or_default(store, SectionName::Hero),
        fetch_or_default(store, SectionName::Visibility),
        fetch_or_default(store, SectionName::Seo),
        fetch_or_default(store, SectionName::Integrations),
    );

    PageSnapshot {
        hero: HeroContent::from_stored(hero.as_ref()),
        visibility: VisibilitySettings::resolve(visibility.as_ref()),
        seo: SeoSettings::from_stored(seo.as_ref()),
        integrations: IntegrationSettings::from_stored(integrations.as_ref()),
    }
}

async fn fetch_or_default(store: &dyn ContentStore, name: SectionName) -> Option<Value> {
    match store.fetch_section(name.as_str()).await {
        Ok(row) => Some(row.content),
        Err(StoreError::NotFound(_)) => {
            tracing::debug!(section = %name, "No stored content, using defaults");
            None
        }
        Err(e) => {
            tracing::warn!(section = %name, error = %e, "Content fetch failed, using defaults");
            None
        }
    }
}

/// JSON render plan for clients that draw the page themselves.
#[derive(Debug, Serialize)]
pub struct PagePlan {
    pub seo: SeoSettings,
    pub sections: Vec<SectionRenderRequest>,
    pub reveal_after_secs: u32,
}

/// GET /api/v1/page
pub async fn page_plan(State(state): State<AppState>) -> Json<PagePlan> {
    let snapshot = load_snapshot(state.content.as_ref()).await;
    let reveal_after_secs = state.config.reveal_after_secs;
    let sections = snapshot.compose(RevealGate::new(reveal_after_secs));

    Json(PagePlan {
        seo: snapshot.seo,
        sections,
        reveal_after_secs,
    })
}

/// GET /api/v1/page/reveal
///
/// One countdown per subscriber. Emits `counting` events and a final
/// `revealed`, then ends. A client that disconnects drops the receiver, which
/// stops its countdown task.
pub async fn reveal_stream(
    State(state): State<AppState>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let (rx, _task) = spawn_countdown(RevealGate::new(state.config.reveal_after_secs), TICK_PERIOD);
    Sse::new(gate_events(rx)).keep_alive(KeepAlive::default())
}

/// Turn a countdown receiver into SSE events: the current state first, then
/// every change, ending after `revealed`.
fn gate_events(
    rx: watch::Receiver<RevealGate>,
) -> impl Stream<Item = Result<Event, Infallible>> {
    stream::unfold(Some((rx, false)), |feed| async move {
        let (mut rx, started) = feed?;
        if started && rx.changed().await.is_err() {
            return None;
        }

        let gate = *rx.borrow_and_update();
        let next = (!gate.is_revealed()).then_some((rx, true));
        Some((Ok(gate_event(gate)), next))
    })
}

fn gate_event(gate: RevealGate) -> Event {
    let event = match gate {
        RevealGate::Counting { .. } => "counting",
        RevealGate::Revealed => "revealed",
    };
    Event::default()
        .event(event)
        .data(json!({ "seconds_remaining": gate.seconds_remaining() }).to_string())
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use futures::StreamExt;

    use super::*;

    #[tokio::test(start_paused = true)]
    async fn gate_events_follow_the_countdown_to_the_end() {
        let (rx, task) = spawn_countdown(RevealGate::new(3), Duration::from_secs(1));
        let events: Vec<_> = gate_events(rx).collect().await;
        assert_eq!(events.len(), 4);
        task.await.unwrap();
    }

    #[tokio::test]
    async fn revealed_gate_yields_a_single_event() {
        let (rx, _task) = spawn_countdown(RevealGate::new(0), TICK_PERIOD);
        let events: Vec<_> = gate_events(rx).collect().await;
        assert_eq!(events.len(), 1);
    }
}
