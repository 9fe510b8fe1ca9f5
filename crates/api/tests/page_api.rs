//! HTTP-level tests for the public page: JSON plan, HTML render, slug route
//! and reveal stream.

mod common;

use axum::http::header::CONTENT_TYPE;
use axum::http::StatusCode;
use common::{body_json, body_text, get, operator_token, put_json_auth};
use serde_json::json;

#[tokio::test]
async fn plan_starts_with_gated_hero_and_follows_visibility() {
    let app = common::build_test_app();
    let token = operator_token(&app).await;
    let response = put_json_auth(
        &app,
        "/api/v1/admin/content/visibility",
        &token,
        json!({ "testimonials": false }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = get(&app, "/api/v1/page").await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;

    let sections = json["sections"].as_array().unwrap();
    let names: Vec<_> = sections
        .iter()
        .map(|s| s["section"].as_str().unwrap())
        .collect();
    assert_eq!(names, ["hero", "benefits", "curriculum", "faq", "cta"]);
    assert_eq!(sections[0]["cta_visible"], false);
    assert_eq!(sections[0]["reveal_in_secs"], 60);
    assert_eq!(json["reveal_after_secs"], 60);
    assert_eq!(json["seo"]["slug"], "de-0-a-1-milhao");
}

#[tokio::test]
async fn plan_without_reveal_delay_shows_cta_immediately() {
    let app = common::build_test_app_with(|config| config.reveal_after_secs = 0);
    let json = body_json(get(&app, "/api/v1/page").await).await;

    assert_eq!(json["sections"][0]["cta_visible"], true);
    assert_eq!(json["sections"][0]["reveal_in_secs"], 0);
}

#[tokio::test]
async fn html_page_renders_only_visible_sections() {
    let app = common::build_test_app();
    let token = operator_token(&app).await;
    put_json_auth(
        &app,
        "/api/v1/admin/content/visibility",
        &token,
        json!({ "testimonials": false, "faq": false }),
    )
    .await;

    let response = get(&app, "/").await;
    assert_eq!(response.status(), StatusCode::OK);
    let content_type = response.headers()[CONTENT_TYPE].to_str().unwrap().to_string();
    assert!(content_type.starts_with("text/html"), "got: {content_type}");

    let html = body_text(response).await;
    assert!(html.contains(r#"id="hero""#));
    assert!(html.contains(r#"id="benefits""#));
    assert!(html.contains(r#"id="cta""#));
    assert!(!html.contains(r#"id="testimonials""#));
    assert!(!html.contains(r#"id="faq""#));
}

#[tokio::test]
async fn html_page_uses_stored_seo_and_integrations() {
    let app = common::build_test_app();
    let token = operator_token(&app).await;
    put_json_auth(
        &app,
        "/api/v1/admin/content/seo",
        &token,
        json!({ "title": "Curso Completo", "keywords": "a, b" }),
    )
    .await;
    put_json_auth(
        &app,
        "/api/v1/admin/content/integrations",
        &token,
        json!({ "googleAnalytics": "G-TEST123", "customHeadCode": "<meta name=\"x\" content=\"y\">" }),
    )
    .await;

    let html = body_text(get(&app, "/").await).await;
    assert!(html.contains("<title>Curso Completo</title>"));
    assert!(html.contains("gtag('config', 'G-TEST123');"));
    assert!(html.contains(r#"<meta name="x" content="y">"#));
}

#[tokio::test]
async fn store_outage_still_renders_defaults() {
    let app = common::build_failing_app();

    let response = get(&app, "/").await;
    assert_eq!(response.status(), StatusCode::OK);
    let html = body_text(response).await;
    assert!(html.contains("De 0 a 1 Milhão com um Método Direto e Sem Enrolação"));
    assert!(html.contains(r#"id="testimonials""#));

    let response = get(&app, "/api/v1/page").await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["sections"].as_array().unwrap().len(), 6);
}

#[tokio::test]
async fn slug_route_serves_only_the_configured_slug() {
    let app = common::build_test_app();

    let response = get(&app, "/de-0-a-1-milhao").await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = get(&app, "/outra-pagina").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(response).await["code"], "NOT_FOUND");

    let token = operator_token(&app).await;
    put_json_auth(
        &app,
        "/api/v1/admin/content/seo",
        &token,
        json!({ "title": "Curso", "slug": "Curso Novo" }),
    )
    .await;

    assert_eq!(get(&app, "/curso-novo").await.status(), StatusCode::OK);
    assert_eq!(get(&app, "/de-0-a-1-milhao").await.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn reveal_stream_ends_with_revealed_event() {
    let app = common::build_test_app_with(|config| config.reveal_after_secs = 0);

    let response = get(&app, "/api/v1/page/reveal").await;
    assert_eq!(response.status(), StatusCode::OK);
    let content_type = response.headers()[CONTENT_TYPE].to_str().unwrap().to_string();
    assert!(content_type.starts_with("text/event-stream"), "got: {content_type}");

    let body = body_text(response).await;
    assert!(body.contains("event: revealed"), "got: {body}");
    assert!(body.contains(r#"data: {"seconds_remaining":0}"#), "got: {body}");
    assert!(!body.contains("event: counting"));
}
