//! actix-web front end tests
//!
//! Full HTTP round trips through `configure_gateway`, including stage
//! prefixes and host-derived shortened URLs.

#![cfg(feature = "server")]

use std::sync::Arc;

use actix_web::http::StatusCode;
use actix_web::http::header;
use actix_web::test::{self, TestRequest};
use actix_web::App;

use linkgate::api::CreateLinkResponse;
use linkgate::config::StaticConfig;
use linkgate::runtime::lifetime::startup::build_context;
use linkgate::runtime::modes::configure_gateway;
use linkgate::storage::{LinkStore, MemoryLinkStore};

// =============================================================================
// Test Setup
// =============================================================================

fn config_with_stage(stage: Option<&str>) -> StaticConfig {
    let mut config = StaticConfig::default();
    config.routing.stage = stage.map(str::to_string);
    config
}

macro_rules! gateway_app {
    ($store:expr, $config:expr) => {{
        let context = build_context($store, &$config);
        test::init_service(
            App::new().configure(configure_gateway(context.router, context.path_mapper)),
        )
        .await
    }};
}

// =============================================================================
// Tests
// =============================================================================

#[actix_web::test]
async fn test_post_then_follow_redirect() {
    let store = Arc::new(MemoryLinkStore::new());
    let app = gateway_app!(store.clone(), config_with_stage(None));

    let req = TestRequest::post()
        .uri("/redirect")
        .insert_header((header::HOST, "go.example.com"))
        .insert_header((header::ACCEPT, "application/json"))
        .set_payload(r#"{"destination_url":"https://example.com/landing"}"#)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(
        resp.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(),
        "*"
    );

    let body: CreateLinkResponse = test::read_body_json(resp).await;
    let token = body
        .shortened_url
        .strip_prefix("https://go.example.com/redirect/")
        .expect("custom domain base url")
        .to_string();

    let req = TestRequest::get()
        .uri(&format!("/redirect/{}", token))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::MOVED_PERMANENTLY);
    assert_eq!(
        resp.headers().get(header::LOCATION).unwrap(),
        "https://example.com/landing"
    );
    assert_eq!(store.len(), 1);
}

#[actix_web::test]
async fn test_stage_prefix_is_stripped_and_kept_for_gateway_hosts() {
    let store = Arc::new(MemoryLinkStore::new());
    let app = gateway_app!(store.clone(), config_with_stage(Some("prod")));

    let req = TestRequest::post()
        .uri("/prod/redirect")
        .insert_header((header::HOST, "abc.execute-api.us-east-1.amazonaws.com"))
        .insert_header((header::ACCEPT, "application/json"))
        .set_payload(r#"{"destination_url":"https://example.com","custom_token":"staged"}"#)
        .to_request();
    let body: CreateLinkResponse = test::call_and_read_body_json(&app, req).await;
    assert_eq!(
        body.shortened_url,
        "https://abc.execute-api.us-east-1.amazonaws.com/prod/redirect/staged"
    );

    for uri in ["/prod/redirect/staged", "/redirect/staged"] {
        let req = TestRequest::get().uri(uri).to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::MOVED_PERMANENTLY, "uri {}", uri);
    }
}

#[actix_web::test]
async fn test_form_page_and_not_found() {
    let store = Arc::new(MemoryLinkStore::new());
    let app = gateway_app!(store, config_with_stage(None));

    let req = TestRequest::get()
        .uri("/redirect")
        .insert_header((header::HOST, "go.example.com"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(
        resp.headers().get(header::CONTENT_TYPE).unwrap(),
        "text/html"
    );
    let body = test::read_body(resp).await;
    let html = std::str::from_utf8(&body).unwrap();
    assert!(html.contains(r#"data-endpoint="https://go.example.com/redirect""#));

    let req = TestRequest::get().uri("/redirect/missing1").to_request();
    let body = test::call_and_read_body(&app, req).await;
    assert_eq!(body, "Token missing1 Invalid. URL Not Found\n");
}

#[actix_web::test]
async fn test_unsupported_method_and_malformed_body() {
    let store = Arc::new(MemoryLinkStore::new());
    let app = gateway_app!(store.clone(), config_with_stage(None));

    let req = TestRequest::delete().uri("/redirect/abc").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body = test::read_body(resp).await;
    assert_eq!(body, "HTTP method not supported.");

    let req = TestRequest::post()
        .uri("/redirect")
        .set_payload("destination_url=https://example.com")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let req = TestRequest::post()
        .uri("/redirect")
        .set_payload(vec![0xff, 0xfe, 0xfd])
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    assert!(store.is_empty());
}

#[actix_web::test]
async fn test_html_create_response_over_http() {
    let store = Arc::new(MemoryLinkStore::new());
    let app = gateway_app!(store.clone(), config_with_stage(None));

    let req = TestRequest::post()
        .uri("/redirect")
        .insert_header((header::HOST, "go.example.com"))
        .set_payload(r#"{"destination_url":"https://example.com","custom_token":"html1"}"#)
        .to_request();
    let body = test::call_and_read_body(&app, req).await;
    assert_eq!(
        body,
        "Shortened URL for https://example.com created. <br>The shortened url is <a href=\"https://go.example.com/redirect/html1\">https://go.example.com/redirect/html1</a><br>"
    );
    assert_eq!(
        store.get("html1").await.unwrap().as_deref(),
        Some("https://example.com")
    );
}

#[actix_web::test]
async fn test_slashed_resource_config() {
    let store = Arc::new(MemoryLinkStore::new());
    let mut config = config_with_stage(None);
    config.routing.resource = "/go/".to_string();
    let app = gateway_app!(store, config);

    let req = TestRequest::post()
        .uri("/go")
        .insert_header((header::HOST, "short.example.com"))
        .insert_header((header::ACCEPT, "application/json"))
        .set_payload(r#"{"destination_url":"https://example.com","custom_token":"s1"}"#)
        .to_request();
    let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
    let object = body.as_object().expect("JSON object");
    assert_eq!(object.len(), 1);
    assert_eq!(
        object["shortened_url"],
        serde_json::json!("https://short.example.com/go/s1")
    );

    let req = TestRequest::get().uri("/go/s1").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::MOVED_PERMANENTLY);
}
