//! Simulated-event mode: bodies wrapped in a synthetic trigger envelope.

use funcgate::demo;
use funcgate::prelude::*;
use serde_json::Value;
use std::sync::Arc;

fn simulated_router() -> Router {
    let registry = Arc::new(FunctionRegistry::from_modules(demo::modules()));
    let config = GatewayConfig::new().simulate_event(true);
    Router::new(registry, &config)
}

#[tokio::test]
async fn post_body_gains_a_simulated_context() {
    let wire = simulated_router()
        .dispatch(RawRequest::new(Method::Post, "/handler").body(r#"{"foo":"bar"}"#))
        .await;

    assert_eq!(wire.status, 200);
    let body: Value = serde_json::from_slice(&wire.body).unwrap();
    assert_eq!(body["foo"], "bar");
    assert!(body["context"]["id"]
        .as_str()
        .unwrap()
        .contains("simulated"));
    assert!(body["context"]["name"].as_str().unwrap().contains("simulated"));
    assert!(!body["context"]["timestamp"].as_str().unwrap().is_empty());
}

#[tokio::test]
async fn get_without_a_body_breaks() {
    let wire = simulated_router()
        .dispatch(RawRequest::new(Method::Get, "/handler"))
        .await;

    assert_eq!(wire.status, 500);
}

#[tokio::test]
async fn invalid_json_is_never_coerced_to_a_buffer() {
    let wire = simulated_router()
        .dispatch(RawRequest::new(Method::Post, "/handler").body("definitely not json"))
        .await;

    assert_eq!(wire.status, 500);
    let body: Value = serde_json::from_slice(&wire.body).unwrap();
    assert!(body["error"].as_str().unwrap().contains("JSON"));
}

#[tokio::test]
async fn invocation_kind_carries_the_event_tag() {
    let wire = simulated_router()
        .dispatch(RawRequest::new(Method::Post, "/hello").body(r#"{"hello":"world"}"#))
        .await;

    assert_eq!(wire.status, 200);
    let text: String = serde_json::from_slice(&wire.body).unwrap();
    assert_eq!(text, "Hello simulated.event, here is your world");
}

#[tokio::test]
async fn host_pre_parsed_bodies_are_honored() {
    let req = RawRequest::new(Method::Post, "/handler")
        .parsed_body(serde_json::json!({ "pre": "parsed" }));
    let wire = simulated_router().dispatch(req).await;

    assert_eq!(wire.status, 200);
    let body: Value = serde_json::from_slice(&wire.body).unwrap();
    assert_eq!(body["pre"], "parsed");
    assert!(body["context"].is_object());
}
