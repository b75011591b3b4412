//! HTTP dispatch tests against the invocation router.

use funcgate::demo;
use funcgate::http::payload::{self, PayloadMode};
use funcgate::prelude::*;
use serde_json::{json, Value};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// The demo modules plus a marker route that records whether it ran.
fn router_with_marker() -> (Router, Arc<AtomicBool>) {
    let invoked = Arc::new(AtomicBool::new(false));
    let flag = invoked.clone();
    let marker = HandlerModule::new("marker").export(
        "watched",
        from_fn(move |_invocation| {
            flag.store(true, Ordering::SeqCst);
            Ok("ran")
        }),
    );

    let mut modules = demo::modules();
    modules.push(marker);
    let registry = Arc::new(FunctionRegistry::from_modules(modules));
    (Router::new(registry, &GatewayConfig::default()), invoked)
}

fn router() -> Router {
    router_with_marker().0
}

fn text_body(wire: &WireResponse) -> String {
    serde_json::from_slice(&wire.body).expect("body should be a JSON string")
}

#[tokio::test]
async fn get_status_defaults_to_200_with_handler_value() {
    let wire = router()
        .dispatch(RawRequest::new(Method::Get, "/hello?hello=world"))
        .await;

    assert_eq!(wire.status, 200);
    assert_eq!(text_body(&wire), "Hello HTTP_GET, here is your world");
}

#[tokio::test]
async fn method_is_reflected_in_the_invocation_kind() {
    let wire = router()
        .dispatch(RawRequest::new(Method::Post, "/hello").body(r#"{"hello":"world"}"#))
        .await;

    assert_eq!(wire.status, 200);
    assert_eq!(text_body(&wire), "Hello HTTP_POST, here is your world");
}

#[tokio::test]
async fn unknown_route_is_404_with_empty_body() {
    let (router, invoked) = router_with_marker();

    let wire = router
        .dispatch(RawRequest::new(Method::Post, "/nowhere").body("{not json"))
        .await;

    assert_eq!(wire.status, 404);
    assert!(wire.body.is_empty());
    // No other handler runs as a side effect, and the malformed body is
    // never parsed.
    assert!(!invoked.load(Ordering::SeqCst));
}

#[tokio::test]
async fn handler_error_maps_to_500() {
    let wire = router().dispatch(RawRequest::new(Method::Get, "/goodbye")).await;

    assert_eq!(wire.status, 500);
    let body: Value = serde_json::from_slice(&wire.body).unwrap();
    assert_eq!(body["error"], "boom");
}

#[tokio::test]
async fn path_segments_become_uri_args() {
    let wire = router()
        .dispatch(RawRequest::new(Method::Get, "/withArgs/123"))
        .await;

    assert_eq!(wire.status, 200);
    assert_eq!(text_body(&wire), "123");
}

#[tokio::test]
async fn descriptor_status_and_message_pass_through() {
    let wire = router().dispatch(RawRequest::new(Method::Get, "/fancy")).await;

    assert_eq!(wire.status, 401);
    let body: Value = serde_json::from_slice(&wire.body).unwrap();
    assert_eq!(body["message"], "Unauthorized");
}

#[tokio::test]
async fn post_json_payload_deep_equals_the_body() {
    let sent = json!({ "a": 1, "b": [true, null, "three"], "nested": { "deep": {} } });
    let wire = router()
        .dispatch(RawRequest::new(Method::Post, "/handler").body(sent.to_string()))
        .await;

    assert_eq!(wire.status, 200);
    let echoed: Value = serde_json::from_slice(&wire.body).unwrap();
    assert_eq!(echoed, sent);
}

#[tokio::test]
async fn post_non_json_body_becomes_a_buffer() {
    let raw: &[u8] = b"\x00\x01\xffnot json at all";
    let wire = router()
        .dispatch(RawRequest::new(Method::Post, "/handler").body(raw))
        .await;

    assert_eq!(wire.status, 200);
    // The echo handler returns the buffer verbatim: binary passthrough.
    assert_eq!(&wire.body[..], raw);
}

#[tokio::test]
async fn options_preflight_short_circuits() {
    let (router, invoked) = router_with_marker();

    let wire = router
        .dispatch(RawRequest::new(Method::Options, "/watched"))
        .await;

    assert_eq!(wire.status, 200);
    assert_eq!(wire.headers["Access-Control-Allow-Origin"], "*");
    assert!(!invoked.load(Ordering::SeqCst));
}

#[tokio::test]
async fn options_on_unknown_route_is_still_404() {
    let wire = router()
        .dispatch(RawRequest::new(Method::Options, "/missing"))
        .await;

    assert_eq!(wire.status, 404);
}

#[tokio::test]
async fn async_handlers_are_awaited() {
    let wire = router().dispatch(RawRequest::new(Method::Get, "/useAsync")).await;

    assert_eq!(wire.status, 200);
    assert_eq!(text_body(&wire), "it works");
}

#[tokio::test]
async fn handler_headers_override_defaults() {
    let raw: &[u8] = b"\xff\xd8\xff\xe0";
    let wire = router()
        .dispatch(RawRequest::new(Method::Post, "/upload").body(raw))
        .await;

    assert_eq!(wire.status, 200);
    assert_eq!(wire.headers["content-type"], "image/jpeg");
    assert_eq!(&wire.body[..], raw);
}

#[test]
fn normalization_is_idempotent_over_a_replayed_request() {
    let req = RawRequest::new(Method::Post, "/handler").body(r#"{"k":"v"}"#);

    let first = payload::from_request(&req, PayloadMode::Normal, 1024).unwrap();
    let second = payload::from_request(&req, PayloadMode::Normal, 1024).unwrap();
    assert_eq!(first, second);

    let get = RawRequest::new(Method::Get, "/handler?x=1&y=2");
    let first = payload::from_request(&get, PayloadMode::Normal, 1024).unwrap();
    let second = payload::from_request(&get, PayloadMode::Normal, 1024).unwrap();
    assert_eq!(first, second);
}

#[tokio::test]
async fn oversized_body_fails_the_request() {
    let registry = Arc::new(FunctionRegistry::from_modules(demo::modules()));
    let config = GatewayConfig {
        max_body_size: 8,
        ..GatewayConfig::default()
    };
    let router = Router::new(registry, &config);

    let wire = router
        .dispatch(RawRequest::new(Method::Post, "/handler").body("{\"way\":\"too long\"}"))
        .await;

    assert_eq!(wire.status, 500);
}
