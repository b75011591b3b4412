//! Cloud-function adapter: fixed-target dispatch over host request/response
//! shapes.

use bytes::Bytes;
use funcgate::demo;
use funcgate::prelude::*;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::Arc;

/// Records the setter calls a host would receive.
#[derive(Default)]
struct RecordingResponse {
    status: Option<u16>,
    headers: HashMap<String, String>,
    body: Option<Bytes>,
    ends: usize,
}

impl HostResponse for RecordingResponse {
    fn set_status(&mut self, status: u16) {
        self.status = Some(status);
    }

    fn set_header(&mut self, key: &str, value: &str) {
        self.headers.insert(key.to_string(), value.to_string());
    }

    fn end(&mut self, body: Bytes) {
        self.body = Some(body);
        self.ends += 1;
    }
}

fn adapter(target: &str) -> CloudFunctionAdapter {
    let registry = Arc::new(FunctionRegistry::from_modules(demo::modules()));
    CloudFunctionAdapter::new(registry, target)
}

#[tokio::test]
async fn fixed_target_ignores_the_path_for_routing() {
    let mut res = RecordingResponse::default();
    adapter("hello")
        .handle(
            HostRequest::new(Method::Get, "/anything/at/all?hello=world"),
            &mut res,
        )
        .await;

    assert_eq!(res.status, Some(200));
    let text: String = serde_json::from_slice(res.body.as_ref().unwrap()).unwrap();
    assert_eq!(text, "Hello HTTP_GET, here is your world");
    assert_eq!(res.ends, 1);
}

#[tokio::test]
async fn post_body_reaches_the_target() {
    let sent = json!({ "a": 1, "b": "two" });
    let mut res = RecordingResponse::default();
    adapter("handler")
        .handle(
            HostRequest::new(Method::Post, "/").body(sent.to_string()),
            &mut res,
        )
        .await;

    assert_eq!(res.status, Some(200));
    let echoed: Value = serde_json::from_slice(res.body.as_ref().unwrap()).unwrap();
    assert_eq!(echoed, sent);
}

#[tokio::test]
async fn host_pre_parsed_bodies_skip_reparsing() {
    let mut res = RecordingResponse::default();
    adapter("handler")
        .handle(
            HostRequest::new(Method::Post, "/").parsed_body(json!({ "pre": "parsed" })),
            &mut res,
        )
        .await;

    let echoed: Value = serde_json::from_slice(res.body.as_ref().unwrap()).unwrap();
    assert_eq!(echoed["pre"], "parsed");
}

#[tokio::test]
async fn uri_args_variant_segments_the_path() {
    let registry = Arc::new(FunctionRegistry::from_modules(demo::modules()));
    let adapter = CloudFunctionAdapter::new(registry, "withArgs").with_uri_args(true);

    let mut res = RecordingResponse::default();
    adapter
        .handle(HostRequest::new(Method::Get, "/123/456"), &mut res)
        .await;

    assert_eq!(res.status, Some(200));
    let text: String = serde_json::from_slice(res.body.as_ref().unwrap()).unwrap();
    assert_eq!(text, "123");
}

#[tokio::test]
async fn unknown_target_is_404() {
    let mut res = RecordingResponse::default();
    adapter("missing")
        .handle(HostRequest::new(Method::Get, "/"), &mut res)
        .await;

    assert_eq!(res.status, Some(404));
    assert!(res.body.as_ref().unwrap().is_empty());
    assert_eq!(res.ends, 1);
}

#[tokio::test]
async fn default_headers_apply_without_cors() {
    let mut res = RecordingResponse::default();
    adapter("hello")
        .handle(HostRequest::new(Method::Get, "/?hello=there"), &mut res)
        .await;

    assert_eq!(res.headers["content-type"], "application/json");
    assert!(!res.headers.contains_key("Access-Control-Allow-Origin"));
}
