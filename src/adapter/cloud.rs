//! Managed cloud-function adapter.
//!
//! Cloud-function hosts hand the deployed function a request object with the
//! body already materialized and expect the response to be flushed through
//! setter-style APIs rather than a stream. This adapter re-expresses that
//! pair in the gateway's invocation protocol: it reduces the host request to
//! a [`RawRequest`], delegates normalization and invocation to the shared
//! [`Router`], and maps the resulting wire response onto the host's setters.
//! The target handler name is fixed at deploy time, not taken from the path.

use crate::function::registry::FunctionRegistry;
use crate::http::invocation::{Method, RawRequest};
use crate::runtime::{GatewayConfig, Router};
use bytes::Bytes;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;

/// A host-specific request, reduced to the shape every cloud runtime can
/// supply: method, URL, headers, and a fully materialized body (optionally
/// pre-parsed by the host).
#[derive(Debug, Clone, Default)]
pub struct HostRequest {
    pub method: Method,
    /// Request path (plus query string) as the host reports it.
    pub url: String,
    pub headers: HashMap<String, String>,
    pub body: Option<Bytes>,
    /// JSON body already parsed by the host, if it did so.
    pub parsed_body: Option<Value>,
}

impl HostRequest {
    pub fn new(method: Method, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            headers: HashMap::new(),
            body: None,
            parsed_body: None,
        }
    }

    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(key.into(), value.into());
        self
    }

    pub fn body(mut self, body: impl Into<Bytes>) -> Self {
        self.body = Some(body.into());
        self
    }

    pub fn parsed_body(mut self, value: Value) -> Self {
        self.parsed_body = Some(value);
        self
    }
}

/// The host's response surface: status/header setters and a single terminal
/// body write. Implementing this (plus producing a [`HostRequest`]) is all a
/// new hosting environment needs.
pub trait HostResponse {
    fn set_status(&mut self, status: u16);
    fn set_header(&mut self, key: &str, value: &str);
    /// Write the body and terminate the response. Called exactly once.
    fn end(&mut self, body: Bytes);
}

/// Translation shim binding a cloud-function host to the invocation router.
pub struct CloudFunctionAdapter {
    router: Router,
    target: String,
    derive_uri_args: bool,
}

impl CloudFunctionAdapter {
    /// Create an adapter dispatching every host request to `target`.
    pub fn new(registry: Arc<FunctionRegistry>, target: impl Into<String>) -> Self {
        let config = GatewayConfig::new().cors(false);
        Self {
            router: Router::new(registry, &config),
            target: target.into(),
            derive_uri_args: false,
        }
    }

    /// Also derive positional arguments from the request path, even though
    /// the target handler is fixed. Supports path-based sub-arguments on a
    /// single deployed function.
    pub fn with_uri_args(mut self, derive: bool) -> Self {
        self.derive_uri_args = derive;
        self
    }

    /// Handle one host request/response pair.
    pub async fn handle<R: HostResponse>(&self, req: HostRequest, res: &mut R) {
        let mut raw = RawRequest::new(req.method, req.url);
        if let Some(body) = req.body {
            raw = raw.body(body);
        }
        if let Some(parsed) = req.parsed_body {
            raw = raw.parsed_body(parsed);
        }

        // The host does not segment the path for us.
        let uri_args = if self.derive_uri_args {
            raw.path_segments()
                .into_iter()
                .map(|s| s.to_string())
                .collect()
        } else {
            Vec::new()
        };

        let wire = self.router.invoke_route(&self.target, &raw, uri_args).await;

        res.set_status(wire.status);
        for (key, value) in &wire.headers {
            res.set_header(key, value);
        }
        res.end(wire.body);
    }
}
