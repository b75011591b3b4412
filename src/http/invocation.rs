//! Normalized invocation types passed to gateway handlers.

use crate::http::payload::Payload;
use bytes::Bytes;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// HTTP method enumeration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Method {
    #[default]
    Get,
    Post,
    Put,
    Delete,
    Patch,
    Head,
    Options,
}

impl Method {
    /// Whether this method carries body semantics on the wire.
    pub fn has_body(&self) -> bool {
        !matches!(self, Method::Get | Method::Head | Method::Options)
    }
}

impl std::fmt::Display for Method {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Method::Get => write!(f, "GET"),
            Method::Post => write!(f, "POST"),
            Method::Put => write!(f, "PUT"),
            Method::Delete => write!(f, "DELETE"),
            Method::Patch => write!(f, "PATCH"),
            Method::Head => write!(f, "HEAD"),
            Method::Options => write!(f, "OPTIONS"),
        }
    }
}

impl From<&hyper::Method> for Method {
    fn from(method: &hyper::Method) -> Self {
        match *method {
            hyper::Method::GET => Method::Get,
            hyper::Method::POST => Method::Post,
            hyper::Method::PUT => Method::Put,
            hyper::Method::DELETE => Method::Delete,
            hyper::Method::PATCH => Method::Patch,
            hyper::Method::HEAD => Method::Head,
            hyper::Method::OPTIONS => Method::Options,
            _ => Method::Get,
        }
    }
}

/// Invocation kind tag carried on every [`Invocation`].
///
/// HTTP-triggered invocations display as `HTTP_<METHOD>`; simulated events
/// carry their own fixed tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvocationKind {
    Http(Method),
    SimulatedEvent,
}

impl std::fmt::Display for InvocationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InvocationKind::Http(method) => write!(f, "HTTP_{}", method),
            InvocationKind::SimulatedEvent => write!(f, "simulated.event"),
        }
    }
}

/// The normalized unit of work passed to a handler.
///
/// Built fresh per request by the router and discarded after the handler
/// returns. `uri_args` holds the path segments following the route name, in
/// original order.
#[derive(Debug, Clone)]
pub struct Invocation {
    pub kind: InvocationKind,
    pub payload: Payload,
    pub uri_args: Vec<String>,
}

impl Invocation {
    pub fn new(kind: InvocationKind, payload: Payload) -> Self {
        Self {
            kind,
            payload,
            uri_args: Vec::new(),
        }
    }

    pub fn with_args(mut self, uri_args: Vec<String>) -> Self {
        self.uri_args = uri_args;
        self
    }

    /// Get a positional path argument, if present.
    pub fn arg(&self, index: usize) -> Option<&str> {
        self.uri_args.get(index).map(String::as_str)
    }
}

/// A materialized inbound request: method, URI, and fully-drained body.
///
/// This is the raw shape every host (dev server, container, cloud adapter)
/// reduces its own request type to before handing it to the router. Body
/// draining is the host's job; everything past this point is pure
/// computation over buffered input.
#[derive(Debug, Clone, Default)]
pub struct RawRequest {
    pub method: Method,
    /// Request path including any query string.
    pub uri: String,
    /// Drained body bytes, if the request carried any.
    pub body: Option<Bytes>,
    /// Body already parsed by the host (some hosts pre-parse JSON bodies).
    pub parsed_body: Option<Value>,
}

impl RawRequest {
    pub fn new(method: Method, uri: impl Into<String>) -> Self {
        Self {
            method,
            uri: uri.into(),
            body: None,
            parsed_body: None,
        }
    }

    /// Set the request body.
    pub fn body(mut self, body: impl Into<Bytes>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Set a host-pre-parsed body, used instead of re-parsing the raw bytes.
    pub fn parsed_body(mut self, value: Value) -> Self {
        self.parsed_body = Some(value);
        self
    }

    /// The URI path, without the query string.
    pub fn path(&self) -> &str {
        self.uri.split('?').next().unwrap_or("")
    }

    /// The query string, if any.
    pub fn query(&self) -> Option<&str> {
        self.uri.split_once('?').map(|(_, q)| q)
    }

    /// Non-empty path segments in order.
    pub fn path_segments(&self) -> Vec<&str> {
        self.path().split('/').filter(|s| !s.is_empty()).collect()
    }
}
