//! Response descriptors and the wire-level response writer.

use bytes::Bytes;
use serde::Serialize;
use serde_json::Value;
use std::collections::HashMap;
use tracing::warn;

/// The structured value a handler returns, mapped onto an HTTP response.
///
/// Every field is optional: `status` defaults to 200, `headers` merge over
/// the gateway's defaults (handler keys win), and `buffer` takes precedence
/// over `data` as the body. A descriptor with neither `buffer` nor `data`
/// is serialized whole as the body, which is how bare `{status, message}`
/// returns surface their message.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ResponseDescriptor {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,
    #[serde(skip_serializing_if = "HashMap::is_empty")]
    pub headers: HashMap<String, String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
    /// Raw binary body, written verbatim. The handler is responsible for
    /// setting a matching content-type header; the writer does not sniff.
    #[serde(skip)]
    pub buffer: Option<Bytes>,
}

impl ResponseDescriptor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the response status.
    pub fn status(mut self, status: u16) -> Self {
        self.status = Some(status);
        self
    }

    /// Add a response header.
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(key.into(), value.into());
        self
    }

    /// Set the human-readable message.
    pub fn message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Set the JSON-serializable data body.
    pub fn data(mut self, data: impl Into<Value>) -> Self {
        self.data = Some(data.into());
        self
    }

    /// Set the raw binary body.
    pub fn buffer(mut self, buffer: impl Into<Bytes>) -> Self {
        self.buffer = Some(buffer.into());
        self
    }
}

/// Default-header policy applied by the response writer.
#[derive(Debug, Clone, Copy, Default)]
pub struct HeaderPolicy {
    /// Inject permissive CORS headers alongside the defaults.
    pub cors: bool,
}

impl HeaderPolicy {
    pub fn with_cors() -> Self {
        Self { cors: true }
    }

    fn default_headers(&self) -> HashMap<String, String> {
        let mut headers = HashMap::new();
        headers.insert("content-type".to_string(), "application/json".to_string());
        if self.cors {
            headers.insert("Access-Control-Allow-Origin".to_string(), "*".to_string());
            headers.insert(
                "Access-Control-Allow-Methods".to_string(),
                "GET,POST,PUT,PATCH,DELETE,OPTIONS".to_string(),
            );
            headers.insert(
                "Access-Control-Allow-Headers".to_string(),
                "Content-Type,Authorization".to_string(),
            );
        }
        headers
    }
}

/// A fully serialized response, ready for any host to flush exactly once.
#[derive(Debug, Clone)]
pub struct WireResponse {
    pub status: u16,
    pub headers: HashMap<String, String>,
    pub body: Bytes,
}

impl WireResponse {
    /// Serialize a descriptor: default headers merged under the handler's,
    /// buffer verbatim or JSON body.
    pub fn from_descriptor(descriptor: ResponseDescriptor, policy: &HeaderPolicy) -> Self {
        let status = descriptor.status.unwrap_or(200);

        let mut headers = policy.default_headers();
        for (key, value) in &descriptor.headers {
            headers.insert(key.clone(), value.clone());
        }

        let body = if let Some(buffer) = &descriptor.buffer {
            buffer.clone()
        } else if let Some(data) = &descriptor.data {
            json_body(data)
        } else {
            json_body(&descriptor)
        };

        Self {
            status,
            headers,
            body,
        }
    }

    /// A canned response with default (and optionally CORS) headers and an
    /// empty body, used for OPTIONS preflights.
    pub fn canned(status: u16, policy: &HeaderPolicy) -> Self {
        Self {
            status,
            headers: policy.default_headers(),
            body: Bytes::new(),
        }
    }

    /// A bare response with no headers and an empty body.
    pub fn empty(status: u16) -> Self {
        Self {
            status,
            headers: HashMap::new(),
            body: Bytes::new(),
        }
    }

    /// A terminal error response carrying the serialized error as its body.
    pub fn error(status: u16, message: &str) -> Self {
        Self {
            status,
            headers: HashMap::new(),
            body: json_body(&serde_json::json!({ "error": message })),
        }
    }
}

fn json_body<T: Serialize>(value: &T) -> Bytes {
    match serde_json::to_vec(value) {
        Ok(body) => Bytes::from(body),
        Err(err) => {
            warn!("failed to serialize response body: {}", err);
            Bytes::from_static(b"null")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn descriptor_headers_win_over_defaults() {
        let descriptor = ResponseDescriptor::new()
            .header("content-type", "image/jpeg")
            .buffer(Bytes::from_static(b"\xff\xd8"));
        let wire = WireResponse::from_descriptor(descriptor, &HeaderPolicy::default());
        assert_eq!(wire.headers["content-type"], "image/jpeg");
        assert_eq!(&wire.body[..], b"\xff\xd8");
    }

    #[test]
    fn bare_descriptor_serializes_whole() {
        let descriptor = ResponseDescriptor::new().status(401).message("Unauthorized");
        let wire = WireResponse::from_descriptor(descriptor, &HeaderPolicy::default());
        assert_eq!(wire.status, 401);
        let body: Value = serde_json::from_slice(&wire.body).unwrap();
        assert_eq!(body["message"], "Unauthorized");
        assert_eq!(body["status"], 401);
    }

    #[test]
    fn data_round_trips() {
        let data = serde_json::json!({ "x": [1, 2, 3], "nested": { "ok": true } });
        let descriptor = ResponseDescriptor::new().data(data.clone());
        let wire = WireResponse::from_descriptor(descriptor, &HeaderPolicy::default());
        let back: Value = serde_json::from_slice(&wire.body).unwrap();
        assert_eq!(back, data);
    }
}
