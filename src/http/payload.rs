//! Payload normalization: raw inbound requests to provider-agnostic payloads.

use crate::http::invocation::RawRequest;
use bytes::Bytes;
use chrono::{SecondsFormat, Utc};
use serde_json::{Map, Value};
use thiserror::Error;

/// Placeholder context id attached to simulated-event payloads.
pub const SIMULATED_CONTEXT_ID: &str = "simulated.context.id";
/// Placeholder event name attached to simulated-event payloads.
pub const SIMULATED_EVENT_NAME: &str = "simulated.event.or.fn.name";

/// Normalization mode for [`from_request`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PayloadMode {
    /// Straight HTTP semantics: query string for GET, body for the rest.
    #[default]
    Normal,
    /// Wrap the JSON body in a synthetic event envelope with a `context`
    /// object, mimicking a non-HTTP trigger.
    SimulatedEvent,
}

/// Provider-agnostic request payload.
///
/// Exactly one variant is ever populated: a structured JSON mapping (from a
/// query string, JSON body, or simulated-event envelope) or the raw body
/// bytes when the body is not a parseable JSON object.
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    Structured(Map<String, Value>),
    Buffer(Bytes),
}

impl Payload {
    /// An empty structured payload.
    pub fn empty() -> Self {
        Payload::Structured(Map::new())
    }

    /// Look up a key in a structured payload.
    pub fn get(&self, key: &str) -> Option<&Value> {
        match self {
            Payload::Structured(map) => map.get(key),
            Payload::Buffer(_) => None,
        }
    }

    /// The raw bytes of a buffer payload.
    pub fn buffer(&self) -> Option<&Bytes> {
        match self {
            Payload::Buffer(bytes) => Some(bytes),
            Payload::Structured(_) => None,
        }
    }

    /// The structured mapping, if this payload is one.
    pub fn as_map(&self) -> Option<&Map<String, Value>> {
        match self {
            Payload::Structured(map) => Some(map),
            Payload::Buffer(_) => None,
        }
    }

    /// Structured payloads as a JSON value; `None` for buffers.
    pub fn to_value(&self) -> Option<Value> {
        self.as_map().map(|map| Value::Object(map.clone()))
    }
}

impl From<Map<String, Value>> for Payload {
    fn from(map: Map<String, Value>) -> Self {
        Payload::Structured(map)
    }
}

impl From<Bytes> for Payload {
    fn from(bytes: Bytes) -> Self {
        Payload::Buffer(bytes)
    }
}

/// Payload normalization failure.
#[derive(Debug, Error)]
pub enum PayloadError {
    #[error("request body is required for simulated events")]
    MissingBody,
    #[error("invalid JSON body: {0}")]
    InvalidJson(#[from] serde_json::Error),
    #[error("request body exceeds the {limit} byte limit")]
    TooLarge { limit: usize },
}

/// Normalize a materialized request into a [`Payload`].
///
/// Priority order:
/// 1. Simulated-event mode: the body (or a host-pre-parsed body) must be
///    valid JSON; a synthesized `context` object is attached. Missing or
///    malformed bodies fail with [`PayloadError`], never a buffer.
/// 2. Methods without body semantics: the query string becomes the mapping;
///    no query string yields an empty mapping.
/// 3. Body-bearing methods: strict JSON-object parse of the body, falling
///    back to the raw bytes as a buffer. The declared content-type is not
///    consulted; clients lie about it, the parse attempt does not.
///
/// Bodies over `max_body` bytes are rejected before parsing.
pub fn from_request(
    req: &RawRequest,
    mode: PayloadMode,
    max_body: usize,
) -> Result<Payload, PayloadError> {
    if mode == PayloadMode::SimulatedEvent {
        return simulated_event(req, max_body);
    }

    if !req.method.has_body() {
        let map = req.query().map(parse_query).unwrap_or_default();
        return Ok(Payload::Structured(map));
    }

    if let Some(Value::Object(map)) = &req.parsed_body {
        return Ok(Payload::Structured(map.clone()));
    }

    let body = match &req.body {
        Some(body) if !body.is_empty() => body,
        _ => return Ok(Payload::empty()),
    };
    if body.len() > max_body {
        return Err(PayloadError::TooLarge { limit: max_body });
    }

    match serde_json::from_slice::<Value>(body) {
        Ok(Value::Object(map)) => Ok(Payload::Structured(map)),
        _ => Ok(Payload::Buffer(body.clone())),
    }
}

/// Build the simulated-event envelope: body JSON plus a `context` object
/// with placeholder identity and a wall-clock timestamp.
fn simulated_event(req: &RawRequest, max_body: usize) -> Result<Payload, PayloadError> {
    let parsed = match &req.parsed_body {
        Some(value) => value.clone(),
        None => {
            let body = match &req.body {
                Some(body) if !body.is_empty() => body,
                _ => return Err(PayloadError::MissingBody),
            };
            if body.len() > max_body {
                return Err(PayloadError::TooLarge { limit: max_body });
            }
            serde_json::from_slice(body)?
        }
    };

    // Non-object JSON contributes no fields; the envelope still carries
    // the context.
    let mut map = match parsed {
        Value::Object(map) => map,
        _ => Map::new(),
    };
    map.insert(
        "context".to_string(),
        serde_json::json!({
            "id": SIMULATED_CONTEXT_ID,
            "name": SIMULATED_EVENT_NAME,
            "timestamp": Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
        }),
    );
    Ok(Payload::Structured(map))
}

/// Parse a query string into a mapping. Later keys overwrite earlier ones.
fn parse_query(query: &str) -> Map<String, Value> {
    let mut map = Map::new();
    for pair in query.split('&') {
        if pair.is_empty() {
            continue;
        }
        let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
        map.insert(
            decode_component(key),
            Value::String(decode_component(value)),
        );
    }
    map
}

/// Percent-decode a query component, treating `+` as a space.
fn decode_component(raw: &str) -> String {
    let bytes = raw.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'+' => {
                out.push(b' ');
                i += 1;
            }
            b'%' if i + 2 < bytes.len() => {
                match (hex_digit(bytes[i + 1]), hex_digit(bytes[i + 2])) {
                    (Some(hi), Some(lo)) => {
                        out.push(hi << 4 | lo);
                        i += 3;
                    }
                    _ => {
                        out.push(b'%');
                        i += 1;
                    }
                }
            }
            other => {
                out.push(other);
                i += 1;
            }
        }
    }
    String::from_utf8_lossy(&out).into_owned()
}

fn hex_digit(byte: u8) -> Option<u8> {
    (byte as char).to_digit(16).map(|d| d as u8)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_decoding() {
        let map = parse_query("hello=world&a+b=c%20d&flag");
        assert_eq!(map["hello"], Value::String("world".into()));
        assert_eq!(map["a b"], Value::String("c d".into()));
        assert_eq!(map["flag"], Value::String(String::new()));
    }

    #[test]
    fn later_query_keys_win() {
        let map = parse_query("k=1&k=2");
        assert_eq!(map["k"], Value::String("2".into()));
    }
}
