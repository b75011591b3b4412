//! Built-in demo handler modules.
//!
//! These back the `funcgate` and `funcgate-container` binaries so the
//! gateway can be exercised without writing any handler code first.

use crate::function::handler::{from_async, from_fn, HandlerError};
use crate::function::module::HandlerModule;
use crate::http::response::ResponseDescriptor;
use bytes::Bytes;
use serde_json::Value;

/// The handler modules compiled into the gateway binaries.
pub fn modules() -> Vec<HandlerModule> {
    vec![hello_module(), handler_module()]
}

/// A grab bag of handlers covering the gateway's surface: strings, status
/// descriptors, errors, path args, async execution, and binary passthrough.
fn hello_module() -> HandlerModule {
    HandlerModule::new("hello")
        .export(
            "hello",
            from_fn(|invocation| {
                let subject = invocation
                    .payload
                    .get("hello")
                    .and_then(Value::as_str)
                    .unwrap_or_default()
                    .to_string();
                Ok(format!("Hello {}, here is your {}", invocation.kind, subject))
            }),
        )
        .export(
            "fancy",
            from_fn(|_invocation| {
                Ok(ResponseDescriptor::new().status(401).message("Unauthorized"))
            }),
        )
        .export(
            "goodbye",
            from_fn::<_, Value>(|_invocation| Err(HandlerError::new("boom"))),
        )
        .export(
            "withArgs",
            from_fn(|invocation| Ok(invocation.arg(0).unwrap_or_default().to_string())),
        )
        .export(
            "useAsync",
            from_async(|_invocation| async { Ok("it works") }),
        )
        .export(
            "upload",
            from_fn(|invocation| {
                let buffer = invocation.payload.buffer().cloned().unwrap_or_default();
                Ok(ResponseDescriptor::new()
                    .status(200)
                    .header("content-type", "image/jpeg")
                    .buffer(buffer))
            }),
        )
}

/// Echoes the normalized payload back as data; the module of choice when
/// poking at simulated-event envelopes.
fn handler_module() -> HandlerModule {
    HandlerModule::new("handler").export(
        "handler",
        from_fn(|invocation| {
            if let Some(buffer) = invocation.payload.buffer() {
                return Ok(ResponseDescriptor::new().buffer(Bytes::clone(buffer)));
            }
            let value = invocation.payload.to_value().unwrap_or(Value::Null);
            Ok(ResponseDescriptor::new().data(value))
        }),
    )
}
