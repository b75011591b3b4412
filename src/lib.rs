//! # funcgate - Function-to-HTTP Invocation Gateway
//!
//! funcgate exposes a collection of plain functions as HTTP routes. A
//! registry maps route names to handlers, inbound requests are normalized
//! into a uniform invocation record, and a handler's return value is
//! serialized back into an HTTP response. The same functions run unchanged
//! behind a local dev server, a containerized service, or a managed
//! cloud-function runtime via a thin adapter.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────┐   ┌──────────────────┐   ┌─────────────────────┐
//! │  Dev server  │   │ Container server │   │ CloudFunctionAdapter│
//! └──────┬───────┘   └────────┬─────────┘   └──────────┬──────────┘
//!        │  RawRequest        │                        │
//!        ▼                    ▼                        ▼
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                            Router                               │
//! │   path → route name + args → registry lookup → normalize →      │
//! │   invoke handler → serialize descriptor                         │
//! └───────────────┬─────────────────────────────┬───────────────────┘
//!                 ▼                             ▼
//!      ┌──────────────────────┐      ┌─────────────────────┐
//!      │   FunctionRegistry   │      │   Payload / Writer  │
//!      │  name → Arc<Handler> │      │  query | JSON | buf │
//!      └──────────────────────┘      └─────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,no_run
//! use funcgate::prelude::*;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
//!     let module = HandlerModule::new("greetings").export(
//!         "hello",
//!         from_fn(|invocation: Invocation| {
//!             let name = invocation
//!                 .payload
//!                 .get("name")
//!                 .and_then(|v| v.as_str())
//!                 .unwrap_or("world")
//!                 .to_string();
//!             Ok(format!("hello, {}", name))
//!         }),
//!     );
//!
//!     let registry = Arc::new(FunctionRegistry::from_modules([module]));
//!     GatewayServer::new(GatewayConfig::new().port(3000), registry)
//!         .run()
//!         .await
//! }
//! ```
//!
//! `GET /hello?name=gateway` now answers `"hello, gateway"`; any other path
//! is a 404. Handlers return bare values, full [`ResponseDescriptor`]s, or
//! errors, and may be synchronous or asynchronous.

pub mod adapter;
pub mod demo;
pub mod function;
pub mod http;
pub mod runtime;

/// Re-export commonly used types.
pub mod prelude {
    pub use crate::adapter::{CloudFunctionAdapter, HostRequest, HostResponse};
    pub use crate::function::{
        from_async, from_fn, FunctionRegistry, Handler, HandlerError, HandlerModule,
        HandlerOutput, LoadError,
    };
    pub use crate::http::{
        HeaderPolicy, Invocation, InvocationKind, Method, Payload, PayloadError, PayloadMode,
        RawRequest, ResponseDescriptor, WireResponse,
    };
    pub use crate::runtime::{GatewayConfig, GatewayServer, Router};
}

// Re-export for convenience
pub use function::{FunctionRegistry, HandlerError, HandlerModule};
pub use http::{Invocation, Payload, ResponseDescriptor};
pub use runtime::{GatewayConfig, GatewayServer, Router};
