//! The invocation router: request-to-handler dispatch.

use crate::function::handler::{HandlerError, HandlerOutput};
use crate::function::registry::FunctionRegistry;
use crate::http::invocation::{Invocation, InvocationKind, Method, RawRequest};
use crate::http::payload::{self, PayloadError, PayloadMode};
use crate::http::response::{HeaderPolicy, ResponseDescriptor, WireResponse};
use crate::runtime::config::GatewayConfig;
use std::sync::Arc;
use tracing::{debug, error, info};

/// Resolves a request to a handler, builds the invocation record, invokes
/// the handler, and serializes the result.
///
/// Constructed once from a registry and a mode, then invoked per request.
/// Every failure past routing is caught here and converted into a terminal
/// response; nothing propagates to the host. Invocation is at-most-once.
pub struct Router {
    registry: Arc<FunctionRegistry>,
    mode: PayloadMode,
    policy: HeaderPolicy,
    max_body: usize,
}

impl Router {
    pub fn new(registry: Arc<FunctionRegistry>, config: &GatewayConfig) -> Self {
        Self {
            registry,
            mode: if config.simulate_event {
                PayloadMode::SimulatedEvent
            } else {
                PayloadMode::Normal
            },
            policy: HeaderPolicy { cors: config.cors },
            max_body: config.max_body_size,
        }
    }

    pub fn registry(&self) -> &Arc<FunctionRegistry> {
        &self.registry
    }

    /// Dispatch a materialized request: the first non-empty path segment is
    /// the route name, the remaining segments its positional arguments.
    pub async fn dispatch(&self, req: RawRequest) -> WireResponse {
        let segments = req.path_segments();
        let Some((route, args)) = segments.split_first() else {
            debug!("no route in path '{}'", req.path());
            return WireResponse::empty(404);
        };
        let route = route.to_string();
        let uri_args = args.iter().map(|s| s.to_string()).collect();
        self.invoke_route(&route, &req, uri_args).await
    }

    /// Invoke a specific route with caller-supplied positional arguments.
    ///
    /// This is the seam provider adapters use: they resolve the target name
    /// themselves (fixed at deploy time) and delegate everything else here.
    pub async fn invoke_route(
        &self,
        route: &str,
        req: &RawRequest,
        uri_args: Vec<String>,
    ) -> WireResponse {
        // Unknown routes are terminal before any body is looked at, so a
        // malformed body on an unknown route never surfaces a parse error.
        let Some(handler) = self.registry.get(route) else {
            debug!("no handler registered for '{}'", route);
            return WireResponse::empty(404);
        };

        let kind = self.kind(req.method);

        // Preflights are answered without invoking any handler.
        if kind == InvocationKind::Http(Method::Options) {
            return WireResponse::canned(200, &self.policy);
        }

        let payload = match payload::from_request(req, self.mode, self.max_body) {
            Ok(payload) => payload,
            Err(err) => return self.payload_failure(route, err),
        };

        info!("{} {}", kind, route);
        debug!("payload: {:?}", payload);

        let invocation = Invocation::new(kind, payload).with_args(uri_args);
        match handler.invoke(invocation).await {
            Ok(output) => {
                let descriptor = match output {
                    HandlerOutput::Descriptor(descriptor) => descriptor,
                    HandlerOutput::Value(value) => ResponseDescriptor::new().data(value),
                };
                WireResponse::from_descriptor(descriptor, &self.policy)
            }
            Err(err) => self.handler_failure(route, err),
        }
    }

    fn kind(&self, method: Method) -> InvocationKind {
        match self.mode {
            PayloadMode::Normal => InvocationKind::Http(method),
            PayloadMode::SimulatedEvent => InvocationKind::SimulatedEvent,
        }
    }

    fn payload_failure(&self, route: &str, err: PayloadError) -> WireResponse {
        error!("payload normalization failed for '{}': {}", route, err);
        WireResponse::error(500, &err.to_string())
    }

    fn handler_failure(&self, route: &str, err: HandlerError) -> WireResponse {
        error!("handler '{}' failed: {}", route, err);
        WireResponse::error(err.status, &err.message)
    }
}
