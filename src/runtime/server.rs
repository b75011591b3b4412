//! Gateway HTTP server: the local dev and container hosts.

use crate::function::registry::FunctionRegistry;
use crate::http::invocation::{Method, RawRequest};
use crate::http::response::WireResponse;
use crate::runtime::config::GatewayConfig;
use crate::runtime::router::Router;
use bytes::Bytes;
use http_body_util::{BodyExt, Full, Limited};
use hyper::body::Incoming;
use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper::{Request, Response};
use hyper_util::rt::TokioIo;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{debug, error, warn};

/// A single-process, single-listener HTTP host around a [`Router`].
///
/// One task per accepted connection; requests interleave as tasks and
/// suspend only at I/O boundaries (body draining, async handlers). The
/// registry is the only state shared across requests, and it is read-only.
pub struct GatewayServer {
    config: GatewayConfig,
    router: Arc<Router>,
}

impl GatewayServer {
    pub fn new(config: GatewayConfig, registry: Arc<FunctionRegistry>) -> Self {
        let router = Arc::new(Router::new(registry, &config));
        Self { config, router }
    }

    /// Bind and serve until the process exits.
    pub async fn run(self) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let addr: SocketAddr = self.config.bind_addr().parse()?;
        let listener = TcpListener::bind(addr).await?;

        tracing::info!(
            "Service running on port {}, available routes:",
            self.config.port
        );
        for route in self.router.registry().routes() {
            tracing::info!("/{}", route);
        }

        let max_body = self.config.max_body_size;
        loop {
            let (stream, remote_addr) = listener.accept().await?;
            let io = TokioIo::new(stream);
            let router = self.router.clone();

            tokio::task::spawn(async move {
                let service = service_fn(move |req| {
                    let router = router.clone();
                    async move { handle_request(req, router, max_body, remote_addr).await }
                });

                if let Err(err) = http1::Builder::new().serve_connection(io, service).await {
                    error!("Error serving connection: {:?}", err);
                }
            });
        }
    }
}

/// Drain the body, hand the materialized request to the router, and flush
/// whatever it decided back onto the wire.
async fn handle_request(
    req: Request<Incoming>,
    router: Arc<Router>,
    max_body: usize,
    remote_addr: SocketAddr,
) -> Result<Response<Full<Bytes>>, hyper::Error> {
    let method = Method::from(req.method());
    let uri = req
        .uri()
        .path_and_query()
        .map(|pq| pq.as_str().to_string())
        .unwrap_or_else(|| "/".to_string());

    debug!("{} {} from {}", method, uri, remote_addr);

    let raw = match materialize(req, method, uri, max_body).await {
        Ok(raw) => raw,
        Err(message) => {
            error!("failed to read request body: {}", message);
            return Ok(write_response(WireResponse::error(500, &message)));
        }
    };

    Ok(write_response(router.dispatch(raw).await))
}

/// Drain the request body into a [`RawRequest`], bounded by `max_body`.
async fn materialize(
    req: Request<Incoming>,
    method: Method,
    uri: String,
    max_body: usize,
) -> Result<RawRequest, String> {
    let bytes = Limited::new(req.into_body(), max_body)
        .collect()
        .await
        .map_err(|err| err.to_string())?
        .to_bytes();

    let mut raw = RawRequest::new(method, uri);
    if !bytes.is_empty() {
        raw = raw.body(bytes);
    }
    Ok(raw)
}

/// Convert a wire response into a hyper response.
fn write_response(wire: WireResponse) -> Response<Full<Bytes>> {
    let status = hyper::StatusCode::from_u16(wire.status).unwrap_or_else(|_| {
        warn!("invalid status code {}, falling back to 500", wire.status);
        hyper::StatusCode::INTERNAL_SERVER_ERROR
    });

    let mut builder = Response::builder().status(status);
    for (name, value) in wire.headers {
        builder = builder.header(name, value);
    }

    builder.body(Full::new(wire.body)).unwrap_or_else(|err| {
        error!("failed to build response: {}", err);
        let mut fallback = Response::new(Full::new(Bytes::new()));
        *fallback.status_mut() = hyper::StatusCode::INTERNAL_SERVER_ERROR;
        fallback
    })
}
