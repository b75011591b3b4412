//! The gateway runtime: configuration, the invocation router, and the HTTP
//! server host.

mod config;
mod router;
mod server;

pub use config::{GatewayConfig, DEFAULT_MAX_BODY_SIZE, DEFAULT_PORT};
pub use router::Router;
pub use server::GatewayServer;
