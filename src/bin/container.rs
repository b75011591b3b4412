//! Containerized service entrypoint.
//!
//! The image build bakes the handler source path into `FUNCGATE_SOURCE`;
//! the orchestrator supplies `PORT`. Everything else matches the dev server.

use funcgate::demo;
use funcgate::prelude::*;
use funcgate::runtime::DEFAULT_PORT;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let source = std::env::var("FUNCGATE_SOURCE").unwrap_or_else(|_| "./".to_string());
    let port = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(DEFAULT_PORT);

    let registry = match FunctionRegistry::load(&source, &demo::modules()) {
        Ok(registry) => registry,
        Err(err) => {
            tracing::error!("{}", err);
            std::process::exit(1);
        }
    };

    GatewayServer::new(GatewayConfig::new().port(port), Arc::new(registry))
        .run()
        .await
}
