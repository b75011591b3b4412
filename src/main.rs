//! funcgate dev server CLI.
//!
//! Serves the handler modules selected by a source path over HTTP:
//! `funcgate [SOURCE] --port 3000`. Each registered function is reachable
//! at `/<name>[/<arg>...]`.

use clap::Parser;
use funcgate::demo;
use funcgate::prelude::*;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

/// Expose plain functions as HTTP routes.
#[derive(Parser)]
#[command(name = "funcgate", version, about)]
struct Cli {
    /// Handler source: a file or directory of handler modules
    #[arg(default_value = "./")]
    source: PathBuf,

    /// Port to listen on
    #[arg(long, env = "PORT", default_value_t = funcgate::runtime::DEFAULT_PORT)]
    port: u16,

    /// Wrap request bodies in a simulated-event envelope
    #[arg(long)]
    simulate_event: bool,

    /// Disable CORS headers and preflight handling
    #[arg(long)]
    no_cors: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    if !cli.source.exists() {
        tracing::error!("Module {} does not exist. Exiting.", cli.source.display());
        std::process::exit(1);
    }

    let registry = match FunctionRegistry::load(&cli.source, &demo::modules()) {
        Ok(registry) => registry,
        Err(err) => {
            tracing::error!("{}", err);
            std::process::exit(1);
        }
    };

    let config = GatewayConfig::new()
        .port(cli.port)
        .simulate_event(cli.simulate_event)
        .cors(!cli.no_cors);

    GatewayServer::new(config, Arc::new(registry)).run().await
}
