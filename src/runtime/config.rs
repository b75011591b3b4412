//! Gateway configuration.

use serde::{Deserialize, Serialize};

/// Default listen port for the dev/container hosts.
pub const DEFAULT_PORT: u16 = 3000;

/// Maximum request body size: 20 MiB.
pub const DEFAULT_MAX_BODY_SIZE: usize = 20 * 1024 * 1024;

/// Configuration for the gateway server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatewayConfig {
    /// Host address to bind to.
    pub host: String,
    /// Port to listen on.
    pub port: u16,
    /// Wrap request bodies in a simulated-event envelope.
    pub simulate_event: bool,
    /// Serve permissive CORS headers and answer OPTIONS preflights.
    pub cors: bool,
    /// Maximum request body size in bytes, enforced while draining.
    pub max_body_size: usize,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: DEFAULT_PORT,
            simulate_event: false,
            cors: true,
            max_body_size: DEFAULT_MAX_BODY_SIZE,
        }
    }
}

impl GatewayConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the host address.
    pub fn host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into();
        self
    }

    /// Set the port.
    pub fn port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Enable or disable simulated-event mode.
    pub fn simulate_event(mut self, simulate: bool) -> Self {
        self.simulate_event = simulate;
        self
    }

    /// Enable or disable CORS headers.
    pub fn cors(mut self, cors: bool) -> Self {
        self.cors = cors;
        self
    }

    /// Get the bind address.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
