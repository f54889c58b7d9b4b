//! Environment-driven configuration

use std::env;
use std::time::Duration;

use tracing::warn;

/// Runtime configuration, read from `VIESTI_*` environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Bind address for the HTTP surface.
    pub http_addr: String,
    /// Bind address for the RPC surface.
    pub rpc_addr: String,
    /// Address the push client dials for the RPC backend.
    pub push_backend_addr: String,
    /// Per-listener drain deadline during shutdown.
    pub shutdown_timeout: Duration,
    /// Pause after draining, before process exit.
    pub grace_window: Duration,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            http_addr: env_or("VIESTI_HTTP_ADDR", "0.0.0.0:8080"),
            rpc_addr: env_or("VIESTI_RPC_ADDR", "0.0.0.0:9090"),
            push_backend_addr: env_or("VIESTI_PUSH_BACKEND_ADDR", "127.0.0.1:9090"),
            shutdown_timeout: env_secs("VIESTI_SHUTDOWN_TIMEOUT_SECS", 30),
            grace_window: env_secs("VIESTI_GRACE_WINDOW_SECS", 10),
        }
    }
}

fn env_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

fn env_secs(key: &str, default: u64) -> Duration {
    let secs = match env::var(key) {
        Ok(raw) => raw.parse().unwrap_or_else(|_| {
            warn!(key, value = %raw, "unparsable duration, using default");
            default
        }),
        Err(_) => default,
    };
    Duration::from_secs(secs)
}
