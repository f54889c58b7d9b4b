use std::sync::Arc;

use tracing::{error, info, warn};
use viesti::notification::{build_router, AppState, NotificationClient, NotificationService};
use viesti::server::{HttpListener, Runner, RpcListener};
use viesti::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    info!("Starting viesti notification service");

    let config = Config::from_env();
    info!(
        http_addr = %config.http_addr,
        rpc_addr = %config.rpc_addr,
        push_backend_addr = %config.push_backend_addr,
        shutdown_timeout = ?config.shutdown_timeout,
        grace_window = ?config.grace_window,
        "Configuration loaded"
    );

    let rpc_listener = RpcListener::new(
        "rpc",
        config.rpc_addr.clone(),
        Arc::new(NotificationService::new()),
    );

    let state = AppState {
        push: NotificationClient::new(config.push_backend_addr.clone()),
    };
    let http_listener = HttpListener::new("http", config.http_addr.clone(), build_router(state));

    let mut runner = Runner::new(config.shutdown_timeout, config.grace_window);
    runner.register(Box::new(rpc_listener));
    runner.register(Box::new(http_listener));

    let report = runner.run().await?;

    if report.timed_out {
        warn!("shutdown deadline exceeded before all listeners drained");
    }
    for failure in &report.failures {
        error!(listener = %failure.listener, error = %failure.error, "listener failed to stop");
    }
    if !report.is_clean() {
        anyhow::bail!("{} listener(s) failed to stop cleanly", report.failures.len());
    }

    info!("viesti shut down gracefully");
    Ok(())
}
