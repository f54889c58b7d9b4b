//! Coordinated shutdown for the notification surfaces
//!
//! The [`Runner`] owns the registered listeners for the life of the process:
//! it subscribes to termination signals before starting anything, starts the
//! listeners in registration order, waits for a signal, then drains all
//! listeners concurrently under a shared deadline. A fixed grace window
//! elapses after draining so in-flight responses already written to sockets
//! can leave the host before the process exits.

use std::io;
use std::time::Duration;

use thiserror::Error;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};

use super::listener::{Listener, ListenerError};

/// Extra time the runner waits for stop results beyond the drain deadline.
/// Listeners enforce the deadline themselves; the slack only covers task
/// scheduling, so a listener that ignores its deadline cannot wedge the
/// process.
const COLLECT_SLACK: Duration = Duration::from_millis(100);

/// Fatal runner failures. Stop-phase failures are not fatal; they are
/// aggregated into the [`ShutdownReport`] instead.
#[derive(Debug, Error)]
pub enum RunnerError {
    #[error("listener {listener} failed to start: {source}")]
    Start {
        listener: String,
        #[source]
        source: ListenerError,
    },

    #[error("failed to install signal handlers: {0}")]
    Signals(#[from] io::Error),
}

/// A listener that failed to stop cleanly.
#[derive(Debug)]
pub struct ListenerFailure {
    pub listener: String,
    pub error: ListenerError,
}

/// Outcome of the stop phase.
///
/// A drain timeout is recorded separately from failures: slow is a warning,
/// broken is an error.
#[derive(Debug, Default)]
pub struct ShutdownReport {
    pub failures: Vec<ListenerFailure>,
    pub timed_out: bool,
}

impl ShutdownReport {
    /// True when every listener stopped without error. Timed-out drains
    /// still count as clean.
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Handle to the process termination signals.
///
/// Installing the handle registers the OS handlers immediately, so a signal
/// delivered while listeners are still starting is not lost.
pub struct SignalHandle {
    token: CancellationToken,
}

impl SignalHandle {
    /// Register SIGTERM and SIGINT handlers and watch them in the
    /// background. The returned handle's token is cancelled on the first
    /// signal; later signals are no-ops.
    #[cfg(unix)]
    pub fn install() -> io::Result<Self> {
        use tokio::signal::unix::{signal, SignalKind};

        let mut sigterm = signal(SignalKind::terminate())?;
        let mut sigint = signal(SignalKind::interrupt())?;

        let token = CancellationToken::new();
        let trigger = token.clone();
        tokio::spawn(async move {
            tokio::select! {
                _ = sigterm.recv() => info!("Received SIGTERM"),
                _ = sigint.recv() => info!("Received SIGINT"),
            }
            trigger.cancel();
        });

        Ok(Self { token })
    }

    /// Register the Ctrl+C handler (non-unix targets).
    #[cfg(not(unix))]
    pub fn install() -> io::Result<Self> {
        let token = CancellationToken::new();
        let trigger = token.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                info!("Received Ctrl+C");
            }
            trigger.cancel();
        });
        Ok(Self { token })
    }

    pub fn token(&self) -> CancellationToken {
        self.token.clone()
    }
}

/// Owns the listeners and drives start, signal wait, and coordinated stop.
pub struct Runner {
    listeners: Vec<Box<dyn Listener>>,
    drain_deadline: Duration,
    grace_window: Duration,
}

impl Runner {
    pub fn new(drain_deadline: Duration, grace_window: Duration) -> Self {
        Self {
            listeners: Vec::new(),
            drain_deadline,
            grace_window,
        }
    }

    pub fn register(&mut self, listener: Box<dyn Listener>) {
        self.listeners.push(listener);
    }

    /// Run until SIGTERM or SIGINT, then shut down.
    ///
    /// Signal handlers are installed before any listener starts, so a
    /// termination delivered mid-bootstrap still drives a coordinated stop.
    pub async fn run(self) -> Result<ShutdownReport, RunnerError> {
        let signals = SignalHandle::install()?;
        self.run_until(signals.token()).await
    }

    /// Run until `shutdown` is cancelled, then shut down.
    pub async fn run_until(
        mut self,
        shutdown: CancellationToken,
    ) -> Result<ShutdownReport, RunnerError> {
        self.start_all().await?;

        shutdown.cancelled().await;
        info!("Initiating graceful shutdown");

        let report = Self::stop_all(self.listeners, self.drain_deadline).await;

        tokio::time::sleep(self.grace_window).await;
        info!("system shutting down gracefully");
        Ok(report)
    }

    /// Start listeners in registration order. The first failure is fatal:
    /// already-started listeners are left to die with the process.
    async fn start_all(&mut self) -> Result<(), RunnerError> {
        for listener in &mut self.listeners {
            let name = listener.name().to_string();
            listener
                .start()
                .await
                .map_err(|source| RunnerError::Start {
                    listener: name.clone(),
                    source,
                })?;
            info!(listener = %name, "listener started");
        }
        Ok(())
    }

    /// Drain all listeners concurrently under the shared deadline.
    ///
    /// Each stop runs in its own task and reports through a channel sized to
    /// the listener count, so every outcome is kept, not just the first.
    async fn stop_all(listeners: Vec<Box<dyn Listener>>, deadline: Duration) -> ShutdownReport {
        let total = listeners.len();
        let mut report = ShutdownReport::default();
        if total == 0 {
            return report;
        }

        let (tx, mut rx) = mpsc::channel(total);
        for mut listener in listeners {
            let tx = tx.clone();
            tokio::spawn(async move {
                let name = listener.name().to_string();
                let result = listener.stop(deadline).await;
                let _ = tx.send((name, result)).await;
            });
        }
        drop(tx);

        let collect = async {
            while let Some((name, result)) = rx.recv().await {
                match result {
                    Ok(()) => info!(listener = %name, "listener stopped"),
                    Err(ListenerError::DrainTimeout(deadline)) => {
                        warn!(listener = %name, deadline = ?deadline, "listener drain timed out");
                        report.timed_out = true;
                    }
                    Err(error) => {
                        error!(listener = %name, error = %error, "listener failed to stop");
                        report.failures.push(ListenerFailure {
                            listener: name,
                            error,
                        });
                    }
                }
            }
        };

        if tokio::time::timeout(deadline + COLLECT_SLACK, collect)
            .await
            .is_err()
        {
            warn!(deadline = ?deadline, "shutdown deadline exceeded, abandoning stragglers");
            report.timed_out = true;
        }
        report
    }
}
