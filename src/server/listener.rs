//! Listener lifecycle contract for the shutdown runner

use std::io;
use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;

/// Failure modes of a listener lifecycle transition.
#[derive(Debug, Error)]
pub enum ListenerError {
    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: String,
        #[source]
        source: io::Error,
    },

    #[error("listener already started")]
    AlreadyStarted,

    #[error("listener not started")]
    NotStarted,

    #[error("serve task failed: {0}")]
    Serve(String),

    #[error("drain did not complete within {0:?}")]
    DrainTimeout(Duration),
}

/// A network surface managed by the runner.
///
/// `start` binds and begins serving in the background; `stop` ceases
/// accepting, waits up to `deadline` for in-flight work to drain, and
/// reports [`ListenerError::DrainTimeout`] when stragglers remain.
#[async_trait]
pub trait Listener: Send {
    fn name(&self) -> &str;

    async fn start(&mut self) -> Result<(), ListenerError>;

    async fn stop(&mut self, deadline: Duration) -> Result<(), ListenerError>;
}
