//! HTTP listener managed by the shutdown runner

use std::io;
use std::net::SocketAddr;
use std::time::Duration;

use async_trait::async_trait;
use axum::Router;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::info;

use super::listener::{Listener, ListenerError};

/// Serves an axum router and drains in-flight requests on stop.
pub struct HttpListener {
    name: String,
    addr: String,
    router: Option<Router>,
    local_addr: Option<SocketAddr>,
    cancel: CancellationToken,
    handle: Option<JoinHandle<Result<(), io::Error>>>,
}

impl HttpListener {
    pub fn new(name: impl Into<String>, addr: impl Into<String>, router: Router) -> Self {
        Self {
            name: name.into(),
            addr: addr.into(),
            router: Some(router),
            local_addr: None,
            cancel: CancellationToken::new(),
            handle: None,
        }
    }

    /// Address actually bound, available once started. Useful with port 0.
    pub fn local_addr(&self) -> Option<SocketAddr> {
        self.local_addr
    }
}

#[async_trait]
impl Listener for HttpListener {
    fn name(&self) -> &str {
        &self.name
    }

    async fn start(&mut self) -> Result<(), ListenerError> {
        let router = self.router.take().ok_or(ListenerError::AlreadyStarted)?;
        let listener = TcpListener::bind(&self.addr)
            .await
            .map_err(|source| ListenerError::Bind {
                addr: self.addr.clone(),
                source,
            })?;
        self.local_addr = listener.local_addr().ok();

        info!(listener = %self.name, addr = %self.addr, "HTTP server listening");

        let cancel = self.cancel.clone();
        self.handle = Some(tokio::spawn(async move {
            axum::serve(listener, router)
                .with_graceful_shutdown(cancel.cancelled_owned())
                .await
        }));
        Ok(())
    }

    async fn stop(&mut self, deadline: Duration) -> Result<(), ListenerError> {
        let handle = self.handle.take().ok_or(ListenerError::NotStarted)?;
        self.cancel.cancel();

        match tokio::time::timeout(deadline, handle).await {
            Err(_) => Err(ListenerError::DrainTimeout(deadline)),
            Ok(Err(join)) => Err(ListenerError::Serve(join.to_string())),
            Ok(Ok(Err(io))) => Err(ListenerError::Serve(io.to_string())),
            Ok(Ok(Ok(()))) => {
                info!(listener = %self.name, "HTTP server drained");
                Ok(())
            }
        }
    }
}
