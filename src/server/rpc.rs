//! RPC listener managed by the shutdown runner

use std::io;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::info;

use crate::rpc::{self, RpcService};

use super::listener::{Listener, ListenerError};

/// Serves the framed RPC transport and drains open connections on stop.
pub struct RpcListener {
    name: String,
    addr: String,
    service: Option<Arc<dyn RpcService>>,
    local_addr: Option<SocketAddr>,
    cancel: CancellationToken,
    handle: Option<JoinHandle<Result<(), io::Error>>>,
}

impl RpcListener {
    pub fn new(
        name: impl Into<String>,
        addr: impl Into<String>,
        service: Arc<dyn RpcService>,
    ) -> Self {
        Self {
            name: name.into(),
            addr: addr.into(),
            service: Some(service),
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
impl Listener for RpcListener {
    fn name(&self) -> &str {
        &self.name
    }

    async fn start(&mut self) -> Result<(), ListenerError> {
        let service = self.service.take().ok_or(ListenerError::AlreadyStarted)?;
        let listener = TcpListener::bind(&self.addr)
            .await
            .map_err(|source| ListenerError::Bind {
                addr: self.addr.clone(),
                source,
            })?;
        self.local_addr = listener.local_addr().ok();

        info!(listener = %self.name, addr = %self.addr, "RPC server listening");

        let cancel = self.cancel.clone();
        self.handle = Some(tokio::spawn(rpc::serve(listener, service, cancel)));
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
                info!(listener = %self.name, "RPC server drained");
                Ok(())
            }
        }
    }
}
