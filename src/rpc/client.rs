//! Client side of the notification RPC transport

use futures::{SinkExt, StreamExt};
use tokio::net::TcpStream;
use tokio_util::codec::{Framed, LengthDelimitedCodec};
use tracing::debug;

use super::wire::{decode, encode, RpcError, RpcRequest, RpcResponse};

/// Client for the framed JSON RPC transport.
///
/// Connects per call. The backend hop is process-local, and crisp
/// attribution of "unreachable" failures matters more here than connection
/// reuse.
#[derive(Debug, Clone)]
pub struct RpcClient {
    addr: String,
}

impl RpcClient {
    pub fn new(addr: impl Into<String>) -> Self {
        Self { addr: addr.into() }
    }

    /// Issue one call and wait for its response.
    ///
    /// A response with `success == false` becomes [`RpcError::Remote`].
    pub async fn call(&self, request: RpcRequest) -> Result<RpcResponse, RpcError> {
        let stream = TcpStream::connect(&self.addr)
            .await
            .map_err(|source| RpcError::Connect {
                addr: self.addr.clone(),
                source,
            })?;
        let mut framed = Framed::new(stream, LengthDelimitedCodec::new());

        framed.send(encode(&request)?).await?;
        let frame = framed.next().await.ok_or(RpcError::ConnectionClosed)??;
        let response: RpcResponse = decode(&frame)?;

        debug!(
            method = %request.method,
            success = response.success,
            "rpc call completed"
        );

        if response.success {
            Ok(response)
        } else {
            Err(RpcError::Remote(response.error.unwrap_or_else(|| {
                "unspecified remote failure".to_string()
            })))
        }
    }
}
