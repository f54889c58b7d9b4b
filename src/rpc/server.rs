//! Server side of the notification RPC transport
//!
//! An accept loop dispatching framed requests to a registered service.
//! Cancellation stops the accept loop and interrupts idle connections; a
//! request already being processed still gets its response written before
//! the connection winds down.

use std::sync::Arc;

use async_trait::async_trait;
use futures::{SinkExt, StreamExt};
use tokio::net::{TcpListener, TcpStream};
use tokio_util::codec::{Framed, LengthDelimitedCodec};
use tokio_util::sync::CancellationToken;
use tokio_util::task::TaskTracker;
use tracing::{debug, warn};

use super::wire::{decode, encode, RpcRequest, RpcResponse};

/// Server-side dispatch seam for the RPC transport.
///
/// Application failures are failure envelopes; only transport problems
/// terminate a connection.
#[async_trait]
pub trait RpcService: Send + Sync {
    /// Handle one request.
    async fn call(&self, request: RpcRequest) -> RpcResponse;
}

/// Serve `service` on an already-bound listener until `cancel` fires, then
/// drain in-flight connections before returning.
pub async fn serve(
    listener: TcpListener,
    service: Arc<dyn RpcService>,
    cancel: CancellationToken,
) -> std::io::Result<()> {
    let tracker = TaskTracker::new();

    loop {
        tokio::select! {
            _ = cancel.cancelled() => break,
            accepted = listener.accept() => match accepted {
                Ok((stream, peer)) => {
                    debug!(peer = %peer, "rpc connection accepted");
                    tracker.spawn(handle_connection(stream, service.clone(), cancel.clone()));
                }
                Err(e) => warn!(error = %e, "rpc accept failed"),
            },
        }
    }

    // Stop accepting first, then wait for in-flight connections.
    drop(listener);
    tracker.close();
    tracker.wait().await;
    Ok(())
}

async fn handle_connection(
    stream: TcpStream,
    service: Arc<dyn RpcService>,
    cancel: CancellationToken,
) {
    let mut framed = Framed::new(stream, LengthDelimitedCodec::new());

    loop {
        let frame = tokio::select! {
            _ = cancel.cancelled() => break,
            frame = framed.next() => match frame {
                None => break,
                Some(Err(e)) => {
                    warn!(error = %e, "rpc read failed");
                    break;
                }
                Some(Ok(frame)) => frame,
            },
        };

        let response = match decode::<RpcRequest>(&frame) {
            Ok(request) => service.call(request).await,
            Err(e) => RpcResponse::failure(format!("malformed rpc frame: {e}")),
        };

        let payload = match encode(&response) {
            Ok(payload) => payload,
            Err(e) => {
                warn!(error = %e, "rpc response encode failed");
                break;
            }
        };
        if let Err(e) = framed.send(payload).await {
            warn!(error = %e, "rpc write failed");
            break;
        }
    }
}
