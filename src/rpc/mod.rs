//! Framed JSON RPC transport
//!
//! A small request/response protocol over TCP: each frame is a
//! length-delimited JSON envelope. Requests name a method and carry a
//! metadata map beside the body; the metadata is where the trace context
//! travels across the boundary.

mod client;
mod server;
mod wire;

pub use client::RpcClient;
pub use server::{serve, RpcService};
pub use wire::{RpcError, RpcRequest, RpcResponse};

#[cfg(test)]
#[path = "wire_test.rs"]
mod wire_tests;

#[cfg(test)]
#[path = "server_test.rs"]
mod server_tests;
