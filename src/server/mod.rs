//! Listener lifecycle and coordinated shutdown
//!
//! The HTTP and RPC surfaces implement [`Listener`]; the [`Runner`] starts
//! them, waits for SIGTERM/SIGINT, and drains them concurrently under a
//! shared deadline.

mod http;
mod listener;
mod rpc;
pub mod shutdown;

pub use http::HttpListener;
pub use listener::{Listener, ListenerError};
pub use rpc::RpcListener;
pub use shutdown::{ListenerFailure, Runner, RunnerError, ShutdownReport, SignalHandle};

#[cfg(test)]
#[path = "listener_test.rs"]
mod listener_tests;

#[cfg(test)]
#[path = "shutdown_test.rs"]
mod shutdown_tests;
