//! Viesti notification service
//!
//! Two network surfaces share one process: an HTTP API accepting push and
//! email notifications, and an RPC backend delivering pushes. A trace
//! context crosses the HTTP-to-RPC hop so log lines on both sides carry the
//! same trace id, and a coordinated shutdown runner drains both surfaces
//! under a shared deadline when the process receives SIGTERM or SIGINT.

pub mod config;
pub mod notification;
pub mod rpc;
pub mod server;
pub mod telemetry;

pub use config::Config;
pub use server::{Runner, ShutdownReport};
