//! HTTP boundary for the coil warehouse
//!
//! Serves the coil API on 127.0.0.1:{port}, local requests only. The
//! handlers own no state beyond the shared database handle.

mod config;
mod handlers;
mod server;

pub use config::{ServiceConfig, DEFAULT_PORT};
pub use server::{CoilServer, ServerHandle};
