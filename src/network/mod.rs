//! Network Module
//!
//! Unix stream socket server.
//!
//! ## Architecture
//! - Single thread, one connection at a time
//! - One read, one response, then close
//! - Requests routed through the protocol `Handler`

mod connection;
mod server;

pub use connection::Connection;
pub use server::{Server, ShutdownHandle};
