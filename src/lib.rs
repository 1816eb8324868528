//! # sockkv
//!
//! A minimal in-memory key-value store served over a Unix stream socket:
//! - Bounded table (fixed entry count, truncated keys and values)
//! - Line-oriented text protocol, one command per connection
//! - Single-threaded, sequential accept loop
//! - No persistence; the table lives as long as the process
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    Unix Socket Server                        │
//! │            (one connection at a time, one read)              │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │ raw request bytes
//! ┌─────────────────────▼───────────────────────────────────────┐
//! │                   Protocol Handler                           │
//! │              (SET rule, then GET rule)                       │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │ get / set
//!                ┌──────▼──────┐
//!                │    Table    │
//!                │ (Vec, scan) │
//!                └─────────────┘
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;

pub mod table;
pub mod protocol;
pub mod network;
pub mod client;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{KvError, Result};
pub use config::Config;
pub use table::Table;
pub use client::Client;

// =============================================================================
// Version Info
// =============================================================================

/// Current version of sockkv
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
