//! sockkv Server Binary
//!
//! Starts the Unix socket server for sockkv.

use clap::Parser;
use sockkv::config::{
    DEFAULT_BACKLOG, DEFAULT_MAX_ENTRIES, DEFAULT_MAX_FIELD_LEN, DEFAULT_MAX_REQUEST_SIZE,
    DEFAULT_SOCKET_PATH,
};
use sockkv::network::Server;
use sockkv::{Config, Table};
use tracing_subscriber::{fmt, EnvFilter};

/// sockkv Server
#[derive(Parser, Debug)]
#[command(name = "sockkv-server")]
#[command(about = "In-memory key-value store over a Unix socket")]
#[command(version)]
struct Args {
    /// Unix socket path
    #[arg(short, long, default_value = DEFAULT_SOCKET_PATH)]
    socket: String,

    /// Maximum pending connections
    #[arg(short, long, default_value_t = DEFAULT_BACKLOG)]
    backlog: i32,

    /// Maximum number of stored entries
    #[arg(short = 'e', long, default_value_t = DEFAULT_MAX_ENTRIES)]
    max_entries: usize,

    /// Maximum request size in bytes
    #[arg(short = 'r', long, default_value_t = DEFAULT_MAX_REQUEST_SIZE)]
    max_request_size: usize,

    /// Maximum key length in bytes
    #[arg(long, default_value_t = DEFAULT_MAX_FIELD_LEN)]
    max_key_len: usize,

    /// Maximum value length in bytes
    #[arg(long, default_value_t = DEFAULT_MAX_FIELD_LEN)]
    max_value_len: usize,
}

fn main() {
    // Initialize tracing/logging
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,sockkv=debug"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .init();

    let args = Args::parse();

    tracing::info!("sockkv Server v{}", sockkv::VERSION);
    tracing::info!("Socket path: {}", args.socket);

    // Build config from args
    let config = Config::builder()
        .socket_path(&args.socket)
        .backlog(args.backlog)
        .max_entries(args.max_entries)
        .max_request_size(args.max_request_size)
        .max_key_len(args.max_key_len)
        .max_value_len(args.max_value_len)
        .build();

    let table = Table::with_config(&config);

    let mut server = match Server::bind(config, table) {
        Ok(s) => s,
        Err(e) => {
            tracing::error!("Failed to start server: {}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = server.run() {
        tracing::error!("Server error: {}", e);
        // Exit skips destructors, so drop the server to remove the socket file
        drop(server);
        std::process::exit(1);
    }

    tracing::info!("Server stopped");
}
