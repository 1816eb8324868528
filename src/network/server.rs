//! Unix Socket Server
//!
//! Accepts connections one at a time and serves each to completion before
//! accepting the next.

use std::fs;
use std::io;
use std::os::fd::OwnedFd;
use std::os::unix::net::{UnixListener, UnixStream};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use socket2::{Domain, SockAddr, Socket, Type};

use crate::config::Config;
use crate::error::{KvError, Result};
use crate::network::Connection;
use crate::table::Table;

/// Unix socket server for sockkv
///
/// Owns the table. The socket file is removed when the server is dropped.
pub struct Server {
    config: Config,
    table: Table,
    listener: UnixListener,
    shutdown: Arc<AtomicBool>,
}

impl Server {
    /// Bind the configured socket path and start listening
    ///
    /// A file left at the path by an earlier run is removed first.
    pub fn bind(config: Config, table: Table) -> Result<Self> {
        config.validate()?;

        let path = &config.socket_path;
        remove_socket_file(path).map_err(|source| KvError::Bind {
            path: path.clone(),
            source,
        })?;

        let listener = listen(path, config.backlog).map_err(|source| KvError::Bind {
            path: path.clone(),
            source,
        })?;

        tracing::info!(
            "Listening on {} (backlog {})",
            path.display(),
            config.backlog
        );

        Ok(Self {
            config,
            table,
            listener,
            shutdown: Arc::new(AtomicBool::new(false)),
        })
    }

    /// Serve connections until shut down (blocking)
    ///
    /// Interrupted accepts are retried; any other accept failure stops the
    /// server. Failures on an individual connection are logged and skipped.
    pub fn run(&mut self) -> Result<()> {
        while !self.shutdown.load(Ordering::SeqCst) {
            let stream = match self.listener.accept() {
                Ok((stream, _)) => stream,
                Err(ref e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => {
                    tracing::error!("Accept failed: {}", e);
                    return Err(e.into());
                }
            };

            // The wake-up connection from a shutdown handle
            if self.shutdown.load(Ordering::SeqCst) {
                break;
            }

            let connection = Connection::new(stream, self.config.max_request_size);
            if let Err(e) = connection.serve(&mut self.table) {
                tracing::warn!("Connection error: {}", e);
            }
        }

        tracing::info!("Server stopped with {} entries", self.table.len());
        Ok(())
    }

    /// Get a handle that can stop `run` from another thread
    pub fn shutdown_handle(&self) -> ShutdownHandle {
        ShutdownHandle {
            flag: Arc::clone(&self.shutdown),
            socket_path: self.config.socket_path.clone(),
        }
    }

    /// The table served by this server
    pub fn table(&self) -> &Table {
        &self.table
    }
}

impl Drop for Server {
    fn drop(&mut self) {
        if let Err(e) = remove_socket_file(&self.config.socket_path) {
            tracing::warn!(
                "Failed to remove {}: {}",
                self.config.socket_path.display(),
                e
            );
        }
    }
}

/// Stops a running server
#[derive(Debug, Clone)]
pub struct ShutdownHandle {
    flag: Arc<AtomicBool>,
    socket_path: PathBuf,
}

impl ShutdownHandle {
    /// Signal the server to stop after the current connection
    ///
    /// Connects to the socket once so a blocked accept returns.
    pub fn shutdown(&self) {
        self.flag.store(true, Ordering::SeqCst);
        if let Err(e) = UnixStream::connect(&self.socket_path) {
            tracing::debug!("Shutdown wake-up connect failed: {}", e);
        }
    }
}

fn listen(path: &Path, backlog: i32) -> io::Result<UnixListener> {
    let socket = Socket::new(Domain::UNIX, Type::STREAM, None)?;
    socket.bind(&SockAddr::unix(path)?)?;
    socket.listen(backlog)?;
    Ok(UnixListener::from(OwnedFd::from(socket)))
}

fn remove_socket_file(path: &Path) -> io::Result<()> {
    match fs::remove_file(path) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(e),
    }
}
