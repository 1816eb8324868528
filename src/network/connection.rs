//! Connection Handler
//!
//! Serves the single exchange carried by one client connection.

use std::io::{Read, Write};
use std::os::unix::net::UnixStream;

use crate::error::Result;
use crate::protocol::Handler;
use crate::table::Table;

/// One accepted client connection
///
/// The stream is closed when the connection is dropped.
pub struct Connection {
    stream: UnixStream,
    max_request_size: usize,
}

impl Connection {
    /// Wrap an accepted stream
    pub fn new(stream: UnixStream, max_request_size: usize) -> Self {
        Self {
            stream,
            max_request_size,
        }
    }

    /// Read one request, answer it, and consume the connection
    ///
    /// A single read of at most `max_request_size` bytes is performed. If
    /// the client sent nothing before closing, no response is written.
    pub fn serve(mut self, table: &mut Table) -> Result<()> {
        let mut buf = vec![0u8; self.max_request_size];
        let n = self.stream.read(&mut buf)?;

        if n == 0 {
            tracing::debug!("Client closed without sending a request");
            return Ok(());
        }

        let response = Handler::new(table, self.max_request_size).handle(&buf[..n]);

        self.stream.write_all(&response.encode())?;
        self.stream.flush()?;
        Ok(())
    }
}
