//! Client
//!
//! Sends one command per connection and decodes the reply.

use std::io::{ErrorKind, Read, Write};
use std::os::unix::net::UnixStream;
use std::path::{Path, PathBuf};

use crate::error::{KvError, Result};
use crate::protocol::{is_space, Command, Response};

/// Client for a sockkv server
#[derive(Debug, Clone)]
pub struct Client {
    socket_path: PathBuf,
}

impl Client {
    /// Create a client for the server listening at `socket_path`
    pub fn new(socket_path: impl Into<PathBuf>) -> Self {
        Self {
            socket_path: socket_path.into(),
        }
    }

    pub fn socket_path(&self) -> &Path {
        &self.socket_path
    }

    /// Send a command and wait for the server to answer and close
    pub fn send(&self, command: &Command) -> Result<Response> {
        let mut stream = UnixStream::connect(&self.socket_path)?;
        stream.write_all(&command.encode())?;
        stream.flush()?;

        let reply = read_reply(&mut stream)?;
        Response::decode(command.command_type(), &reply)
    }

    /// Fetch a value; `None` if the key is not stored
    pub fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>> {
        check_key(key)?;
        match self.send(&Command::Get { key: key.to_vec() })? {
            Response::Value(value) => Ok(Some(value)),
            Response::NotFound => Ok(None),
            other => Err(KvError::Protocol(format!(
                "Unexpected GET response: {:?}",
                other
            ))),
        }
    }

    /// Store a value
    ///
    /// `Ok` does not mean the value was stored: a full table drops new keys.
    pub fn set(&self, key: &[u8], value: &[u8]) -> Result<()> {
        check_key(key)?;
        check_value(value)?;
        match self.send(&Command::Set {
            key: key.to_vec(),
            value: value.to_vec(),
        })? {
            Response::Ok => Ok(()),
            other => Err(KvError::Protocol(format!(
                "Unexpected SET response: {:?}",
                other
            ))),
        }
    }
}

/// Read until the server closes the connection
///
/// The server reads a bounded request and closes without draining the
/// rest, which surfaces as a reset after its reply.
fn read_reply(stream: &mut UnixStream) -> Result<Vec<u8>> {
    let mut reply = Vec::new();
    let mut chunk = [0u8; 512];
    loop {
        match stream.read(&mut chunk) {
            Ok(0) => return Ok(reply),
            Ok(n) => reply.extend_from_slice(&chunk[..n]),
            Err(ref e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(ref e) if e.kind() == ErrorKind::ConnectionReset && !reply.is_empty() => {
                return Ok(reply)
            }
            Err(e) => return Err(e.into()),
        }
    }
}

fn check_key(key: &[u8]) -> Result<()> {
    if key.is_empty() || key.iter().any(|&b| is_space(b) || b == 0) {
        return Err(KvError::Protocol(
            "key must be non-empty and contain no whitespace or NUL".to_string(),
        ));
    }
    Ok(())
}

// The server skips whitespace before a value and stops reading at NUL
fn check_value(value: &[u8]) -> Result<()> {
    match value.first() {
        None => Err(KvError::Protocol("value must be non-empty".to_string())),
        Some(&b) if is_space(b) => Err(KvError::Protocol(
            "value must not start with whitespace".to_string(),
        )),
        _ if value.iter().any(|&b| b == b'\n' || b == 0) => Err(KvError::Protocol(
            "value must contain no newline or NUL".to_string(),
        )),
        _ => Ok(()),
    }
}
