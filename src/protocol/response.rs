//! Response definitions
//!
//! Represents the single line sent back for each request.

use bytes::{BufMut, Bytes, BytesMut};

use crate::error::{KvError, Result};

use super::CommandType;

const OK: &[u8] = b"OK";
const NOT_FOUND: &[u8] = b"NOT_FOUND";
const ERROR: &[u8] = b"ERROR";

/// A response to send to the client
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Response {
    /// SET accepted (including a capacity-dropped SET)
    Ok,

    /// GET hit
    Value(Vec<u8>),

    /// GET miss
    NotFound,

    /// Unrecognized or malformed command
    Error,
}

impl Response {
    /// Render the response line, newline-terminated
    pub fn encode(&self) -> Bytes {
        let body: &[u8] = match self {
            Response::Ok => OK,
            Response::Value(value) => value,
            Response::NotFound => NOT_FOUND,
            Response::Error => ERROR,
        };

        let mut buf = BytesMut::with_capacity(body.len() + 1);
        buf.put_slice(body);
        buf.put_u8(b'\n');
        buf.freeze()
    }

    /// Decode a response line received for a command of `command_type`
    ///
    /// The wire form cannot tell a stored value of `NOT_FOUND` or `ERROR`
    /// apart from the status lines; those always decode as statuses. A
    /// GET reply of `OK` decodes as a value.
    pub fn decode(command_type: CommandType, bytes: &[u8]) -> Result<Self> {
        let line = match bytes.split_last() {
            Some((b'\n', line)) => line,
            _ => {
                return Err(KvError::Protocol(format!(
                    "Response not newline-terminated ({} bytes)",
                    bytes.len()
                )))
            }
        };

        match (command_type, line) {
            (_, ERROR) => Ok(Response::Error),
            (CommandType::Set, OK) => Ok(Response::Ok),
            (CommandType::Set, other) => Err(KvError::Protocol(format!(
                "Unexpected SET response: {:?}",
                String::from_utf8_lossy(other)
            ))),
            (CommandType::Get, NOT_FOUND) => Ok(Response::NotFound),
            (CommandType::Get, value) => Ok(Response::Value(value.to_vec())),
        }
    }
}
