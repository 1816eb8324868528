//! Command definitions
//!
//! Represents requests from clients.

use bytes::{BufMut, Bytes, BytesMut};

/// Command types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandType {
    Set,
    Get,
}

impl CommandType {
    /// The literal verb on the wire
    pub fn verb(self) -> &'static [u8] {
        match self {
            CommandType::Set => b"SET",
            CommandType::Get => b"GET",
        }
    }
}

/// A parsed command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Store a value under a key
    Set { key: Vec<u8>, value: Vec<u8> },

    /// Fetch the value stored under a key
    Get { key: Vec<u8> },
}

impl Command {
    /// Get the command type
    pub fn command_type(&self) -> CommandType {
        match self {
            Command::Set { .. } => CommandType::Set,
            Command::Get { .. } => CommandType::Get,
        }
    }

    /// Render the request line, newline-terminated
    pub fn encode(&self) -> Bytes {
        let verb = self.command_type().verb();
        match self {
            Command::Set { key, value } => {
                let mut buf = BytesMut::with_capacity(verb.len() + key.len() + value.len() + 3);
                buf.put_slice(verb);
                buf.put_u8(b' ');
                buf.put_slice(key);
                buf.put_u8(b' ');
                buf.put_slice(value);
                buf.put_u8(b'\n');
                buf.freeze()
            }
            Command::Get { key } => {
                let mut buf = BytesMut::with_capacity(verb.len() + key.len() + 2);
                buf.put_slice(verb);
                buf.put_u8(b' ');
                buf.put_slice(key);
                buf.put_u8(b'\n');
                buf.freeze()
            }
        }
    }
}
