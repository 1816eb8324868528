//! Request handler
//!
//! Turns one raw request buffer into one response against a table.

use crate::table::{SetOutcome, Table};

use super::{normalize, parse_command, Command, Response};

/// Executes requests against a borrowed table
pub struct Handler<'a> {
    table: &'a mut Table,
    max_request_size: usize,
}

impl<'a> Handler<'a> {
    /// Create a handler; requests longer than `max_request_size` are clipped
    pub fn new(table: &'a mut Table, max_request_size: usize) -> Self {
        Self {
            table,
            max_request_size,
        }
    }

    /// Handle one request. Every input yields exactly one response.
    pub fn handle(&mut self, request: &[u8]) -> Response {
        let request = normalize(request, self.max_request_size);

        let Some(command) = parse_command(request) else {
            tracing::trace!(
                "Unrecognized request: {:?}",
                String::from_utf8_lossy(request)
            );
            return Response::Error;
        };

        tracing::trace!("Parsed command: {:?}", command);
        self.execute(command)
    }

    /// Execute an already-parsed command
    pub fn execute(&mut self, command: Command) -> Response {
        match command {
            Command::Set { key, value } => {
                if self.table.set(&key, &value) == SetOutcome::Dropped {
                    tracing::debug!(
                        "Table full ({} entries), dropped SET of {:?}",
                        self.table.capacity(),
                        String::from_utf8_lossy(&key)
                    );
                }
                Response::Ok
            }
            Command::Get { key } => match self.table.get(&key) {
                Some(value) => Response::Value(value.to_vec()),
                None => Response::NotFound,
            },
        }
    }
}
