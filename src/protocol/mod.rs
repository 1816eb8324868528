//! Protocol Module
//!
//! Defines the line-oriented text protocol. One request and one response
//! per connection.
//!
//! ## Requests
//! ```text
//! SET <key> <value...>
//! GET <key>
//! ```
//! Verbs are case-sensitive. Keys contain no whitespace; a SET value is
//! the rest of the line and may contain spaces.
//!
//! ## Responses
//! Exactly one `\n`-terminated line:
//! - `OK`: SET accepted (also when the table was full and dropped it)
//! - `<value>`: GET hit
//! - `NOT_FOUND`: GET miss
//! - `ERROR`: anything else, including an empty request

mod command;
mod handler;
mod parser;
mod response;

pub use command::{Command, CommandType};
pub use handler::Handler;
pub use parser::{normalize, parse_command};
pub(crate) use parser::is_space;
pub use response::Response;
