//! Table Module
//!
//! The bounded in-memory collection of key/value entries.
//!
//! ## Responsibilities
//! - Exact-match lookup by key
//! - Insert or overwrite by key, at most one entry per key
//! - Silent truncation of over-long keys and values
//! - Silent drop of new keys once the table is full
//!
//! ## Data Structure Choice
//! A `Vec` scanned linearly, in insertion order. The capacity check runs
//! before every append, so the entry count never exceeds `max_entries`
//! no matter how the backing vector grows.

mod store;

pub use store::{Iter, Table};

/// One stored key/value pair
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub key: Vec<u8>,
    pub value: Vec<u8>,
}

/// What a `set` did to the table
///
/// The protocol answers `OK` for all three.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetOutcome {
    /// An existing entry's value was overwritten
    Updated,

    /// A new entry was appended
    Inserted,

    /// The key was new and the table was full; nothing changed
    Dropped,
}
