//! Table implementation
//!
//! Linear-scan store with a fixed entry capacity.

use crate::config::{Config, DEFAULT_MAX_ENTRIES, DEFAULT_MAX_FIELD_LEN};

use super::{Entry, SetOutcome};

/// Bounded, insertion-ordered key/value table
///
/// Owned by the server and passed by `&mut` to the request handler, so
/// reads and writes are serialized by the borrow checker. Sharing it across
/// threads needs an outer lock.
#[derive(Debug, Clone)]
pub struct Table {
    entries: Vec<Entry>,
    max_entries: usize,
    max_key_len: usize,
    max_value_len: usize,
}

impl Table {
    /// Create an empty table with explicit limits
    pub fn new(max_entries: usize, max_key_len: usize, max_value_len: usize) -> Self {
        Self {
            entries: Vec::new(),
            max_entries,
            max_key_len,
            max_value_len,
        }
    }

    /// Create an empty table with the limits from `config`
    pub fn with_config(config: &Config) -> Self {
        Self::new(config.max_entries, config.max_key_len, config.max_value_len)
    }

    /// Look up a value by exact key match
    pub fn get(&self, key: &[u8]) -> Option<&[u8]> {
        self.position(key).map(|i| self.entries[i].value.as_slice())
    }

    /// Insert or overwrite a key
    ///
    /// Never fails: over-long fields are truncated and a new key on a full
    /// table is dropped. The returned outcome says which happened.
    pub fn set(&mut self, key: &[u8], value: &[u8]) -> SetOutcome {
        let key = clip(key, self.max_key_len);
        let value = clip(value, self.max_value_len);

        if let Some(i) = self.position(key) {
            let entry = &mut self.entries[i];
            entry.value.clear();
            entry.value.extend_from_slice(value);
            return SetOutcome::Updated;
        }

        if self.is_full() {
            return SetOutcome::Dropped;
        }

        self.entries.push(Entry {
            key: key.to_vec(),
            value: value.to_vec(),
        });
        SetOutcome::Inserted
    }

    /// Number of stored entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Maximum number of entries
    pub fn capacity(&self) -> usize {
        self.max_entries
    }

    /// True once no new key can be added
    pub fn is_full(&self) -> bool {
        self.entries.len() >= self.max_entries
    }

    /// Iterate entries in insertion order
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            inner: self.entries.iter(),
        }
    }

    // Lookups clip the key the same way inserts do, so an over-long key
    // always maps to the single entry holding its truncated form.
    fn position(&self, key: &[u8]) -> Option<usize> {
        let key = clip(key, self.max_key_len);
        self.entries.iter().position(|entry| entry.key == key)
    }
}

impl Default for Table {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_ENTRIES, DEFAULT_MAX_FIELD_LEN, DEFAULT_MAX_FIELD_LEN)
    }
}

/// Iterator over table entries, oldest first
pub struct Iter<'a> {
    inner: std::slice::Iter<'a, Entry>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = (&'a [u8], &'a [u8]);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner
            .next()
            .map(|entry| (entry.key.as_slice(), entry.value.as_slice()))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl ExactSizeIterator for Iter<'_> {}

fn clip(bytes: &[u8], max: usize) -> &[u8] {
    &bytes[..bytes.len().min(max)]
}
