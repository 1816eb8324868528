//! Configuration for sockkv
//!
//! Centralized configuration with the reference server's limits as defaults.

use std::path::PathBuf;

use crate::error::{KvError, Result};

/// Default socket path
pub const DEFAULT_SOCKET_PATH: &str = "/tmp/kvstore.sock";

/// Default listen backlog
pub const DEFAULT_BACKLOG: i32 = 10;

/// Default request size limit (bytes read per connection)
pub const DEFAULT_MAX_REQUEST_SIZE: usize = 255;

/// Default table capacity (entries)
pub const DEFAULT_MAX_ENTRIES: usize = 100;

/// Default key and value length limit (bytes)
pub const DEFAULT_MAX_FIELD_LEN: usize = 255;

/// Main configuration for a sockkv instance
#[derive(Debug, Clone)]
pub struct Config {
    // -------------------------------------------------------------------------
    // Network Configuration
    // -------------------------------------------------------------------------
    /// Filesystem path of the Unix stream socket
    pub socket_path: PathBuf,

    /// Max pending connections queued by the kernel
    pub backlog: i32,

    /// Max bytes read from a single request
    pub max_request_size: usize,

    // -------------------------------------------------------------------------
    // Table Configuration
    // -------------------------------------------------------------------------
    /// Max number of entries; new keys beyond this are dropped
    pub max_entries: usize,

    /// Keys longer than this are truncated
    pub max_key_len: usize,

    /// Values longer than this are truncated
    pub max_value_len: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            socket_path: PathBuf::from(DEFAULT_SOCKET_PATH),
            backlog: DEFAULT_BACKLOG,
            max_request_size: DEFAULT_MAX_REQUEST_SIZE,
            max_entries: DEFAULT_MAX_ENTRIES,
            max_key_len: DEFAULT_MAX_FIELD_LEN,
            max_value_len: DEFAULT_MAX_FIELD_LEN,
        }
    }
}

impl Config {
    /// Create a new config builder
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    /// Check the settings the server cannot run with
    pub fn validate(&self) -> Result<()> {
        if self.socket_path.as_os_str().is_empty() {
            return Err(KvError::Config("socket path must not be empty".to_string()));
        }
        if self.backlog <= 0 {
            return Err(KvError::Config(format!(
                "backlog must be positive, got {}",
                self.backlog
            )));
        }
        if self.max_request_size == 0 {
            return Err(KvError::Config(
                "max request size must be at least one byte".to_string(),
            ));
        }
        Ok(())
    }
}

/// Builder for Config
#[derive(Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Set the Unix socket path
    pub fn socket_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.socket_path = path.into();
        self
    }

    /// Set the listen backlog
    pub fn backlog(mut self, backlog: i32) -> Self {
        self.config.backlog = backlog;
        self
    }

    /// Set the maximum request size (in bytes)
    pub fn max_request_size(mut self, size: usize) -> Self {
        self.config.max_request_size = size;
        self
    }

    /// Set the table capacity (in entries)
    pub fn max_entries(mut self, count: usize) -> Self {
        self.config.max_entries = count;
        self
    }

    /// Set the maximum key length (in bytes)
    pub fn max_key_len(mut self, len: usize) -> Self {
        self.config.max_key_len = len;
        self
    }

    /// Set the maximum value length (in bytes)
    pub fn max_value_len(mut self, len: usize) -> Self {
        self.config.max_value_len = len;
        self
    }

    pub fn build(self) -> Config {
        self.config
    }
}
