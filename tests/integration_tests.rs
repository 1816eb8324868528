//! Integration tests for sockkv
//!
//! Runs a real server on a socket in a temp directory and talks to it
//! through the client and through raw streams.

use std::io::{ErrorKind, Read, Write};
use std::net::Shutdown;
use std::os::unix::net::UnixStream;
use std::path::PathBuf;
use std::thread::{self, JoinHandle};

use sockkv::config::Config;
use sockkv::network::{Server, ShutdownHandle};
use sockkv::table::Table;
use sockkv::{Client, KvError};
use tempfile::TempDir;

// =============================================================================
// Helper Functions
// =============================================================================

struct Running {
    _dir: TempDir,
    socket_path: PathBuf,
    handle: ShutdownHandle,
    thread: JoinHandle<Server>,
}

impl Running {
    fn client(&self) -> Client {
        Client::new(&self.socket_path)
    }

    /// Send raw bytes and return everything the server wrote back
    fn raw(&self, request: &[u8]) -> Vec<u8> {
        let mut stream = UnixStream::connect(&self.socket_path).unwrap();
        stream.write_all(request).unwrap();
        read_reply(&mut stream)
    }

    fn stop(self) -> Server {
        self.handle.shutdown();
        self.thread.join().unwrap()
    }
}

fn read_reply(stream: &mut UnixStream) -> Vec<u8> {
    let mut reply = Vec::new();
    let mut chunk = [0u8; 512];
    loop {
        match stream.read(&mut chunk) {
            Ok(0) => return reply,
            Ok(n) => reply.extend_from_slice(&chunk[..n]),
            // Server closed with part of an oversized request unread
            Err(e) if e.kind() == ErrorKind::ConnectionReset => return reply,
            Err(e) => panic!("read failed: {}", e),
        }
    }
}

fn start_server(config: impl FnOnce(PathBuf) -> Config) -> Running {
    let dir = TempDir::new().unwrap();
    let socket_path = dir.path().join("kv.sock");
    let config = config(socket_path.clone());
    let table = Table::with_config(&config);

    let mut server = Server::bind(config, table).unwrap();
    let handle = server.shutdown_handle();
    let thread = thread::spawn(move || {
        server.run().unwrap();
        server
    });

    Running {
        _dir: dir,
        socket_path,
        handle,
        thread,
    }
}

fn start_default_server() -> Running {
    start_server(|path| Config::builder().socket_path(path).build())
}

// =============================================================================
// Client Tests
// =============================================================================

#[test]
fn test_client_set_and_get() {
    let running = start_default_server();
    let client = running.client();

    client.set(b"name", b"alice smith").unwrap();

    assert_eq!(client.get(b"name").unwrap(), Some(b"alice smith".to_vec()));
    assert_eq!(client.get(b"other").unwrap(), None);

    let server = running.stop();
    assert_eq!(server.table().len(), 1);
}

#[test]
fn test_client_update_keeps_one_entry() {
    let running = start_default_server();
    let client = running.client();

    client.set(b"k", b"v1").unwrap();
    client.set(b"k", b"v2").unwrap();

    assert_eq!(client.get(b"k").unwrap(), Some(b"v2".to_vec()));
    assert_eq!(running.stop().table().len(), 1);
}

#[test]
fn test_client_rejects_unsendable_fields() {
    let client = Client::new("/nonexistent/kv.sock");

    assert!(matches!(client.get(b"two words"), Err(KvError::Protocol(_))));
    assert!(matches!(client.set(b"", b"v"), Err(KvError::Protocol(_))));
    assert!(matches!(client.set(b"k", b"a\nb"), Err(KvError::Protocol(_))));
}

#[test]
fn test_client_rejects_values_the_server_would_alter() {
    let running = start_default_server();
    let client = running.client();
    assert_eq!(client.socket_path(), running.socket_path.as_path());

    // Leading whitespace is skipped by the server, NUL ends the request
    assert!(matches!(client.set(b"k", b"  v"), Err(KvError::Protocol(_))));
    assert!(matches!(client.set(b"k", b" "), Err(KvError::Protocol(_))));
    assert!(matches!(client.set(b"k", b"\tv"), Err(KvError::Protocol(_))));
    assert!(matches!(client.set(b"k", b"a\0b"), Err(KvError::Protocol(_))));
    assert!(matches!(client.set(b"a\0b", b"v"), Err(KvError::Protocol(_))));
    assert!(matches!(client.get(b"a\0b"), Err(KvError::Protocol(_))));

    // Nothing reached the table; inner and trailing spaces still pass
    assert_eq!(client.get(b"k").unwrap(), None);
    client.set(b"k", b"v  w ").unwrap();
    assert_eq!(client.get(b"k").unwrap(), Some(b"v  w ".to_vec()));

    assert_eq!(running.stop().table().len(), 1);
}

#[test]
fn test_client_connect_failure_is_io_error() {
    let dir = TempDir::new().unwrap();
    let client = Client::new(dir.path().join("absent.sock"));

    assert!(matches!(client.get(b"k"), Err(KvError::Io(_))));
}

// =============================================================================
// Wire Tests
// =============================================================================

#[test]
fn test_wire_responses() {
    let running = start_default_server();

    assert_eq!(running.raw(b"GET missing\n"), b"NOT_FOUND\n");
    assert_eq!(running.raw(b"SET k hello world\n"), b"OK\n");
    assert_eq!(running.raw(b"GET k\n"), b"hello world\n");
    assert_eq!(running.raw(b"PING\n"), b"ERROR\n");
    assert_eq!(running.raw(b"   \n"), b"ERROR\n");
    assert_eq!(running.raw(b"SET onlykey\n"), b"NOT_FOUND\n");

    running.stop();
}

#[test]
fn test_capacity_drop_over_socket() {
    let running = start_default_server();
    let client = running.client();

    for i in 0..100 {
        client.set(format!("key{}", i).as_bytes(), b"v").unwrap();
    }

    // Answered OK, but not stored
    assert_eq!(running.raw(b"SET key100 v\n"), b"OK\n");
    assert_eq!(client.get(b"key100").unwrap(), None);

    assert_eq!(running.stop().table().len(), 100);
}

#[test]
fn test_oversized_request_is_clipped() {
    let running = start_default_server();
    let mut request = b"SET k ".to_vec();
    request.extend(std::iter::repeat(b'x').take(300));

    assert_eq!(running.raw(&request), b"OK\n");

    let value = running.client().get(b"k").unwrap().unwrap();
    assert_eq!(value.len(), 249);

    running.stop();
}

#[test]
fn test_empty_connection_gets_no_response() {
    let running = start_default_server();

    let mut stream = UnixStream::connect(&running.socket_path).unwrap();
    stream.shutdown(Shutdown::Write).unwrap();
    assert!(read_reply(&mut stream).is_empty());

    // The server keeps serving
    assert_eq!(running.raw(b"GET k\n"), b"NOT_FOUND\n");

    running.stop();
}

#[test]
fn test_limits_come_from_config() {
    let running = start_server(|path| {
        Config::builder()
            .socket_path(path)
            .max_entries(1)
            .max_value_len(3)
            .build()
    });
    let client = running.client();

    client.set(b"a", b"abcdef").unwrap();
    client.set(b"b", b"xyz").unwrap();

    assert_eq!(client.get(b"a").unwrap(), Some(b"abc".to_vec()));
    assert_eq!(client.get(b"b").unwrap(), None);

    running.stop();
}

// =============================================================================
// Lifecycle Tests
// =============================================================================

#[test]
fn test_socket_file_removed_on_drop() {
    let running = start_default_server();
    let path = running.socket_path.clone();
    assert!(path.exists());

    // Stop by hand so the temp dir outlives the server
    running.handle.shutdown();
    let server = running.thread.join().unwrap();
    drop(server);

    assert!(!path.exists());
}

#[test]
fn test_bind_replaces_stale_socket_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("kv.sock");
    std::fs::write(&path, b"stale").unwrap();

    let config = Config::builder().socket_path(&path).build();
    let table = Table::with_config(&config);
    let server = Server::bind(config, table).unwrap();

    assert!(UnixStream::connect(&path).is_ok());
    drop(server);
}

#[test]
fn test_bind_failure() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("missing-dir").join("kv.sock");

    let config = Config::builder().socket_path(&path).build();
    let result = Server::bind(config, Table::default());

    assert!(matches!(result, Err(KvError::Bind { .. })));
}

#[test]
fn test_bind_rejects_invalid_config() {
    let config = Config::builder().backlog(0).build();
    let result = Server::bind(config, Table::default());

    assert!(matches!(result, Err(KvError::Config(_))));
}
