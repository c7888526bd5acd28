//! Wayfire IPC client implementation
//!
//! This module provides the `WayfireSocket` for communicating with the Wayfire
//! compositor. It handles socket discovery, connection setup and the
//! length-prefixed JSON framing.

use std::path::{Path, PathBuf};

use serde_json::{json, Value};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::UnixStream;
use tracing::debug;

use super::IpcError;

/// Environment variable name for the wayfire socket path
const WAYFIRE_SOCKET_ENV: &str = "WAYFIRE_SOCKET";

/// Largest frame body accepted from the compositor (64 MiB)
pub const MAX_MESSAGE_LEN: usize = 64 * 1024 * 1024;

/// Discover the wayfire IPC socket path from the environment
///
/// Reads the `WAYFIRE_SOCKET` environment variable and validates that
/// the path exists. Wayfire sets this variable for every client it spawns
/// when the `ipc` plugin is enabled.
///
/// # Errors
///
/// Returns `IpcError::SocketNotSet` if `$WAYFIRE_SOCKET` is not set.
/// Returns `IpcError::SocketNotFound` if the path doesn't exist.
pub fn get_socket_path() -> Result<PathBuf, IpcError> {
    let socket_path_str =
        std::env::var(WAYFIRE_SOCKET_ENV).map_err(|_| IpcError::SocketNotSet)?;

    validate_socket_path(PathBuf::from(socket_path_str))
}

/// Pick the socket path, preferring an explicit override over the environment
///
/// The override comes from `--socket` or the configuration file. It is
/// validated the same way as the environment value.
pub fn resolve_socket_path(explicit: Option<&Path>) -> Result<PathBuf, IpcError> {
    match explicit {
        Some(path) => validate_socket_path(path.to_path_buf()),
        None => get_socket_path(),
    }
}

fn validate_socket_path(socket_path: PathBuf) -> Result<PathBuf, IpcError> {
    if !socket_path.exists() {
        return Err(IpcError::SocketNotFound { path: socket_path });
    }

    Ok(socket_path)
}

/// Serialize a message into a length-prefixed frame
fn encode_frame(message: &Value) -> Result<Vec<u8>, IpcError> {
    let body = serde_json::to_vec(message).map_err(IpcError::SerializeFailed)?;
    let len = u32::try_from(body.len()).map_err(|_| IpcError::MessageTooLarge { len: body.len() })?;

    let mut frame = Vec::with_capacity(4 + body.len());
    frame.extend_from_slice(&len.to_le_bytes());
    frame.extend_from_slice(&body);
    Ok(frame)
}

/// Decode a frame header, enforcing `MAX_MESSAGE_LEN`
fn decode_header(header: [u8; 4]) -> Result<usize, IpcError> {
    let len = u32::from_le_bytes(header) as usize;
    if len > MAX_MESSAGE_LEN {
        return Err(IpcError::MessageTooLarge { len });
    }
    Ok(len)
}

/// Turn `{"error": ...}` replies into `IpcError::Compositor`
fn check_reply(reply: Value) -> Result<Value, IpcError> {
    if let Some(error) = reply.get("error") {
        let message = match error.as_str() {
            Some(message) => message.to_string(),
            None => error.to_string(),
        };
        return Err(IpcError::Compositor { message });
    }
    Ok(reply)
}

/// Client for communicating with the wayfire compositor via IPC
///
/// One connection is opened per process and used for every request. After
/// `watch` has been sent the same connection delivers events, which are read
/// with `read_message`.
///
/// # Example
///
/// ```ignore
/// let mut socket = WayfireSocket::connect(None).await?;
/// let views = socket.request("window-rules/list-views", json!({})).await?;
/// ```
#[derive(Debug)]
pub struct WayfireSocket {
    stream: UnixStream,
}

impl WayfireSocket {
    /// Connect to the wayfire compositor's IPC socket
    ///
    /// `explicit` overrides `$WAYFIRE_SOCKET`. There is no retry: a compositor
    /// that is not running is reported immediately.
    ///
    /// # Errors
    ///
    /// Returns `IpcError::SocketNotSet` if no path is given and `$WAYFIRE_SOCKET` is not set.
    /// Returns `IpcError::SocketNotFound` if the socket path doesn't exist.
    /// Returns `IpcError::ConnectionFailed` if the connection fails.
    pub async fn connect(explicit: Option<&Path>) -> Result<Self, IpcError> {
        let socket_path = resolve_socket_path(explicit)?;

        let stream = UnixStream::connect(&socket_path)
            .await
            .map_err(|e| IpcError::ConnectionFailed {
                path: socket_path.clone(),
                source: e,
            })?;

        debug!("Connected to wayfire at {}", socket_path.display());

        Ok(Self { stream })
    }

    /// Wrap an already connected stream
    pub fn from_stream(stream: UnixStream) -> Self {
        Self { stream }
    }

    /// Write one framed message
    pub async fn send_message(&mut self, message: &Value) -> Result<(), IpcError> {
        let frame = encode_frame(message)?;

        self.stream
            .write_all(&frame)
            .await
            .map_err(IpcError::SendFailed)?;
        self.stream.flush().await.map_err(IpcError::SendFailed)
    }

    /// Read one framed message, blocking until it arrives
    ///
    /// # Errors
    ///
    /// Returns `IpcError::ConnectionClosed` on EOF, `IpcError::MessageTooLarge`
    /// for oversized frames and `IpcError::DeserializeFailed` for invalid JSON.
    pub async fn read_message(&mut self) -> Result<Value, IpcError> {
        let mut header = [0u8; 4];
        self.read_full(&mut header).await?;
        let len = decode_header(header)?;

        let mut body = vec![0u8; len];
        self.read_full(&mut body).await?;

        serde_json::from_slice(&body).map_err(IpcError::DeserializeFailed)
    }

    async fn read_full(&mut self, buf: &mut [u8]) -> Result<(), IpcError> {
        match self.stream.read_exact(buf).await {
            Ok(_) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::UnexpectedEof => {
                Err(IpcError::ConnectionClosed)
            }
            Err(e) => Err(IpcError::ReceiveFailed(e)),
        }
    }

    /// Send a request and wait for its reply
    ///
    /// This is the core IPC method. Requests must not be issued after `watch`,
    /// since event frames would then interleave with replies.
    ///
    /// # Errors
    ///
    /// Any transport error, or `IpcError::Compositor` when the reply carries an
    /// `error` key.
    pub async fn request(&mut self, method: &str, data: Value) -> Result<Value, IpcError> {
        debug!(method, "Sending wayfire request");

        self.send_message(&json!({ "method": method, "data": data }))
            .await?;
        let reply = self.read_message().await?;

        check_reply(reply)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::Mutex;

    // Environment variables are global state, so tests modifying them must not run in parallel.
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    /// Read one request frame on the server side of a socket pair
    async fn read_frame(stream: &mut UnixStream) -> Value {
        let mut header = [0u8; 4];
        stream.read_exact(&mut header).await.unwrap();
        let mut body = vec![0u8; u32::from_le_bytes(header) as usize];
        stream.read_exact(&mut body).await.unwrap();
        serde_json::from_slice(&body).unwrap()
    }

    async fn write_frame(stream: &mut UnixStream, message: &Value) {
        stream.write_all(&encode_frame(message).unwrap()).await.unwrap();
    }

    #[test]
    fn test_socket_not_set_error() {
        let _guard = ENV_MUTEX.lock().unwrap();
        let original = env::var(WAYFIRE_SOCKET_ENV).ok();

        env::remove_var(WAYFIRE_SOCKET_ENV);
        let result = get_socket_path();

        if let Some(val) = original {
            env::set_var(WAYFIRE_SOCKET_ENV, val);
        }

        let err = result.unwrap_err();
        assert!(
            matches!(err, IpcError::SocketNotSet),
            "Expected SocketNotSet error, got: {:?}",
            err
        );
        assert!(err.to_string().contains("WAYFIRE_SOCKET"));
    }

    #[test]
    fn test_socket_not_found_error() {
        let _guard = ENV_MUTEX.lock().unwrap();
        let original = env::var(WAYFIRE_SOCKET_ENV).ok();
        let fake_path = "/tmp/nonexistent-wayfire-socket-12345";

        env::set_var(WAYFIRE_SOCKET_ENV, fake_path);
        let result = get_socket_path();

        if let Some(val) = original {
            env::set_var(WAYFIRE_SOCKET_ENV, val);
        } else {
            env::remove_var(WAYFIRE_SOCKET_ENV);
        }

        match result.unwrap_err() {
            IpcError::SocketNotFound { path } => {
                assert_eq!(path, PathBuf::from(fake_path));
            }
            other => panic!("Expected SocketNotFound error, got: {:?}", other),
        }
    }

    #[test]
    fn test_explicit_path_overrides_environment() {
        let _guard = ENV_MUTEX.lock().unwrap();
        let original = env::var(WAYFIRE_SOCKET_ENV).ok();
        let dir = tempfile::tempdir().unwrap();

        env::set_var(WAYFIRE_SOCKET_ENV, "/tmp/nonexistent-wayfire-socket-12345");
        let result = resolve_socket_path(Some(dir.path()));

        if let Some(val) = original {
            env::set_var(WAYFIRE_SOCKET_ENV, val);
        } else {
            env::remove_var(WAYFIRE_SOCKET_ENV);
        }

        assert_eq!(result.unwrap(), dir.path());
    }

    #[tokio::test]
    async fn test_connection_to_regular_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let socket_path = dir.path().join("wayfire.sock");
        std::fs::write(&socket_path, "").unwrap();

        match WayfireSocket::connect(Some(&socket_path)).await.unwrap_err() {
            IpcError::ConnectionFailed { path, .. } => assert_eq!(path, socket_path),
            other => panic!("Expected ConnectionFailed error, got: {:?}", other),
        }
    }

    #[test]
    fn test_frame_header_is_little_endian_length() {
        let frame = encode_frame(&json!({"a": 1})).unwrap();
        assert_eq!(&frame[..4], &7u32.to_le_bytes());
        assert_eq!(&frame[4..], br#"{"a":1}"#);
    }

    #[test]
    fn test_oversized_header_rejected() {
        let header = ((MAX_MESSAGE_LEN + 1) as u32).to_le_bytes();
        assert!(matches!(
            decode_header(header),
            Err(IpcError::MessageTooLarge { .. })
        ));
    }

    #[tokio::test]
    async fn test_request_round_trip() {
        let (client_end, mut server_end) = UnixStream::pair().unwrap();
        let mut socket = WayfireSocket::from_stream(client_end);

        let server = tokio::spawn(async move {
            let request = read_frame(&mut server_end).await;
            write_frame(&mut server_end, &json!([{"id": 1}])).await;
            request
        });

        let reply = socket
            .request("window-rules/list-views", json!({}))
            .await
            .unwrap();
        let request = server.await.unwrap();

        assert_eq!(request["method"], "window-rules/list-views");
        assert_eq!(request["data"], json!({}));
        assert_eq!(reply, json!([{"id": 1}]));
    }

    #[tokio::test]
    async fn test_error_reply_becomes_compositor_error() {
        let (client_end, mut server_end) = UnixStream::pair().unwrap();
        let mut socket = WayfireSocket::from_stream(client_end);

        tokio::spawn(async move {
            read_frame(&mut server_end).await;
            write_frame(&mut server_end, &json!({"error": "no such view"})).await;
        });

        match socket
            .request("window-rules/view-info", json!({"id": 99}))
            .await
            .unwrap_err()
        {
            IpcError::Compositor { message } => assert_eq!(message, "no such view"),
            other => panic!("Expected Compositor error, got: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_eof_is_connection_closed() {
        let (client_end, server_end) = UnixStream::pair().unwrap();
        let mut socket = WayfireSocket::from_stream(client_end);
        drop(server_end);

        assert!(matches!(
            socket.read_message().await,
            Err(IpcError::ConnectionClosed)
        ));
    }

    #[tokio::test]
    async fn test_truncated_body_is_connection_closed() {
        let (client_end, mut server_end) = UnixStream::pair().unwrap();
        let mut socket = WayfireSocket::from_stream(client_end);

        server_end.write_all(&10u32.to_le_bytes()).await.unwrap();
        server_end.write_all(b"{\"a\"").await.unwrap();
        drop(server_end);

        assert!(matches!(
            socket.read_message().await,
            Err(IpcError::ConnectionClosed)
        ));
    }
}
