//! Error types for Wayfire IPC operations

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur when communicating with the Wayfire compositor
#[derive(Debug, Error)]
pub enum IpcError {
    /// The WAYFIRE_SOCKET environment variable is not set
    #[error("WAYFIRE_SOCKET environment variable not set - is wayfire running?")]
    SocketNotSet,

    /// The socket path does not exist
    #[error("Wayfire socket not found at {path}")]
    SocketNotFound { path: PathBuf },

    /// Failed to connect to the wayfire socket
    #[error("Failed to connect to wayfire socket at {path}: {source}")]
    ConnectionFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to send request to wayfire
    #[error("Failed to send request to wayfire: {0}")]
    SendFailed(#[source] std::io::Error),

    /// Failed to receive response from wayfire
    #[error("Failed to receive response from wayfire: {0}")]
    ReceiveFailed(#[source] std::io::Error),

    /// Failed to serialize request to JSON
    #[error("Failed to serialize request: {0}")]
    SerializeFailed(#[source] serde_json::Error),

    /// Failed to deserialize response from JSON
    #[error("Failed to deserialize response: {0}")]
    DeserializeFailed(#[source] serde_json::Error),

    /// Wayfire answered with `{"error": ...}`
    #[error("Wayfire returned error: {message}")]
    Compositor { message: String },

    /// Connection was closed unexpectedly
    #[error("Connection to wayfire closed unexpectedly")]
    ConnectionClosed,

    /// A frame header announced more bytes than we are willing to buffer
    #[error("Wayfire message of {len} bytes exceeds the size limit")]
    MessageTooLarge { len: usize },

    /// A reply lacked a field we rely on, or it had the wrong shape
    #[error("Wayfire reply is missing field `{field}`")]
    MissingField { field: String },

    /// A reply field held a value wfctl cannot work with
    #[error("Wayfire reply has an out-of-range `{field}`")]
    OutOfRange { field: String },

    /// The compositor reported no such object
    #[error("{what} not found")]
    NotFound { what: String },
}
