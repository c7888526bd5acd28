//! Wayfire IPC client
//!
//! This crate provides communication with the Wayfire compositor via its IPC
//! socket. It covers exactly what `wfctl` needs:
//! - Query views, outputs, input devices and configuration options
//! - Reconfigure views, workspaces, input devices and options
//! - Subscribe to compositor events and read them one at a time
//!
//! ## Architecture
//!
//! - `WayfireSocket`: a connection that frames and exchanges JSON messages
//! - `WayfireApi`: the typed operation set, implemented by `WayfireSocket`
//!   and by test doubles
//! - `IpcError`: error types for IPC operations
//!
//! ## Protocol
//!
//! Wayfire exposes a Unix socket at `$WAYFIRE_SOCKET`. Every message in either
//! direction is a 4-byte little-endian length followed by that many bytes of
//! JSON. Requests look like `{"method": "window-rules/list-views", "data": {}}`;
//! failures come back as `{"error": "..."}`.

mod api;
mod client;
mod error;
mod types;

pub use api::{methods, WayfireApi};
pub use client::{get_socket_path, resolve_socket_path, WayfireSocket, MAX_MESSAGE_LEN};
pub use error::IpcError;
pub use types::{event_name, view_id, Geometry, InputDevice, WorkspaceGrid};
