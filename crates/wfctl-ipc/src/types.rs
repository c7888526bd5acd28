//! Typed views of wayfire replies
//!
//! Views, outputs and devices are opaque JSON objects whose schema belongs to
//! the compositor. The types here pick out only the fields wfctl reads; every
//! other field is left untouched in the original `Value`.

use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;

use super::IpcError;

fn field<T: DeserializeOwned>(value: &Value, name: &str) -> Result<T, IpcError> {
    value
        .get(name)
        .cloned()
        .and_then(|v| serde_json::from_value(v).ok())
        .ok_or_else(|| IpcError::MissingField {
            field: name.to_string(),
        })
}

/// An input device as listed by `input/list-devices`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputDevice {
    pub id: u64,
    pub name: String,
    /// Device class reported as `type`, e.g. `keyboard` or `pointer`
    pub kind: String,
}

impl InputDevice {
    pub fn from_value(value: &Value) -> Result<Self, IpcError> {
        Ok(Self {
            id: field(value, "id")?,
            name: field(value, "name")?,
            kind: field(value, "type")?,
        })
    }

    /// Whether `query` names this device by name, decimal id or type
    pub fn matches(&self, query: &str) -> bool {
        self.name == query || self.id.to_string() == query || self.kind == query
    }
}

/// A rectangle in layout coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct Geometry {
    pub x: i64,
    pub y: i64,
    pub width: i64,
    pub height: i64,
}

impl Geometry {
    /// Read a geometry object stored under `name`
    ///
    /// Views carry `base-geometry`; outputs carry `geometry` and `workarea`.
    pub fn from_field(value: &Value, name: &str) -> Result<Self, IpcError> {
        field(value, name)
    }
}

/// Workspace grid state of an output (its `workspace` object)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct WorkspaceGrid {
    pub x: u32,
    pub y: u32,
    pub grid_width: u32,
    pub grid_height: u32,
}

impl WorkspaceGrid {
    pub fn from_output(output: &Value) -> Result<Self, IpcError> {
        field(output, "workspace")
    }
}

/// The `id` of a view or output record
pub fn view_id(value: &Value) -> Option<u64> {
    value.get("id").and_then(Value::as_u64)
}

/// The `event` name of a message received after `watch`
pub fn event_name(message: &Value) -> Option<&str> {
    message.get("event").and_then(Value::as_str)
}
