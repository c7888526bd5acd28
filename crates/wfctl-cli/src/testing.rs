//! Recording `WayfireApi` double for handler tests

use std::collections::VecDeque;

use serde_json::{json, Map, Value};
use wfctl_ipc::{view_id, Geometry, IpcError, WayfireApi};

/// Every call the double received, in order
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    ListViews,
    ListOutputs,
    ListInputDevices,
    GetView(u64),
    GetOutput(u64),
    GetFocusedView,
    GetFocusedOutput,
    GetOption(String),
    SetOptions(Map<String, Value>),
    SetWorkspace { x: u32, y: u32, output_id: u64 },
    ConfigureView(u64, Geometry),
    CloseView(u64),
    SetMinimized(u64, bool),
    SetFullscreen(u64, bool),
    SetAlpha(u64, f64),
    ConfigureDevice(u64, bool),
    Watch(Vec<String>),
    ReadMessage,
}

impl Call {
    /// Whether the call changes compositor state
    pub fn is_mutation(&self) -> bool {
        matches!(
            self,
            Call::SetOptions(_)
                | Call::SetWorkspace { .. }
                | Call::ConfigureView(..)
                | Call::CloseView(_)
                | Call::SetMinimized(..)
                | Call::SetFullscreen(..)
                | Call::SetAlpha(..)
                | Call::ConfigureDevice(..)
        )
    }
}

#[derive(Debug, Default)]
pub struct MockWayfire {
    pub views: Vec<Value>,
    pub outputs: Vec<Value>,
    pub devices: Vec<Value>,
    pub options: Map<String, Value>,
    pub focused_view: Option<u64>,
    pub focused_output: Option<u64>,
    pub messages: VecDeque<Value>,
    pub calls: Vec<Call>,
}

impl MockWayfire {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_view(mut self, view: Value) -> Self {
        self.views.push(view);
        self
    }

    pub fn with_output(mut self, output: Value) -> Self {
        self.outputs.push(output);
        self
    }

    pub fn with_device(mut self, id: u64, name: &str, kind: &str) -> Self {
        self.devices
            .push(json!({ "id": id, "name": name, "type": kind, "enabled": true }));
        self
    }

    pub fn with_option(mut self, name: &str, value: &str) -> Self {
        self.options.insert(name.to_string(), json!(value));
        self
    }

    pub fn with_message(mut self, message: Value) -> Self {
        self.messages.push_back(message);
        self
    }

    pub fn focus_view(mut self, id: u64) -> Self {
        self.focused_view = Some(id);
        self
    }

    pub fn focus_output(mut self, id: u64) -> Self {
        self.focused_output = Some(id);
        self
    }

    /// Calls that changed state
    pub fn mutations(&self) -> Vec<Call> {
        self.calls.iter().filter(|c| c.is_mutation()).cloned().collect()
    }

    fn find(records: &[Value], id: u64) -> Option<Value> {
        records.iter().find(|r| view_id(r) == Some(id)).cloned()
    }
}

impl WayfireApi for MockWayfire {
    async fn list_views(&mut self) -> Result<Vec<Value>, IpcError> {
        self.calls.push(Call::ListViews);
        Ok(self.views.clone())
    }

    async fn list_outputs(&mut self) -> Result<Vec<Value>, IpcError> {
        self.calls.push(Call::ListOutputs);
        Ok(self.outputs.clone())
    }

    async fn list_input_devices(&mut self) -> Result<Vec<Value>, IpcError> {
        self.calls.push(Call::ListInputDevices);
        Ok(self.devices.clone())
    }

    async fn get_view(&mut self, id: u64) -> Result<Value, IpcError> {
        self.calls.push(Call::GetView(id));
        Self::find(&self.views, id).ok_or_else(|| IpcError::NotFound {
            what: format!("view {}", id),
        })
    }

    async fn get_output(&mut self, id: u64) -> Result<Value, IpcError> {
        self.calls.push(Call::GetOutput(id));
        Self::find(&self.outputs, id).ok_or_else(|| IpcError::NotFound {
            what: format!("output {}", id),
        })
    }

    async fn get_focused_view(&mut self) -> Result<Option<Value>, IpcError> {
        self.calls.push(Call::GetFocusedView);
        Ok(self
            .focused_view
            .and_then(|id| Self::find(&self.views, id)))
    }

    async fn get_focused_output(&mut self) -> Result<Value, IpcError> {
        self.calls.push(Call::GetFocusedOutput);
        self.focused_output
            .and_then(|id| Self::find(&self.outputs, id))
            .ok_or_else(|| IpcError::NotFound {
                what: "focused output".to_string(),
            })
    }

    async fn get_option_value(&mut self, option: &str) -> Result<Value, IpcError> {
        self.calls.push(Call::GetOption(option.to_string()));
        match self.options.get(option) {
            Some(value) => Ok(json!({ "result": "ok", "value": value, "default": value })),
            None => Err(IpcError::Compositor {
                message: "option does not exist".to_string(),
            }),
        }
    }

    async fn set_option_values(&mut self, options: &Map<String, Value>) -> Result<(), IpcError> {
        self.calls.push(Call::SetOptions(options.clone()));
        for (key, value) in options {
            self.options.insert(key.clone(), value.clone());
        }
        Ok(())
    }

    async fn set_workspace(&mut self, x: u32, y: u32, output_id: u64) -> Result<(), IpcError> {
        self.calls.push(Call::SetWorkspace { x, y, output_id });
        Ok(())
    }

    async fn configure_view(&mut self, id: u64, geometry: Geometry) -> Result<(), IpcError> {
        self.calls.push(Call::ConfigureView(id, geometry));
        Ok(())
    }

    async fn close_view(&mut self, id: u64) -> Result<(), IpcError> {
        self.calls.push(Call::CloseView(id));
        Ok(())
    }

    async fn set_view_minimized(&mut self, id: u64, state: bool) -> Result<(), IpcError> {
        self.calls.push(Call::SetMinimized(id, state));
        Ok(())
    }

    async fn set_view_fullscreen(&mut self, id: u64, state: bool) -> Result<(), IpcError> {
        self.calls.push(Call::SetFullscreen(id, state));
        Ok(())
    }

    async fn set_view_alpha(&mut self, id: u64, alpha: f64) -> Result<(), IpcError> {
        self.calls.push(Call::SetAlpha(id, alpha));
        Ok(())
    }

    async fn configure_input_device(&mut self, id: u64, enabled: bool) -> Result<(), IpcError> {
        self.calls.push(Call::ConfigureDevice(id, enabled));
        Ok(())
    }

    async fn watch(&mut self, events: &[String]) -> Result<(), IpcError> {
        self.calls.push(Call::Watch(events.to_vec()));
        Ok(())
    }

    async fn read_message(&mut self) -> Result<Value, IpcError> {
        self.calls.push(Call::ReadMessage);
        self.messages.pop_front().ok_or(IpcError::ConnectionClosed)
    }
}

/// A view with the given base geometry
pub fn view(id: u64, x: i64, y: i64, width: i64, height: i64) -> Value {
    json!({
        "id": id,
        "app-id": format!("app-{}", id),
        "title": format!("View {}", id),
        "output-id": 1,
        "base-geometry": { "x": x, "y": y, "width": width, "height": height },
    })
}

/// An output with a `grid_width` x `grid_height` workspace grid at `(x, y)`
pub fn output(id: u64, grid_width: u32, grid_height: u32, x: u32, y: u32) -> Value {
    json!({
        "id": id,
        "name": format!("DP-{}", id),
        "geometry": { "x": 0, "y": 0, "width": 1920, "height": 1080 },
        "workarea": { "x": 0, "y": 32, "width": 1920, "height": 1048 },
        "workspace": { "x": x, "y": y, "grid_width": grid_width, "grid_height": grid_height },
    })
}
