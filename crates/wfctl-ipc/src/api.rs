//! Typed wayfire operations
//!
//! `WayfireApi` is the seam between command handlers and the socket. The
//! production implementation is `WayfireSocket`; tests substitute a recording
//! double.

use serde_json::{json, Map, Value};

use super::client::WayfireSocket;
use super::types::Geometry;
use super::IpcError;

/// IPC method names understood by wayfire's `ipc` plugins
pub mod methods {
    pub const LIST_VIEWS: &str = "window-rules/list-views";
    pub const LIST_OUTPUTS: &str = "window-rules/list-outputs";
    pub const LIST_INPUT_DEVICES: &str = "input/list-devices";
    pub const VIEW_INFO: &str = "window-rules/view-info";
    pub const OUTPUT_INFO: &str = "window-rules/output-info";
    pub const FOCUSED_VIEW: &str = "window-rules/get-focused-view";
    pub const FOCUSED_OUTPUT: &str = "window-rules/get-focused-output";
    pub const GET_OPTION: &str = "wayfire/get-config-option";
    pub const SET_OPTIONS: &str = "wayfire/set-config-options";
    pub const SET_WORKSPACE: &str = "vswitch/set-workspace";
    pub const CONFIGURE_VIEW: &str = "window-rules/configure-view";
    pub const CLOSE_VIEW: &str = "window-rules/close-view";
    pub const SET_MINIMIZED: &str = "wm-actions/set-minimized";
    pub const SET_FULLSCREEN: &str = "wm-actions/set-fullscreen";
    pub const SET_VIEW_ALPHA: &str = "wf/alpha/set-view-alpha";
    pub const CONFIGURE_DEVICE: &str = "input/configure-device";
    pub const WATCH: &str = "window-rules/events/watch";
}

/// The compositor operations wfctl relies on
///
/// Records (views, outputs, devices) are returned as opaque JSON; callers
/// read the fields they need through the helpers in this crate.
#[allow(async_fn_in_trait)]
pub trait WayfireApi {
    async fn list_views(&mut self) -> Result<Vec<Value>, IpcError>;

    async fn list_outputs(&mut self) -> Result<Vec<Value>, IpcError>;

    async fn list_input_devices(&mut self) -> Result<Vec<Value>, IpcError>;

    /// Fetch one view; `IpcError::NotFound` if wayfire has no such view
    async fn get_view(&mut self, id: u64) -> Result<Value, IpcError>;

    async fn get_output(&mut self, id: u64) -> Result<Value, IpcError>;

    /// The focused view, or `None` when nothing has focus
    async fn get_focused_view(&mut self) -> Result<Option<Value>, IpcError>;

    async fn get_focused_output(&mut self) -> Result<Value, IpcError>;

    /// The option reply, `{"value": ..., "default": ...}`
    async fn get_option_value(&mut self, option: &str) -> Result<Value, IpcError>;

    /// Apply all `options` in a single request
    async fn set_option_values(&mut self, options: &Map<String, Value>) -> Result<(), IpcError>;

    async fn set_workspace(&mut self, x: u32, y: u32, output_id: u64) -> Result<(), IpcError>;

    async fn configure_view(&mut self, id: u64, geometry: Geometry) -> Result<(), IpcError>;

    async fn close_view(&mut self, id: u64) -> Result<(), IpcError>;

    async fn set_view_minimized(&mut self, id: u64, state: bool) -> Result<(), IpcError>;

    async fn set_view_fullscreen(&mut self, id: u64, state: bool) -> Result<(), IpcError>;

    async fn set_view_alpha(&mut self, id: u64, alpha: f64) -> Result<(), IpcError>;

    async fn configure_input_device(&mut self, id: u64, enabled: bool) -> Result<(), IpcError>;

    /// Subscribe to events; an empty list subscribes to everything
    async fn watch(&mut self, events: &[String]) -> Result<(), IpcError>;

    /// Block until the next message arrives
    async fn read_message(&mut self) -> Result<Value, IpcError>;
}

/// Unwrap `{"info": ...}` replies
///
/// Returns `None` for `{"info": null}`. Replies without an `info` key are
/// returned as they are.
fn take_info(mut reply: Value) -> Option<Value> {
    match reply.get_mut("info").map(Value::take) {
        Some(Value::Null) => None,
        Some(info) => Some(info),
        None => Some(reply),
    }
}

fn into_list(reply: Value, method: &str) -> Result<Vec<Value>, IpcError> {
    match reply {
        Value::Array(items) => Ok(items),
        _ => Err(IpcError::MissingField {
            field: format!("{} result list", method),
        }),
    }
}

impl WayfireApi for WayfireSocket {
    async fn list_views(&mut self) -> Result<Vec<Value>, IpcError> {
        let reply = self.request(methods::LIST_VIEWS, json!({})).await?;
        into_list(reply, methods::LIST_VIEWS)
    }

    async fn list_outputs(&mut self) -> Result<Vec<Value>, IpcError> {
        let reply = self.request(methods::LIST_OUTPUTS, json!({})).await?;
        into_list(reply, methods::LIST_OUTPUTS)
    }

    async fn list_input_devices(&mut self) -> Result<Vec<Value>, IpcError> {
        let reply = self.request(methods::LIST_INPUT_DEVICES, json!({})).await?;
        into_list(reply, methods::LIST_INPUT_DEVICES)
    }

    async fn get_view(&mut self, id: u64) -> Result<Value, IpcError> {
        let reply = self.request(methods::VIEW_INFO, json!({ "id": id })).await?;
        take_info(reply).ok_or_else(|| IpcError::NotFound {
            what: format!("view {}", id),
        })
    }

    async fn get_output(&mut self, id: u64) -> Result<Value, IpcError> {
        let reply = self.request(methods::OUTPUT_INFO, json!({ "id": id })).await?;
        take_info(reply).ok_or_else(|| IpcError::NotFound {
            what: format!("output {}", id),
        })
    }

    async fn get_focused_view(&mut self) -> Result<Option<Value>, IpcError> {
        let reply = self.request(methods::FOCUSED_VIEW, json!({})).await?;
        Ok(take_info(reply))
    }

    async fn get_focused_output(&mut self) -> Result<Value, IpcError> {
        let reply = self.request(methods::FOCUSED_OUTPUT, json!({})).await?;
        take_info(reply).ok_or_else(|| IpcError::NotFound {
            what: "focused output".to_string(),
        })
    }

    async fn get_option_value(&mut self, option: &str) -> Result<Value, IpcError> {
        self.request(methods::GET_OPTION, json!({ "option": option }))
            .await
    }

    async fn set_option_values(&mut self, options: &Map<String, Value>) -> Result<(), IpcError> {
        self.request(methods::SET_OPTIONS, Value::Object(options.clone()))
            .await?;
        Ok(())
    }

    async fn set_workspace(&mut self, x: u32, y: u32, output_id: u64) -> Result<(), IpcError> {
        self.request(
            methods::SET_WORKSPACE,
            json!({ "x": x, "y": y, "output-id": output_id }),
        )
        .await?;
        Ok(())
    }

    async fn configure_view(&mut self, id: u64, geometry: Geometry) -> Result<(), IpcError> {
        self.request(
            methods::CONFIGURE_VIEW,
            json!({
                "id": id,
                "geometry": {
                    "x": geometry.x,
                    "y": geometry.y,
                    "width": geometry.width,
                    "height": geometry.height,
                },
            }),
        )
        .await?;
        Ok(())
    }

    async fn close_view(&mut self, id: u64) -> Result<(), IpcError> {
        self.request(methods::CLOSE_VIEW, json!({ "id": id })).await?;
        Ok(())
    }

    async fn set_view_minimized(&mut self, id: u64, state: bool) -> Result<(), IpcError> {
        self.request(methods::SET_MINIMIZED, json!({ "view_id": id, "state": state }))
            .await?;
        Ok(())
    }

    async fn set_view_fullscreen(&mut self, id: u64, state: bool) -> Result<(), IpcError> {
        self.request(methods::SET_FULLSCREEN, json!({ "view_id": id, "state": state }))
            .await?;
        Ok(())
    }

    async fn set_view_alpha(&mut self, id: u64, alpha: f64) -> Result<(), IpcError> {
        self.request(methods::SET_VIEW_ALPHA, json!({ "view-id": id, "alpha": alpha }))
            .await?;
        Ok(())
    }

    async fn configure_input_device(&mut self, id: u64, enabled: bool) -> Result<(), IpcError> {
        self.request(methods::CONFIGURE_DEVICE, json!({ "id": id, "enabled": enabled }))
            .await?;
        Ok(())
    }

    async fn watch(&mut self, events: &[String]) -> Result<(), IpcError> {
        let data = if events.is_empty() {
            json!({})
        } else {
            json!({ "events": events })
        };
        self.request(methods::WATCH, data).await?;
        Ok(())
    }

    async fn read_message(&mut self) -> Result<Value, IpcError> {
        WayfireSocket::read_message(self).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::UnixStream;

    /// Serve one request with `reply`, returning the request that was received
    async fn serve_once(mut server: UnixStream, reply: Value) -> Value {
        let mut header = [0u8; 4];
        server.read_exact(&mut header).await.unwrap();
        let mut body = vec![0u8; u32::from_le_bytes(header) as usize];
        server.read_exact(&mut body).await.unwrap();

        let reply = serde_json::to_vec(&reply).unwrap();
        server
            .write_all(&(reply.len() as u32).to_le_bytes())
            .await
            .unwrap();
        server.write_all(&reply).await.unwrap();

        serde_json::from_slice(&body).unwrap()
    }

    #[test]
    fn test_take_info() {
        assert_eq!(take_info(json!({"info": {"id": 3}})), Some(json!({"id": 3})));
        assert_eq!(take_info(json!({"info": null})), None);
        assert_eq!(take_info(json!({"id": 4})), Some(json!({"id": 4})));
    }

    #[tokio::test]
    async fn test_get_view_unwraps_info() {
        let (client_end, server_end) = UnixStream::pair().unwrap();
        let server = tokio::spawn(serve_once(
            server_end,
            json!({"result": "ok", "info": {"id": 5, "title": "foot"}}),
        ));

        let mut socket = WayfireSocket::from_stream(client_end);
        let view = socket.get_view(5).await.unwrap();
        let request = server.await.unwrap();

        assert_eq!(request["method"], methods::VIEW_INFO);
        assert_eq!(request["data"]["id"], 5);
        assert_eq!(view["title"], "foot");
    }

    #[tokio::test]
    async fn test_configure_view_payload() {
        let (client_end, server_end) = UnixStream::pair().unwrap();
        let server = tokio::spawn(serve_once(server_end, json!({"result": "ok"})));

        let mut socket = WayfireSocket::from_stream(client_end);
        socket
            .configure_view(
                7,
                Geometry {
                    x: 50,
                    y: 60,
                    width: 800,
                    height: 600,
                },
            )
            .await
            .unwrap();
        let request = server.await.unwrap();

        assert_eq!(
            request["data"],
            json!({"id": 7, "geometry": {"x": 50, "y": 60, "width": 800, "height": 600}})
        );
    }

    #[tokio::test]
    async fn test_watch_with_event_filter() {
        let (client_end, server_end) = UnixStream::pair().unwrap();
        let server = tokio::spawn(serve_once(server_end, json!({"result": "ok"})));

        let mut socket = WayfireSocket::from_stream(client_end);
        socket
            .watch(&["view-focused".to_string()])
            .await
            .unwrap();
        let request = server.await.unwrap();

        assert_eq!(request["method"], methods::WATCH);
        assert_eq!(request["data"], json!({"events": ["view-focused"]}));
    }

    #[tokio::test]
    async fn test_list_views_rejects_non_list_reply() {
        let (client_end, server_end) = UnixStream::pair().unwrap();
        tokio::spawn(serve_once(server_end, json!({"result": "ok"})));

        let mut socket = WayfireSocket::from_stream(client_end);
        assert!(matches!(
            socket.list_views().await,
            Err(IpcError::MissingField { .. })
        ));
    }
}
