//! Input device lookup

use serde_json::Value;
use tracing::warn;
use wfctl_ipc::{InputDevice, IpcError, WayfireApi};

/// First device named by `query` (name, decimal id or type), in list order
pub fn match_device<'a>(devices: &'a [InputDevice], query: &str) -> Option<&'a InputDevice> {
    devices.iter().find(|device| device.matches(query))
}

/// Records that do not look like devices are skipped with a warning
fn parse_devices(records: &[Value]) -> Vec<InputDevice> {
    records
        .iter()
        .filter_map(|record| match InputDevice::from_value(record) {
            Ok(device) => Some(device),
            Err(e) => {
                warn!("Skipping malformed input device record: {}", e);
                None
            }
        })
        .collect()
}

/// Resolve a device name, id or type to its numeric id
///
/// Fetches the device list fresh (one round-trip) on every call. Returns
/// `Ok(None)` when no device matches.
pub async fn find_device_id<C: WayfireApi>(
    client: &mut C,
    query: &str,
) -> Result<Option<u64>, IpcError> {
    let devices = parse_devices(&client.list_input_devices().await?);
    Ok(match_device(&devices, query).map(|device| device.id))
}
