//! Input device configuration

use tracing::debug;
use wfctl_ipc::WayfireApi;

use crate::devices::find_device_id;
use crate::error::CommandError;
use crate::output::Outcome;

/// Enable or disable the device named by `query` (name, id or type)
pub async fn configure_device<C: WayfireApi>(
    client: &mut C,
    query: &str,
    enabled: bool,
) -> Result<Outcome, CommandError> {
    let id = find_device_id(client, query)
        .await?
        .ok_or_else(|| CommandError::NotFound {
            what: format!("Input device '{}'", query),
        })?;
    debug!(query, id, enabled, "Configuring input device");

    client.configure_input_device(id, enabled).await?;

    let state = if enabled { "enabled" } else { "disabled" };
    Ok(Outcome::text(format!("device {} {}", id, state)))
}
