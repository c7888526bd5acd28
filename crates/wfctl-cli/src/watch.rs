//! Event monitoring

use std::io::Write;

use tracing::{debug, info};
use wfctl_ipc::{event_name, WayfireApi};

use crate::error::CommandError;
use crate::output::{render_value, OutputMode};

/// Subscribe to `events` (all events when empty) and print every message
///
/// Each message is written as one line of compact JSON, or as a table when
/// `mode` asks for one. Only returns on failure; a dropped connection is
/// reported as an error.
pub async fn watch_events<C: WayfireApi, W: Write>(
    client: &mut C,
    events: &[String],
    mode: OutputMode,
    out: &mut W,
) -> Result<(), CommandError> {
    client.watch(events).await?;
    info!(?events, "Watching compositor events");

    loop {
        let message = client.read_message().await?;
        debug!(event = ?event_name(&message), "Received event");

        let text = match mode {
            OutputMode::Json => serde_json::to_string(&message)?,
            OutputMode::Table(_) => render_value(&message, mode)?,
        };
        writeln!(out, "{}", text)?;
        out.flush()?;
    }
}
