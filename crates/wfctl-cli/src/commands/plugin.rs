//! Enabling and disabling plugins through `core/plugins`

use serde_json::{Map, Value};
use tracing::debug;
use wfctl_ipc::{IpcError, WayfireApi};

use crate::error::CommandError;
use crate::output::Outcome;

const PLUGINS_OPTION: &str = "core/plugins";

/// Current plugin names; a reply without a string `value` is an error
async fn plugin_list<C: WayfireApi>(client: &mut C) -> Result<Vec<String>, CommandError> {
    let reply = client.get_option_value(PLUGINS_OPTION).await?;
    let list = reply
        .get("value")
        .and_then(Value::as_str)
        .ok_or_else(|| IpcError::MissingField {
            field: format!("{} value", PLUGINS_OPTION),
        })?;
    Ok(list.split_whitespace().map(str::to_string).collect())
}

async fn store<C: WayfireApi>(client: &mut C, plugins: &[String]) -> Result<(), CommandError> {
    let mut options = Map::new();
    options.insert(PLUGINS_OPTION.to_string(), Value::String(plugins.join(" ")));
    client.set_option_values(&options).await?;
    Ok(())
}

pub async fn enable_plugin<C: WayfireApi>(
    client: &mut C,
    name: &str,
) -> Result<Outcome, CommandError> {
    let mut plugins = plugin_list(client).await?;
    if plugins.iter().any(|p| p == name) {
        return Ok(Outcome::text(format!("plugin {} already enabled", name)));
    }

    plugins.push(name.to_string());
    debug!(name, "Enabling plugin");
    store(client, &plugins).await?;
    Ok(Outcome::text(format!("plugin {} enabled", name)))
}

pub async fn disable_plugin<C: WayfireApi>(
    client: &mut C,
    name: &str,
) -> Result<Outcome, CommandError> {
    let plugins = plugin_list(client).await?;
    if !plugins.iter().any(|p| p == name) {
        return Ok(Outcome::text(format!("plugin {} already disabled", name)));
    }

    let remaining: Vec<String> = plugins.into_iter().filter(|p| p != name).collect();
    debug!(name, "Disabling plugin");
    store(client, &remaining).await?;
    Ok(Outcome::text(format!("plugin {} disabled", name)))
}

pub async fn status_plugin<C: WayfireApi>(
    client: &mut C,
    name: &str,
) -> Result<Outcome, CommandError> {
    let enabled = plugin_list(client).await?.iter().any(|p| p == name);
    Ok(Outcome::text(if enabled {
        "plugin enabled"
    } else {
        "plugin disabled"
    }))
}
