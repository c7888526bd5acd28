//! Configuration options

use serde_json::{Map, Value};
use tracing::{debug, warn};
use wfctl_ipc::WayfireApi;

use crate::error::CommandError;
use crate::output::Outcome;

/// Split `key:value` tokens on their first colon
///
/// Returns the well-formed pairs and one message per malformed token. Keys
/// must be non-empty; values may be empty.
pub fn parse_option_pairs(tokens: &[String]) -> (Map<String, Value>, Vec<String>) {
    let mut pairs = Map::new();
    let mut problems = Vec::new();

    for token in tokens {
        match token.split_once(':') {
            Some((key, value)) if !key.is_empty() => {
                pairs.insert(key.to_string(), Value::String(value.to_string()));
            }
            _ => {
                warn!("Skipping malformed option '{}'", token);
                problems.push(format!("Malformed option '{}': expected key:value", token));
            }
        }
    }

    (pairs, problems)
}

/// Value of `name`; the whole reply when it has no `value` field
pub async fn get_option<C: WayfireApi>(client: &mut C, name: &str) -> Result<Outcome, CommandError> {
    let mut reply = client.get_option_value(name).await?;

    let value = match reply.get_mut("value").map(Value::take) {
        Some(value) => value,
        None => reply,
    };
    Ok(Outcome::json(value))
}

/// Apply every well-formed pair as one batch
pub async fn set_options<C: WayfireApi>(
    client: &mut C,
    tokens: &[String],
) -> Result<Outcome, CommandError> {
    let (pairs, problems) = parse_option_pairs(tokens);

    if pairs.is_empty() {
        return Ok(Outcome::none().with_problems(problems));
    }

    debug!(count = pairs.len(), "Setting options");
    client.set_option_values(&pairs).await?;
    Ok(Outcome::json(Value::Object(pairs)).with_problems(problems))
}

/// Turn an output on (`auto` mode) or off
pub async fn set_output<C: WayfireApi>(
    client: &mut C,
    name: &str,
    on: bool,
) -> Result<Outcome, CommandError> {
    let mut options = Map::new();
    options.insert(
        format!("output:{}/mode", name),
        Value::String(if on { "auto" } else { "off" }.to_string()),
    );

    client.set_option_values(&options).await?;
    Ok(Outcome::none())
}
