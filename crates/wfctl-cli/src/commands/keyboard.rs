//! XKB keyboard settings

use serde_json::{Map, Value};
use tracing::warn;
use wfctl_ipc::WayfireApi;

use crate::error::CommandError;
use crate::output::Outcome;

/// Short setting name and the option it maps to
const XKB_SETTINGS: [(&str, &str); 4] = [
    ("layout", "input/xkb_layout"),
    ("variant", "input/xkb_variant"),
    ("model", "input/xkb_model"),
    ("options", "input/xkb_options"),
];

fn option_for(setting: &str) -> Option<&'static str> {
    XKB_SETTINGS
        .iter()
        .find(|(name, _)| *name == setting)
        .map(|(_, option)| *option)
}

pub async fn get_keyboard<C: WayfireApi>(client: &mut C) -> Result<Outcome, CommandError> {
    let mut xkb = Map::new();
    for (name, option) in XKB_SETTINGS {
        let reply = client.get_option_value(option).await?;
        xkb.insert(
            name.to_string(),
            reply.get("value").cloned().unwrap_or(Value::Null),
        );
    }
    Ok(Outcome::json(Value::Object(xkb)))
}

/// Apply `layout:`, `variant:`, `model:` and `options:` tokens in one batch
pub async fn set_keyboard<C: WayfireApi>(
    client: &mut C,
    tokens: &[String],
) -> Result<Outcome, CommandError> {
    let mut options = Map::new();
    let mut problems = Vec::new();

    for token in tokens {
        let parsed = token
            .split_once(':')
            .and_then(|(setting, value)| option_for(setting).map(|option| (option, value)));

        match parsed {
            Some((option, value)) => {
                options.insert(option.to_string(), Value::String(value.to_string()));
            }
            None => {
                warn!("Skipping keyboard setting '{}'", token);
                problems.push(format!(
                    "Unknown keyboard setting '{}': expected layout:, variant:, model: or options:",
                    token
                ));
            }
        }
    }

    if options.is_empty() {
        return Ok(Outcome::none().with_problems(problems));
    }

    client.set_option_values(&options).await?;
    Ok(Outcome::json(Value::Object(options)).with_problems(problems))
}
