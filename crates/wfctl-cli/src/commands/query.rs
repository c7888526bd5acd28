//! Read-only queries: listings, single views, focus and search

use serde_json::Value;
use tracing::debug;
use wfctl_ipc::{view_id, WayfireApi, WorkspaceGrid};

use crate::error::CommandError;
use crate::output::Outcome;
use crate::commands::workspace::current_workspace;

pub async fn list_views<C: WayfireApi>(client: &mut C) -> Result<Outcome, CommandError> {
    Ok(Outcome::json(Value::Array(client.list_views().await?)))
}

pub async fn list_outputs<C: WayfireApi>(client: &mut C) -> Result<Outcome, CommandError> {
    Ok(Outcome::json(Value::Array(client.list_outputs().await?)))
}

pub async fn list_inputs<C: WayfireApi>(client: &mut C) -> Result<Outcome, CommandError> {
    Ok(Outcome::json(Value::Array(client.list_input_devices().await?)))
}

/// The whole view, or just `field` when the view has it at top level
pub async fn get_view<C: WayfireApi>(
    client: &mut C,
    id: u64,
    field: Option<&str>,
) -> Result<Outcome, CommandError> {
    let mut view = client.get_view(id).await?;

    if let Some(value) = field.and_then(|name| view.get_mut(name)) {
        return Ok(Outcome::json(value.take()));
    }
    if let Some(name) = field {
        debug!("View {} has no field '{}', printing the whole view", id, name);
    }
    Ok(Outcome::json(view))
}

pub async fn get_focused<C: WayfireApi>(
    client: &mut C,
    target: &str,
) -> Result<Outcome, CommandError> {
    match target {
        "view" => client
            .get_focused_view()
            .await?
            .map(Outcome::json)
            .ok_or_else(|| CommandError::NotFound {
                what: "focused view".to_string(),
            }),
        "workspace" => {
            let output = client.get_focused_output().await?;
            let grid = WorkspaceGrid::from_output(&output)?;
            let number = current_workspace(&grid)?;
            Ok(Outcome::text(number.to_string()))
        }
        _ => Ok(Outcome::json(client.get_focused_output().await?)),
    }
}

/// A search term; integers compare numerically
#[derive(Debug, Clone, PartialEq)]
pub enum SearchValue {
    Int(i64),
    Text(String),
}

impl SearchValue {
    /// `-?[0-9]+` is an integer, everything else is text
    pub fn parse(token: &str) -> Self {
        let digits = token.strip_prefix('-').unwrap_or(token);
        let is_int = !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit());

        match token.parse::<i64>() {
            Ok(n) if is_int => Self::Int(n),
            _ => Self::Text(token.to_string()),
        }
    }

    /// Field comparison used when a key is given
    fn equals(&self, candidate: &Value) -> bool {
        match (self, candidate) {
            (Self::Int(n), Value::Number(m)) => m.as_i64() == Some(*n),
            (Self::Int(n), Value::String(s)) => *s == n.to_string(),
            (Self::Text(t), Value::String(s)) => s == t,
            (Self::Text(t), other) => !other.is_null() && other.to_string() == *t,
            _ => false,
        }
    }

    /// Looser comparison used when scanning every field
    fn found_in(&self, candidate: &Value) -> bool {
        match (self, candidate) {
            (Self::Int(n), Value::String(s)) => s.contains(&n.to_string()),
            (Self::Text(t), Value::String(s)) => s.contains(t.as_str()),
            _ => self.equals(candidate),
        }
    }
}

/// Whether `view` matches `query`, in `key` only or anywhere
///
/// Without a key, top-level values and the values of directly nested objects
/// are scanned.
pub fn view_matches(view: &Value, query: &SearchValue, key: Option<&str>) -> bool {
    if let Some(key) = key {
        return view.get(key).is_some_and(|value| query.equals(value));
    }

    let Some(fields) = view.as_object() else {
        return false;
    };
    fields.values().any(|value| match value {
        Value::Object(inner) => inner.values().any(|v| query.found_in(v)),
        other => query.found_in(other),
    })
}

pub async fn search_views<C: WayfireApi>(
    client: &mut C,
    value: &str,
    key: Option<&str>,
) -> Result<Outcome, CommandError> {
    let query = SearchValue::parse(value);
    let focused = client.get_focused_view().await?.as_ref().and_then(view_id);
    debug!(?query, ?key, ?focused, "Searching views");

    let matches: Vec<Value> = client
        .list_views()
        .await?
        .into_iter()
        .filter(|view| focused.is_none() || view_id(view) != focused)
        .filter(|view| view_matches(view, &query, key))
        .collect();

    Ok(Outcome::json(Value::Array(matches)))
}
