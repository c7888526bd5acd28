//! View manipulation

use tracing::debug;
use wfctl_ipc::{Geometry, IpcError, WayfireApi};

use crate::error::CommandError;
use crate::output::Outcome;

async fn base_geometry<C: WayfireApi>(client: &mut C, id: u64) -> Result<Geometry, CommandError> {
    let view = client.get_view(id).await?;
    Ok(Geometry::from_field(&view, "base-geometry")?)
}

/// Move a view to `(x, y)`, keeping its current size
pub async fn move_view<C: WayfireApi>(
    client: &mut C,
    id: u64,
    x: i64,
    y: i64,
) -> Result<Outcome, CommandError> {
    let current = base_geometry(client, id).await?;
    let target = Geometry { x, y, ..current };
    debug!(id, ?current, ?target, "Moving view");

    client.configure_view(id, target).await?;
    Ok(Outcome::none())
}

/// Resize a view, keeping its current position
pub async fn resize_view<C: WayfireApi>(
    client: &mut C,
    id: u64,
    width: i64,
    height: i64,
) -> Result<Outcome, CommandError> {
    let current = base_geometry(client, id).await?;
    let target = Geometry {
        width,
        height,
        ..current
    };
    debug!(id, ?current, ?target, "Resizing view");

    client.configure_view(id, target).await?;
    Ok(Outcome::none())
}

pub async fn close_view<C: WayfireApi>(client: &mut C, id: u64) -> Result<Outcome, CommandError> {
    client.close_view(id).await?;
    Ok(Outcome::none())
}

pub async fn minimize_view<C: WayfireApi>(
    client: &mut C,
    id: u64,
    state: bool,
) -> Result<Outcome, CommandError> {
    client.set_view_minimized(id, state).await?;
    Ok(Outcome::none())
}

/// Fit a view to the work area of the output it is on
pub async fn maximize_view<C: WayfireApi>(client: &mut C, id: u64) -> Result<Outcome, CommandError> {
    let view = client.get_view(id).await?;
    let output_id = view
        .get("output-id")
        .and_then(|v| v.as_u64())
        .ok_or_else(|| IpcError::MissingField {
            field: "output-id".to_string(),
        })?;

    let output = client.get_output(output_id).await?;
    let workarea = Geometry::from_field(&output, "workarea")?;
    debug!(id, output_id, ?workarea, "Maximizing view");

    client.configure_view(id, workarea).await?;
    Ok(Outcome::none())
}

pub async fn fullscreen_view<C: WayfireApi>(
    client: &mut C,
    id: u64,
    state: bool,
) -> Result<Outcome, CommandError> {
    client.set_view_fullscreen(id, state).await?;
    Ok(Outcome::none())
}

pub async fn set_view_alpha<C: WayfireApi>(
    client: &mut C,
    id: u64,
    alpha: f64,
) -> Result<Outcome, CommandError> {
    if !(0.0..=1.0).contains(&alpha) {
        return Err(CommandError::invalid(
            "alpha",
            &alpha.to_string(),
            "a number between 0 and 1",
        ));
    }

    client.set_view_alpha(id, alpha).await?;
    Ok(Outcome::none())
}
