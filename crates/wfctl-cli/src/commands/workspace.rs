//! Workspace switching on the focused output

use tracing::debug;
use wfctl_ipc::{view_id, IpcError, WayfireApi, WorkspaceGrid};

use crate::error::CommandError;
use crate::output::Outcome;
use crate::workspace::{coordinates_to_workspace, grid_size, next_workspace, workspace_to_coordinates};

fn out_of_range(field: &str) -> IpcError {
    IpcError::OutOfRange {
        field: field.to_string(),
    }
}

/// Number of the workspace the grid is currently showing
pub fn current_workspace(grid: &WorkspaceGrid) -> Result<u32, IpcError> {
    coordinates_to_workspace(grid.x, grid.y, grid.grid_width)
        .ok_or_else(|| out_of_range("workspace"))
}

fn total_workspaces(grid: &WorkspaceGrid) -> Result<u32, IpcError> {
    grid_size(grid.grid_width, grid.grid_height).ok_or_else(|| out_of_range("workspace.grid_height"))
}

async fn focused_grid<C: WayfireApi>(client: &mut C) -> Result<(u64, WorkspaceGrid), CommandError> {
    let output = client.get_focused_output().await?;
    let output_id = view_id(&output).ok_or_else(|| IpcError::MissingField {
        field: "id".to_string(),
    })?;
    let grid = WorkspaceGrid::from_output(&output)?;
    if grid.grid_width == 0 {
        return Err(IpcError::MissingField {
            field: "workspace.grid_width".to_string(),
        }
        .into());
    }
    Ok((output_id, grid))
}

async fn go_to<C: WayfireApi>(
    client: &mut C,
    output_id: u64,
    grid: &WorkspaceGrid,
    number: u32,
) -> Result<Outcome, CommandError> {
    let total = total_workspaces(grid)?;
    let coordinates = workspace_to_coordinates(number, grid.grid_width)
        .filter(|_| grid.grid_height == 0 || number <= total)
        .ok_or_else(|| {
            CommandError::invalid(
                "workspace number",
                &number.to_string(),
                format!("a number from 1 to {}", total),
            )
        })?;
    debug!(number, ?coordinates, output_id, "Switching workspace");

    client
        .set_workspace(coordinates.x, coordinates.y, output_id)
        .await?;
    Ok(Outcome::none())
}

pub async fn switch_workspace<C: WayfireApi>(
    client: &mut C,
    number: u64,
) -> Result<Outcome, CommandError> {
    let (output_id, grid) = focused_grid(client).await?;
    let number = u32::try_from(number).map_err(|_| {
        CommandError::invalid("workspace number", &number.to_string(), "a smaller number")
    })?;
    go_to(client, output_id, &grid, number).await
}

pub async fn next<C: WayfireApi>(client: &mut C) -> Result<Outcome, CommandError> {
    let (output_id, grid) = focused_grid(client).await?;
    let current = current_workspace(&grid)?;
    let number = next_workspace(current, total_workspaces(&grid)?);
    go_to(client, output_id, &grid, number).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{output, Call, MockWayfire};

    #[tokio::test]
    async fn test_switch_uses_focused_grid_width() {
        let mut client = MockWayfire::new()
            .with_output(output(2, 3, 3, 0, 0))
            .focus_output(2);

        switch_workspace(&mut client, 5).await.unwrap();
        assert_eq!(
            client.mutations(),
            vec![Call::SetWorkspace {
                x: 1,
                y: 1,
                output_id: 2
            }]
        );
    }

    #[tokio::test]
    async fn test_switch_beyond_grid_rejected() {
        let mut client = MockWayfire::new()
            .with_output(output(1, 2, 2, 0, 0))
            .focus_output(1);

        let err = switch_workspace(&mut client, 5).await.unwrap_err();
        assert!(matches!(err, CommandError::InvalidArgument { .. }));
        assert!(client.mutations().is_empty());
    }

    #[tokio::test]
    async fn test_next_wraps_to_first() {
        let mut client = MockWayfire::new()
            .with_output(output(1, 3, 2, 2, 1))
            .focus_output(1);

        next(&mut client).await.unwrap();
        assert_eq!(
            client.mutations(),
            vec![Call::SetWorkspace {
                x: 0,
                y: 0,
                output_id: 1
            }]
        );
    }

    #[tokio::test]
    async fn test_next_moves_along_row() {
        let mut client = MockWayfire::new()
            .with_output(output(1, 3, 3, 0, 1))
            .focus_output(1);

        next(&mut client).await.unwrap();
        assert_eq!(
            client.mutations(),
            vec![Call::SetWorkspace {
                x: 1,
                y: 1,
                output_id: 1
            }]
        );
    }

    #[tokio::test]
    async fn test_zero_grid_width_is_reported() {
        let mut client = MockWayfire::new()
            .with_output(output(1, 0, 3, 0, 0))
            .focus_output(1);

        assert!(matches!(
            switch_workspace(&mut client, 1).await,
            Err(CommandError::Ipc(IpcError::MissingField { .. }))
        ));
    }

    #[tokio::test]
    async fn test_oversized_grid_is_reported() {
        let mut client = MockWayfire::new()
            .with_output(output(1, u32::MAX, 2, 0, 0))
            .focus_output(1);

        let err = switch_workspace(&mut client, 1).await.unwrap_err();
        assert!(matches!(err, CommandError::Ipc(IpcError::OutOfRange { .. })));

        let err = next(&mut client).await.unwrap_err();
        assert!(matches!(err, CommandError::Ipc(IpcError::OutOfRange { .. })));
        assert!(client.mutations().is_empty());
    }

    #[tokio::test]
    async fn test_position_beyond_u32_is_reported() {
        let mut client = MockWayfire::new()
            .with_output(output(1, 3, 3, 0, u32::MAX))
            .focus_output(1);

        let err = next(&mut client).await.unwrap_err();
        assert!(matches!(err, CommandError::Ipc(IpcError::OutOfRange { .. })));
        assert!(client.mutations().is_empty());
    }
}
