//! Workspace grid arithmetic
//!
//! Workspaces are numbered from 1 in row-major order across a grid that is
//! `grid_width` columns wide. Grid coordinates are 0-based.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Coordinates {
    pub x: u32,
    pub y: u32,
}

/// Grid position of workspace `number`
///
/// Returns `None` for `number == 0` or `grid_width == 0`.
pub fn workspace_to_coordinates(number: u32, grid_width: u32) -> Option<Coordinates> {
    if number == 0 || grid_width == 0 {
        return None;
    }
    let index = number - 1;
    Some(Coordinates {
        x: index % grid_width,
        y: index / grid_width,
    })
}

/// Workspace number of the grid position `(x, y)`; `None` on overflow
pub fn coordinates_to_workspace(x: u32, y: u32, grid_width: u32) -> Option<u32> {
    y.checked_mul(grid_width)?.checked_add(x)?.checked_add(1)
}

/// Number of workspaces in the grid; `None` on overflow
pub fn grid_size(grid_width: u32, grid_height: u32) -> Option<u32> {
    grid_width.checked_mul(grid_height)
}

/// The workspace after `current`, wrapping back to 1 after `total`
pub fn next_workspace(current: u32, total: u32) -> u32 {
    if total == 0 {
        return 1;
    }
    current % total + 1
}
