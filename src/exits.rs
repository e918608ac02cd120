//! Boundary exits: up to four corridors carved from the grid edge inward.
//!
//! Each cardinal direction raycasts from its boundary midpoint to the first
//! floor cell; a miss (ray crosses the whole grid without a hit) skips that
//! direction. No shortness or non-overlap guarantee is made.

use crate::grid::{CellKind, Grid};
use crate::pathfinding::bresenham_line;

/// Carve an edge-reaching corridor per cardinal direction where possible.
pub fn carve_exits(grid: &mut Grid) {
    let rays = [
        (grid.width / 2, 0, 0, 1),              // north edge, casting south
        (grid.width / 2, grid.height - 1, 0, -1), // south edge, casting north
        (0, grid.height / 2, 1, 0),             // west edge, casting east
        (grid.width - 1, grid.height / 2, -1, 0), // east edge, casting west
    ];

    let mut carved = 0;
    for (sx, sy, dx, dy) in rays {
        if let Some((hx, hy)) = raycast_to_floor(grid, sx, sy, dx, dy) {
            for (x, y) in bresenham_line(sx, sy, hx, hy) {
                grid.set_cell(x, y, CellKind::Floor);
            }
            carved += 1;
        }
    }
    log::debug!("carved {carved} boundary exits");
}

fn raycast_to_floor(grid: &Grid, sx: i32, sy: i32, dx: i32, dy: i32) -> Option<(i32, i32)> {
    let (mut x, mut y) = (sx, sy);
    while x >= 0 && y >= 0 && x < grid.width && y < grid.height {
        if grid.is_floor(x, y) {
            return Some((x, y));
        }
        x += dx;
        y += dy;
    }
    None
}
