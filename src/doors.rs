//! Door placement at corridor chokepoints.
//!
//! A candidate is a floor cell with exactly two opposite floor neighbors,
//! the narrowest possible passage. Candidates only become doors where a
//! room sits on at least one open side, with a spacing rule keeping doors
//! from clustering and a density roll thinning them out.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::grid::Grid;

/// Which movement axis a door blocks when shut.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DoorOrientation {
    /// Blocks east/west movement; the passage runs horizontally
    Vertical,
    /// Blocks north/south movement; the passage runs vertically
    Horizontal,
}

/// A placed door. Created only by the door placer, never moved afterward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Door {
    pub id: u32,
    pub x: i32,
    pub y: i32,
    pub orientation: DoorOrientation,
}

/// Scan interior floor cells for chokepoints and register doors.
pub fn place_doors(grid: &mut Grid, density: f32, rng: &mut impl Rng) {
    let mut doors: Vec<Door> = Vec::new();

    for y in 1..grid.height - 1 {
        for x in 1..grid.width - 1 {
            let Some(orientation) = chokepoint_orientation(grid, x, y) else {
                continue;
            };
            if grid.rooms.iter().any(|r| r.rect.contains(x, y)) {
                continue;
            }
            if !adjoins_room(grid, x, y, orientation) {
                continue;
            }
            if doors
                .iter()
                .any(|d| (d.x - x).abs() + (d.y - y).abs() <= 1)
            {
                continue;
            }
            if rng.gen::<f32>() > density {
                continue;
            }
            doors.push(Door {
                id: doors.len() as u32,
                x,
                y,
                orientation,
            });
        }
    }

    log::debug!("placed {} doors", doors.len());
    grid.doors = doors;
}

/// The chokepoint patterns: floor on east+west only, or north+south only.
fn chokepoint_orientation(grid: &Grid, x: i32, y: i32) -> Option<DoorOrientation> {
    if !grid.is_floor(x, y) {
        return None;
    }
    let east = grid.is_floor(x + 1, y);
    let west = grid.is_floor(x - 1, y);
    let north = grid.is_floor(x, y - 1);
    let south = grid.is_floor(x, y + 1);

    if east && west && !north && !south {
        Some(DoorOrientation::Vertical)
    } else if north && south && !east && !west {
        Some(DoorOrientation::Horizontal)
    } else {
        None
    }
}

/// A door must open into a room: one of the cells along its passage axis
/// lies inside a room rectangle.
fn adjoins_room(grid: &Grid, x: i32, y: i32, orientation: DoorOrientation) -> bool {
    let (a, b) = match orientation {
        DoorOrientation::Vertical => ((x - 1, y), (x + 1, y)),
        DoorOrientation::Horizontal => ((x, y - 1), (x, y + 1)),
    };
    grid.rooms
        .iter()
        .any(|r| r.rect.contains(a.0, a.1) || r.rect.contains(b.0, b.1))
}
