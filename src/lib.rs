//! Procedural dungeon layouts on a tile grid.
//!
//! One call turns a handful of shape and style parameters into a fully
//! connected, tile-addressable layout: rooms, corridors, doors, and a
//! geometrically exact set of wall line-segments for a downstream vision or
//! collision system. The pipeline stamps a carvable envelope, places rooms,
//! routes corridors over a Kruskal spanning tree (optionally with loops),
//! erodes dead ends, carves boundary exits, classifies chokepoint doors,
//! and finally derives offset wall geometry from the floor boundary.
//!
//! ```no_run
//! use grid_dungeon::{build_walls, generate, GeneratorOptions, WallConfig};
//!
//! let options = GeneratorOptions { seed: Some(7), ..Default::default() };
//! let grid = generate(80, 60, &options)?;
//! let walls = build_walls(&grid, &WallConfig::default());
//! # Ok::<(), grid_dungeon::GenError>(())
//! ```

pub mod constants;
pub mod doors;
pub mod error;
pub mod exits;
pub mod generator;
pub mod grid;
pub mod mask;
pub mod options;
pub mod pathfinding;
pub mod prune;
pub mod rng;
pub mod rooms;
pub mod router;
pub mod walls;

pub use doors::{Door, DoorOrientation};
pub use error::GenError;
pub use generator::{generate, generate_from_outline};
pub use grid::{CellKind, Grid, Rect};
pub use options::{
    ConnectivityStrategy, CorridorStyle, DeadEndPolicy, GeneratorOptions, MaskShape,
    PlacementStrategy,
};
pub use rooms::{Outline, OutlineRoom, Room};
pub use walls::{build_walls, WallConfig, WallKind, WallSegment};
