//! Pipeline orchestration.
//!
//! The stages form a strict sequence over one owned grid: envelope, rooms,
//! corridors, pruning, exits, doors, and finally the wall-band sweep. Each
//! stage commits its mutation before the next reads, so reordering is never
//! valid. The outline entry point swaps the room stage for adoption of
//! caller-supplied rectangles and otherwise runs the same tail.

use crate::doors;
use crate::error::GenError;
use crate::exits;
use crate::grid::{CellKind, Grid};
use crate::mask;
use crate::options::GeneratorOptions;
use crate::prune;
use crate::rng::{PhaseRng, PHASE_DOORS, PHASE_MASK, PHASE_PRUNE, PHASE_ROOMS, PHASE_ROUTER};
use crate::rooms::{self, Outline};
use crate::router;

/// Run the full randomized pipeline.
pub fn generate(width: i32, height: i32, options: &GeneratorOptions) -> Result<Grid, GenError> {
    validate_dims(width, height)?;
    let phases = PhaseRng::new(options.seed);

    let mut grid = Grid::new(width, height);
    mask::build_mask(&mut grid, options.mask, &mut phases.for_phase(PHASE_MASK));
    rooms::place_rooms(&mut grid, options, &mut phases.for_phase(PHASE_ROOMS));
    finish_pipeline(&mut grid, options, &phases, false, &[]);
    Ok(grid)
}

/// Run the pipeline with caller-supplied room rectangles. Rooms failing
/// validation are dropped; when none survive, this transparently falls back
/// to the random pipeline.
pub fn generate_from_outline(
    width: i32,
    height: i32,
    options: &GeneratorOptions,
    outline: &Outline,
) -> Result<Grid, GenError> {
    validate_dims(width, height)?;
    let phases = PhaseRng::new(options.seed);

    let mut grid = Grid::new(width, height);
    mask::build_mask(&mut grid, options.mask, &mut phases.for_phase(PHASE_MASK));

    let adopted = rooms::adopt_outline(&mut grid, outline)?;
    if adopted == 0 {
        log::warn!("no outline room survived validation, using random placement");
        return generate(width, height, options);
    }

    finish_pipeline(&mut grid, options, &phases, true, &outline.connections);
    Ok(grid)
}

/// Stages 4 onward, shared by both entry points.
fn finish_pipeline(
    grid: &mut Grid,
    options: &GeneratorOptions,
    phases: &PhaseRng,
    outline_mode: bool,
    explicit: &[(u32, u32)],
) {
    router::connect_rooms(
        grid,
        options,
        &mut phases.for_phase(PHASE_ROUTER),
        outline_mode,
        explicit,
    );
    prune::prune_dead_ends(grid, options.dead_ends, &mut phases.for_phase(PHASE_PRUNE));
    if options.peripheral_exits {
        exits::carve_exits(grid);
    }
    doors::place_doors(grid, options.door_density, &mut phases.for_phase(PHASE_DOORS));
    mark_wall_band(grid);

    log::info!(
        "generated {}x{} layout: {} rooms, {} doors, {} floor cells",
        grid.width,
        grid.height,
        grid.rooms.len(),
        grid.doors.len(),
        grid.floor_count()
    );
}

fn validate_dims(width: i32, height: i32) -> Result<(), GenError> {
    if width <= 0 || height <= 0 {
        return Err(GenError::InvalidDimensions { width, height });
    }
    Ok(())
}

/// Reclassify every empty cell touching floor (8-neighborhood) as wall band,
/// giving renderers the decorative perimeter and the wall outset somewhere
/// to land.
fn mark_wall_band(grid: &mut Grid) {
    let mut band = Vec::new();
    for y in 0..grid.height {
        for x in 0..grid.width {
            if grid.cell(x, y) != CellKind::Empty {
                continue;
            }
            'scan: for dy in -1..=1 {
                for dx in -1..=1 {
                    if (dx != 0 || dy != 0) && grid.is_floor(x + dx, y + dy) {
                        band.push((x, y));
                        break 'scan;
                    }
                }
            }
        }
    }
    for (x, y) in band {
        grid.set_cell(x, y, CellKind::WallBand);
    }
}
