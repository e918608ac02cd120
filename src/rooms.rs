//! Room allocation inside the masked envelope.
//!
//! Three strategies produce non-overlapping rectangles: rejection sampling,
//! scatter-then-relax, and mirrored symmetric placement. Shortfall against
//! the budget is silent; zero rooms on a degenerate mask is a valid outcome
//! every later stage tolerates.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::error::GenError;
use crate::grid::{CellKind, Grid, Rect};
use crate::options::{GeneratorOptions, PlacementStrategy};

/// A placed room: its rectangle, the rooms it is connected to (populated by
/// the router), and a free-form label external theming collaborators may
/// attach. The label is opaque to generation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Room {
    pub id: u32,
    pub rect: Rect,
    pub connections: Vec<u32>,
    pub label: Option<String>,
}

impl Room {
    pub fn new(id: u32, rect: Rect) -> Self {
        Self {
            id,
            rect,
            connections: Vec::new(),
            label: None,
        }
    }
}

/// Externally authored room rectangles with optional explicit connections,
/// for the outline-driven entry point.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Outline {
    pub rooms: Vec<OutlineRoom>,
    #[serde(default)]
    pub connections: Vec<(u32, u32)>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct OutlineRoom {
    pub id: u32,
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

/// Room budget: explicit count, or derived from grid area and density.
pub fn room_budget(width: i32, height: i32, options: &GeneratorOptions) -> usize {
    if let Some(count) = options.room_count {
        return count;
    }
    let derived =
        ((width * height) as f32 * options.room_density / ROOM_BUDGET_AREA_DIVISOR) as usize;
    derived.clamp(ROOM_BUDGET_MIN, ROOM_BUDGET_MAX)
}

/// Place rooms with the configured strategy, carve them to floor, and
/// register them on the grid.
pub fn place_rooms(grid: &mut Grid, options: &GeneratorOptions, rng: &mut impl Rng) {
    let budget = room_budget(grid.width, grid.height, options);
    let rects = match options.placement {
        PlacementStrategy::Standard => standard_placement(grid, budget, options, rng),
        PlacementStrategy::Relaxation => relaxation_placement(grid, budget, options, rng),
        PlacementStrategy::Symmetric => symmetric_placement(grid, budget, options, rng),
    };

    log::debug!(
        "placed {} of {} budgeted rooms ({:?})",
        rects.len(),
        budget,
        options.placement
    );

    for (i, rect) in rects.into_iter().enumerate() {
        grid.fill_rect(&rect, CellKind::Floor);
        grid.rooms.push(Room::new(i as u32, rect));
    }
}

/// Adopt caller-supplied outline rooms. Rooms with negative spans are
/// normalized first; a rect that still has no area is a caller error. Rooms
/// failing mask or overlap validation are silently dropped.
pub fn adopt_outline(grid: &mut Grid, outline: &Outline) -> Result<usize, GenError> {
    let mut accepted: Vec<Rect> = Vec::new();
    let mut rooms: Vec<Room> = Vec::new();

    for spec in &outline.rooms {
        let rect = coerce_rect(spec)?;
        if !placement_valid(grid, &rect, &accepted) {
            log::debug!("outline room {} dropped (mask/overlap)", spec.id);
            continue;
        }
        accepted.push(rect);
        rooms.push(Room::new(spec.id, rect));
    }

    let adopted = rooms.len();
    for room in rooms {
        grid.fill_rect(&room.rect, CellKind::Floor);
        grid.rooms.push(room);
    }
    Ok(adopted)
}

/// Normalize negative spans (a rect drawn corner-to-corner either way), then
/// reject rects with no area.
fn coerce_rect(spec: &OutlineRoom) -> Result<Rect, GenError> {
    let (x, width) = if spec.width < 0 {
        (spec.x + spec.width, -spec.width)
    } else {
        (spec.x, spec.width)
    };
    let (y, height) = if spec.height < 0 {
        (spec.y + spec.height, -spec.height)
    } else {
        (spec.y, spec.height)
    };
    if width == 0 || height == 0 {
        return Err(GenError::InvalidOutlineRoom {
            id: spec.id,
            width: spec.width,
            height: spec.height,
        });
    }
    Ok(Rect::new(x, y, width, height))
}

/// The shared acceptance rule: the rectangle plus its buffer must sit fully
/// in the mask and keep the buffer clear of every accepted room's buffer.
fn placement_valid(grid: &Grid, rect: &Rect, accepted: &[Rect]) -> bool {
    let buffered = rect.expand(ROOM_BUFFER);
    if !grid.rect_in_mask(&buffered) {
        return false;
    }
    accepted
        .iter()
        .all(|other| !buffered.intersects(&other.expand(ROOM_BUFFER)))
}

/// Sample one side length in `[min, max]`, skewed by the size bias.
fn sample_dim(rng: &mut impl Rng, options: &GeneratorOptions) -> i32 {
    let min = options.room_min_size.max(1);
    let max = options.room_max_size.max(min);
    let span = max - min;
    if span == 0 {
        return min;
    }
    // bias < 0 pushes the curve toward min, bias > 0 toward max
    let exponent = 4f32.powf(-options.room_size_bias.clamp(-1.0, 1.0));
    let t = rng.gen::<f32>().powf(exponent);
    min + ((t * (span + 1) as f32) as i32).min(span)
}

/// Random top-left position keeping the buffered rect inside the grid, or
/// `None` when the room cannot fit at all.
fn sample_position(grid: &Grid, w: i32, h: i32, rng: &mut impl Rng) -> Option<(i32, i32)> {
    if grid.width - w <= ROOM_BUFFER || grid.height - h <= ROOM_BUFFER {
        return None;
    }
    let x = rng.gen_range(ROOM_BUFFER..grid.width - w);
    let y = rng.gen_range(ROOM_BUFFER..grid.height - h);
    Some((x, y))
}

/// Rejection sampling: draw a size and position, keep it if valid, stop when
/// the budget is met or the attempt budget runs out.
fn standard_placement(
    grid: &Grid,
    budget: usize,
    options: &GeneratorOptions,
    rng: &mut impl Rng,
) -> Vec<Rect> {
    let mut accepted = Vec::new();
    let attempts = budget * PLACEMENT_ATTEMPTS_PER_ROOM;

    for _ in 0..attempts {
        if accepted.len() >= budget {
            break;
        }
        let w = sample_dim(rng, options);
        let h = sample_dim(rng, options);
        let Some((x, y)) = sample_position(grid, w, h, rng) else {
            continue;
        };
        let rect = Rect::new(x, y, w, h);
        if placement_valid(grid, &rect, &accepted) {
            accepted.push(rect);
        }
    }
    accepted
}

/// Scatter every room at random ignoring overlap, then iteratively push
/// overlapping pairs apart along their center-to-center vector until stable,
/// and finally discard anything that ended up invalid.
fn relaxation_placement(
    grid: &Grid,
    budget: usize,
    options: &GeneratorOptions,
    rng: &mut impl Rng,
) -> Vec<Rect> {
    let mut scattered: Vec<Rect> = Vec::new();
    for _ in 0..budget {
        let w = sample_dim(rng, options);
        let h = sample_dim(rng, options);
        if let Some((x, y)) = sample_position(grid, w, h, rng) {
            scattered.push(Rect::new(x, y, w, h));
        }
    }

    for _ in 0..RELAXATION_PASSES {
        let mut moved = false;
        for i in 0..scattered.len() {
            for j in i + 1..scattered.len() {
                if !scattered[i]
                    .expand(ROOM_BUFFER)
                    .intersects(&scattered[j].expand(ROOM_BUFFER))
                {
                    continue;
                }
                let (cx1, cy1) = scattered[i].center();
                let (cx2, cy2) = scattered[j].center();
                let mut dx = (cx2 - cx1).signum();
                let mut dy = (cy2 - cy1).signum();
                if dx == 0 && dy == 0 {
                    // Coincident centers: separate along a random axis
                    if rng.gen_bool(0.5) {
                        dx = if rng.gen_bool(0.5) { 1 } else { -1 };
                    } else {
                        dy = if rng.gen_bool(0.5) { 1 } else { -1 };
                    }
                }
                scattered[i].x -= dx;
                scattered[i].y -= dy;
                scattered[j].x += dx;
                scattered[j].y += dy;
                moved = true;
            }
        }
        if !moved {
            break;
        }
    }

    let mut accepted: Vec<Rect> = Vec::new();
    for rect in scattered {
        if placement_valid(grid, &rect, &accepted) {
            accepted.push(rect);
        }
    }
    accepted
}

/// Place rooms in the left half only and mirror each across the vertical
/// centerline; the pair is kept only when both placements validate.
fn symmetric_placement(
    grid: &Grid,
    budget: usize,
    options: &GeneratorOptions,
    rng: &mut impl Rng,
) -> Vec<Rect> {
    let mut accepted = Vec::new();
    let attempts = budget * PLACEMENT_ATTEMPTS_PER_ROOM;

    for _ in 0..attempts {
        if accepted.len() >= budget {
            break;
        }
        let w = sample_dim(rng, options);
        let h = sample_dim(rng, options);
        let half = grid.width / 2;
        if half - w <= ROOM_BUFFER || grid.height - h <= ROOM_BUFFER {
            continue;
        }
        let x = rng.gen_range(ROOM_BUFFER..half - w + 1);
        let y = rng.gen_range(ROOM_BUFFER..grid.height - h);
        let rect = Rect::new(x, y, w, h);
        let mirrored = Rect::new(grid.width - rect.x - rect.width, rect.y, w, h);

        if !placement_valid(grid, &rect, &accepted) {
            continue;
        }
        if mirrored == rect {
            // A room straddling the centerline is its own mirror image.
            accepted.push(rect);
            continue;
        }
        let mut with_left = accepted.clone();
        with_left.push(rect);
        if placement_valid(grid, &mirrored, &with_left) {
            accepted.push(rect);
            accepted.push(mirrored);
        }
    }
    accepted
}
