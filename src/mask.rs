//! Envelope construction: stamps the boolean carvable region onto the grid
//! before anything is placed. The mask never changes after this step.
//!
//! No connectivity guarantee is made here; the router is responsible for
//! stitching whatever the envelope allows into one component.

use rand::Rng;

use crate::constants::*;
use crate::grid::Grid;
use crate::options::MaskShape;

/// Populate the grid's mask buffer for the selected shape.
pub fn build_mask(grid: &mut Grid, shape: MaskShape, rng: &mut impl Rng) {
    match shape {
        MaskShape::Rectangle => stamp_border_rect(grid, 1),
        MaskShape::Round => stamp_round(grid),
        MaskShape::Cross => stamp_cross(grid),
        MaskShape::Keep => stamp_border_rect(grid, KEEP_EDGE_PADDING),
        MaskShape::Cavernous => stamp_cavernous(grid, rng),
    }
}

/// Interior rectangle padded `pad` cells from every edge.
fn stamp_border_rect(grid: &mut Grid, pad: i32) {
    for y in pad..grid.height - pad {
        for x in pad..grid.width - pad {
            grid.set_mask(x, y, true);
        }
    }
}

/// Euclidean disk of radius `min(w,h)/2 - 2` centered on the grid.
fn stamp_round(grid: &mut Grid) {
    let cx = grid.width as f32 / 2.0;
    let cy = grid.height as f32 / 2.0;
    let radius = grid.width.min(grid.height) as f32 / 2.0 - ROUND_RADIUS_MARGIN;
    if radius <= 0.0 {
        return;
    }
    let r2 = radius * radius;
    for y in 0..grid.height {
        for x in 0..grid.width {
            let dx = x as f32 - cx;
            let dy = y as f32 - cy;
            if dx * dx + dy * dy <= r2 {
                grid.set_mask(x, y, true);
            }
        }
    }
}

/// Union of two perpendicular bands, each a third of the short dimension
/// wide and padded in from the outer edge.
fn stamp_cross(grid: &mut Grid) {
    let band = grid.width.min(grid.height) / 3;
    let pad = CROSS_EDGE_PADDING;

    // Horizontal band
    let y0 = (grid.height - band) / 2;
    for y in y0..y0 + band {
        for x in pad..grid.width - pad {
            grid.set_mask(x, y, true);
        }
    }

    // Vertical band
    let x0 = (grid.width - band) / 2;
    for y in pad..grid.height - pad {
        for x in x0..x0 + band {
            grid.set_mask(x, y, true);
        }
    }
}

/// Organic cave outline: random fill followed by majority-vote smoothing.
/// Out-of-range neighbors count as dead, so the rim erodes instead of
/// growing out to the grid edge.
fn stamp_cavernous(grid: &mut Grid, rng: &mut impl Rng) {
    let w = grid.width as usize;
    let h = grid.height as usize;
    let mut alive = vec![false; w * h];
    for cell in alive.iter_mut() {
        *cell = rng.gen_bool(CAVE_FILL_CHANCE);
    }

    let mut next = vec![false; w * h];
    for _ in 0..CAVE_SMOOTHING_PASSES {
        for y in 0..h as i32 {
            for x in 0..w as i32 {
                let mut live_neighbors = 0;
                for dy in -1..=1 {
                    for dx in -1..=1 {
                        if dx == 0 && dy == 0 {
                            continue;
                        }
                        let nx = x + dx;
                        let ny = y + dy;
                        if nx >= 0
                            && ny >= 0
                            && nx < w as i32
                            && ny < h as i32
                            && alive[ny as usize * w + nx as usize]
                        {
                            live_neighbors += 1;
                        }
                    }
                }
                let idx = y as usize * w + x as usize;
                next[idx] = if alive[idx] {
                    live_neighbors >= CAVE_SURVIVE_MIN
                } else {
                    live_neighbors >= CAVE_BIRTH_MIN
                };
            }
        }
        std::mem::swap(&mut alive, &mut next);
    }

    for y in 0..grid.height {
        for x in 0..grid.width {
            if alive[y as usize * w + x as usize] {
                grid.set_mask(x, y, true);
            }
        }
    }
}
