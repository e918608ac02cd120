//! Vision-blocking wall geometry derived from the floor boundary.
//!
//! Works per grid *line*, not per cell: every line separating a floor cell
//! from a non-floor cell is a candidate segment. Segments are pushed
//! perpendicular into the wall band by a configurable outset, so a viewer
//! standing on the floor sees the band's decoration instead of a line flush
//! with the floor edge. Endpoints are extended only where a perpendicular
//! boundary meets the corner; extending unconditionally would sprout horns
//! at convex corners, never extending would leave gaps.

use std::collections::HashSet;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::constants::{WALL_CELL_SIZE_DEFAULT, WALL_MERGE_EPSILON, WALL_OUTSET_DEFAULT};
use crate::doors::DoorOrientation;
use crate::grid::Grid;

/// Segment classification for the downstream geometry importer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WallKind {
    Solid,
    Door,
}

/// An axis-aligned wall segment in pixel space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WallSegment {
    pub x1: f32,
    pub y1: f32,
    pub x2: f32,
    pub y2: f32,
    pub kind: WallKind,
}

/// Scaling and geometry knobs for wall extraction.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct WallConfig {
    /// Pixel size of one grid cell
    pub cell_size: f32,
    /// Pixel translation applied to every output coordinate
    pub padding: f32,
    /// Perpendicular push into the wall band, as a fraction of a cell
    pub outset: f32,
}

impl Default for WallConfig {
    fn default() -> Self {
        Self {
            cell_size: WALL_CELL_SIZE_DEFAULT,
            padding: 0.0,
            outset: WALL_OUTSET_DEFAULT,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Axis {
    Horizontal,
    Vertical,
}

/// A segment in fractional grid units: its axis, the fixed perpendicular
/// coordinate, and the covered interval along the axis.
#[derive(Debug, Clone, Copy, PartialEq)]
struct RawSegment {
    axis: Axis,
    perp: f32,
    lo: f32,
    hi: f32,
    kind: WallKind,
}

/// Extract, offset, and merge wall segments for the finished grid.
pub fn build_walls(grid: &Grid, config: &WallConfig) -> Vec<WallSegment> {
    // Boundary keys. A vertical boundary (x, y) separates cells (x-1, y)
    // and (x, y); a horizontal boundary (x, y) separates (x, y-1) and (x, y).
    let mut v_bounds: HashSet<(i32, i32)> = HashSet::new();
    let mut h_bounds: HashSet<(i32, i32)> = HashSet::new();

    for y in 0..grid.height {
        for x in 0..=grid.width {
            if grid.is_floor(x - 1, y) != grid.is_floor(x, y) {
                v_bounds.insert((x, y));
            }
        }
    }
    for y in 0..=grid.height {
        for x in 0..grid.width {
            if grid.is_floor(x, y - 1) != grid.is_floor(x, y) {
                h_bounds.insert((x, y));
            }
        }
    }

    let o = config.outset;
    let mut raw = Vec::with_capacity(v_bounds.len() + h_bounds.len() + grid.doors.len());

    for &(x, y) in &v_bounds {
        // Push away from the floor side.
        let perp = if grid.is_floor(x - 1, y) {
            x as f32 + o
        } else {
            x as f32 - o
        };
        let mut lo = y as f32;
        let mut hi = (y + 1) as f32;
        // Extend an endpoint only where a perpendicular boundary meets it,
        // in the column on either side of this line.
        if h_bounds.contains(&(x - 1, y)) || h_bounds.contains(&(x, y)) {
            lo -= o;
        }
        if h_bounds.contains(&(x - 1, y + 1)) || h_bounds.contains(&(x, y + 1)) {
            hi += o;
        }
        raw.push(RawSegment { axis: Axis::Vertical, perp, lo, hi, kind: WallKind::Solid });
    }

    for &(x, y) in &h_bounds {
        let perp = if grid.is_floor(x, y - 1) {
            y as f32 + o
        } else {
            y as f32 - o
        };
        let mut lo = x as f32;
        let mut hi = (x + 1) as f32;
        if v_bounds.contains(&(x, y - 1)) || v_bounds.contains(&(x, y)) {
            lo -= o;
        }
        if v_bounds.contains(&(x + 1, y - 1)) || v_bounds.contains(&(x + 1, y)) {
            hi += o;
        }
        raw.push(RawSegment { axis: Axis::Horizontal, perp, lo, hi, kind: WallKind::Solid });
    }

    // A door spans its cell across the passage, reaching outset past both
    // cell edges to close the gap against the offset walls beside it.
    for door in &grid.doors {
        let seg = match door.orientation {
            DoorOrientation::Vertical => RawSegment {
                axis: Axis::Vertical,
                perp: door.x as f32 + 0.5,
                lo: door.y as f32 - o,
                hi: (door.y + 1) as f32 + o,
                kind: WallKind::Door,
            },
            DoorOrientation::Horizontal => RawSegment {
                axis: Axis::Horizontal,
                perp: door.y as f32 + 0.5,
                lo: door.x as f32 - o,
                hi: (door.x + 1) as f32 + o,
                kind: WallKind::Door,
            },
        };
        raw.push(seg);
    }

    let merged = merge_segments(raw);
    log::debug!("extracted {} wall segments", merged.len());

    merged
        .into_iter()
        .map(|seg| {
            let (a, b) = match seg.axis {
                Axis::Vertical => (Vec2::new(seg.perp, seg.lo), Vec2::new(seg.perp, seg.hi)),
                Axis::Horizontal => (Vec2::new(seg.lo, seg.perp), Vec2::new(seg.hi, seg.perp)),
            };
            let a = a * config.cell_size + Vec2::splat(config.padding);
            let b = b * config.cell_size + Vec2::splat(config.padding);
            WallSegment { x1: a.x, y1: a.y, x2: b.x, y2: b.y, kind: seg.kind }
        })
        .collect()
}

/// Sort-and-sweep merge of collinear runs. Only segments of the same kind
/// and axis on the same perpendicular line merge, and only when contiguous
/// or overlapping within tolerance. Idempotent on its own output.
fn merge_segments(mut segs: Vec<RawSegment>) -> Vec<RawSegment> {
    segs.sort_by(|a, b| {
        (a.kind, a.axis)
            .cmp(&(b.kind, b.axis))
            .then(a.perp.total_cmp(&b.perp))
            .then(a.lo.total_cmp(&b.lo))
    });

    let mut merged: Vec<RawSegment> = Vec::new();
    for seg in segs {
        if let Some(last) = merged.last_mut() {
            if last.kind == seg.kind
                && last.axis == seg.axis
                && (last.perp - seg.perp).abs() <= WALL_MERGE_EPSILON
                && seg.lo <= last.hi + WALL_MERGE_EPSILON
            {
                last.hi = last.hi.max(seg.hi);
                continue;
            }
        }
        merged.push(seg);
    }
    merged
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::doors::Door;
    use crate::grid::{CellKind, Rect};

    fn flat_config(cell_size: f32) -> WallConfig {
        WallConfig { cell_size, padding: 0.0, outset: 0.0 }
    }

    fn find_segment(segs: &[WallSegment], x1: f32, y1: f32, x2: f32, y2: f32) -> bool {
        segs.iter().any(|s| {
            (s.x1 - x1).abs() < 1e-4
                && (s.y1 - y1).abs() < 1e-4
                && (s.x2 - x2).abs() < 1e-4
                && (s.y2 - y2).abs() < 1e-4
        })
    }

    #[test]
    fn test_single_room_yields_four_sides() {
        let mut grid = Grid::new(5, 5);
        grid.fill_rect(&Rect::new(1, 1, 3, 3), CellKind::Floor);
        let segs = build_walls(&grid, &flat_config(20.0));

        assert_eq!(segs.len(), 4);
        assert!(find_segment(&segs, 20.0, 20.0, 80.0, 20.0)); // top
        assert!(find_segment(&segs, 20.0, 80.0, 80.0, 80.0)); // bottom
        assert!(find_segment(&segs, 20.0, 20.0, 20.0, 80.0)); // left
        assert!(find_segment(&segs, 80.0, 20.0, 80.0, 80.0)); // right
    }

    #[test]
    fn test_door_segment_spans_cell_center() {
        let mut grid = Grid::new(5, 3);
        for x in 1..4 {
            grid.set_cell(x, 1, CellKind::Floor);
        }
        grid.doors.push(Door { id: 0, x: 2, y: 1, orientation: DoorOrientation::Vertical });

        let segs = build_walls(&grid, &flat_config(20.0));
        let doors: Vec<&WallSegment> =
            segs.iter().filter(|s| s.kind == WallKind::Door).collect();
        assert_eq!(doors.len(), 1);
        let d = doors[0];
        assert!((d.x1 - 50.0).abs() < 1e-4 && (d.x2 - 50.0).abs() < 1e-4);
        assert!((d.y1 - 20.0).abs() < 1e-4 && (d.y2 - 40.0).abs() < 1e-4);
    }

    #[test]
    fn test_outset_pushes_into_wall_band_and_corners_meet() {
        let mut grid = Grid::new(6, 6);
        grid.fill_rect(&Rect::new(1, 1, 3, 3), CellKind::Floor);
        let config = WallConfig { cell_size: 1.0, padding: 0.0, outset: 0.2 };
        let segs = build_walls(&grid, &config);

        assert_eq!(segs.len(), 4);
        // Top wall rides above the floor edge, extended to both corners.
        assert!(find_segment(&segs, 0.8, 0.8, 4.2, 0.8));
        // Left wall meets it exactly at (0.8, 0.8).
        assert!(find_segment(&segs, 0.8, 0.8, 0.8, 4.2));
    }

    #[test]
    fn test_concave_corner_has_no_gap() {
        // L-shaped floor: (1,1), (2,1), (1,2). The inner corner sits at the
        // grid point (2,2); both offset lines must reach their crossing at
        // (2+o, 2+o) so the outline stays closed.
        let mut grid = Grid::new(6, 6);
        grid.set_cell(1, 1, CellKind::Floor);
        grid.set_cell(2, 1, CellKind::Floor);
        grid.set_cell(1, 2, CellKind::Floor);
        let o = 0.25;
        let config = WallConfig { cell_size: 1.0, padding: 0.0, outset: o };
        let segs = build_walls(&grid, &config);

        let h = segs
            .iter()
            .find(|s| s.y1 == s.y2 && (s.y1 - (2.0 + o)).abs() < 1e-4)
            .expect("horizontal segment under (2,1)");
        let v = segs
            .iter()
            .find(|s| s.x1 == s.x2 && (s.x1 - (2.0 + o)).abs() < 1e-4)
            .expect("vertical segment east of (1,2)");
        assert!(h.x1.min(h.x2) <= 2.0 + o + 1e-4);
        assert!(h.x1.max(h.x2) >= 2.0 + o - 1e-4);
        assert!(v.y1.min(v.y2) <= 2.0 + o + 1e-4);
        assert!(v.y1.max(v.y2) >= 2.0 + o - 1e-4);
    }

    #[test]
    fn test_straight_run_has_no_interior_extensions() {
        // A long corridor: interior unit segments abut exactly and merge
        // into one; only the far ends are extended (by the corner rule).
        let mut grid = Grid::new(10, 4);
        for x in 1..9 {
            grid.set_cell(x, 1, CellKind::Floor);
        }
        let o = 0.1;
        let config = WallConfig { cell_size: 1.0, padding: 0.0, outset: o };
        let segs = build_walls(&grid, &config);

        let tops: Vec<&WallSegment> = segs
            .iter()
            .filter(|s| s.y1 == s.y2 && (s.y1 - (1.0 - o)).abs() < 1e-4)
            .collect();
        assert_eq!(tops.len(), 1);
        assert!((tops[0].x1.min(tops[0].x2) - (1.0 - o)).abs() < 1e-4);
        assert!((tops[0].x1.max(tops[0].x2) - (9.0 + o)).abs() < 1e-4);
    }

    #[test]
    fn test_merge_is_idempotent() {
        let mut grid = Grid::new(24, 24);
        grid.fill_rect(&Rect::new(2, 2, 8, 6), CellKind::Floor);
        grid.fill_rect(&Rect::new(12, 4, 7, 9), CellKind::Floor);
        for x in 9..13 {
            grid.set_cell(x, 5, CellKind::Floor);
        }
        grid.doors.push(Door { id: 0, x: 10, y: 5, orientation: DoorOrientation::Vertical });

        let config = WallConfig { cell_size: 1.0, padding: 0.0, outset: 0.15 };
        let segs = build_walls(&grid, &config);

        let raw: Vec<RawSegment> = segs
            .iter()
            .map(|s| {
                if (s.x1 - s.x2).abs() < 1e-6 {
                    RawSegment { axis: Axis::Vertical, perp: s.x1, lo: s.y1, hi: s.y2, kind: s.kind }
                } else {
                    RawSegment { axis: Axis::Horizontal, perp: s.y1, lo: s.x1, hi: s.x2, kind: s.kind }
                }
            })
            .collect();
        let again = merge_segments(raw.clone());
        assert_eq!(again.len(), raw.len());
    }

    #[test]
    fn test_solid_and_door_never_merge() {
        let segs = merge_segments(vec![
            RawSegment { axis: Axis::Vertical, perp: 2.5, lo: 1.0, hi: 2.0, kind: WallKind::Solid },
            RawSegment { axis: Axis::Vertical, perp: 2.5, lo: 2.0, hi: 3.0, kind: WallKind::Door },
        ]);
        assert_eq!(segs.len(), 2);
    }

    #[test]
    fn test_padding_translates_output() {
        let mut grid = Grid::new(5, 5);
        grid.fill_rect(&Rect::new(1, 1, 3, 3), CellKind::Floor);
        let config = WallConfig { cell_size: 10.0, padding: 7.0, outset: 0.0 };
        let segs = build_walls(&grid, &config);
        assert!(find_segment(&segs, 17.0, 17.0, 47.0, 17.0));
    }
}
