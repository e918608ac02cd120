//! The shared spatial state every pipeline stage mutates in place.
//!
//! All coordinate access is total over `i32`: out-of-range reads return
//! `Empty` / mask-invalid and out-of-range writes are no-ops, so callers
//! never bounds-check.

use serde::{Deserialize, Serialize};

use crate::doors::Door;
use crate::rooms::Room;

/// Classification of one grid cell.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CellKind {
    /// Unallocated void
    #[default]
    Empty,
    /// Walkable floor
    Floor,
    /// Decorative perimeter around floor; rendered, never walked
    WallBand,
}

/// An axis-aligned, half-open cell rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self { x, y, width, height }
    }

    pub fn center(&self) -> (i32, i32) {
        (self.x + self.width / 2, self.y + self.height / 2)
    }

    /// Check if a point is inside this rectangle
    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= self.x && x < self.x + self.width && y >= self.y && y < self.y + self.height
    }

    pub fn intersects(&self, other: &Rect) -> bool {
        self.x < other.x + other.width
            && other.x < self.x + self.width
            && self.y < other.y + other.height
            && other.y < self.y + self.height
    }

    /// Grow by `n` cells on every side.
    pub fn expand(&self, n: i32) -> Rect {
        Rect::new(self.x - n, self.y - n, self.width + 2 * n, self.height + 2 * n)
    }
}

/// Cardinal neighbor offsets, east/west/north/south.
pub const NEIGHBORS4: [(i32, i32); 4] = [(1, 0), (-1, 0), (0, -1), (0, 1)];

/// The grid: cell classifications, the placement mask, and the room and door
/// registries populated as the pipeline runs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Grid {
    pub width: i32,
    pub height: i32,
    cells: Vec<CellKind>,
    mask: Vec<bool>,
    pub rooms: Vec<Room>,
    pub doors: Vec<Door>,
}

impl Grid {
    /// A grid of `Empty` cells with an all-invalid mask. Dimensions are
    /// validated by the pipeline entry points before this is called.
    pub fn new(width: i32, height: i32) -> Self {
        let len = (width as usize) * (height as usize);
        Self {
            width,
            height,
            cells: vec![CellKind::Empty; len],
            mask: vec![false; len],
            rooms: Vec::new(),
            doors: Vec::new(),
        }
    }

    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x >= self.width || y >= self.height {
            return None;
        }
        Some(y as usize * self.width as usize + x as usize)
    }

    /// Cell classification; `Empty` anywhere outside the grid.
    pub fn cell(&self, x: i32, y: i32) -> CellKind {
        self.index(x, y).map_or(CellKind::Empty, |i| self.cells[i])
    }

    /// Out-of-range writes are dropped.
    pub fn set_cell(&mut self, x: i32, y: i32, kind: CellKind) {
        if let Some(i) = self.index(x, y) {
            self.cells[i] = kind;
        }
    }

    pub fn is_floor(&self, x: i32, y: i32) -> bool {
        self.cell(x, y) == CellKind::Floor
    }

    /// Whether carving is permitted here; invalid anywhere outside the grid.
    pub fn mask_at(&self, x: i32, y: i32) -> bool {
        self.index(x, y).map_or(false, |i| self.mask[i])
    }

    pub fn set_mask(&mut self, x: i32, y: i32, valid: bool) {
        if let Some(i) = self.index(x, y) {
            self.mask[i] = valid;
        }
    }

    /// Set every cell of `rect` to `kind`. Out-of-range parts are skipped.
    pub fn fill_rect(&mut self, rect: &Rect, kind: CellKind) {
        for y in rect.y..rect.y + rect.height {
            for x in rect.x..rect.x + rect.width {
                self.set_cell(x, y, kind);
            }
        }
    }

    /// True when every cell of `rect` is in-bounds and `Empty`.
    pub fn rect_is_empty(&self, rect: &Rect) -> bool {
        for y in rect.y..rect.y + rect.height {
            for x in rect.x..rect.x + rect.width {
                match self.index(x, y) {
                    Some(i) if self.cells[i] == CellKind::Empty => {}
                    _ => return false,
                }
            }
        }
        true
    }

    /// True when every cell of `rect` is mask-valid.
    pub fn rect_in_mask(&self, rect: &Rect) -> bool {
        for y in rect.y..rect.y + rect.height {
            for x in rect.x..rect.x + rect.width {
                if !self.mask_at(x, y) {
                    return false;
                }
            }
        }
        true
    }

    /// Number of cardinal neighbors that are floor.
    pub fn floor_degree(&self, x: i32, y: i32) -> usize {
        NEIGHBORS4
            .iter()
            .filter(|(dx, dy)| self.is_floor(x + dx, y + dy))
            .count()
    }

    pub fn room(&self, id: u32) -> Option<&Room> {
        self.rooms.iter().find(|r| r.id == id)
    }

    pub fn room_mut(&mut self, id: u32) -> Option<&mut Room> {
        self.rooms.iter_mut().find(|r| r.id == id)
    }

    /// Count of floor cells over the whole grid.
    pub fn floor_count(&self) -> usize {
        self.cells.iter().filter(|c| **c == CellKind::Floor).count()
    }
}
