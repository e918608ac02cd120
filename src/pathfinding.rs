//! Tunneling search and digital lines for corridor carving.
//!
//! Unlike walkability pathfinding, the tunnel search may cross any in-bounds
//! cell; the cost model is what shapes the result. Reusing existing floor is
//! cheap, carving fresh floor is expensive, and brushing against a room that
//! is not an endpoint is punitive, which keeps corridors from hugging
//! unrelated rooms.

use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap};

use rand::Rng;

use crate::constants::{TUNNEL_CARVE_COST, TUNNEL_FOREIGN_ROOM_PENALTY, TUNNEL_REUSE_COST};
use crate::grid::{Grid, Rect, NEIGHBORS4};

/// Digital straight line from `(x0, y0)` to `(x1, y1)`, both endpoints
/// included. Steps are cardinal only (diagonal error steps are split), so a
/// carved line is walkable under 4-neighbor adjacency.
pub fn bresenham_line(x0: i32, y0: i32, x1: i32, y1: i32) -> Vec<(i32, i32)> {
    let dx = (x1 - x0).abs();
    let dy = -(y1 - y0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;
    let (mut x, mut y) = (x0, y0);
    let mut points = Vec::new();

    loop {
        points.push((x, y));
        if x == x1 && y == y1 {
            break;
        }
        let e2 = 2 * err;
        if e2 - dy > dx - e2 {
            err += dy;
            x += sx;
        } else {
            err += dx;
            y += sy;
        }
    }
    points
}

#[derive(Clone, Copy, PartialEq, Eq, Hash)]
struct Node {
    x: i32,
    y: i32,
}

#[derive(Clone, Copy, PartialEq, Eq)]
struct ScoredNode {
    node: Node,
    f_score: i32, // g_score + heuristic
}

// BinaryHeap is a max-heap, so we reverse the ordering for min-heap behavior
impl Ord for ScoredNode {
    fn cmp(&self, other: &Self) -> Ordering {
        other.f_score.cmp(&self.f_score)
    }
}

impl PartialOrd for ScoredNode {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Find a tunnel route from `start` to `goal`, both endpoints included.
///
/// `foreign_rooms` are rooms that are neither source nor destination; any
/// step into their buffered footprint costs an extra penalty. `noise` adds a
/// uniform `[0, noise]` term per step for meandering corridors. Returns
/// `None` only when an endpoint lies outside the grid.
pub fn tunnel_path(
    grid: &Grid,
    start: (i32, i32),
    goal: (i32, i32),
    foreign_rooms: &[Rect],
    noise: i32,
    rng: &mut impl Rng,
) -> Option<Vec<(i32, i32)>> {
    if !in_bounds(grid, start) || !in_bounds(grid, goal) {
        return None;
    }

    let start_node = Node { x: start.0, y: start.1 };
    let goal_node = Node { x: goal.0, y: goal.1 };

    let mut open_set = BinaryHeap::new();
    let mut came_from: HashMap<Node, Node> = HashMap::new();
    let mut g_score: HashMap<Node, i32> = HashMap::new();

    g_score.insert(start_node, 0);
    open_set.push(ScoredNode {
        node: start_node,
        f_score: heuristic(start, goal),
    });

    while let Some(current) = open_set.pop() {
        if current.node == goal_node {
            return Some(reconstruct_path(&came_from, current.node));
        }

        let current_g = *g_score.get(&current.node).unwrap_or(&i32::MAX);

        for (dx, dy) in NEIGHBORS4 {
            let nx = current.node.x + dx;
            let ny = current.node.y + dy;
            if !in_bounds(grid, (nx, ny)) {
                continue;
            }
            let neighbor = Node { x: nx, y: ny };

            let mut step = if grid.is_floor(nx, ny) {
                TUNNEL_REUSE_COST
            } else {
                TUNNEL_CARVE_COST
            };
            if foreign_rooms.iter().any(|r| r.expand(1).contains(nx, ny)) {
                step += TUNNEL_FOREIGN_ROOM_PENALTY;
            }
            if noise > 0 {
                step += rng.gen_range(0..=noise);
            }

            let tentative_g = current_g.saturating_add(step);
            let neighbor_g = *g_score.get(&neighbor).unwrap_or(&i32::MAX);

            if tentative_g < neighbor_g {
                came_from.insert(neighbor, current.node);
                g_score.insert(neighbor, tentative_g);
                open_set.push(ScoredNode {
                    node: neighbor,
                    f_score: tentative_g + heuristic((nx, ny), goal),
                });
            }
        }
    }

    None // Unreachable within bounds
}

fn in_bounds(grid: &Grid, (x, y): (i32, i32)) -> bool {
    x >= 0 && y >= 0 && x < grid.width && y < grid.height
}

/// Manhattan distance heuristic
fn heuristic(from: (i32, i32), to: (i32, i32)) -> i32 {
    (from.0 - to.0).abs() + (from.1 - to.1).abs()
}

/// Reconstruct the path from came_from map
fn reconstruct_path(came_from: &HashMap<Node, Node>, mut current: Node) -> Vec<(i32, i32)> {
    let mut path = vec![(current.x, current.y)];

    while let Some(&prev) = came_from.get(&current) {
        path.push((prev.x, prev.y));
        current = prev;
    }

    path.reverse();
    path
}
