//! Room connectivity: graph selection and corridor carving.
//!
//! Builds the complete graph over room centers, keeps a Kruskal spanning
//! tree plus whatever loop edges the strategy allows, and carves one
//! corridor per selected edge. Every successful carve is recorded on both
//! rooms' connection lists.

use rand::Rng;

use crate::constants::*;
use crate::grid::{CellKind, Grid, Rect};
use crate::options::{ConnectivityStrategy, CorridorStyle, GeneratorOptions};
use crate::pathfinding::{bresenham_line, tunnel_path};

#[derive(Debug, Clone, Copy)]
struct Edge {
    a: usize,
    b: usize,
    weight: f32,
}

/// Union-find over room indices for Kruskal's algorithm.
struct DisjointSet {
    parent: Vec<usize>,
    rank: Vec<usize>,
}

impl DisjointSet {
    fn new(n: usize) -> Self {
        Self {
            parent: (0..n).collect(),
            rank: vec![0; n],
        }
    }

    fn find(&mut self, mut x: usize) -> usize {
        while self.parent[x] != x {
            // Path halving
            self.parent[x] = self.parent[self.parent[x]];
            x = self.parent[x];
        }
        x
    }

    /// Returns false when both were already in the same set.
    fn union(&mut self, a: usize, b: usize) -> bool {
        let ra = self.find(a);
        let rb = self.find(b);
        if ra == rb {
            return false;
        }
        match self.rank[ra].cmp(&self.rank[rb]) {
            std::cmp::Ordering::Less => self.parent[ra] = rb,
            std::cmp::Ordering::Greater => self.parent[rb] = ra,
            std::cmp::Ordering::Equal => {
                self.parent[rb] = ra;
                self.rank[ra] += 1;
            }
        }
        true
    }
}

/// Select edges and carve corridors. `outline_mode` switches edge weights to
/// Euclidean distance and disables the foreign-room tunneling penalty;
/// `explicit` pairs (by room id) are carved verbatim when any resolve, with
/// MST as the fallback.
pub fn connect_rooms(
    grid: &mut Grid,
    options: &GeneratorOptions,
    rng: &mut impl Rng,
    outline_mode: bool,
    explicit: &[(u32, u32)],
) {
    let n = grid.rooms.len();

    if !explicit.is_empty() {
        let resolved = resolve_pairs(grid, explicit);
        if !resolved.is_empty() {
            for (a, b) in resolved {
                carve_edge(grid, a, b, options, rng, outline_mode);
            }
            return;
        }
        log::warn!("no explicit connection pair resolved, falling back to MST");
    }

    if n < 2 {
        return;
    }

    let mut edges = Vec::with_capacity(n * (n - 1) / 2);
    for a in 0..n {
        for b in a + 1..n {
            let (x1, y1) = grid.rooms[a].rect.center();
            let (x2, y2) = grid.rooms[b].rect.center();
            let weight = if outline_mode {
                let dx = (x2 - x1) as f32;
                let dy = (y2 - y1) as f32;
                (dx * dx + dy * dy).sqrt()
            } else {
                ((x2 - x1).abs() + (y2 - y1).abs()) as f32
            };
            edges.push(Edge { a, b, weight });
        }
    }
    edges.sort_by(|e1, e2| e1.weight.total_cmp(&e2.weight));

    let mut sets = DisjointSet::new(n);
    let mut selected = Vec::new();
    let mut non_tree = Vec::new();
    for edge in &edges {
        if sets.union(edge.a, edge.b) {
            selected.push(*edge);
        } else {
            non_tree.push(*edge);
        }
    }

    match options.connectivity {
        ConnectivityStrategy::Mst => {}
        ConnectivityStrategy::MstLoops => {
            let cap = LOOP_EDGE_MIN.max(n / LOOP_EDGE_ROOM_DIVISOR);
            let mut added = 0;
            for edge in &non_tree {
                if added >= cap {
                    break;
                }
                if rng.gen_bool(LOOP_EDGE_CHANCE) {
                    selected.push(*edge);
                    added += 1;
                }
            }
        }
        ConnectivityStrategy::Full => selected.extend_from_slice(&non_tree),
    }

    log::debug!(
        "routing {} corridors over {} rooms ({:?})",
        selected.len(),
        n,
        options.connectivity
    );

    for edge in selected {
        carve_edge(grid, edge.a, edge.b, options, rng, outline_mode);
    }
}

/// Map id pairs onto room indices, dropping self-loops and unknown ids.
fn resolve_pairs(grid: &Grid, pairs: &[(u32, u32)]) -> Vec<(usize, usize)> {
    let index_of = |id: u32| grid.rooms.iter().position(|r| r.id == id);
    pairs
        .iter()
        .filter_map(|&(from, to)| {
            let a = index_of(from)?;
            let b = index_of(to)?;
            (a != b).then_some((a, b))
        })
        .collect()
}

/// Carve one corridor between rooms `a` and `b` and record the connection.
fn carve_edge(
    grid: &mut Grid,
    a: usize,
    b: usize,
    options: &GeneratorOptions,
    rng: &mut impl Rng,
    outline_mode: bool,
) {
    let start = grid.rooms[a].rect.center();
    let goal = grid.rooms[b].rect.center();

    let cells = match options.corridor {
        CorridorStyle::Straight => bresenham_line(start.0, start.1, goal.0, goal.1),
        CorridorStyle::LPath => l_path_cells(start, goal, rng.gen_bool(0.5)),
        CorridorStyle::Errant => {
            let foreign: Vec<Rect> = if outline_mode {
                Vec::new()
            } else {
                grid.rooms
                    .iter()
                    .enumerate()
                    .filter(|(i, _)| *i != a && *i != b)
                    .map(|(_, r)| r.rect)
                    .collect()
            };
            match tunnel_path(grid, start, goal, &foreign, options.corridor_noise, rng) {
                Some(path) => path,
                None => l_path_cells(start, goal, rng.gen_bool(0.5)),
            }
        }
    };

    for (x, y) in cells {
        grid.set_cell(x, y, CellKind::Floor);
    }

    let id_a = grid.rooms[a].id;
    let id_b = grid.rooms[b].id;
    if !grid.rooms[a].connections.contains(&id_b) {
        grid.rooms[a].connections.push(id_b);
    }
    if !grid.rooms[b].connections.contains(&id_a) {
        grid.rooms[b].connections.push(id_a);
    }
}

/// One orthogonal bend between two points, horizontal leg first or last.
fn l_path_cells(from: (i32, i32), to: (i32, i32), horizontal_first: bool) -> Vec<(i32, i32)> {
    let mut cells = Vec::new();
    let (x1, y1) = from;
    let (x2, y2) = to;
    if horizontal_first {
        for x in x1.min(x2)..=x1.max(x2) {
            cells.push((x, y1));
        }
        for y in y1.min(y2)..=y1.max(y2) {
            cells.push((x2, y));
        }
    } else {
        for y in y1.min(y2)..=y1.max(y2) {
            cells.push((x1, y));
        }
        for x in x1.min(x2)..=x1.max(x2) {
            cells.push((x, y2));
        }
    }
    cells
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rooms::Room;
    use rand::SeedableRng;
    use rand_pcg::Pcg64Mcg;
    use std::collections::HashSet;

    fn grid_with_rooms(rects: &[Rect]) -> Grid {
        let mut grid = Grid::new(40, 40);
        for (i, rect) in rects.iter().enumerate() {
            grid.fill_rect(rect, CellKind::Floor);
            grid.rooms.push(Room::new(i as u32, *rect));
        }
        grid
    }

    /// Flood fill over floor from `start`, returning every reached cell.
    fn reachable(grid: &Grid, start: (i32, i32)) -> HashSet<(i32, i32)> {
        let mut seen = HashSet::new();
        let mut stack = vec![start];
        while let Some((x, y)) = stack.pop() {
            if !grid.is_floor(x, y) || !seen.insert((x, y)) {
                continue;
            }
            for (dx, dy) in crate::grid::NEIGHBORS4 {
                stack.push((x + dx, y + dy));
            }
        }
        seen
    }

    #[test]
    fn test_union_find_cycles() {
        let mut sets = DisjointSet::new(4);
        assert!(sets.union(0, 1));
        assert!(sets.union(2, 3));
        assert!(sets.union(1, 2));
        assert!(!sets.union(0, 3));
    }

    #[test]
    fn test_mst_connects_all_rooms() {
        let rects = [
            Rect::new(2, 2, 5, 5),
            Rect::new(30, 3, 6, 5),
            Rect::new(4, 30, 5, 6),
            Rect::new(28, 28, 6, 6),
        ];
        let mut grid = grid_with_rooms(&rects);
        let mut opts = GeneratorOptions::default();
        opts.connectivity = ConnectivityStrategy::Mst;
        connect_rooms(&mut grid, &opts, &mut Pcg64Mcg::seed_from_u64(3), false, &[]);

        let seen = reachable(&grid, rects[0].center());
        for rect in &rects[1..] {
            assert!(seen.contains(&rect.center()));
        }
        // A spanning tree over 4 rooms uses 3 edges: total connection
        // entries are 6 (each edge recorded on both endpoints).
        let total: usize = grid.rooms.iter().map(|r| r.connections.len()).sum();
        assert_eq!(total, 6);
    }

    #[test]
    fn test_full_connectivity_links_every_pair() {
        let rects = [
            Rect::new(2, 2, 5, 5),
            Rect::new(30, 3, 6, 5),
            Rect::new(4, 30, 5, 6),
        ];
        let mut grid = grid_with_rooms(&rects);
        let mut opts = GeneratorOptions::default();
        opts.connectivity = ConnectivityStrategy::Full;
        connect_rooms(&mut grid, &opts, &mut Pcg64Mcg::seed_from_u64(3), false, &[]);

        for room in &grid.rooms {
            assert_eq!(room.connections.len(), 2);
        }
    }

    #[test]
    fn test_connections_are_symmetric() {
        let rects = [
            Rect::new(2, 2, 5, 5),
            Rect::new(30, 3, 6, 5),
            Rect::new(28, 28, 6, 6),
        ];
        let mut grid = grid_with_rooms(&rects);
        let opts = GeneratorOptions::default();
        connect_rooms(&mut grid, &opts, &mut Pcg64Mcg::seed_from_u64(5), false, &[]);

        for room in &grid.rooms {
            for &other in &room.connections {
                assert!(grid.room(other).unwrap().connections.contains(&room.id));
            }
        }
    }

    #[test]
    fn test_explicit_pairs_carved_verbatim() {
        let rects = [
            Rect::new(2, 2, 5, 5),
            Rect::new(30, 3, 6, 5),
            Rect::new(4, 30, 5, 6),
        ];
        let mut grid = grid_with_rooms(&rects);
        let opts = GeneratorOptions::default();
        connect_rooms(
            &mut grid,
            &opts,
            &mut Pcg64Mcg::seed_from_u64(5),
            true,
            &[(0, 2)],
        );

        assert_eq!(grid.room(0).unwrap().connections, vec![2]);
        assert!(grid.room(1).unwrap().connections.is_empty());
    }

    #[test]
    fn test_unresolvable_pairs_fall_back_to_mst() {
        let rects = [Rect::new(2, 2, 5, 5), Rect::new(30, 3, 6, 5)];
        let mut grid = grid_with_rooms(&rects);
        let opts = GeneratorOptions::default();
        connect_rooms(
            &mut grid,
            &opts,
            &mut Pcg64Mcg::seed_from_u64(5),
            true,
            &[(77, 99)],
        );

        let seen = reachable(&grid, rects[0].center());
        assert!(seen.contains(&rects[1].center()));
    }

    #[test]
    fn test_errant_corridor_connects() {
        let rects = [Rect::new(2, 2, 5, 5), Rect::new(30, 30, 6, 6)];
        let mut grid = grid_with_rooms(&rects);
        let mut opts = GeneratorOptions::default();
        opts.corridor = CorridorStyle::Errant;
        connect_rooms(&mut grid, &opts, &mut Pcg64Mcg::seed_from_u64(8), false, &[]);

        let seen = reachable(&grid, rects[0].center());
        assert!(seen.contains(&rects[1].center()));
    }

    #[test]
    fn test_single_room_is_a_no_op() {
        let mut grid = grid_with_rooms(&[Rect::new(2, 2, 5, 5)]);
        let opts = GeneratorOptions::default();
        connect_rooms(&mut grid, &opts, &mut Pcg64Mcg::seed_from_u64(5), false, &[]);
        assert!(grid.rooms[0].connections.is_empty());
    }
}
