//! Dead-end erosion after routing.
//!
//! Must run after connectivity: `all` will happily eat an entire corridor
//! branch back to its junction, including one that was the only route into
//! a room carved before routing committed.

use rand::Rng;

use crate::constants::PARTIAL_PRUNE_CHANCE;
use crate::grid::{CellKind, Grid};
use crate::options::DeadEndPolicy;

/// Erode floor cells with at most one floor neighbor, per policy.
pub fn prune_dead_ends(grid: &mut Grid, policy: DeadEndPolicy, rng: &mut impl Rng) {
    match policy {
        DeadEndPolicy::None => {}
        DeadEndPolicy::Some => {
            // Single pass: shorten stubs rather than eliminating them.
            for (x, y) in collect_dead_ends(grid) {
                if rng.gen_bool(PARTIAL_PRUNE_CHANCE) {
                    grid.set_cell(x, y, CellKind::Empty);
                }
            }
        }
        DeadEndPolicy::All => loop {
            let tips = collect_dead_ends(grid);
            if tips.is_empty() {
                break;
            }
            for (x, y) in tips {
                grid.set_cell(x, y, CellKind::Empty);
            }
        },
    }
}

fn collect_dead_ends(grid: &Grid) -> Vec<(i32, i32)> {
    let mut tips = Vec::new();
    for y in 0..grid.height {
        for x in 0..grid.width {
            if grid.is_floor(x, y) && grid.floor_degree(x, y) <= 1 {
                tips.push((x, y));
            }
        }
    }
    tips
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg64Mcg;

    /// A 4x4 floor block with a 5-cell corridor stub hanging off it.
    fn block_with_stub() -> Grid {
        let mut grid = Grid::new(20, 20);
        grid.fill_rect(&crate::grid::Rect::new(2, 2, 4, 4), CellKind::Floor);
        for x in 6..11 {
            grid.set_cell(x, 3, CellKind::Floor);
        }
        grid
    }

    #[test]
    fn test_none_is_a_no_op() {
        let mut grid = block_with_stub();
        let before = grid.floor_count();
        prune_dead_ends(&mut grid, DeadEndPolicy::None, &mut Pcg64Mcg::seed_from_u64(0));
        assert_eq!(grid.floor_count(), before);
    }

    #[test]
    fn test_all_removes_whole_stub() {
        let mut grid = block_with_stub();
        prune_dead_ends(&mut grid, DeadEndPolicy::All, &mut Pcg64Mcg::seed_from_u64(0));
        for x in 6..11 {
            assert!(!grid.is_floor(x, 3), "stub cell {} survived", x);
        }
        // The block itself has no degree-1 cells and stays intact.
        assert_eq!(grid.floor_count(), 16);
    }

    #[test]
    fn test_some_is_single_pass() {
        // Only the stub's tip has degree 1, so one pass can remove at most
        // one cell regardless of the coin flips.
        let mut grid = block_with_stub();
        let before = grid.floor_count();
        prune_dead_ends(&mut grid, DeadEndPolicy::Some, &mut Pcg64Mcg::seed_from_u64(1));
        let removed = before - grid.floor_count();
        assert!(removed <= 1);
    }
}
