//! computes successive generations of a world on a toroidal grid.
//!
//! every function here is pure: the previous generation is only read, the
//! next one is built into a fresh world.

use std::collections::HashSet;

use metrohash::MetroBuildHasher;

use crate::{Grid, Pos, World};

/// how candidates for the next generation are enumerated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum Scan {
    /// every position of the grid.
    #[default]
    Full,
    /// only live cells and their neighbors.
    Sparse,
}

/// number of live cells in the moore neighborhood of `pos`, in `0..=8`.
pub fn count_live_neighbors<W>(world: &W, pos: Pos, grid: Grid) -> usize
where
    W: World,
{
    pos.neighbors()
        .map(|neighbor| grid.wrap(neighbor))
        .filter(|neighbor| world.is_alive(*neighbor))
        .count()
}

/// classic rules: survival on 2 or 3 neighbors, birth on exactly 3.
pub fn is_alive_next(alive: bool, neighbor_count: usize) -> bool {
    match (alive, neighbor_count) {
        (true, 2 | 3) => true, // stay
        (false, 3) => true,    // becomes alive
        _ => false,            // dies or stays dead
    }
}

pub fn next_generation<W>(world: &W, grid: Grid) -> W
where
    W: World,
{
    let mut next = W::default();
    for pos in grid.positions() {
        let neighbor_count = count_live_neighbors(world, pos, grid);
        if is_alive_next(world.is_alive(pos), neighbor_count) {
            next.set_alive(pos, true);
        }
    }
    next
}

/// same result as [`next_generation`], visiting only the cells that can change.
pub fn next_generation_sparse<W>(world: &W, grid: Grid) -> W
where
    W: World,
{
    let candidates: HashSet<Pos, MetroBuildHasher> = world
        .actives()
        .into_iter()
        .flat_map(|pos| pos.neighbors().map(move |n| grid.wrap(n)).chain([pos]))
        .collect();

    let mut next = W::default();
    for pos in candidates {
        let neighbor_count = count_live_neighbors(world, pos, grid);
        if is_alive_next(world.is_alive(pos), neighbor_count) {
            next.set_alive(pos, true);
        }
    }
    next
}

pub fn step<W>(world: &W, grid: Grid, scan: Scan) -> W
where
    W: World,
{
    match scan {
        Scan::Full => next_generation(world, grid),
        Scan::Sparse => next_generation_sparse(world, grid),
    }
}

#[cfg(test)]
mod tests {
    use rand::{rngs::StdRng, SeedableRng};

    use super::*;
    use crate::{generator, pos, HashedWorld};

    fn world(cells: &[(i32, i32)]) -> HashedWorld {
        cells.iter().map(|&(x, y)| pos!(x, y)).collect()
    }

    #[test]
    fn test_neighbors_wrap_at_corner() {
        let grid = Grid::new(5, 5);
        let w = world(&[(4, 4), (4, 0), (0, 4), (1, 1), (2, 2)]);
        assert_eq!(count_live_neighbors(&w, pos!(0, 0), grid), 4);
    }

    #[test]
    fn test_neighbor_count_bounds() {
        let grid = Grid::new(3, 3);
        let full: HashedWorld = grid.positions().collect();
        for pos in grid.positions() {
            assert_eq!(count_live_neighbors(&full, pos, grid), 8);
        }
        let empty = HashedWorld::default();
        assert_eq!(count_live_neighbors(&empty, pos!(1, 1), grid), 0);
    }

    #[test]
    fn test_neighbor_count_ignores_self() {
        let grid = Grid::new(5, 5);
        let w = world(&[(2, 2)]);
        assert_eq!(count_live_neighbors(&w, pos!(2, 2), grid), 0);
        assert_eq!(count_live_neighbors(&w, pos!(1, 1), grid), 1);
    }

    #[test]
    fn test_rules() {
        assert!(!is_alive_next(true, 1));
        assert!(is_alive_next(true, 2));
        assert!(is_alive_next(true, 3));
        assert!(!is_alive_next(true, 4));
        assert!(!is_alive_next(false, 2));
        assert!(is_alive_next(false, 3));
        assert!(!is_alive_next(false, 4));
    }

    #[test]
    fn test_block_is_stable() {
        let grid = Grid::new(6, 6);
        let block = world(&[(1, 1), (2, 1), (1, 2), (2, 2)]);
        assert_eq!(next_generation(&block, grid), block);
    }

    #[test]
    fn test_block_is_stable_on_smallest_grid() {
        let grid = Grid::new(4, 4);
        let block = world(&[(1, 1), (2, 1), (1, 2), (2, 2)]);
        assert_eq!(next_generation(&block, grid), block);
    }

    #[test]
    fn test_blinker_oscillates() {
        let grid = Grid::new(10, 10);
        let vertical = world(&[(5, 5), (5, 6), (5, 7)]);
        let horizontal = world(&[(4, 6), (5, 6), (6, 6)]);
        let first = next_generation(&vertical, grid);
        assert_eq!(first, horizontal);
        assert_eq!(next_generation(&first, grid), vertical);
    }

    #[test]
    fn test_blinker_across_edge() {
        let grid = Grid::new(8, 8);
        let vertical = world(&[(0, 7), (0, 0), (0, 1)]);
        let horizontal = world(&[(7, 0), (0, 0), (1, 0)]);
        assert_eq!(next_generation(&vertical, grid), horizontal);
        assert_eq!(next_generation(&horizontal, grid), vertical);
    }

    #[test]
    fn test_lonely_cell_dies() {
        let grid = Grid::new(5, 5);
        let lonely = world(&[(2, 2)]);
        assert!(next_generation(&lonely, grid).is_empty());
    }

    #[test]
    fn test_input_is_untouched() {
        let grid = Grid::new(10, 10);
        let vertical = world(&[(5, 5), (5, 6), (5, 7)]);
        let copy = vertical.clone();
        let _ = next_generation(&vertical, grid);
        let _ = next_generation_sparse(&vertical, grid);
        assert_eq!(vertical, copy);
    }

    #[test]
    fn test_glider_travels_around_the_torus() {
        let grid = Grid::new(6, 6);
        let glider = world(&[(1, 0), (2, 1), (0, 2), (1, 2), (2, 2)]);
        // a glider moves one cell diagonally every 4 generations
        let mut current = glider.clone();
        for _ in 0..(4 * 6) {
            current = next_generation(&current, grid);
        }
        assert_eq!(current, glider);
    }

    #[test]
    fn test_sparse_matches_full() {
        let mut rng = StdRng::seed_from_u64(7);
        for (rows, cols) in [(5, 5), (9, 13), (16, 4), (1, 1), (2, 3)] {
            let grid = Grid::new(rows, cols);
            let mut current: HashedWorld = generator::generate_random(grid, 0.4, &mut rng);
            for _ in 0..5 {
                let full = next_generation(&current, grid);
                let sparse = next_generation_sparse(&current, grid);
                assert_eq!(full, sparse, "grid {grid}");
                current = full;
            }
        }
    }

    #[test]
    fn test_step_dispatch() {
        let grid = Grid::new(10, 10);
        let vertical = world(&[(5, 5), (5, 6), (5, 7)]);
        assert_eq!(
            step(&vertical, grid, Scan::Full),
            step(&vertical, grid, Scan::Sparse)
        );
    }
}
