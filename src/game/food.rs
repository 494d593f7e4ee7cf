//! Food placement
//!
//! Food is drawn uniformly from the playable lattice. Random draws are retried
//! a bounded number of times; after that the free cells are scanned and one
//! of them is picked, so placement always terminates even on a crowded board.

use super::{grid::Grid, state::Position};
use log::{debug, warn};
use rand::{Rng, SeedableRng, rngs::StdRng, seq::SliceRandom};
use std::collections::HashSet;

/// Random draws attempted before falling back to a free-cell scan
pub const MAX_RANDOM_ATTEMPTS: usize = 64;

pub struct FoodSpawner<R: Rng = StdRng> {
    rng: R,
}

impl FoodSpawner<StdRng> {
    /// Spawner seeded from OS entropy
    pub fn from_entropy() -> Self {
        Self::new(StdRng::from_entropy())
    }

    /// Deterministic spawner
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> FoodSpawner<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    /// Pick a free cell, or `None` if every cell is in `excluded`
    pub fn spawn(&mut self, excluded: &HashSet<Position>, grid: &Grid) -> Option<Position> {
        if excluded.len() < grid.capacity() {
            for _ in 0..MAX_RANDOM_ATTEMPTS {
                let pos = self.random_cell(grid);
                if !excluded.contains(&pos) {
                    debug!("Food spawned at ({}, {})", pos.x, pos.y);
                    return Some(pos);
                }
            }
            warn!(
                "No free cell after {} draws, scanning {} cells",
                MAX_RANDOM_ATTEMPTS,
                grid.capacity()
            );
        }

        let free: Vec<Position> = grid.cells().filter(|p| !excluded.contains(p)).collect();
        let pos = free.choose(&mut self.rng).copied();
        if let Some(pos) = pos {
            debug!("Food spawned at ({}, {}) from free-cell scan", pos.x, pos.y);
        }
        pos
    }

    fn random_cell(&mut self, grid: &Grid) -> Position {
        let cell = grid.cell_size();
        let col = self.rng.gen_range(0..grid.columns()) as i32;
        let row = self.rng.gen_range(0..grid.rows()) as i32;
        Position::new(cell + col * cell, cell + row * cell)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_grid() -> Grid {
        // 3 x 2 playable cells
        Grid::new(32, 128, 96)
    }

    #[test]
    fn test_spawn_on_lattice() {
        let grid = Grid::new(32, 768, 576);
        let mut spawner = FoodSpawner::seeded(7);
        let empty = HashSet::new();

        for _ in 0..200 {
            let pos = spawner.spawn(&empty, &grid).unwrap();
            assert!(grid.contains(pos));
            assert_eq!(pos.x % 32, 0);
            assert_eq!(pos.y % 32, 0);
        }
    }

    #[test]
    fn test_never_spawns_on_excluded() {
        let grid = Grid::new(32, 768, 576);
        let mut spawner = FoodSpawner::seeded(11);
        let excluded: HashSet<Position> = grid.cells().take(300).collect();

        for _ in 0..200 {
            let pos = spawner.spawn(&excluded, &grid).unwrap();
            assert!(!excluded.contains(&pos));
        }
    }

    #[test]
    fn test_single_free_cell_is_found() {
        let grid = small_grid();
        let free = Position::new(96, 64);
        let excluded: HashSet<Position> = grid.cells().filter(|&p| p != free).collect();
        let mut spawner = FoodSpawner::seeded(3);

        for _ in 0..20 {
            assert_eq!(spawner.spawn(&excluded, &grid), Some(free));
        }
    }

    #[test]
    fn test_full_board_returns_none() {
        let grid = small_grid();
        let excluded: HashSet<Position> = grid.cells().collect();
        let mut spawner = FoodSpawner::seeded(5);
        assert_eq!(spawner.spawn(&excluded, &grid), None);
    }

    #[test]
    fn test_seeded_spawner_is_reproducible() {
        let grid = Grid::new(32, 768, 576);
        let empty = HashSet::new();
        let mut a = FoodSpawner::seeded(42);
        let mut b = FoodSpawner::seeded(42);

        for _ in 0..20 {
            assert_eq!(a.spawn(&empty, &grid), b.spawn(&empty, &grid));
        }
    }
}
