use super::{config::GameConfig, state::Position};

/// Playable lattice: cells are `cell_size` apart and span `[cell_size, bound)`
/// on each axis. Leaving one edge re-enters from the opposite one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Grid {
    cell_size: i32,
    bound_x: i32,
    bound_y: i32,
}

impl Grid {
    pub fn new(cell_size: i32, bound_x: i32, bound_y: i32) -> Self {
        debug_assert!(cell_size > 0);
        debug_assert!(bound_x > cell_size && bound_y > cell_size);
        Self {
            cell_size,
            bound_x,
            bound_y,
        }
    }

    pub fn from_config(config: &GameConfig) -> Self {
        Self::new(config.cell_size, config.bounds_width, config.bounds_height)
    }

    pub fn cell_size(&self) -> i32 {
        self.cell_size
    }

    pub fn bounds(&self) -> (i32, i32) {
        (self.bound_x, self.bound_y)
    }

    /// Number of playable columns
    pub fn columns(&self) -> usize {
        ((self.bound_x - self.cell_size) / self.cell_size) as usize
    }

    /// Number of playable rows
    pub fn rows(&self) -> usize {
        ((self.bound_y - self.cell_size) / self.cell_size) as usize
    }

    /// Total number of playable cells
    pub fn capacity(&self) -> usize {
        self.columns() * self.rows()
    }

    /// Check if a position lies inside the playable area
    pub fn contains(&self, pos: Position) -> bool {
        (self.cell_size..self.bound_x).contains(&pos.x)
            && (self.cell_size..self.bound_y).contains(&pos.y)
    }

    /// Map a position that stepped off an edge to the opposite edge.
    /// Movement is one cell per tick, so at most one wrap per axis applies.
    pub fn wrap(&self, pos: Position) -> Position {
        Position::new(
            wrap_axis(pos.x, self.cell_size, self.bound_x),
            wrap_axis(pos.y, self.cell_size, self.bound_y),
        )
    }

    /// Every playable cell, row by row
    pub fn cells(&self) -> impl Iterator<Item = Position> + '_ {
        let step = self.cell_size as usize;
        (self.cell_size..self.bound_y)
            .step_by(step)
            .flat_map(move |y| {
                (self.cell_size..self.bound_x)
                    .step_by(step)
                    .map(move |x| Position::new(x, y))
            })
    }
}

fn wrap_axis(value: i32, cell: i32, bound: i32) -> i32 {
    if value < cell {
        bound - cell
    } else if value >= bound {
        cell
    } else {
        value
    }
}
