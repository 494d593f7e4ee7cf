use super::state::Position;

/// Read-only view of a session, taken after a tick for drawing
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    /// Body segments, tail first
    pub segments: Vec<Position>,
    pub food: Option<Position>,
    /// Candidate head for the debug overlay; only set in debug mode
    pub next_head: Option<Position>,
    pub game_over: bool,
    pub score: u32,
    pub ticks: u64,
    pub cell_size: i32,
    /// Exclusive upper bounds of the playable area
    pub bounds: (i32, i32),
    pub canvas_width: i32,
    pub canvas_height: i32,
}

impl Snapshot {
    pub fn head(&self) -> Option<Position> {
        self.segments.last().copied()
    }

    /// Canvas size in cells (columns, rows)
    pub fn canvas_cells(&self) -> (usize, usize) {
        (
            (self.canvas_width / self.cell_size) as usize,
            (self.canvas_height / self.cell_size) as usize,
        )
    }

    /// Whether a canvas cell lies in the playable area
    pub fn is_playable_cell(&self, column: usize, row: usize) -> bool {
        let x = column as i32 * self.cell_size;
        let y = row as i32 * self.cell_size;
        x >= self.cell_size && x < self.bounds.0 && y >= self.cell_size && y < self.bounds.1
    }

    /// Cell coordinates of a canvas position
    pub fn cell_of(&self, pos: Position) -> (usize, usize) {
        (
            (pos.x / self.cell_size) as usize,
            (pos.y / self.cell_size) as usize,
        )
    }
}
