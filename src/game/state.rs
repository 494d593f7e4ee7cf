use super::direction::Direction;
use serde::{Deserialize, Serialize};
use std::collections::{HashSet, VecDeque};

/// A position on the canvas, in canvas units
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Move position by delta
    pub fn moved_by(&self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Move position `step` units in a direction
    pub fn moved_in_direction(&self, direction: Direction, step: i32) -> Self {
        let (dx, dy) = direction.delta();
        self.moved_by(dx * step, dy * step)
    }
}

/// The snake in the game
///
/// Segments are ordered tail first, head last.
#[derive(Debug, Clone, PartialEq)]
pub struct Snake {
    body: VecDeque<Position>,
    direction: Direction,
    step: i32,
    score: u32,
}

impl Snake {
    /// Create a snake whose tail sits at `tail` and whose body extends
    /// `length` cells in `direction`, heading that way.
    pub fn new(tail: Position, direction: Direction, length: usize, step: i32) -> Self {
        debug_assert!(length >= 1, "snake needs at least one segment");

        let mut body = VecDeque::with_capacity(length);
        let mut pos = tail;
        for _ in 0..length {
            body.push_back(pos);
            pos = pos.moved_in_direction(direction, step);
        }

        Self {
            body,
            direction,
            step,
            score: 0,
        }
    }

    /// Build a snake from explicit segments, tail first
    pub fn from_segments(
        segments: impl IntoIterator<Item = Position>,
        direction: Direction,
        step: i32,
    ) -> Self {
        let body: VecDeque<Position> = segments.into_iter().collect();
        debug_assert!(!body.is_empty(), "snake needs at least one segment");

        Self {
            body,
            direction,
            step,
            score: 0,
        }
    }

    /// Get the head position
    pub fn head(&self) -> Position {
        *self.body.back().expect("snake has at least one segment")
    }

    /// Get the tail position
    pub fn tail(&self) -> Position {
        *self.body.front().expect("snake has at least one segment")
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    /// Request a new heading. A 180-degree turn is ignored.
    pub fn pending_direction(&mut self, requested: Direction) {
        if self.direction.is_opposite(requested) {
            return;
        }
        self.direction = requested;
    }

    /// Where the head would land after one move, before any wrapping
    pub fn next_head_position(&self) -> Position {
        self.head().moved_in_direction(self.direction, self.step)
    }

    /// Move one cell: drop the tail, push the next head
    pub fn advance(&mut self) {
        let next = self.next_head_position();
        self.body.pop_front();
        self.body.push_back(next);
    }

    /// Add a head-side segment at `position`, keeping the tail, and score a point
    pub fn grow(&mut self, position: Position) {
        self.body.push_back(position);
        self.score += 1;
    }

    /// Replace the head position (used to store the wrapped head)
    pub fn set_head(&mut self, position: Position) {
        if let Some(head) = self.body.back_mut() {
            *head = position;
        }
    }

    /// Check if any segment sits on `pos`
    pub fn contains_segment(&self, pos: Position) -> bool {
        self.body.contains(&pos)
    }

    /// Check if `pos` hits a segment that will still be occupied after a
    /// regular move, i.e. anything but the tail
    pub fn collides_after_move(&self, pos: Position) -> bool {
        self.body.iter().skip(1).any(|&segment| segment == pos)
    }

    /// Iterate over segments, tail first
    pub fn segments(&self) -> impl Iterator<Item = &Position> + '_ {
        self.body.iter()
    }

    /// Every cell the snake covers
    pub fn occupied_cells(&self) -> HashSet<Position> {
        self.body.iter().copied().collect()
    }

    /// Get the length of the snake
    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Check if the snake is empty (should never happen in practice)
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }
}
