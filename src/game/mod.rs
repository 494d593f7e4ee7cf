//! Core game logic module for Snake
//!
//! This module contains the simulation on a wrapping grid without any I/O or
//! rendering dependencies. Front-ends drive it one tick at a time and draw
//! from a [`Snapshot`].

pub mod config;
pub mod direction;
pub mod food;
pub mod grid;
pub mod session;
pub mod snapshot;
pub mod state;

// Re-export commonly used types
pub use config::GameConfig;
pub use direction::Direction;
pub use food::FoodSpawner;
pub use grid::Grid;
pub use session::{EndCause, GameSession, SessionStatus, TickResult};
pub use snapshot::Snapshot;
pub use state::{Position, Snake};
