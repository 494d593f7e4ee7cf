//! Wrap Snake - a Snake game on a wrapping grid
//!
//! This library provides:
//! - Core game logic (game module): grid, snake, food placement, sessions
//! - Input abstraction and keyboard mapping (input module)
//! - TUI rendering (render module)
//! - In-memory play statistics (metrics module)
//! - The interactive terminal loop (modes module)

pub mod game;
pub mod input;
pub mod metrics;
pub mod modes;
pub mod render;
