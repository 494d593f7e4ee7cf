pub mod play;

pub use play::{PlayMode, drive_tick};
