pub mod handler;
pub mod source;

pub use handler::{InputHandler, KeyAction};
pub use source::{InputSource, KeyboardInput};
