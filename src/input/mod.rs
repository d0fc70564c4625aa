pub mod buffer;
pub mod handler;

pub use buffer::{InputBuffer, InputSource};
pub use handler::{InputHandler, KeyAction};
