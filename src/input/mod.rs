//! Keyboard input.

mod decoder;
mod keyboard;

pub use decoder::KeyDecoder;
pub use keyboard::{KeyCode, KeyEvent, KeyModifiers};
