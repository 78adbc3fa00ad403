//! `termux2d` - pixel graphics and animation in the terminal
//!
//! A sparse canvas of sub-cell pixels rendered with Unicode quadrant blocks
//! (or braille dots), a static/dynamic layer split for cheap frame resets,
//! line and polygon generators, and an animation engine that only redraws
//! the cells a frame changes.

// Crate-level lint configuration
#![warn(unsafe_code)] // Unsafe code needs justification (required for termios FFI)
#![allow(clippy::cast_possible_truncation)] // Intentional coordinate casts
#![allow(clippy::cast_sign_loss)] // Intentional coordinate conversions
#![allow(clippy::cast_precision_loss)] // Pixel coordinates fit comfortably in f64
#![allow(clippy::cast_possible_wrap)] // Intentional coordinate conversions
#![allow(clippy::module_name_repetitions)] // Allow canvas::CanvasOptions etc
#![allow(clippy::missing_errors_doc)] // Docs WIP
#![allow(clippy::missing_panics_doc)] // Docs WIP
#![allow(clippy::missing_const_for_fn)] // Many functions could be const, not critical
#![allow(clippy::doc_markdown)] // Allow technical names without backticks
#![allow(clippy::use_self)] // Allow explicit type names in impl blocks
#![allow(clippy::needless_pass_by_value)] // Allow pass by value for small Copy types
#![allow(clippy::suboptimal_flops)] // Standard math notation is clearer than mul_add
#![allow(clippy::collapsible_if)] // Sometimes nested ifs are clearer
#![allow(clippy::cast_lossless)] // as casts are fine for primitive widening
#![allow(clippy::items_after_statements)] // Common pattern in tests

pub mod animation;
pub mod ansi;
pub mod canvas;
pub mod cell;
pub mod color;
pub mod error;
pub mod event;
pub mod geometry;
pub mod glyph;
pub mod input;
pub mod palette;
pub mod shapes;
pub mod terminal;

// Re-export core types at crate root
pub use canvas::{Bounds, Canvas, CanvasOptions};
pub use cell::Cell;
pub use color::Color;
pub use error::{Error, Result};
pub use event::{LogLevel, emit_event, emit_log, set_event_callback, set_log_callback};
pub use geometry::{CellPos, Coordinate, PixelPos, SubCellMode, normalize, quadrant_bit, to_cell};
pub use palette::{PairIndex, Palette};
pub use shapes::{Line, Polygon, line, polygon};

// Re-export animation types
pub use animation::{
    AnimationOptions, Animator, FrameStats, RunSummary, animate, animate_in_terminal,
};

// Re-export input types
pub use input::{KeyCode, KeyDecoder, KeyEvent, KeyModifiers};

// Re-export terminal types
pub use ansi::ColorMode;
pub use terminal::{
    AnsiDriver, Capabilities, ColorSupport, Driver, RawModeGuard, Session, is_tty, terminal_size,
    terminal_size_in_pixels,
};
