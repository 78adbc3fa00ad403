//! Abstract terminal colors.
//!
//! Colors are palette indices in the classic terminal numbering: the eight
//! ANSI colors occupy 0-7, bright variants 8-15, and the rest of the xterm
//! 256-color cube follows. The canvas stores them as opaque tags; only the
//! [`Palette`](crate::palette::Palette) and the driver interpret them.

use std::fmt;

/// A terminal color index.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Color(u8);

impl Color {
    pub const BLACK: Self = Self(0);
    pub const RED: Self = Self(1);
    pub const GREEN: Self = Self(2);
    pub const YELLOW: Self = Self(3);
    pub const BLUE: Self = Self(4);
    pub const MAGENTA: Self = Self(5);
    pub const CYAN: Self = Self(6);
    pub const WHITE: Self = Self(7);

    /// Color by palette index.
    #[must_use]
    pub const fn indexed(index: u8) -> Self {
        Self(index)
    }

    /// Palette index.
    #[must_use]
    pub const fn index(self) -> u8 {
        self.0
    }

    /// Whether this is one of the 16 basic ANSI colors.
    #[must_use]
    pub const fn is_basic(self) -> bool {
        self.0 < 16
    }

    /// Parse a basic color name (`"red"`, `"white"`, ...).
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        let color = match name.to_ascii_lowercase().as_str() {
            "black" => Self::BLACK,
            "red" => Self::RED,
            "green" => Self::GREEN,
            "yellow" => Self::YELLOW,
            "blue" => Self::BLUE,
            "magenta" => Self::MAGENTA,
            "cyan" => Self::CYAN,
            "white" => Self::WHITE,
            _ => return None,
        };
        Some(color)
    }
}

impl From<u8> for Color {
    fn from(index: u8) -> Self {
        Self(index)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        const NAMES: [&str; 8] = [
            "black", "red", "green", "yellow", "blue", "magenta", "cyan", "white",
        ];
        match NAMES.get(usize::from(self.0)) {
            Some(name) => f.write_str(name),
            None => write!(f, "color{}", self.0),
        }
    }
}
