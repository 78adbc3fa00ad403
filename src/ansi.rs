//! ANSI escape sequence generation.

use crate::color::Color;
use crate::terminal::ColorSupport;
use std::io::{self, Write};

/// Reset all attributes to default.
pub const RESET: &str = "\x1b[0m";

/// Clear entire screen.
pub const CLEAR_SCREEN: &str = "\x1b[2J";

/// Move cursor to home position (1,1).
pub const CURSOR_HOME: &str = "\x1b[H";

/// Hide cursor.
pub const CURSOR_HIDE: &str = "\x1b[?25l";

/// Show cursor.
pub const CURSOR_SHOW: &str = "\x1b[?25h";

/// Enable alternative screen buffer.
pub const ALT_SCREEN_ON: &str = "\x1b[?1049h";

/// Disable alternative screen buffer.
pub const ALT_SCREEN_OFF: &str = "\x1b[?1049l";

/// Application cursor keys (DECCKM) and application keypad (DECKPAM).
pub const KEYPAD_ON: &str = "\x1b[?1h\x1b=";

/// Normal cursor keys and numeric keypad (DECKPNM).
pub const KEYPAD_OFF: &str = "\x1b[?1l\x1b>";

/// Color output mode for SGR sequences.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ColorMode {
    /// 256-color palette.
    #[default]
    Color256,
    /// 16-color (basic ANSI).
    Color16,
    /// No color output.
    NoColor,
}

impl From<ColorSupport> for ColorMode {
    fn from(support: ColorSupport) -> Self {
        match support {
            ColorSupport::TrueColor | ColorSupport::Extended => ColorMode::Color256,
            ColorSupport::Basic => ColorMode::Color16,
            ColorSupport::None => ColorMode::NoColor,
        }
    }
}

/// Write a u8 as decimal digits without formatting overhead.
#[inline]
fn write_u8_decimal(w: &mut impl Write, n: u8) -> io::Result<()> {
    if n >= 100 {
        w.write_all(&[b'0' + n / 100, b'0' + (n / 10) % 10, b'0' + n % 10])
    } else if n >= 10 {
        w.write_all(&[b'0' + n / 10, b'0' + n % 10])
    } else {
        w.write_all(&[b'0' + n])
    }
}

/// Write a u32 as decimal digits without formatting overhead.
#[inline]
fn write_u32_decimal(w: &mut impl Write, n: u32) -> io::Result<()> {
    let mut buf = [0u8; 10];
    let mut i = buf.len();
    let mut val = n;
    loop {
        i -= 1;
        buf[i] = b'0' + (val % 10) as u8;
        val /= 10;
        if val == 0 {
            break;
        }
    }
    w.write_all(&buf[i..])
}

/// SGR parameter for a color: `base` + index for the eight ANSI colors,
/// `bright_base` for 8-15, the extended form otherwise.
fn write_color(
    w: &mut impl Write,
    color: Color,
    mode: ColorMode,
    base: u8,
    bright_base: u8,
    extended: &[u8],
) -> io::Result<()> {
    let idx = color.index();
    let idx = match mode {
        ColorMode::NoColor => return Ok(()),
        // Basic terminals only know 16 colors; fold the cube onto them.
        ColorMode::Color16 if idx >= 16 => idx % 8,
        _ => idx,
    };
    w.write_all(b"\x1b[")?;
    if idx < 8 {
        write_u8_decimal(w, base + idx)?;
    } else if idx < 16 {
        write_u8_decimal(w, bright_base + idx - 8)?;
    } else {
        w.write_all(extended)?;
        write_u8_decimal(w, idx)?;
    }
    w.write_all(b"m")
}

/// Write SGR sequence for a foreground color.
pub fn write_fg_color(w: &mut impl Write, color: Color, mode: ColorMode) -> io::Result<()> {
    write_color(w, color, mode, 30, 90, b"38;5;")
}

/// Write SGR sequence for a background color.
pub fn write_bg_color(w: &mut impl Write, color: Color, mode: ColorMode) -> io::Result<()> {
    write_color(w, color, mode, 40, 100, b"48;5;")
}

/// Write cursor position sequence (0-indexed input, 1-indexed output).
pub fn write_cursor_position(w: &mut impl Write, row: u16, col: u16) -> io::Result<()> {
    w.write_all(b"\x1b[")?;
    write_u32_decimal(w, u32::from(row) + 1)?;
    w.write_all(b";")?;
    write_u32_decimal(w, u32::from(col) + 1)?;
    w.write_all(b"H")
}
