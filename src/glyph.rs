//! Sub-cell mask → glyph tables.
//!
//! Quadrant masks map onto the Unicode block elements (U+2580-U+259F), braille
//! masks onto the Braille patterns block (U+2800-U+28FF).

use crate::geometry::SubCellMode;

/// Full quadrant mask: every sub-cell lit.
pub const FULL_BLOCK: u8 = 0x0F;

/// Unicode block characters indexed by quadrant mask.
///
/// - `' '` (0b0000): absent, never stored
/// - `'▘'` (0b0001): Top-left only
/// - `'▝'` (0b0010): Top-right only
/// - `'▀'` (0b0011): Top row
/// - `'▖'` (0b0100): Bottom-left only
/// - `'▌'` (0b0101): Left column
/// - `'▞'` (0b0110): Top-right + bottom-left
/// - `'▛'` (0b0111): All except bottom-right
/// - `'▗'` (0b1000): Bottom-right only
/// - `'▚'` (0b1001): Top-left + bottom-right
/// - `'▐'` (0b1010): Right column
/// - `'▜'` (0b1011): All except bottom-left
/// - `'▄'` (0b1100): Bottom row
/// - `'▙'` (0b1101): All except top-right
/// - `'▟'` (0b1110): All except top-left
/// - `'█'` (0b1111): Full block
pub const QUADRANT_CHARS: [char; 16] = [
    ' ', '▘', '▝', '▀', '▖', '▌', '▞', '▛', '▗', '▚', '▐', '▜', '▄', '▙', '▟', '█',
];

/// First code point of the Braille patterns block (no dots raised).
pub const BRAILLE_BASE: u32 = 0x2800;

/// Braille pattern for a dot mask.
#[must_use]
pub const fn braille_char(mask: u8) -> char {
    match char::from_u32(BRAILLE_BASE + mask as u32) {
        Some(c) => c,
        None => ' ',
    }
}

/// Quadrant block for a mask; bits above `0x0F` are ignored.
#[must_use]
pub const fn quadrant_char(mask: u8) -> char {
    QUADRANT_CHARS[(mask & FULL_BLOCK) as usize]
}

impl SubCellMode {
    /// Glyph for a sub-cell mask in this mode.
    #[must_use]
    pub const fn glyph(self, mask: u8) -> char {
        match self {
            Self::Quadrant => quadrant_char(mask),
            Self::Braille => braille_char(mask),
        }
    }
}
