//! Pixel coordinate normalization and pixel → cell mapping.
//!
//! The virtual pixel space is twice as dense as the character grid
//! horizontally and four times as dense vertically. Every character cell
//! covers a 2×4 pixel block; quadrant mode addresses it as 2×2 (each
//! quadrant spanning two pixel rows), braille mode addresses all eight dots.

use crate::error::{Error, Result};

/// Quadrant bit layout, indexed by `[(y % 4) / 2][x % 2]`.
///
/// ```text
///  ,___,
///  |1 2|
///  |4 8|
///  `````
/// ```
pub const QUADRANT_MAP: [[u8; 2]; 2] = [[0x01, 0x02], [0x04, 0x08]];

/// Braille dot layout, indexed by `[y % 4][x % 2]`.
pub const BRAILLE_MAP: [[u8; 2]; 4] = [[0x01, 0x08], [0x02, 0x10], [0x04, 0x20], [0x40, 0x80]];

/// Pixel columns covered by one character cell.
pub const CELL_PIXEL_WIDTH: i64 = 2;
/// Pixel rows covered by one character cell.
pub const CELL_PIXEL_HEIGHT: i64 = 4;

/// A value usable as a pixel coordinate.
///
/// Integers pass through, floats round to the nearest integer (ties to
/// even). Values that do not denote an integer-representable real number
/// are rejected with [`Error::UnsupportedCoordinate`].
pub trait Coordinate: Copy {
    /// Convert to an integer pixel coordinate.
    fn to_pixel(self) -> Result<i64>;
}

macro_rules! int_coordinate {
    ($($t:ty),* $(,)?) => {
        $(
            impl Coordinate for $t {
                #[inline]
                fn to_pixel(self) -> Result<i64> {
                    i64::try_from(self).map_err(|_| Error::unsupported(self))
                }
            }
        )*
    };
}

int_coordinate!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize, i128, u128);

impl Coordinate for f64 {
    #[inline]
    fn to_pixel(self) -> Result<i64> {
        let rounded = self.round_ties_even();
        // i64::MAX is not representable as f64; the cast below saturates.
        if rounded.is_finite() && rounded >= i64::MIN as f64 && rounded < i64::MAX as f64 {
            Ok(rounded as i64)
        } else {
            Err(Error::unsupported(self))
        }
    }
}

impl Coordinate for f32 {
    #[inline]
    fn to_pixel(self) -> Result<i64> {
        f64::from(self).to_pixel().map_err(|_| Error::unsupported(self))
    }
}

/// Normalize a single coordinate.
pub fn normalize<C: Coordinate>(v: C) -> Result<i64> {
    v.to_pixel()
}

/// A normalized pixel position.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PixelPos {
    pub x: i64,
    pub y: i64,
}

impl PixelPos {
    /// Normalize both coordinates.
    pub fn new<X: Coordinate, Y: Coordinate>(x: X, y: Y) -> Result<Self> {
        Ok(Self {
            x: x.to_pixel()?,
            y: y.to_pixel()?,
        })
    }

    /// The character cell containing this pixel.
    #[must_use]
    pub fn cell(self) -> CellPos {
        CellPos {
            row: self.y.div_euclid(CELL_PIXEL_HEIGHT),
            col: self.x.div_euclid(CELL_PIXEL_WIDTH),
        }
    }
}

/// A character-grid position.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CellPos {
    pub row: i64,
    pub col: i64,
}

impl CellPos {
    #[must_use]
    pub const fn new(row: i64, col: i64) -> Self {
        Self { row, col }
    }

    /// Top-left pixel covered by this cell.
    #[must_use]
    pub fn origin_pixel(self) -> PixelPos {
        PixelPos {
            x: self.col * CELL_PIXEL_WIDTH,
            y: self.row * CELL_PIXEL_HEIGHT,
        }
    }

    /// Screen coordinates, or `None` when the cell lies above or left of
    /// the origin (or beyond `u16`).
    #[must_use]
    pub fn to_screen(self) -> Option<(u16, u16)> {
        let row = u16::try_from(self.row).ok()?;
        let col = u16::try_from(self.col).ok()?;
        Some((row, col))
    }
}

/// How the 2×4 pixel block of a cell is subdivided.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum SubCellMode {
    /// 2×2 quadrants rendered with Unicode block elements.
    #[default]
    Quadrant,
    /// 2×4 dots rendered with Unicode Braille patterns.
    Braille,
}

impl SubCellMode {
    /// Bit selecting the sub-cell that contains `pos`.
    #[must_use]
    pub fn bit(self, pos: PixelPos) -> u8 {
        let col = pos.x.rem_euclid(CELL_PIXEL_WIDTH) as usize;
        let dot_row = pos.y.rem_euclid(CELL_PIXEL_HEIGHT) as usize;
        match self {
            Self::Quadrant => QUADRANT_MAP[dot_row / 2][col],
            Self::Braille => BRAILLE_MAP[dot_row][col],
        }
    }
}

/// Convert `x, y` to a cell position.
pub fn to_cell<X: Coordinate, Y: Coordinate>(x: X, y: Y) -> Result<CellPos> {
    Ok(PixelPos::new(x, y)?.cell())
}

/// Quadrant bit for `x, y`: one of `0x1`, `0x2`, `0x4`, `0x8`.
pub fn quadrant_bit<X: Coordinate, Y: Coordinate>(x: X, y: Y) -> Result<u8> {
    Ok(SubCellMode::Quadrant.bit(PixelPos::new(x, y)?))
}
