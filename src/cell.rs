//! Per-cell canvas state.

use crate::geometry::SubCellMode;
use std::num::NonZeroU8;

/// Content of an occupied character cell.
///
/// An absent cell is represented by the absence of a `Cell` in the grid; a
/// mask of zero cannot be constructed, so an occupied pixel cell always has
/// at least one lit sub-cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Cell {
    /// Lit sub-cell bits.
    Pixels(NonZeroU8),
    /// A character placed directly, bypassing pixel semantics.
    Text(char),
}

impl Cell {
    /// Pixel cell for `mask`, or `None` when the mask is empty.
    #[must_use]
    pub fn pixels(mask: u8) -> Option<Self> {
        NonZeroU8::new(mask).map(Self::Pixels)
    }

    /// The pixel mask, if this is a pixel cell.
    #[must_use]
    pub fn mask(self) -> Option<u8> {
        match self {
            Self::Pixels(mask) => Some(mask.get()),
            Self::Text(_) => None,
        }
    }

    #[must_use]
    pub fn is_text(self) -> bool {
        matches!(self, Self::Text(_))
    }

    /// Whether the sub-cell `bit` reads as lit. Text cells are always lit.
    #[must_use]
    pub fn is_lit(self, bit: u8) -> bool {
        match self {
            Self::Pixels(mask) => mask.get() & bit != 0,
            Self::Text(_) => true,
        }
    }

    /// Rendered glyph.
    #[must_use]
    pub fn glyph(self, mode: SubCellMode) -> char {
        match self {
            Self::Pixels(mask) => mode.glyph(mask.get()),
            Self::Text(c) => c,
        }
    }
}

/// Glyph for an optional cell: absent cells render as a space.
#[must_use]
pub fn glyph_or_blank(cell: Option<Cell>, mode: SubCellMode) -> char {
    cell.map_or(' ', |c| c.glyph(mode))
}
