//! Text rendering of the dynamic layer.

use super::Canvas;
use crate::cell::glyph_or_blank;
use crate::geometry::{CELL_PIXEL_HEIGHT, CELL_PIXEL_WIDTH};
use std::fmt;

/// Optional pixel-space bounding box for [`Canvas::rows`].
///
/// `min_*` are inclusive and `max_*` exclusive. Missing bounds fall back to
/// the extent of the occupied cells; a missing `max_x` is resolved per row,
/// so rows end at their last occupied cell.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Bounds {
    pub min_x: Option<i64>,
    pub min_y: Option<i64>,
    pub max_x: Option<i64>,
    pub max_y: Option<i64>,
}

impl Bounds {
    /// Fully specified bounding box.
    #[must_use]
    pub const fn new(min_x: i64, min_y: i64, max_x: i64, max_y: i64) -> Self {
        Self {
            min_x: Some(min_x),
            min_y: Some(min_y),
            max_x: Some(max_x),
            max_y: Some(max_y),
        }
    }
}

impl Canvas {
    /// Render the dynamic layer as one string per character row.
    ///
    /// Rows with no occupied cells render empty, absent cells as a space.
    /// An empty canvas yields no rows regardless of `bounds`.
    #[must_use]
    pub fn rows(&self, bounds: &Bounds) -> Vec<String> {
        let grid = &*self.dynamic.cells;
        let (Some((&first_row, _)), Some((&last_row, _))) =
            (grid.first_key_value(), grid.last_key_value())
        else {
            return Vec::new();
        };

        let min_row = bounds
            .min_y
            .map_or(first_row, |y| y.div_euclid(CELL_PIXEL_HEIGHT));
        let max_row = bounds
            .max_y
            .map_or(last_row, |y| y.saturating_sub(1).div_euclid(CELL_PIXEL_HEIGHT));
        let min_col = match bounds.min_x {
            Some(x) => x.div_euclid(CELL_PIXEL_WIDTH),
            None => match grid.values().filter_map(|row| row.keys().next()).min() {
                Some(&col) => col,
                None => return Vec::new(),
            },
        };
        let mode = self.options.mode;

        (min_row..=max_row)
            .map(|row_num| {
                let Some(row) = grid.get(&row_num) else {
                    return String::new();
                };
                let max_col = match bounds.max_x {
                    Some(x) => x.saturating_sub(1).div_euclid(CELL_PIXEL_WIDTH),
                    None => row.keys().next_back().copied().unwrap_or(min_col),
                };
                (min_col..=max_col)
                    .map(|col| glyph_or_blank(row.get(&col).copied(), mode))
                    .collect()
            })
            .collect()
    }

    /// [`rows`](Self::rows) joined with the configured line ending.
    #[must_use]
    pub fn frame(&self, bounds: &Bounds) -> String {
        self.rows(bounds).join(&self.options.line_ending)
    }
}

impl fmt::Display for Canvas {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.frame(&Bounds::default()))
    }
}
