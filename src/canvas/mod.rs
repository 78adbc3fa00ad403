//! Sparse pixel canvas with a static background layer and a dynamic layer.
//!
//! Pixel coordinates are mapped onto character cells (see
//! [`geometry`](crate::geometry)); each cell is absent, a non-empty pixel
//! mask, or a text override. Mutators act on the dynamic layer only; the
//! static layer is seeded with [`Canvas::set_static`] and restored with
//! [`Canvas::clear`], [`Canvas::reset`] and [`Canvas::reset_color`].
//!
//! Both layers share their grids through `Arc`, so `clear` and `set_static`
//! are O(1) and the first mutation after either copies the grid once.

mod render;

pub use render::Bounds;

use crate::cell::{Cell, glyph_or_blank};
use crate::color::Color;
use crate::error::Result;
use crate::geometry::{CellPos, Coordinate, PixelPos, SubCellMode};
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

/// One character row, keyed by column.
type Row = BTreeMap<i64, Cell>;
/// Rows keyed by row number. Rows are never empty.
type Grid = BTreeMap<i64, Row>;
type ColorGrid = HashMap<CellPos, Color>;

/// Canvas configuration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CanvasOptions {
    /// Separator placed between rows by [`Canvas::frame`].
    pub line_ending: String,
    /// Sub-cell addressing and glyph set.
    pub mode: SubCellMode,
}

impl Default for CanvasOptions {
    fn default() -> Self {
        Self {
            line_ending: "\n".to_string(),
            mode: SubCellMode::Quadrant,
        }
    }
}

#[derive(Clone, Debug, Default)]
struct Layer {
    cells: Arc<Grid>,
    colors: Arc<ColorGrid>,
}

impl Layer {
    fn cell(&self, pos: CellPos) -> Option<Cell> {
        self.cells.get(&pos.row)?.get(&pos.col).copied()
    }

    fn put(&mut self, pos: CellPos, cell: Option<Cell>) {
        if self.cell(pos) == cell {
            return;
        }
        let grid = Arc::make_mut(&mut self.cells);
        match cell {
            Some(cell) => {
                grid.entry(pos.row).or_default().insert(pos.col, cell);
            }
            None => {
                if let Some(row) = grid.get_mut(&pos.row) {
                    row.remove(&pos.col);
                    if row.is_empty() {
                        grid.remove(&pos.row);
                    }
                }
            }
        }
    }

    fn color(&self, pos: CellPos) -> Option<Color> {
        self.colors.get(&pos).copied()
    }

    fn put_color(&mut self, pos: CellPos, color: Option<Color>) {
        if self.color(pos) == color {
            return;
        }
        let colors = Arc::make_mut(&mut self.colors);
        match color {
            Some(color) => colors.insert(pos, color),
            None => colors.remove(&pos),
        };
    }
}

/// The pixel surface.
#[derive(Clone, Debug, Default)]
pub struct Canvas {
    options: CanvasOptions,
    static_layer: Layer,
    dynamic: Layer,
}

impl Canvas {
    /// Create an empty quadrant-mode canvas.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty canvas with the given options.
    #[must_use]
    pub fn with_options(options: CanvasOptions) -> Self {
        Self {
            options,
            ..Self::default()
        }
    }

    /// Create an empty canvas using `mode` for sub-cell addressing.
    #[must_use]
    pub fn with_mode(mode: SubCellMode) -> Self {
        Self::with_options(CanvasOptions {
            mode,
            ..CanvasOptions::default()
        })
    }

    #[must_use]
    pub fn options(&self) -> &CanvasOptions {
        &self.options
    }

    #[must_use]
    pub fn mode(&self) -> SubCellMode {
        self.options.mode
    }

    /// Draw `frame` onto the dynamic layer, then make the result the static
    /// background.
    ///
    /// Stops at the first coordinate that fails to normalize; points drawn
    /// before it stay on the dynamic layer and the static layer is left
    /// untouched.
    pub fn set_static<I, X, Y>(&mut self, frame: I) -> Result<()>
    where
        I: IntoIterator<Item = (X, Y, Color)>,
        X: Coordinate,
        Y: Coordinate,
    {
        for (x, y, color) in frame {
            let pos = PixelPos::new(x, y)?;
            self.set_pixel(pos);
            self.dynamic.put_color(pos.cell(), Some(color));
        }
        self.static_layer = self.dynamic.clone();
        Ok(())
    }

    /// Reset the dynamic layer to the static background.
    pub fn clear(&mut self) {
        self.dynamic = self.static_layer.clone();
    }

    /// Restore the cell containing `x, y` to its static content.
    ///
    /// Text overrides are left alone.
    pub fn reset<X: Coordinate, Y: Coordinate>(&mut self, x: X, y: Y) -> Result<()> {
        self.reset_cell(PixelPos::new(x, y)?.cell());
        Ok(())
    }

    /// Restore the color of the cell containing `x, y` to its static color.
    ///
    /// Cells holding a text override keep their color.
    pub fn reset_color<X: Coordinate, Y: Coordinate>(&mut self, x: X, y: Y) -> Result<()> {
        self.reset_cell_color(PixelPos::new(x, y)?.cell());
        Ok(())
    }

    /// Light the pixel at `x, y`. No-op on a text override.
    pub fn set<X: Coordinate, Y: Coordinate>(&mut self, x: X, y: Y) -> Result<()> {
        self.set_pixel(PixelPos::new(x, y)?);
        Ok(())
    }

    /// Clear the pixel at `x, y`.
    ///
    /// A text override in the containing cell is removed entirely.
    pub fn unset<X: Coordinate, Y: Coordinate>(&mut self, x: X, y: Y) -> Result<()> {
        self.unset_pixel(PixelPos::new(x, y)?);
        Ok(())
    }

    /// Flip the pixel at `x, y`. A text override counts as lit.
    pub fn toggle<X: Coordinate, Y: Coordinate>(&mut self, x: X, y: Y) -> Result<()> {
        let pos = PixelPos::new(x, y)?;
        if self.get_pixel(pos) {
            self.unset_pixel(pos);
        } else {
            self.set_pixel(pos);
        }
        Ok(())
    }

    /// Whether the pixel at `x, y` is lit. A text override reads as lit.
    pub fn get<X: Coordinate, Y: Coordinate>(&self, x: X, y: Y) -> Result<bool> {
        Ok(self.get_pixel(PixelPos::new(x, y)?))
    }

    /// Place `text` one character per column, starting at the cell that
    /// contains `x, y`.
    pub fn set_text<X: Coordinate, Y: Coordinate>(&mut self, x: X, y: Y, text: &str) -> Result<()> {
        let start = PixelPos::new(x, y)?.cell();
        for (col, c) in (start.col..).zip(text.chars()) {
            self.dynamic.put(CellPos::new(start.row, col), Some(Cell::Text(c)));
        }
        Ok(())
    }

    /// Tag the cell containing `x, y` with `color`.
    pub fn set_color<X: Coordinate, Y: Coordinate>(
        &mut self,
        x: X,
        y: Y,
        color: Color,
    ) -> Result<()> {
        self.dynamic.put_color(PixelPos::new(x, y)?.cell(), Some(color));
        Ok(())
    }

    /// Color of the cell containing `x, y`.
    pub fn color<X: Coordinate, Y: Coordinate>(&self, x: X, y: Y) -> Result<Option<Color>> {
        Ok(self.color_at(PixelPos::new(x, y)?.cell()))
    }

    /// Color of a cell on the dynamic layer.
    #[must_use]
    pub fn color_at(&self, pos: CellPos) -> Option<Color> {
        self.dynamic.color(pos)
    }

    /// Content of a cell on the dynamic layer.
    #[must_use]
    pub fn cell(&self, pos: CellPos) -> Option<Cell> {
        self.dynamic.cell(pos)
    }

    /// Content of a cell on the static layer.
    #[must_use]
    pub fn static_cell(&self, pos: CellPos) -> Option<Cell> {
        self.static_layer.cell(pos)
    }

    /// Rendered glyph of a cell (a space when absent).
    #[must_use]
    pub fn glyph_at(&self, pos: CellPos) -> char {
        glyph_or_blank(self.cell(pos), self.options.mode)
    }

    /// Whether the dynamic layer holds no cells.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.dynamic.cells.is_empty()
    }

    /// Occupied cells of the dynamic layer in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = (CellPos, Cell)> + '_ {
        self.dynamic.cells.iter().flat_map(|(&row, cols)| {
            cols.iter()
                .map(move |(&col, &cell)| (CellPos::new(row, col), cell))
        })
    }

    pub(crate) fn get_pixel(&self, pos: PixelPos) -> bool {
        self.dynamic
            .cell(pos.cell())
            .is_some_and(|cell| cell.is_lit(self.options.mode.bit(pos)))
    }

    pub(crate) fn set_pixel(&mut self, pos: PixelPos) {
        let cell = pos.cell();
        let bit = self.options.mode.bit(pos);
        let next = match self.dynamic.cell(cell) {
            Some(Cell::Text(_)) => return,
            Some(Cell::Pixels(mask)) => mask.get() | bit,
            None => bit,
        };
        self.dynamic.put(cell, Cell::pixels(next));
    }

    pub(crate) fn unset_pixel(&mut self, pos: PixelPos) {
        let cell = pos.cell();
        let next = match self.dynamic.cell(cell) {
            Some(Cell::Pixels(mask)) => Cell::pixels(mask.get() & !self.options.mode.bit(pos)),
            Some(Cell::Text(_)) | None => None,
        };
        self.dynamic.put(cell, next);
    }

    pub(crate) fn reset_cell(&mut self, pos: CellPos) {
        if self.dynamic.cell(pos).is_some_and(Cell::is_text) {
            return;
        }
        let restored = self.static_layer.cell(pos);
        self.dynamic.put(pos, restored);
    }

    pub(crate) fn reset_cell_color(&mut self, pos: CellPos) {
        if self.dynamic.cell(pos).is_some_and(Cell::is_text) {
            return;
        }
        let restored = self.static_layer.color(pos);
        self.dynamic.put_color(pos, restored);
    }

    pub(crate) fn set_cell_color(&mut self, pos: CellPos, color: Color) {
        self.dynamic.put_color(pos, Some(color));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_get_unset() {
        let mut canvas = Canvas::new();
        assert!(!canvas.get(3, 5).unwrap());
        canvas.set(3, 5).unwrap();
        assert!(canvas.get(3, 5).unwrap());
        // Neighbouring quadrant in the same cell stays dark.
        assert!(!canvas.get(2, 5).unwrap());
        canvas.unset(3, 5).unwrap();
        assert!(!canvas.get(3, 5).unwrap());
        assert!(canvas.is_empty());
    }

    #[test]
    fn test_set_merges_bits() {
        let mut canvas = Canvas::new();
        canvas.set(0, 0).unwrap();
        canvas.set(1, 0).unwrap();
        canvas.set(0, 3).unwrap();
        let cell = canvas.cell(CellPos::new(0, 0)).unwrap();
        assert_eq!(cell.mask(), Some(0x1 | 0x2 | 0x4));
    }

    #[test]
    fn test_unset_purges_empty_cells_and_rows() {
        let mut canvas = Canvas::new();
        canvas.set(0, 0).unwrap();
        canvas.set(1, 1).unwrap();
        canvas.unset(0, 0).unwrap();
        assert_eq!(canvas.cell(CellPos::new(0, 0)).and_then(Cell::mask), Some(0x2));
        canvas.unset(1, 1).unwrap();
        assert_eq!(canvas.cell(CellPos::new(0, 0)), None);
        assert_eq!(canvas.cells().count(), 0);
        assert!(canvas.rows(&Bounds::default()).is_empty());
    }

    #[test]
    fn test_unset_absent_cell_is_noop() {
        let mut canvas = Canvas::new();
        canvas.unset(10, 10).unwrap();
        assert!(canvas.is_empty());
    }

    #[test]
    fn test_toggle() {
        let mut canvas = Canvas::new();
        canvas.toggle(4, 4).unwrap();
        assert!(canvas.get(4, 4).unwrap());
        canvas.toggle(4, 4).unwrap();
        assert!(!canvas.get(4, 4).unwrap());
    }

    #[test]
    fn test_text_override_blocks_pixels() {
        let mut canvas = Canvas::new();
        canvas.set_text(0, 0, "A").unwrap();
        canvas.set(1, 1).unwrap();
        assert_eq!(canvas.cell(CellPos::new(0, 0)), Some(Cell::Text('A')));
        // Any pixel of the cell reads lit.
        assert!(canvas.get(0, 3).unwrap());
    }

    #[test]
    fn test_unset_clears_text_override() {
        let mut canvas = Canvas::new();
        canvas.set_text(0, 0, "A").unwrap();
        canvas.unset(1, 2).unwrap();
        assert_eq!(canvas.cell(CellPos::new(0, 0)), None);
    }

    #[test]
    fn test_toggle_on_text_removes_it() {
        let mut canvas = Canvas::new();
        canvas.set_text(2, 4, "Z").unwrap();
        canvas.toggle(2, 4).unwrap();
        assert!(!canvas.get(2, 4).unwrap());
        assert!(canvas.is_empty());
    }

    #[test]
    fn test_set_text_spans_columns() {
        let mut canvas = Canvas::new();
        canvas.set(2, 0).unwrap();
        canvas.set_text(2, 0, "hey").unwrap();
        assert_eq!(canvas.cell(CellPos::new(0, 1)), Some(Cell::Text('h')));
        assert_eq!(canvas.cell(CellPos::new(0, 2)), Some(Cell::Text('e')));
        assert_eq!(canvas.cell(CellPos::new(0, 3)), Some(Cell::Text('y')));
    }

    #[test]
    fn test_float_coordinates_round() {
        let mut canvas = Canvas::new();
        canvas.set(0.4, 0.6).unwrap();
        assert!(canvas.get(0, 1).unwrap());
        assert!(canvas.set(f64::NAN, 0).is_err());
        assert!(canvas.get(0, f32::INFINITY).is_err());
    }

    #[test]
    fn test_colors_are_independent_of_pixels() {
        let mut canvas = Canvas::new();
        canvas.set_color(5, 5, Color::RED).unwrap();
        assert_eq!(canvas.color(4, 6).unwrap(), Some(Color::RED));
        assert!(!canvas.get(5, 5).unwrap());
        assert!(canvas.is_empty());
    }

    #[test]
    fn test_static_layer_round_trip() {
        let mut canvas = Canvas::new();
        canvas.set_static([(0, 0, Color::BLUE)]).unwrap();
        canvas.set(1, 0).unwrap();
        canvas.set_color(1, 0, Color::RED).unwrap();
        canvas.set(8, 8).unwrap();

        canvas.clear();

        assert!(canvas.get(0, 0).unwrap());
        assert!(!canvas.get(1, 0).unwrap());
        assert!(!canvas.get(8, 8).unwrap());
        assert_eq!(canvas.color(0, 0).unwrap(), Some(Color::BLUE));
    }

    #[test]
    fn test_reset_restores_single_cell() {
        let mut canvas = Canvas::new();
        canvas.set_static([(0, 0, Color::GREEN)]).unwrap();
        canvas.set(1, 0).unwrap();
        canvas.set(4, 0).unwrap();
        canvas.set_color(0, 0, Color::RED).unwrap();

        canvas.reset(1, 0).unwrap();
        canvas.reset_color(1, 0).unwrap();

        assert_eq!(canvas.cell(CellPos::new(0, 0)).and_then(Cell::mask), Some(0x1));
        assert_eq!(canvas.color(0, 0).unwrap(), Some(Color::GREEN));
        // Other cells are untouched.
        assert!(canvas.get(4, 0).unwrap());
    }

    #[test]
    fn test_reset_to_absent_static_removes_cell() {
        let mut canvas = Canvas::new();
        canvas.set(6, 6).unwrap();
        canvas.set_color(6, 6, Color::YELLOW).unwrap();
        canvas.reset(6, 6).unwrap();
        canvas.reset_color(6, 6).unwrap();
        assert!(canvas.is_empty());
        assert_eq!(canvas.color(6, 6).unwrap(), None);
    }

    #[test]
    fn test_reset_skips_text_override() {
        let mut canvas = Canvas::new();
        canvas.set_static([(0, 0, Color::GREEN)]).unwrap();
        canvas.set_text(0, 0, "!").unwrap();
        canvas.set_color(0, 0, Color::RED).unwrap();
        canvas.reset(0, 0).unwrap();
        canvas.reset_color(0, 0).unwrap();
        assert_eq!(canvas.cell(CellPos::new(0, 0)), Some(Cell::Text('!')));
        assert_eq!(canvas.color(0, 0).unwrap(), Some(Color::RED));
    }

    #[test]
    fn test_mutations_do_not_leak_into_static_layer() {
        let mut canvas = Canvas::new();
        canvas.set_static([(0, 0, Color::WHITE)]).unwrap();
        canvas.unset(0, 0).unwrap();
        assert_eq!(canvas.cell(CellPos::new(0, 0)), None);
        assert!(canvas.static_cell(CellPos::new(0, 0)).is_some());
    }

    #[test]
    fn test_braille_mode_addresses_eight_dots() {
        let mut canvas = Canvas::with_mode(SubCellMode::Braille);
        for y in 0..4 {
            for x in 0..2 {
                canvas.set(x, y).unwrap();
            }
        }
        assert_eq!(canvas.cell(CellPos::new(0, 0)).and_then(Cell::mask), Some(0xFF));
        canvas.unset(0, 3).unwrap();
        assert!(!canvas.get(0, 3).unwrap());
        assert!(canvas.get(0, 2).unwrap());
        assert_eq!(canvas.glyph_at(CellPos::new(0, 0)), '\u{28BF}');
    }

    #[test]
    fn test_cells_iterates_in_row_major_order() {
        let mut canvas = Canvas::new();
        canvas.set(4, 4).unwrap();
        canvas.set(0, 4).unwrap();
        canvas.set(2, 0).unwrap();
        let positions: Vec<_> = canvas.cells().map(|(pos, _)| pos).collect();
        assert_eq!(
            positions,
            vec![CellPos::new(0, 1), CellPos::new(1, 0), CellPos::new(1, 2)]
        );
    }
}
