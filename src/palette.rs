//! Color → color-pair leasing.
//!
//! Every distinct color gets one pair index, handed out in order of first
//! use and never reused. The driver learns about the pairs in
//! [`Palette::start_colors`].

use crate::color::Color;
use crate::error::Result;
use crate::event::{LogLevel, emit_log};
use crate::terminal::Driver;
use std::collections::BTreeMap;

/// Driver-level color pair slot.
pub type PairIndex = u16;

/// The terminal's default pair; always available, never registered.
pub const DEFAULT_PAIR: PairIndex = 0;

/// Offset from a color's pair to its solid (color-on-color) pair.
pub const SOLID_PAIR_OFFSET: PairIndex = 10;

/// Colors leased before any [`Palette::add_color`] call.
pub const DEFAULT_COLORS: [(Color, PairIndex); 5] = [
    (Color::WHITE, 0),
    (Color::RED, 1),
    (Color::GREEN, 2),
    (Color::BLUE, 3),
    (Color::YELLOW, 4),
];

/// Maps colors to leased pair indices.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Palette {
    pairs: BTreeMap<Color, PairIndex>,
    next_pair: PairIndex,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            pairs: DEFAULT_COLORS.into_iter().collect(),
            next_pair: DEFAULT_COLORS.len() as PairIndex,
        }
    }
}

impl Palette {
    /// Palette holding the default colors.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Lease a pair for `color` unless it already has one; returns its pair.
    pub fn add_color(&mut self, color: Color) -> PairIndex {
        if let Some(&pair) = self.pairs.get(&color) {
            return pair;
        }
        let pair = self.next_pair;
        self.pairs.insert(color, pair);
        self.next_pair += 1;
        pair
    }

    /// Pair leased to `color`.
    #[must_use]
    pub fn pair(&self, color: Color) -> Option<PairIndex> {
        self.pairs.get(&color).copied()
    }

    /// Pair for an optional cell color, falling back to [`DEFAULT_PAIR`].
    #[must_use]
    pub fn pair_or_default(&self, color: Option<Color>) -> PairIndex {
        color.and_then(|c| self.pair(c)).unwrap_or(DEFAULT_PAIR)
    }

    #[must_use]
    pub fn contains(&self, color: Color) -> bool {
        self.pairs.contains_key(&color)
    }

    /// Number of leased colors.
    #[must_use]
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Leased colors and their pairs, ordered by color.
    pub fn iter(&self) -> impl Iterator<Item = (Color, PairIndex)> + '_ {
        self.pairs.iter().map(|(&color, &pair)| (color, pair))
    }

    /// Register every leased color with the driver.
    ///
    /// Each color gets a foreground-on-black pair at its index (except the
    /// default pair) and a solid pair at index + [`SOLID_PAIR_OFFSET`].
    /// Nothing is registered when the driver cannot remap colors.
    pub fn start_colors<D: Driver + ?Sized>(&self, driver: &mut D) -> Result<()> {
        if !driver.supports_color_remap() {
            emit_log(LogLevel::Debug, "palette: color remapping unsupported, skipping pairs");
            return Ok(());
        }

        for (color, pair) in self.iter() {
            if pair != DEFAULT_PAIR {
                driver.register_color_pair(pair, color, Color::BLACK)?;
            }
            driver.register_color_pair(pair + SOLID_PAIR_OFFSET, color, color)?;
        }
        emit_log(
            LogLevel::Debug,
            &format!("palette: registered {} colors", self.len()),
        );
        Ok(())
    }
}
