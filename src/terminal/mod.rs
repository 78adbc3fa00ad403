//! Terminal drivers and the scoped terminal session.
//!
//! A [`Driver`] is the small set of primitives the animation engine needs:
//! put one glyph at a cell with a color pair, flush, poll a key. The real
//! implementation is [`AnsiDriver`]; tests substitute a recorder.

mod ansi_driver;
mod capabilities;
mod raw;

pub use ansi_driver::AnsiDriver;
pub use capabilities::{Capabilities, ColorSupport};
pub use raw::{
    FALLBACK_COLUMNS, FALLBACK_ROWS, RawModeGuard, is_tty, query_terminal_size, terminal_size,
    terminal_size_in_pixels,
};

use crate::color::Color;
use crate::error::Result;
use crate::event::{LogLevel, emit_log};
use crate::input::KeyEvent;
use crate::palette::PairIndex;
use std::collections::VecDeque;

/// Output/input primitives of a character-cell terminal.
pub trait Driver {
    /// Prepare the terminal for drawing (raw input, hidden cursor, ...).
    fn enter(&mut self) -> Result<()>;

    /// Undo [`Driver::enter`]. Called even when `enter` failed part way.
    fn exit(&mut self) -> Result<()>;

    /// Draw one glyph at a zero-based screen cell using a color pair.
    fn write_cell(&mut self, row: u16, col: u16, ch: char, pair: PairIndex) -> Result<()>;

    /// Make everything written so far visible.
    fn refresh(&mut self) -> Result<()>;

    /// Next pending key press, without blocking.
    fn poll_key(&mut self) -> Result<Option<KeyEvent>>;

    /// Define a color pair.
    fn register_color_pair(&mut self, pair: PairIndex, fg: Color, bg: Color) -> Result<()>;

    /// Whether color pairs have any visible effect.
    fn supports_color_remap(&self) -> bool;

    /// Screen size as `(columns, rows)`.
    fn size(&self) -> Result<(u16, u16)>;
}

impl<D: Driver + ?Sized> Driver for &mut D {
    fn enter(&mut self) -> Result<()> {
        (**self).enter()
    }

    fn exit(&mut self) -> Result<()> {
        (**self).exit()
    }

    fn write_cell(&mut self, row: u16, col: u16, ch: char, pair: PairIndex) -> Result<()> {
        (**self).write_cell(row, col, ch, pair)
    }

    fn refresh(&mut self) -> Result<()> {
        (**self).refresh()
    }

    fn poll_key(&mut self) -> Result<Option<KeyEvent>> {
        (**self).poll_key()
    }

    fn register_color_pair(&mut self, pair: PairIndex, fg: Color, bg: Color) -> Result<()> {
        (**self).register_color_pair(pair, fg, bg)
    }

    fn supports_color_remap(&self) -> bool {
        (**self).supports_color_remap()
    }

    fn size(&self) -> Result<(u16, u16)> {
        (**self).size()
    }
}

/// An entered terminal, restored when dropped.
///
/// Teardown runs exactly once: on [`Session::end`], on drop (including
/// while unwinding), or immediately when entering fails.
pub struct Session<D: Driver> {
    driver: D,
    pending: VecDeque<KeyEvent>,
    active: bool,
}

impl<D: Driver> Session<D> {
    /// Enter the terminal.
    ///
    /// If entering fails the driver is torn down before the error is
    /// returned, so a half-configured terminal is never left behind.
    pub fn begin(mut driver: D) -> Result<Self> {
        if let Err(err) = driver.enter() {
            if let Err(exit_err) = driver.exit() {
                emit_log(
                    LogLevel::Error,
                    &format!("session: teardown after failed enter also failed: {exit_err}"),
                );
            }
            return Err(err);
        }
        emit_log(LogLevel::Debug, "session: terminal entered");

        Ok(Self {
            driver,
            pending: VecDeque::new(),
            active: true,
        })
    }

    #[must_use]
    pub fn driver(&self) -> &D {
        &self.driver
    }

    pub fn driver_mut(&mut self) -> &mut D {
        &mut self.driver
    }

    /// Next key press: keys set aside during an animation first, then the
    /// driver's.
    pub fn poll_key(&mut self) -> Result<Option<KeyEvent>> {
        if let Some(key) = self.pending.pop_front() {
            return Ok(Some(key));
        }
        self.driver.poll_key()
    }

    /// Keep a key for a later [`Session::poll_key`].
    pub(crate) fn stash_key(&mut self, key: KeyEvent) {
        self.pending.push_back(key);
    }

    /// Screen size as `(columns, rows)`.
    pub fn size(&self) -> Result<(u16, u16)> {
        self.driver.size()
    }

    /// Whether the terminal is still entered.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Restore the terminal now, reporting failure.
    pub fn end(mut self) -> Result<()> {
        self.teardown()
    }

    fn teardown(&mut self) -> Result<()> {
        if !self.active {
            return Ok(());
        }
        self.active = false;
        let result = self.driver.exit();
        match &result {
            Ok(()) => emit_log(LogLevel::Debug, "session: terminal restored"),
            Err(err) => emit_log(LogLevel::Error, &format!("session: teardown failed: {err}")),
        }
        result
    }
}

impl<D: Driver> Drop for Session<D> {
    fn drop(&mut self) {
        let _ = self.teardown();
    }
}
