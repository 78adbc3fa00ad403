//! Shared test doubles.
//!
//! `RecordingDriver` implements [`Driver`] without a terminal: it logs every
//! call, keeps a virtual screen of the last glyph written per cell, and
//! replays queued key presses.

#![allow(dead_code)] // Shared test helper; not every integration test uses every method
#![allow(clippy::pedantic)] // Test infra prioritizes clarity over pedantry

use std::collections::{BTreeMap, VecDeque};
use termux2d::{Color, Driver, Error, KeyEvent, PairIndex, Result};

/// One driver call.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Call {
    Enter,
    Exit,
    Write {
        row: u16,
        col: u16,
        ch: char,
        pair: PairIndex,
    },
    Refresh,
    RegisterPair {
        pair: PairIndex,
        fg: Color,
        bg: Color,
    },
}

#[derive(Debug)]
pub struct RecordingDriver {
    pub calls: Vec<Call>,
    pub screen: BTreeMap<(u16, u16), (char, PairIndex)>,
    pub keys: VecDeque<KeyEvent>,
    pub color_remap: bool,
    pub fail_enter: bool,
    pub fail_writes: bool,
    pub size: (u16, u16),
}

impl Default for RecordingDriver {
    fn default() -> Self {
        Self {
            calls: Vec::new(),
            screen: BTreeMap::new(),
            keys: VecDeque::new(),
            color_remap: true,
            fail_enter: false,
            fail_writes: false,
            size: (80, 25),
        }
    }
}

impl RecordingDriver {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Driver whose terminal cannot show colors.
    #[must_use]
    pub fn monochrome() -> Self {
        Self {
            color_remap: false,
            ..Self::default()
        }
    }

    pub fn with_keys(keys: impl IntoIterator<Item = KeyEvent>) -> Self {
        Self {
            keys: keys.into_iter().collect(),
            ..Self::default()
        }
    }

    /// Glyph currently shown at a cell (a space when never written).
    pub fn glyph(&self, row: u16, col: u16) -> char {
        self.screen.get(&(row, col)).map_or(' ', |&(ch, _)| ch)
    }

    pub fn pair(&self, row: u16, col: u16) -> Option<PairIndex> {
        self.screen.get(&(row, col)).map(|&(_, pair)| pair)
    }

    pub fn writes(&self) -> Vec<(u16, u16, char, PairIndex)> {
        self.calls
            .iter()
            .filter_map(|call| match *call {
                Call::Write { row, col, ch, pair } => Some((row, col, ch, pair)),
                _ => None,
            })
            .collect()
    }

    pub fn count(&self, wanted: &Call) -> usize {
        self.calls.iter().filter(|call| *call == wanted).count()
    }

    pub fn registered_pairs(&self) -> Vec<(PairIndex, Color, Color)> {
        self.calls
            .iter()
            .filter_map(|call| match *call {
                Call::RegisterPair { pair, fg, bg } => Some((pair, fg, bg)),
                _ => None,
            })
            .collect()
    }
}

fn broken_pipe() -> Error {
    Error::Io(std::io::Error::new(
        std::io::ErrorKind::BrokenPipe,
        "recording driver closed",
    ))
}

impl Driver for RecordingDriver {
    fn enter(&mut self) -> Result<()> {
        self.calls.push(Call::Enter);
        if self.fail_enter {
            return Err(Error::NotATerminal);
        }
        Ok(())
    }

    fn exit(&mut self) -> Result<()> {
        self.calls.push(Call::Exit);
        Ok(())
    }

    fn write_cell(&mut self, row: u16, col: u16, ch: char, pair: PairIndex) -> Result<()> {
        if self.fail_writes {
            return Err(broken_pipe());
        }
        self.calls.push(Call::Write { row, col, ch, pair });
        self.screen.insert((row, col), (ch, pair));
        Ok(())
    }

    fn refresh(&mut self) -> Result<()> {
        self.calls.push(Call::Refresh);
        Ok(())
    }

    fn poll_key(&mut self) -> Result<Option<KeyEvent>> {
        Ok(self.keys.pop_front())
    }

    fn register_color_pair(&mut self, pair: PairIndex, fg: Color, bg: Color) -> Result<()> {
        self.calls.push(Call::RegisterPair { pair, fg, bg });
        Ok(())
    }

    fn supports_color_remap(&self) -> bool {
        self.color_remap
    }

    fn size(&self) -> Result<(u16, u16)> {
        Ok(self.size)
    }
}
