//! [`Driver`] for ANSI/VT terminals.

use super::capabilities::Capabilities;
use super::raw::{RawModeGuard, is_tty_fd, terminal_size};
use super::Driver;
use crate::ansi::{self, ColorMode};
use crate::color::Color;
use crate::error::{Error, Result};
use crate::input::{KeyDecoder, KeyEvent};
use crate::palette::PairIndex;
use std::collections::HashMap;
use std::io::{self, Read, Stdin, Stdout, Write};
use std::os::unix::io::{AsRawFd, RawFd};
use unicode_width::UnicodeWidthChar;

const READ_CHUNK: usize = 64;

/// Drives an ANSI terminal through a writer and a reader.
///
/// Output is buffered until [`Driver::refresh`]. Cursor moves and SGR
/// changes are only emitted when the target cell or pair differs from
/// the last one written.
pub struct AnsiDriver<W: Write, R: Read> {
    writer: W,
    reader: R,
    out: Vec<u8>,
    capabilities: Capabilities,
    color_mode: ColorMode,
    pairs: HashMap<PairIndex, (Color, Color)>,
    current_pair: Option<PairIndex>,
    cursor: Option<(u16, u16)>,
    decoder: KeyDecoder,
    raw_fd: Option<RawFd>,
    raw_guard: Option<RawModeGuard>,
    use_alt_screen: bool,
    alt_screen: bool,
}

impl AnsiDriver<Stdout, Stdin> {
    /// Driver for the process's own terminal, with detected capabilities.
    #[must_use]
    pub fn stdio() -> Self {
        let stdin = io::stdin();
        let fd = stdin.as_raw_fd();
        let mut driver = Self::new(io::stdout(), stdin).with_capabilities(Capabilities::detect());
        driver.raw_fd = Some(fd);
        driver
    }
}

impl<W: Write, R: Read> AnsiDriver<W, R> {
    /// Driver over arbitrary streams; raw mode is not touched.
    pub fn new(writer: W, reader: R) -> Self {
        let capabilities = Capabilities::default();
        Self {
            writer,
            reader,
            out: Vec::with_capacity(4096),
            color_mode: ColorMode::from(capabilities.color),
            capabilities,
            pairs: HashMap::new(),
            current_pair: None,
            cursor: None,
            decoder: KeyDecoder::new(),
            raw_fd: None,
            raw_guard: None,
            use_alt_screen: true,
            alt_screen: false,
        }
    }

    #[must_use]
    pub fn with_capabilities(mut self, capabilities: Capabilities) -> Self {
        self.color_mode = ColorMode::from(capabilities.color);
        self.capabilities = capabilities;
        self
    }

    /// Whether to draw on the alternate screen (default: yes).
    #[must_use]
    pub fn with_alt_screen(mut self, enabled: bool) -> Self {
        self.use_alt_screen = enabled;
        self
    }

    #[must_use]
    pub fn capabilities(&self) -> &Capabilities {
        &self.capabilities
    }

    /// The underlying writer.
    #[must_use]
    pub fn writer(&self) -> &W {
        &self.writer
    }

    /// Check if the terminal is in raw mode.
    #[must_use]
    pub fn is_raw_mode(&self) -> bool {
        self.raw_guard.is_some()
    }

    fn write_str(&mut self, s: &str) {
        self.out.extend_from_slice(s.as_bytes());
    }

    fn flush_out(&mut self) -> io::Result<()> {
        if !self.out.is_empty() {
            self.writer.write_all(&self.out)?;
            self.out.clear();
        }
        self.writer.flush()
    }

    fn apply_pair(&mut self, pair: PairIndex) -> io::Result<()> {
        self.write_str(ansi::RESET);
        if let Some(&(fg, bg)) = self.pairs.get(&pair) {
            ansi::write_fg_color(&mut self.out, fg, self.color_mode)?;
            ansi::write_bg_color(&mut self.out, bg, self.color_mode)?;
        }
        self.current_pair = Some(pair);
        Ok(())
    }
}

impl<W: Write, R: Read> Driver for AnsiDriver<W, R> {
    fn enter(&mut self) -> Result<()> {
        if let Some(fd) = self.raw_fd {
            if !is_tty_fd(fd) {
                return Err(Error::NotATerminal);
            }
            if self.raw_guard.is_none() {
                self.raw_guard = Some(RawModeGuard::new(fd)?);
            }
        }

        if self.use_alt_screen {
            self.write_str(ansi::ALT_SCREEN_ON);
            self.alt_screen = true;
        }
        self.write_str(ansi::CLEAR_SCREEN);
        self.write_str(ansi::CURSOR_HOME);
        self.write_str(ansi::CURSOR_HIDE);
        self.write_str(ansi::KEYPAD_ON);
        self.cursor = Some((0, 0));
        self.current_pair = None;
        self.flush_out()?;
        Ok(())
    }

    fn exit(&mut self) -> Result<()> {
        self.write_str(ansi::RESET);
        self.write_str(ansi::KEYPAD_OFF);
        self.write_str(ansi::CURSOR_SHOW);
        if self.alt_screen {
            self.write_str(ansi::ALT_SCREEN_OFF);
            self.alt_screen = false;
        }
        self.cursor = None;
        self.current_pair = None;

        // Every step runs; the first failure is reported.
        let flushed = self.flush_out();
        let restored = match self.raw_guard.take() {
            Some(mut guard) => guard.restore(),
            None => Ok(()),
        };
        flushed?;
        restored?;
        Ok(())
    }

    fn write_cell(&mut self, row: u16, col: u16, ch: char, pair: PairIndex) -> Result<()> {
        if self.cursor != Some((row, col)) {
            ansi::write_cursor_position(&mut self.out, row, col)?;
        }
        if self.current_pair != Some(pair) {
            self.apply_pair(pair)?;
        }

        // Control characters would move the terminal's cursor behind our back.
        let ch = if ch.is_control() { ' ' } else { ch };
        let mut buf = [0u8; 4];
        self.out.extend_from_slice(ch.encode_utf8(&mut buf).as_bytes());

        let width = u16::try_from(ch.width().unwrap_or(1)).unwrap_or(1);
        self.cursor = Some((row, col.saturating_add(width)));
        Ok(())
    }

    fn refresh(&mut self) -> Result<()> {
        self.flush_out()?;
        Ok(())
    }

    fn poll_key(&mut self) -> Result<Option<KeyEvent>> {
        if let Some(key) = self.decoder.next_key() {
            return Ok(Some(key));
        }
        // Reading a cooked-mode terminal would block until Enter.
        if self.raw_fd.is_some() && self.raw_guard.is_none() {
            return Ok(None);
        }

        let mut buf = [0u8; READ_CHUNK];
        match self.reader.read(&mut buf) {
            Ok(n) => self.decoder.feed(&buf[..n]),
            Err(e)
                if matches!(
                    e.kind(),
                    io::ErrorKind::WouldBlock | io::ErrorKind::Interrupted
                ) => {}
            Err(e) => return Err(e.into()),
        }
        Ok(self.decoder.next_key())
    }

    fn register_color_pair(&mut self, pair: PairIndex, fg: Color, bg: Color) -> Result<()> {
        if self.pairs.insert(pair, (fg, bg)) != Some((fg, bg)) && self.current_pair == Some(pair) {
            self.current_pair = None;
        }
        Ok(())
    }

    fn supports_color_remap(&self) -> bool {
        self.capabilities.can_remap_colors()
    }

    fn size(&self) -> Result<(u16, u16)> {
        Ok(terminal_size())
    }
}
