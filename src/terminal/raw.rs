//! Raw mode and terminal size on Unix terminals via termios.
//!
//! # Safety
//! This module uses unsafe code for FFI calls to libc termios and ioctl
//! functions.

#![allow(unsafe_code)]
#![allow(clippy::borrow_as_ptr)]

use std::env;
use std::io;
use std::os::unix::io::{AsRawFd, RawFd};

/// Columns assumed when the size cannot be determined.
pub const FALLBACK_COLUMNS: u16 = 80;
/// Rows assumed when the size cannot be determined.
pub const FALLBACK_ROWS: u16 = 25;

/// Saved terminal state, restored on drop.
#[derive(Debug)]
pub struct RawModeGuard {
    fd: RawFd,
    original: libc::termios,
    restored: bool,
}

impl RawModeGuard {
    /// Put `fd` into non-blocking raw input mode.
    ///
    /// Echo and line buffering are disabled and reads return immediately
    /// with whatever is available. Signal keys are delivered as input, so
    /// Ctrl+C arrives as byte `0x03` instead of killing the process with the
    /// terminal still in raw mode.
    pub fn new(fd: RawFd) -> io::Result<Self> {
        let original = get_termios(fd)?;
        let mut raw = original;

        raw.c_iflag &= !(libc::BRKINT | libc::ICRNL | libc::INPCK | libc::ISTRIP | libc::IXON);
        raw.c_oflag &= !libc::OPOST;
        raw.c_cflag |= libc::CS8;
        raw.c_lflag &= !(libc::ECHO | libc::ICANON | libc::IEXTEN | libc::ISIG);
        raw.c_cc[libc::VMIN] = 0;
        raw.c_cc[libc::VTIME] = 0;

        set_termios(fd, &raw)?;

        Ok(Self {
            fd,
            original,
            restored: false,
        })
    }

    /// Restore the saved state now, reporting failure.
    pub fn restore(&mut self) -> io::Result<()> {
        if self.restored {
            return Ok(());
        }
        self.restored = true;
        set_termios(self.fd, &self.original)
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        let _ = self.restore();
    }
}

/// Check if the given file descriptor is a TTY.
#[must_use]
pub fn is_tty<F: AsRawFd>(fd: &F) -> bool {
    is_tty_fd(fd.as_raw_fd())
}

pub(crate) fn is_tty_fd(fd: RawFd) -> bool {
    // SAFETY: isatty is safe to call with any fd
    unsafe { libc::isatty(fd) == 1 }
}

/// Query the size of the terminal on stdout as `(columns, rows)`.
///
/// Fails when stdout is not a terminal or reports zero dimensions.
pub fn query_terminal_size() -> io::Result<(u16, u16)> {
    let mut size: libc::winsize = unsafe { std::mem::zeroed() };

    // SAFETY: ioctl with TIOCGWINSZ is safe when passed a valid winsize struct
    let result = unsafe { libc::ioctl(libc::STDOUT_FILENO, libc::TIOCGWINSZ, &mut size) };

    if result == -1 {
        Err(io::Error::last_os_error())
    } else if size.ws_col == 0 || size.ws_row == 0 {
        Err(io::Error::new(
            io::ErrorKind::InvalidData,
            "terminal reported zero dimensions",
        ))
    } else {
        Ok((size.ws_col, size.ws_row))
    }
}

/// Terminal size as `(columns, rows)`.
///
/// Falls back to the `COLUMNS`/`LINES` environment variables, then to
/// 80×25.
#[must_use]
pub fn terminal_size() -> (u16, u16) {
    query_terminal_size()
        .unwrap_or_else(|_| size_from_env(env_dimension("COLUMNS"), env_dimension("LINES")))
}

/// Terminal size in canvas pixels: two per column, four per row.
#[must_use]
pub fn terminal_size_in_pixels() -> (u32, u32) {
    let (cols, rows) = terminal_size();
    (u32::from(cols) * 2, u32::from(rows) * 4)
}

fn env_dimension(name: &str) -> Option<u16> {
    env::var(name).ok()?.trim().parse().ok().filter(|&n| n > 0)
}

fn size_from_env(columns: Option<u16>, lines: Option<u16>) -> (u16, u16) {
    (
        columns.unwrap_or(FALLBACK_COLUMNS),
        lines.unwrap_or(FALLBACK_ROWS),
    )
}

fn get_termios(fd: RawFd) -> io::Result<libc::termios> {
    let mut termios: libc::termios = unsafe { std::mem::zeroed() };

    // SAFETY: tcgetattr is safe when passed a valid termios struct
    let result = unsafe { libc::tcgetattr(fd, &mut termios) };

    if result == -1 {
        Err(io::Error::last_os_error())
    } else {
        Ok(termios)
    }
}

fn set_termios(fd: RawFd, termios: &libc::termios) -> io::Result<()> {
    // SAFETY: tcsetattr is safe when passed a valid termios struct
    let result = unsafe { libc::tcsetattr(fd, libc::TCSAFLUSH, termios) };

    if result == -1 {
        Err(io::Error::last_os_error())
    } else {
        Ok(())
    }
}
