//! Error types for termux2d.

use std::fmt;
use std::io;

/// Result type alias for canvas and terminal operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for canvas and terminal operations.
#[derive(Debug)]
pub enum Error {
    /// A coordinate value that cannot be mapped onto the integer pixel grid
    /// (NaN, infinite, or outside the `i64` range).
    UnsupportedCoordinate {
        type_name: &'static str,
        value: String,
    },
    /// I/O error from the terminal driver.
    Io(io::Error),
    /// A raw-mode session was requested on something that is not a TTY.
    NotATerminal,
}

impl Error {
    pub(crate) fn unsupported<T: fmt::Display>(value: T) -> Self {
        Self::UnsupportedCoordinate {
            type_name: std::any::type_name::<T>(),
            value: value.to_string(),
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnsupportedCoordinate { type_name, value } => {
                write!(f, "unsupported coordinate <{type_name}>: {value}")
            }
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::NotATerminal => write!(f, "not a terminal"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for Error {
    fn from(e: io::Error) -> Self {
        Self::Io(e)
    }
}
