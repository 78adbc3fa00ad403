//! Byte-stream → key event decoding.
//!
//! Handles the sequences a keypad-mode terminal sends for the keys a canvas
//! application cares about: printable characters (UTF-8), control keys,
//! Alt+char, and CSI/SS3 cursor, navigation and function keys.

#![allow(clippy::match_same_arms)]

use crate::input::keyboard::{KeyCode, KeyEvent, KeyModifiers};

/// Result of decoding the front of the pending buffer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Decoded {
    /// A key and the number of bytes it used.
    Key(KeyEvent, usize),
    /// Bytes that form no key (unknown sequence, invalid UTF-8).
    Skip(usize),
    /// The buffer ends inside a sequence.
    Incomplete,
}

/// Incremental key decoder.
#[derive(Clone, Debug, Default)]
pub struct KeyDecoder {
    pending: Vec<u8>,
}

impl KeyDecoder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append raw input bytes.
    pub fn feed(&mut self, bytes: &[u8]) {
        self.pending.extend_from_slice(bytes);
    }

    /// Whether undecoded bytes are buffered.
    #[must_use]
    pub fn has_pending(&self) -> bool {
        !self.pending.is_empty()
    }

    /// Decode the next complete key, discarding unrecognized bytes.
    pub fn next_key(&mut self) -> Option<KeyEvent> {
        loop {
            match decode(&self.pending) {
                Decoded::Key(key, used) => {
                    self.pending.drain(..used);
                    return Some(key);
                }
                Decoded::Skip(used) => {
                    self.pending.drain(..used);
                }
                Decoded::Incomplete => return None,
            }
        }
    }
}

fn decode(input: &[u8]) -> Decoded {
    let Some(&first) = input.first() else {
        return Decoded::Incomplete;
    };

    let key = |code: KeyCode| Decoded::Key(KeyEvent::key(code), 1);

    match first {
        0x1b => decode_escape(input),
        0x00 => key(KeyCode::Null),
        b'\r' | b'\n' => key(KeyCode::Enter),
        b'\t' => key(KeyCode::Tab),
        0x08 | 0x7f => key(KeyCode::Backspace),
        0x01..=0x1a => {
            let c = (first - 1 + b'a') as char;
            Decoded::Key(KeyEvent::new(KeyCode::Char(c), KeyModifiers::CTRL), 1)
        }
        0x1c..=0x1f => {
            let c = (first + 0x40) as char;
            Decoded::Key(KeyEvent::new(KeyCode::Char(c), KeyModifiers::CTRL), 1)
        }
        0x20..=0x7e => Decoded::Key(KeyEvent::char(first as char), 1),
        _ => decode_utf8(input),
    }
}

fn decode_escape(input: &[u8]) -> Decoded {
    let Some(&second) = input.get(1) else {
        // Input is read in whole chunks, so a trailing ESC is the Esc key.
        return Decoded::Key(KeyEvent::key(KeyCode::Esc), 1);
    };

    match second {
        b'[' => decode_csi(input),
        b'O' => decode_ss3(input),
        0x20..=0x7e => Decoded::Key(
            KeyEvent::new(KeyCode::Char(second as char), KeyModifiers::ALT),
            2,
        ),
        _ => Decoded::Key(KeyEvent::key(KeyCode::Esc), 1),
    }
}

fn decode_csi(input: &[u8]) -> Decoded {
    let Some(offset) = input[2..].iter().position(|b| (0x40..=0x7e).contains(b)) else {
        return Decoded::Incomplete;
    };
    let end = offset + 2;
    let params = &input[2..end];
    let used = end + 1;

    let code = match input[end] {
        b'A' => KeyCode::Up,
        b'B' => KeyCode::Down,
        b'C' => KeyCode::Right,
        b'D' => KeyCode::Left,
        b'H' => KeyCode::Home,
        b'F' => KeyCode::End,
        b'~' => match tilde_key(params) {
            Some(code) => code,
            None => return Decoded::Skip(used),
        },
        _ => return Decoded::Skip(used),
    };

    Decoded::Key(KeyEvent::new(code, modifiers(params)), used)
}

fn decode_ss3(input: &[u8]) -> Decoded {
    let Some(&last) = input.get(2) else {
        return Decoded::Incomplete;
    };

    let code = match last {
        b'A' => KeyCode::Up,
        b'B' => KeyCode::Down,
        b'C' => KeyCode::Right,
        b'D' => KeyCode::Left,
        b'H' => KeyCode::Home,
        b'F' => KeyCode::End,
        b'M' => KeyCode::Enter,
        b'P' => KeyCode::F(1),
        b'Q' => KeyCode::F(2),
        b'R' => KeyCode::F(3),
        b'S' => KeyCode::F(4),
        _ => return Decoded::Skip(3),
    };

    Decoded::Key(KeyEvent::key(code), 3)
}

fn tilde_key(params: &[u8]) -> Option<KeyCode> {
    let s = std::str::from_utf8(params).ok()?;
    let num: u8 = s.split(';').next()?.parse().ok()?;

    let code = match num {
        1 | 7 => KeyCode::Home,
        2 => KeyCode::Insert,
        3 => KeyCode::Delete,
        4 | 8 => KeyCode::End,
        5 => KeyCode::PageUp,
        6 => KeyCode::PageDown,
        15 => KeyCode::F(5),
        17..=21 => KeyCode::F(num - 11),
        23 | 24 => KeyCode::F(num - 12),
        _ => return None,
    };
    Some(code)
}

/// Modifiers from `1;N` parameters, where `N - 1` packs shift/alt/ctrl.
fn modifiers(params: &[u8]) -> KeyModifiers {
    let Some(n) = std::str::from_utf8(params)
        .ok()
        .and_then(|s| s.split(';').nth(1))
        .and_then(|p| p.parse::<u8>().ok())
    else {
        return KeyModifiers::empty();
    };

    let n = n.saturating_sub(1);
    let mut mods = KeyModifiers::empty();
    if n & 1 != 0 {
        mods |= KeyModifiers::SHIFT;
    }
    if n & 2 != 0 {
        mods |= KeyModifiers::ALT;
    }
    if n & 4 != 0 {
        mods |= KeyModifiers::CTRL;
    }
    mods
}

fn decode_utf8(input: &[u8]) -> Decoded {
    let len = match input[0] {
        0xc0..=0xdf => 2,
        0xe0..=0xef => 3,
        0xf0..=0xf7 => 4,
        _ => return Decoded::Skip(1),
    };
    if input.len() < len {
        return Decoded::Incomplete;
    }
    match std::str::from_utf8(&input[..len])
        .ok()
        .and_then(|s| s.chars().next())
    {
        Some(c) => Decoded::Key(KeyEvent::char(c), len),
        None => Decoded::Skip(1),
    }
}
