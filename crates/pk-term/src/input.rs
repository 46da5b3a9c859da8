// SPDX-License-Identifier: MIT
//
// Terminal input parser.
//
// Turns raw stdin bytes into key events. The terminal runs in plain raw
// mode (no mouse, paste or keyboard-protocol extensions), so the parser
// understands exactly what such a terminal sends:
//
// - Legacy CSI sequences (arrows, Home/End, editing keys, F-keys)
// - SS3 sequences (arrows and F1-F4 in application cursor mode)
// - Alt+key (ESC followed by a byte)
// - Control characters and UTF-8 multi-byte characters
//
// Escape sequences can be split across reads, so the parser keeps the
// unconsumed tail. A lone ESC stays pending until the caller decides no
// more bytes are coming and calls `flush`.
//
// Each key has a stable string name (`KeyEvent::name`), modelled on the
// curses key names: shortcut tables are keyed by those names.

use bitflags::bitflags;

// ─── Key Types ──────────────────────────────────────────────────────────────

/// Identity of a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    /// A printable character, or the letter of a Ctrl combination.
    Char(char),
    Enter,
    Tab,
    BackTab,
    Backspace,
    Escape,
    Delete,
    Insert,
    Up,
    Down,
    Left,
    Right,
    Home,
    End,
    PageUp,
    PageDown,
    /// F1 through F20.
    F(u8),
}

bitflags! {
    /// Modifier keys, in the xterm bit order (`param = 1 + bits`).
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
    pub struct Modifiers: u8 {
        const SHIFT = 0b0001;
        const ALT   = 0b0010;
        const CTRL  = 0b0100;
    }
}

/// A key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyEvent {
    pub code: KeyCode,
    pub modifiers: Modifiers,
}

impl KeyEvent {
    /// A key with no modifiers.
    #[inline]
    #[must_use]
    pub const fn plain(code: KeyCode) -> Self {
        Self {
            code,
            modifiers: Modifiers::empty(),
        }
    }

    /// A character key with no modifiers.
    #[inline]
    #[must_use]
    pub const fn char(ch: char) -> Self {
        Self::plain(KeyCode::Char(ch))
    }

    #[inline]
    #[must_use]
    pub const fn with_modifiers(code: KeyCode, modifiers: Modifiers) -> Self {
        Self { code, modifiers }
    }

    /// The key's identifier, as used in shortcut tables.
    ///
    /// Printable characters name themselves, Enter/Tab/Escape are their
    /// control characters, Ctrl+letter is the control byte (Ctrl+C is
    /// `"\u{3}"`), special keys use curses names (`KEY_LEFT`, `KEY_F(5)`,
    /// …), and Alt prefixes the name with `M-`.
    ///
    /// ```
    /// use pk_term::input::{KeyCode, KeyEvent};
    ///
    /// assert_eq!(KeyEvent::char('q').name(), "q");
    /// assert_eq!(KeyEvent::plain(KeyCode::Right).name(), "KEY_RIGHT");
    /// assert_eq!(KeyEvent::plain(KeyCode::F(5)).name(), "KEY_F(5)");
    /// ```
    #[must_use]
    pub fn name(&self) -> String {
        let base = match self.code {
            KeyCode::Char(ch) if self.modifiers.contains(Modifiers::CTRL) => {
                control_char(ch).map_or_else(|| ch.to_string(), |c| c.to_string())
            }
            KeyCode::Char(ch) => ch.to_string(),
            KeyCode::Enter => "\n".to_owned(),
            KeyCode::Tab => "\t".to_owned(),
            KeyCode::Escape => "\u{1b}".to_owned(),
            KeyCode::BackTab => "KEY_BTAB".to_owned(),
            KeyCode::Backspace => "KEY_BACKSPACE".to_owned(),
            KeyCode::Delete => "KEY_DC".to_owned(),
            KeyCode::Insert => "KEY_IC".to_owned(),
            KeyCode::Up => "KEY_UP".to_owned(),
            KeyCode::Down => "KEY_DOWN".to_owned(),
            KeyCode::Left => "KEY_LEFT".to_owned(),
            KeyCode::Right => "KEY_RIGHT".to_owned(),
            KeyCode::Home => "KEY_HOME".to_owned(),
            KeyCode::End => "KEY_END".to_owned(),
            KeyCode::PageUp => "KEY_PPAGE".to_owned(),
            KeyCode::PageDown => "KEY_NPAGE".to_owned(),
            KeyCode::F(n) => format!("KEY_F({n})"),
        };

        if self.modifiers.contains(Modifiers::ALT) {
            format!("M-{base}")
        } else {
            base
        }
    }
}

/// The control byte for Ctrl+`ch` (`a` → 0x01 … `z` → 0x1A, `@` → 0x00).
fn control_char(ch: char) -> Option<char> {
    match ch {
        'a'..='z' => char::from_u32(u32::from(ch) - u32::from('a') + 1),
        '@' => Some('\0'),
        _ => None,
    }
}

// ─── Parser ─────────────────────────────────────────────────────────────────

/// Byte-stream to key-event parser.
///
/// Feed bytes with [`advance`](Parser::advance); incomplete sequences are
/// kept for the next call. [`flush`](Parser::flush) turns whatever is
/// pending (typically a lone ESC) into literal keys.
pub struct Parser {
    buf: Vec<u8>,
}

impl Parser {
    #[must_use]
    pub fn new() -> Self {
        Self {
            buf: Vec::with_capacity(32),
        }
    }

    /// Append `data` and return every complete key it finishes.
    pub fn advance(&mut self, data: &[u8]) -> Vec<KeyEvent> {
        self.buf.extend_from_slice(data);
        let mut keys = Vec::new();
        let mut pos = 0;

        while pos < self.buf.len() {
            match try_parse(&self.buf[pos..]) {
                Parsed::Key(key, consumed) => {
                    keys.push(key);
                    pos += consumed;
                }
                Parsed::Incomplete => break,
                Parsed::Skip(n) => pos += n,
            }
        }

        self.buf.drain(..pos);
        keys
    }

    /// Whether bytes are waiting for the rest of a sequence.
    #[must_use]
    pub fn has_pending(&self) -> bool {
        !self.buf.is_empty()
    }

    /// Emit pending bytes as literal keys: ESC becomes Escape, control
    /// bytes become Ctrl+letter, printable ASCII stays itself.
    pub fn flush(&mut self) -> Vec<KeyEvent> {
        let keys = self.buf.iter().filter_map(|&b| literal_key(b)).collect();
        self.buf.clear();
        keys
    }
}

impl Default for Parser {
    fn default() -> Self {
        Self::new()
    }
}

// ─── Stateless Parsing ──────────────────────────────────────────────────────

enum Parsed {
    /// A key, consuming `usize` bytes.
    Key(KeyEvent, usize),
    /// Need more bytes.
    Incomplete,
    /// Unrecognized, skip `usize` bytes.
    Skip(usize),
}

fn try_parse(buf: &[u8]) -> Parsed {
    match buf[0] {
        0x1B => parse_escape(buf),
        0xC0..=0xFF => parse_utf8(buf),
        0x80..=0xBF => Parsed::Skip(1),
        b => literal_key(b).map_or(Parsed::Skip(1), |key| Parsed::Key(key, 1)),
    }
}

/// Single-byte keys.
fn literal_key(b: u8) -> Option<KeyEvent> {
    let key = match b {
        0x1B => KeyEvent::plain(KeyCode::Escape),
        0x08 | 0x7F => KeyEvent::plain(KeyCode::Backspace),
        0x09 => KeyEvent::plain(KeyCode::Tab),
        0x0A | 0x0D => KeyEvent::plain(KeyCode::Enter),
        0x00 => KeyEvent::with_modifiers(KeyCode::Char('@'), Modifiers::CTRL),
        0x01..=0x1A => {
            KeyEvent::with_modifiers(KeyCode::Char(char::from(b - 1 + b'a')), Modifiers::CTRL)
        }
        0x20..=0x7E => KeyEvent::char(char::from(b)),
        _ => return None,
    };
    Some(key)
}

fn parse_escape(buf: &[u8]) -> Parsed {
    if buf.len() < 2 {
        return Parsed::Incomplete;
    }

    match buf[1] {
        b'[' => parse_csi(buf),
        b'O' => parse_ss3(buf),
        next => match literal_key(next) {
            Some(mut key) => {
                key.modifiers |= Modifiers::ALT;
                Parsed::Key(key, 2)
            }
            None => Parsed::Key(KeyEvent::plain(KeyCode::Escape), 1),
        },
    }
}

fn parse_csi(buf: &[u8]) -> Parsed {
    // Final byte is 0x40..=0x7E; parameters and intermediates are 0x20..=0x3F.
    let mut end = 2;
    while end < buf.len() {
        let b = buf[end];
        if (0x40..=0x7E).contains(&b) {
            break;
        }
        if !(0x20..=0x3F).contains(&b) {
            return Parsed::Skip(end + 1);
        }
        end += 1;
    }
    if end >= buf.len() {
        return Parsed::Incomplete;
    }

    let params = parse_params(&buf[2..end]);
    let consumed = end + 1;
    let modifiers = params.get(1).map_or(Modifiers::empty(), |&p| decode_modifiers(p));

    let code = match buf[end] {
        b'~' => match params.first().copied().unwrap_or(0) {
            1 | 7 => KeyCode::Home,
            2 => KeyCode::Insert,
            3 => KeyCode::Delete,
            4 | 8 => KeyCode::End,
            5 => KeyCode::PageUp,
            6 => KeyCode::PageDown,
            n @ 11..=15 => KeyCode::F(fkey(n - 10)),
            n @ 17..=21 => KeyCode::F(fkey(n - 11)),
            n @ 23..=26 => KeyCode::F(fkey(n - 12)),
            n @ 28..=29 => KeyCode::F(fkey(n - 13)),
            n @ 31..=34 => KeyCode::F(fkey(n - 14)),
            _ => return Parsed::Skip(consumed),
        },
        b'A' => KeyCode::Up,
        b'B' => KeyCode::Down,
        b'C' => KeyCode::Right,
        b'D' => KeyCode::Left,
        b'H' => KeyCode::Home,
        b'F' => KeyCode::End,
        b'P' => KeyCode::F(1),
        b'Q' => KeyCode::F(2),
        b'R' => KeyCode::F(3),
        b'S' => KeyCode::F(4),
        b'Z' => KeyCode::BackTab,
        _ => return Parsed::Skip(consumed),
    };

    Parsed::Key(KeyEvent::with_modifiers(code, modifiers), consumed)
}

fn parse_ss3(buf: &[u8]) -> Parsed {
    if buf.len() < 3 {
        return Parsed::Incomplete;
    }

    let code = match buf[2] {
        b'A' => KeyCode::Up,
        b'B' => KeyCode::Down,
        b'C' => KeyCode::Right,
        b'D' => KeyCode::Left,
        b'H' => KeyCode::Home,
        b'F' => KeyCode::End,
        b'P' => KeyCode::F(1),
        b'Q' => KeyCode::F(2),
        b'R' => KeyCode::F(3),
        b'S' => KeyCode::F(4),
        _ => return Parsed::Skip(3),
    };
    Parsed::Key(KeyEvent::plain(code), 3)
}

fn parse_utf8(buf: &[u8]) -> Parsed {
    let expected = match buf[0] {
        0xC0..=0xDF => 2,
        0xE0..=0xEF => 3,
        0xF0..=0xF7 => 4,
        _ => return Parsed::Skip(1),
    };
    if buf.len() < expected {
        return Parsed::Incomplete;
    }

    std::str::from_utf8(&buf[..expected])
        .ok()
        .and_then(|s| s.chars().next())
        .map_or(Parsed::Skip(1), |ch| Parsed::Key(KeyEvent::char(ch), expected))
}

// ─── Helpers ────────────────────────────────────────────────────────────────

/// F-key numbers stay well inside u8.
#[allow(clippy::cast_possible_truncation)]
const fn fkey(n: u16) -> u8 {
    n as u8
}

/// xterm modifier parameter: `1 + bitmask`.
#[allow(clippy::cast_possible_truncation)]
fn decode_modifiers(param: u16) -> Modifiers {
    let bits = param.saturating_sub(1) as u8;
    Modifiers::from_bits_truncate(bits)
}

/// Semicolon-separated numeric parameters. Empty fields are 0.
fn parse_params(raw: &[u8]) -> Vec<u16> {
    if raw.is_empty() {
        return Vec::new();
    }
    raw.split(|&b| b == b';')
        .map(|field| {
            field
                .iter()
                .take_while(|b| b.is_ascii_digit())
                .fold(0_u16, |acc, &b| {
                    acc.saturating_mul(10).saturating_add(u16::from(b - b'0'))
                })
        })
        .collect()
}

// ─── Tests ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(data: &[u8]) -> Vec<KeyEvent> {
        Parser::new().advance(data)
    }

    fn parse_one(data: &[u8]) -> KeyEvent {
        let keys = parse(data);
        assert_eq!(keys.len(), 1, "expected one key from {data:?}, got {keys:?}");
        keys[0]
    }

    // ── Plain bytes ─────────────────────────────────────────────────

    #[test]
    fn printable_ascii() {
        assert_eq!(parse_one(b"q"), KeyEvent::char('q'));
        assert_eq!(parse(b"ab").len(), 2);
    }

    #[test]
    fn enter_tab_backspace() {
        assert_eq!(parse_one(b"\r").code, KeyCode::Enter);
        assert_eq!(parse_one(b"\n").code, KeyCode::Enter);
        assert_eq!(parse_one(b"\t").code, KeyCode::Tab);
        assert_eq!(parse_one(b"\x7f").code, KeyCode::Backspace);
    }

    #[test]
    fn control_letters() {
        let key = parse_one(b"\x03");
        assert_eq!(key.code, KeyCode::Char('c'));
        assert_eq!(key.modifiers, Modifiers::CTRL);
    }

    #[test]
    fn utf8_character() {
        assert_eq!(parse_one("é".as_bytes()), KeyEvent::char('é'));
        assert_eq!(parse_one("中".as_bytes()), KeyEvent::char('中'));
    }

    #[test]
    fn utf8_split_across_reads() {
        let bytes = "中".as_bytes();
        let mut parser = Parser::new();
        assert!(parser.advance(&bytes[..1]).is_empty());
        assert!(parser.has_pending());
        assert_eq!(parser.advance(&bytes[1..]), vec![KeyEvent::char('中')]);
    }

    // ── Escape sequences ────────────────────────────────────────────

    #[test]
    fn arrows_csi_and_ss3() {
        assert_eq!(parse_one(b"\x1b[A").code, KeyCode::Up);
        assert_eq!(parse_one(b"\x1b[B").code, KeyCode::Down);
        assert_eq!(parse_one(b"\x1b[C").code, KeyCode::Right);
        assert_eq!(parse_one(b"\x1bOD").code, KeyCode::Left);
    }

    #[test]
    fn modified_arrow() {
        let key = parse_one(b"\x1b[1;5C");
        assert_eq!(key.code, KeyCode::Right);
        assert_eq!(key.modifiers, Modifiers::CTRL);
    }

    #[test]
    fn tilde_keys() {
        assert_eq!(parse_one(b"\x1b[3~").code, KeyCode::Delete);
        assert_eq!(parse_one(b"\x1b[5~").code, KeyCode::PageUp);
        assert_eq!(parse_one(b"\x1b[15~").code, KeyCode::F(5));
        assert_eq!(parse_one(b"\x1b[24~").code, KeyCode::F(12));
    }

    #[test]
    fn alt_char() {
        let key = parse_one(b"\x1bx");
        assert_eq!(key.code, KeyCode::Char('x'));
        assert_eq!(key.modifiers, Modifiers::ALT);
    }

    #[test]
    fn lone_escape_waits_for_flush() {
        let mut parser = Parser::new();
        assert!(parser.advance(b"\x1b").is_empty());
        assert!(parser.has_pending());
        assert_eq!(parser.flush(), vec![KeyEvent::plain(KeyCode::Escape)]);
        assert!(!parser.has_pending());
    }

    #[test]
    fn csi_split_across_reads() {
        let mut parser = Parser::new();
        assert!(parser.advance(b"\x1b[").is_empty());
        assert_eq!(parser.advance(b"D"), vec![KeyEvent::plain(KeyCode::Left)]);
    }

    #[test]
    fn unknown_csi_is_skipped() {
        assert_eq!(parse(b"\x1b[99~a"), vec![KeyEvent::char('a')]);
    }

    // ── Names ───────────────────────────────────────────────────────

    #[test]
    fn names_follow_curses() {
        assert_eq!(KeyEvent::plain(KeyCode::Enter).name(), "\n");
        assert_eq!(KeyEvent::plain(KeyCode::Up).name(), "KEY_UP");
        assert_eq!(KeyEvent::plain(KeyCode::PageDown).name(), "KEY_NPAGE");
        assert_eq!(KeyEvent::plain(KeyCode::Delete).name(), "KEY_DC");
    }

    #[test]
    fn ctrl_name_is_control_byte() {
        let key = KeyEvent::with_modifiers(KeyCode::Char('c'), Modifiers::CTRL);
        assert_eq!(key.name(), "\u{3}");
    }

    #[test]
    fn alt_name_is_prefixed() {
        let key = KeyEvent::with_modifiers(KeyCode::Char('x'), Modifiers::ALT);
        assert_eq!(key.name(), "M-x");
    }
}
