// SPDX-License-Identifier: MIT
//
// Surface — the character-cell screen the UI layer paints to.
//
// A surface has fixed dimensions, accepts text at signed coordinates
// (reduced modulo the dimensions), yields keys in blocking or
// non-blocking mode, and owns its color-pair table. It is acquired for
// the lifetime of an application run and released afterwards.
//
// `Screen` is the real terminal. `MemorySurface` keeps everything in
// memory and replays a scripted key queue, which makes application loops
// testable without a TTY.

use std::collections::VecDeque;
use std::io;

use crate::buffer::FrameBuffer;
use crate::color::PairTable;
use crate::input::KeyEvent;
pub use crate::terminal::Size;

// ─── Surface ────────────────────────────────────────────────────────────────

/// Character-cell output plus keyboard input.
pub trait Surface {
    /// Width and height in cells.
    fn dimensions(&self) -> Size;

    /// Write `text` starting at `(x, y)` with color pair `color` (0 is the
    /// terminal default). Coordinates wrap modulo the dimensions; text that
    /// runs past the right edge continues on the next row and stops at the
    /// bottom-right corner.
    fn write_at(&mut self, x: i32, y: i32, text: &str, color: u16);

    /// Write each line on its own row, starting at `(x, y)`.
    fn write_lines(&mut self, x: i32, y: i32, lines: &[&str], color: u16) {
        for (dy, line) in (0_i32..).zip(lines) {
            self.write_at(x, y.saturating_add(dy), line, color);
        }
    }

    /// Blank row `y`. Out-of-range rows are ignored.
    fn clear_row(&mut self, y: u16);

    /// Next key. In non-blocking mode `Ok(None)` means no key is waiting.
    ///
    /// # Errors
    ///
    /// Returns an error if the input source fails or is closed.
    fn read_key(&mut self) -> io::Result<Option<KeyEvent>>;

    fn set_blocking(&mut self, blocking: bool);

    fn is_blocking(&self) -> bool;

    /// Bind color pair `index` to palette colors `(fg, bg)`.
    fn define_color_pair(&mut self, index: u16, fg: u8, bg: u8);

    /// Push the current contents to the display.
    ///
    /// # Errors
    ///
    /// Returns an error if output fails.
    fn flush(&mut self) -> io::Result<()>;

    /// Take over the display.
    ///
    /// # Errors
    ///
    /// Returns an error if the display cannot be set up.
    fn acquire(&mut self) -> io::Result<()>;

    /// Give the display back.
    ///
    /// # Errors
    ///
    /// Returns an error if the display cannot be restored.
    fn release(&mut self) -> io::Result<()>;
}

// ─── MemorySurface ──────────────────────────────────────────────────────────

/// In-memory surface with a scripted key queue.
///
/// A blocking read on an empty queue fails with `UnexpectedEof`, since no
/// key can ever arrive.
pub struct MemorySurface {
    frame: FrameBuffer,
    pairs: PairTable,
    keys: VecDeque<KeyEvent>,
    blocking: bool,
    read_modes: Vec<bool>,
    flushes: usize,
    acquired: bool,
}

impl MemorySurface {
    #[must_use]
    pub fn new(cols: u16, rows: u16) -> Self {
        Self {
            frame: FrameBuffer::new(cols, rows),
            pairs: PairTable::new(),
            keys: VecDeque::new(),
            blocking: true,
            read_modes: Vec::new(),
            flushes: 0,
            acquired: false,
        }
    }

    /// Queue a key for a later `read_key`.
    pub fn push_key(&mut self, key: KeyEvent) {
        self.keys.push_back(key);
    }

    /// Queue one plain character key per char of `text`.
    pub fn push_chars(&mut self, text: &str) {
        self.keys.extend(text.chars().map(KeyEvent::char));
    }

    /// Keys still waiting in the queue.
    #[must_use]
    pub fn pending_keys(&self) -> usize {
        self.keys.len()
    }

    #[must_use]
    pub const fn frame(&self) -> &FrameBuffer {
        &self.frame
    }

    /// Row `y` as text, continuation cells omitted.
    #[must_use]
    pub fn row_text(&self, y: u16) -> String {
        self.frame.row_text(y)
    }

    #[must_use]
    pub const fn pairs(&self) -> &PairTable {
        &self.pairs
    }

    /// Blocking flag in effect at each `read_key` call, oldest first.
    #[must_use]
    pub fn read_modes(&self) -> &[bool] {
        &self.read_modes
    }

    #[must_use]
    pub const fn flush_count(&self) -> usize {
        self.flushes
    }

    #[must_use]
    pub const fn is_acquired(&self) -> bool {
        self.acquired
    }
}

impl Surface for MemorySurface {
    fn dimensions(&self) -> Size {
        Size::new(self.frame.width(), self.frame.height())
    }

    fn write_at(&mut self, x: i32, y: i32, text: &str, color: u16) {
        let pair = self.pairs.resolve(color);
        self.frame.put_str(x, y, text, pair);
    }

    fn clear_row(&mut self, y: u16) {
        self.frame.clear_row(y);
    }

    fn read_key(&mut self) -> io::Result<Option<KeyEvent>> {
        self.read_modes.push(self.blocking);
        match self.keys.pop_front() {
            Some(key) => Ok(Some(key)),
            None if self.blocking => Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "key queue exhausted",
            )),
            None => Ok(None),
        }
    }

    fn set_blocking(&mut self, blocking: bool) {
        self.blocking = blocking;
    }

    fn is_blocking(&self) -> bool {
        self.blocking
    }

    fn define_color_pair(&mut self, index: u16, fg: u8, bg: u8) {
        self.pairs.define(index, fg, bg);
    }

    fn flush(&mut self) -> io::Result<()> {
        self.flushes += 1;
        Ok(())
    }

    fn acquire(&mut self) -> io::Result<()> {
        self.acquired = true;
        Ok(())
    }

    fn release(&mut self) -> io::Result<()> {
        self.acquired = false;
        Ok(())
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
