// SPDX-License-Identifier: MIT
//
// Screen — the real terminal as a `Surface`.
//
// Drawing goes into a `FrameBuffer`; `flush` repaints every cell inside a
// synchronized-output bracket and writes the frame to stdout in one call.
// There is no diffing against the previous frame.
//
// Key reads poll stdin on the calling thread. When the parser is holding
// a partial escape sequence the read waits at most `ESC_TIMEOUT` for the
// rest; if nothing comes the pending bytes are flushed as literal keys,
// which is how a lone Escape press gets through.

use std::collections::VecDeque;
use std::io;
use std::time::Duration;

use crate::ansi;
use crate::buffer::FrameBuffer;
use crate::color::PairTable;
use crate::input::{KeyEvent, Parser};
use crate::output::{CellWriter, OutputBuffer};
use crate::reader::StdinPoller;
use crate::surface::{Size, Surface};
use crate::terminal::Terminal;

/// How long a partial escape sequence may wait for its remaining bytes.
pub const ESC_TIMEOUT: Duration = Duration::from_millis(10);

/// Full-screen terminal surface.
pub struct Screen {
    terminal: Terminal,
    frame: FrameBuffer,
    pairs: PairTable,
    parser: Parser,
    poller: StdinPoller,
    pending: VecDeque<KeyEvent>,
    out: OutputBuffer,
    writer: CellWriter,
    blocking: bool,
}

impl Screen {
    /// Create a screen sized to the terminal. Terminal modes are untouched
    /// until [`acquire`](Surface::acquire).
    #[must_use]
    pub fn new() -> Self {
        let terminal = Terminal::new();
        let size = terminal.size();
        Self {
            terminal,
            frame: FrameBuffer::new(size.cols, size.rows),
            pairs: PairTable::new(),
            parser: Parser::new(),
            poller: StdinPoller::new(),
            pending: VecDeque::new(),
            out: OutputBuffer::new(),
            writer: CellWriter::new(),
            blocking: true,
        }
    }

    #[must_use]
    pub const fn frame(&self) -> &FrameBuffer {
        &self.frame
    }

    /// Encode the whole frame into the output buffer.
    fn render_frame(&mut self) {
        ansi::begin_sync(&mut self.out).ok();
        for (x, y, cell) in self.frame.iter() {
            self.writer.render_cell(&mut self.out, x, y, cell);
        }
        ansi::reset(&mut self.out).ok();
        ansi::end_sync(&mut self.out).ok();
        self.writer.reset_state();
    }

    /// Wait for input according to the blocking mode and parser state.
    fn poll_timeout(&self) -> Option<Duration> {
        if self.parser.has_pending() {
            Some(ESC_TIMEOUT)
        } else if self.blocking {
            None
        } else {
            Some(Duration::ZERO)
        }
    }
}

impl Default for Screen {
    fn default() -> Self {
        Self::new()
    }
}

impl Surface for Screen {
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
        loop {
            if let Some(key) = self.pending.pop_front() {
                return Ok(Some(key));
            }

            let bytes = self.poller.read(self.poll_timeout())?;
            if bytes.is_empty() {
                if self.parser.has_pending() {
                    self.pending.extend(self.parser.flush());
                    continue;
                }
                if self.blocking {
                    // Interrupted wait.
                    continue;
                }
                return Ok(None);
            }

            self.pending.extend(self.parser.advance(&bytes));
        }
    }

    fn set_blocking(&mut self, blocking: bool) {
        self.blocking = blocking;
    }

    fn is_blocking(&self) -> bool {
        self.blocking
    }

    fn define_color_pair(&mut self, index: u16, fg: u8, bg: u8) {
        if !self.pairs.define(index, fg, bg) {
            tracing::debug!(index, "color pair 0 is reserved");
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        self.render_frame();
        tracing::trace!(bytes = self.out.len(), "frame flushed");
        self.out.flush_stdout()
    }

    fn acquire(&mut self) -> io::Result<()> {
        self.terminal.enter()?;
        let size = self.terminal.refresh_size();
        if size != self.dimensions() {
            self.frame.resize(size.cols, size.rows);
        }
        self.writer.reset_state();
        Ok(())
    }

    fn release(&mut self) -> io::Result<()> {
        self.terminal.leave()
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
