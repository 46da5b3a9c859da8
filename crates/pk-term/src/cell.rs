// SPDX-License-Identifier: MIT
//
// Cell — one character position on screen.
//
// A cell holds a character and its foreground and background colors.
// Wide characters (CJK, some emoji) take two
// columns: the first cell holds the character, the second is a
// continuation cell that the output stage skips.

use crate::color::{CellColor, ColorPair};

// ─── Cell ────────────────────────────────────────────────────────────────────

/// A single terminal cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    /// Character to display. `'\0'` marks a continuation cell.
    pub ch: char,
    pub fg: CellColor,
    pub bg: CellColor,
}

const CONTINUATION: char = '\0';

impl Cell {
    /// Space in the default colors.
    pub const EMPTY: Self = Self {
        ch: ' ',
        fg: CellColor::Default,
        bg: CellColor::Default,
    };

    /// A cell with default styling.
    #[inline]
    #[must_use]
    pub const fn new(ch: char) -> Self {
        Self { ch, ..Self::EMPTY }
    }

    /// A cell drawn with a color pair.
    #[inline]
    #[must_use]
    pub const fn with_pair(ch: char, pair: ColorPair) -> Self {
        Self {
            ch,
            fg: pair.fg,
            bg: pair.bg,
        }
    }

    /// Second column of a wide character. Carries the owner's colors so the
    /// background fills correctly.
    #[inline]
    #[must_use]
    pub const fn continuation(pair: ColorPair) -> Self {
        Self::with_pair(CONTINUATION, pair)
    }

    #[inline]
    #[must_use]
    pub const fn is_continuation(self) -> bool {
        self.ch == CONTINUATION
    }

    /// The displayed character, `None` for continuation cells.
    #[inline]
    #[must_use]
    pub const fn character(self) -> Option<char> {
        if self.is_continuation() {
            None
        } else {
            Some(self.ch)
        }
    }

    /// The cell's colors as a pair.
    #[inline]
    #[must_use]
    pub const fn pair(self) -> ColorPair {
        ColorPair {
            fg: self.fg,
            bg: self.bg,
        }
    }

    /// Reset to [`Cell::EMPTY`].
    #[inline]
    pub const fn reset(&mut self) {
        *self = Self::EMPTY;
    }
}

impl Default for Cell {
    fn default() -> Self {
        Self::EMPTY
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
