// SPDX-License-Identifier: MIT
//
// Colors and color pairs.
//
// The composition layer thinks in curses terms: a color is a small palette
// number (0 = black … 7 = white) and text is drawn with a *pair* index that
// names a (foreground, background) combination defined ahead of time. Pair
// 0 is always the terminal's default colors and cannot be redefined.
//
// `CellColor` is what a frame cell stores and what `ansi` knows how to
// emit. `PairTable` maps pair indices to resolved cell colors.

use std::collections::HashMap;
use std::fmt;

// ─── Palette numbers ────────────────────────────────────────────────────────

/// Standard palette numbers, in the order terminals (and curses) use them.
pub mod palette {
    pub const BLACK: u8 = 0;
    pub const RED: u8 = 1;
    pub const GREEN: u8 = 2;
    pub const YELLOW: u8 = 3;
    pub const BLUE: u8 = 4;
    pub const MAGENTA: u8 = 5;
    pub const CYAN: u8 = 6;
    pub const WHITE: u8 = 7;
}

// ─── CellColor ──────────────────────────────────────────────────────────────

/// Compact color stored in every frame cell.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CellColor {
    /// ANSI 256-color palette index. 0–7 are the standard palette numbers.
    Ansi256(u8),

    /// Terminal default color (inherits the user's theme).
    #[default]
    Default,
}

impl CellColor {
    /// Whether this is the terminal default color.
    #[inline]
    #[must_use]
    pub const fn is_default(self) -> bool {
        matches!(self, Self::Default)
    }
}

impl fmt::Debug for CellColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ansi256(idx) => write!(f, "ansi({idx})"),
            Self::Default => write!(f, "default"),
        }
    }
}

impl fmt::Display for CellColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

// ─── ColorPair ──────────────────────────────────────────────────────────────

/// A resolved (foreground, background) combination.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ColorPair {
    pub fg: CellColor,
    pub bg: CellColor,
}

impl ColorPair {
    /// The terminal's own colors. This is what pair 0 always means.
    pub const DEFAULT: Self = Self {
        fg: CellColor::Default,
        bg: CellColor::Default,
    };

    /// A pair built from two palette numbers.
    #[inline]
    #[must_use]
    pub const fn from_palette(fg: u8, bg: u8) -> Self {
        Self {
            fg: CellColor::Ansi256(fg),
            bg: CellColor::Ansi256(bg),
        }
    }
}

// ─── PairTable ──────────────────────────────────────────────────────────────

/// Pair index → colors, as defined by the application.
///
/// Lookups of an undefined index fall back to [`ColorPair::DEFAULT`]; the
/// table is the driver-side primitive and does not police indices. Name
/// bookkeeping and allocation belong to the caller.
#[derive(Debug, Clone, Default)]
pub struct PairTable {
    pairs: HashMap<u16, ColorPair>,
}

impl PairTable {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Define (or redefine) pair `index`. Returns `false` for index 0,
    /// which is reserved for the default colors.
    pub fn define(&mut self, index: u16, fg: u8, bg: u8) -> bool {
        if index == 0 {
            return false;
        }
        self.pairs.insert(index, ColorPair::from_palette(fg, bg));
        true
    }

    /// Colors for `index`.
    #[must_use]
    pub fn resolve(&self, index: u16) -> ColorPair {
        self.pairs.get(&index).copied().unwrap_or(ColorPair::DEFAULT)
    }

    /// Whether `index` has been defined.
    #[must_use]
    pub fn is_defined(&self, index: u16) -> bool {
        self.pairs.contains_key(&index)
    }

    /// Number of defined pairs (pair 0 not included).
    #[must_use]
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
