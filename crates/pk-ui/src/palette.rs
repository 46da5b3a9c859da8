// SPDX-License-Identifier: MIT
//
// Color-pair registry.
//
// The surface only knows numbered pairs. The registry adds two ways of
// addressing them: by name (`"accent"`) and by the (fg, bg) combination.
// Indices are allocated one above the highest index ever defined, so they
// only grow and are never reused; running out is an error. Registering a name again binds it to a
// fresh index; the old index stays defined on the surface.

use std::collections::{BTreeMap, HashMap};

use pk_term::color::palette;
use pk_term::surface::Surface;

use crate::error::{UiError, UiResult};

/// How an element refers to its color pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColorRef {
    /// A pair index (0 is the terminal default).
    Index(u16),
    /// A registered pair name, resolved at paint time.
    Name(String),
}

impl Default for ColorRef {
    fn default() -> Self {
        Self::Index(0)
    }
}

impl From<u16> for ColorRef {
    fn from(index: u16) -> Self {
        Self::Index(index)
    }
}

impl From<&str> for ColorRef {
    fn from(name: &str) -> Self {
        Self::Name(name.to_owned())
    }
}

/// Foreground colors of the standard table with their short names.
const STANDARD_COLORS: [(&str, u8); 6] = [
    ("r", palette::RED),
    ("g", palette::GREEN),
    ("y", palette::YELLOW),
    ("db", palette::BLUE),
    ("m", palette::MAGENTA),
    ("b", palette::CYAN),
];

/// Distance from a standard color pair to its inverted twin.
const BG_OFFSET: u16 = 6;

/// Pair index of black on white.
pub const INVERSE: u16 = 34;

/// Name and (fg, bg) lookup over the surface's color pairs.
///
/// A new registry already holds the standard pairs, so user registrations
/// always land above them. The surface learns about pairs in two ways:
/// [`register`](Self::register) and [`define`](Self::define) define them
/// as they happen, and [`install`](Self::install) replays every pair onto
/// a freshly acquired surface.
#[derive(Debug, Clone)]
pub struct ColorRegistry {
    by_name: HashMap<String, u16>,
    by_pair: HashMap<(u8, u8), u16>,
    defined: BTreeMap<u16, (u8, u8)>,
    max_index: u16,
}

impl ColorRegistry {
    /// A registry holding the standard pairs:
    ///
    /// - 1..=7: palette color `i` on black (1..=6 named `r g y db m b`)
    /// - 7..=12: black on red … cyan (named `r_bg` … `b_bg`)
    /// - 34: black on white (named `inverse`)
    #[must_use]
    pub fn new() -> Self {
        let mut colors = Self::empty();
        for i in 1..=7_u8 {
            colors.record(u16::from(i), i, palette::BLACK);
        }

        for ((name, color), index) in STANDARD_COLORS.iter().zip(1_u16..) {
            colors.record(index, *color, palette::BLACK);
            colors.by_name.insert((*name).to_owned(), index);

            let bg_index = index + BG_OFFSET;
            colors.record(bg_index, palette::BLACK, *color);
            colors.by_name.insert(format!("{name}_bg"), bg_index);
        }

        colors.record(INVERSE, palette::BLACK, palette::WHITE);
        colors.by_name.insert("inverse".to_owned(), INVERSE);
        colors
    }

    /// A registry with no pairs at all.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            by_name: HashMap::new(),
            by_pair: HashMap::new(),
            defined: BTreeMap::new(),
            max_index: 0,
        }
    }

    /// Define every known pair on `surface`, in index order.
    pub fn install(&self, surface: &mut dyn Surface) {
        for (&index, &(fg, bg)) in &self.defined {
            surface.define_color_pair(index, fg, bg);
        }
        tracing::debug!(pairs = self.defined.len(), "color pairs installed");
    }

    /// Index bound to `name`, if any.
    #[must_use]
    pub fn lookup(&self, name: &str) -> Option<u16> {
        self.by_name.get(name).copied()
    }

    /// Latest index registered for the `(fg, bg)` combination.
    #[must_use]
    pub fn index_of(&self, fg: u8, bg: u8) -> Option<u16> {
        self.by_pair.get(&(fg, bg)).copied()
    }

    /// The `(fg, bg)` combination pair `index` stands for.
    #[must_use]
    pub fn pair(&self, index: u16) -> Option<(u8, u8)> {
        self.defined.get(&index).copied()
    }

    /// Highest index defined so far (0 for an empty registry).
    #[must_use]
    pub const fn max_index(&self) -> u16 {
        self.max_index
    }

    /// Allocate the next index for `(fg, bg)`, define it on the surface and
    /// bind `name` to it.
    ///
    /// # Errors
    ///
    /// `UiError::PairsExhausted` once `u16::MAX` has been handed out.
    pub fn register(
        &mut self,
        name: &str,
        fg: u8,
        bg: u8,
        surface: &mut dyn Surface,
    ) -> UiResult<u16> {
        let index = self
            .max_index
            .checked_add(1)
            .ok_or(UiError::PairsExhausted)?;
        self.define(index, fg, bg, surface);
        self.by_name.insert(name.to_owned(), index);
        tracing::debug!(name, index, fg, bg, "color pair registered");
        Ok(index)
    }

    /// Define pair `index` directly. Raises the allocation floor.
    pub fn define(&mut self, index: u16, fg: u8, bg: u8, surface: &mut dyn Surface) {
        surface.define_color_pair(index, fg, bg);
        self.record(index, fg, bg);
    }

    fn record(&mut self, index: u16, fg: u8, bg: u8) {
        // A redefined index no longer stands for its old combination.
        if let Some(old) = self.defined.insert(index, (fg, bg)) {
            if self.by_pair.get(&old) == Some(&index) {
                self.by_pair.remove(&old);
            }
        }
        self.by_pair.insert((fg, bg), index);
        self.max_index = self.max_index.max(index);
    }

    /// Pair index for `color`.
    ///
    /// # Errors
    ///
    /// `UiError::UnknownColor` for a name that was never registered.
    pub fn resolve(&self, color: &ColorRef) -> UiResult<u16> {
        match color {
            ColorRef::Index(index) => Ok(*index),
            ColorRef::Name(name) => self
                .lookup(name)
                .ok_or_else(|| UiError::UnknownColor(name.clone())),
        }
    }
}

impl Default for ColorRegistry {
    fn default() -> Self {
        Self::new()
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use pk_term::color::ColorPair;
    use pk_term::surface::MemorySurface;

    fn installed() -> (ColorRegistry, MemorySurface) {
        let mut surface = MemorySurface::new(10, 2);
        let colors = ColorRegistry::new();
        colors.install(&mut surface);
        (colors, surface)
    }

    // ── Standard pairs ──────────────────────────────────────────────

    #[test]
    fn standard_names() {
        let colors = ColorRegistry::new();
        assert_eq!(colors.lookup("r"), Some(1));
        assert_eq!(colors.lookup("b"), Some(6));
        assert_eq!(colors.lookup("r_bg"), Some(7));
        assert_eq!(colors.lookup("b_bg"), Some(12));
        assert_eq!(colors.lookup("inverse"), Some(34));
    }

    #[test]
    fn install_defines_pairs_on_surface() {
        let (colors, surface) = installed();
        for index in (1..=12).chain([34]) {
            assert!(surface.pairs().is_defined(index), "pair {index}");
        }
        assert_eq!(
            surface.pairs().resolve(7),
            ColorPair::from_palette(palette::BLACK, palette::RED)
        );
        assert_eq!(colors.index_of(palette::BLACK, palette::RED), Some(7));
        assert_eq!(colors.index_of(palette::WHITE, palette::BLACK), None);
        assert_eq!(colors.max_index(), 34);
    }

    // ── Registration ────────────────────────────────────────────────

    #[test]
    fn register_allocates_above_standard_pairs() {
        let (mut colors, mut surface) = installed();
        let index = colors
            .register("accent", palette::GREEN, palette::BLUE, &mut surface)
            .unwrap();
        assert_eq!(index, 35);
        assert!(surface.pairs().is_defined(35));
        assert_eq!(colors.index_of(palette::GREEN, palette::BLUE), Some(35));
    }

    #[test]
    fn register_before_install_survives_install() {
        let mut early = MemorySurface::new(4, 1);
        let mut colors = ColorRegistry::new();
        let index = colors
            .register("accent", palette::GREEN, palette::BLUE, &mut early)
            .unwrap();

        let mut surface = MemorySurface::new(4, 1);
        colors.install(&mut surface);

        assert_eq!(index, 35);
        assert_eq!(colors.lookup("accent"), Some(35));
        assert_eq!(
            surface.pairs().resolve(35),
            ColorPair::from_palette(palette::GREEN, palette::BLUE)
        );
        assert_eq!(colors.index_of(palette::GREEN, palette::BLUE), Some(35));
    }

    #[test]
    fn reregistering_a_name_gets_a_new_index() {
        let (mut colors, mut surface) = installed();
        let first = colors
            .register("accent", palette::GREEN, palette::BLUE, &mut surface)
            .unwrap();
        let second = colors
            .register("accent", palette::RED, palette::WHITE, &mut surface)
            .unwrap();
        assert_ne!(first, second);
        assert_eq!(colors.lookup("accent"), Some(second));
    }

    #[test]
    fn register_on_empty_registry_starts_at_one() {
        let mut surface = MemorySurface::new(4, 1);
        let mut colors = ColorRegistry::empty();
        assert_eq!(colors.register("x", 1, 2, &mut surface).unwrap(), 1);
    }

    #[test]
    fn register_past_the_last_index_fails() {
        let mut surface = MemorySurface::new(4, 1);
        let mut colors = ColorRegistry::empty();
        colors.define(u16::MAX, 1, 2, &mut surface);

        let err = colors.register("x", 3, 4, &mut surface).unwrap_err();

        assert!(matches!(err, UiError::PairsExhausted));
        assert_eq!(colors.lookup("x"), None);
        assert_eq!(colors.pair(u16::MAX), Some((1, 2)));
    }

    #[test]
    fn redefining_drops_stale_combination() {
        let mut surface = MemorySurface::new(4, 1);
        let mut colors = ColorRegistry::empty();
        colors.define(3, 1, 2, &mut surface);
        colors.define(3, 4, 5, &mut surface);
        assert_eq!(colors.index_of(1, 2), None);
        assert_eq!(colors.index_of(4, 5), Some(3));
    }

    #[test]
    fn lookup_missing_is_none() {
        assert_eq!(ColorRegistry::new().lookup("nope"), None);
    }

    // ── Resolution ──────────────────────────────────────────────────

    #[test]
    fn resolve_index_and_name() {
        let colors = ColorRegistry::new();
        assert_eq!(colors.resolve(&ColorRef::Index(9)).unwrap(), 9);
        assert_eq!(colors.resolve(&"inverse".into()).unwrap(), 34);
    }

    #[test]
    fn resolve_unknown_name_fails() {
        let colors = ColorRegistry::new();
        let err = colors.resolve(&"ghost".into()).unwrap_err();
        assert!(matches!(err, UiError::UnknownColor(name) if name == "ghost"));
    }
}
