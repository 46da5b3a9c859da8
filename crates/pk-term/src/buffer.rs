// SPDX-License-Identifier: MIT
//
// FrameBuffer — the grid of cells that elements paint into.
//
// Flat `Vec<Cell>`, row-major (`index = y * width + x`), so a row is a
// contiguous slice and the output stage walks memory linearly.
//
// Text placement follows curses `addstr` rather than a clipping canvas:
// the start position wraps modulo the buffer size (so -1 is the last
// column), text that runs past the right edge continues at the start of
// the next row, and anything past the bottom-right cell is dropped.
// Contents persist between flushes until overwritten or cleared.

use unicode_width::UnicodeWidthChar;

use crate::cell::Cell;
use crate::color::ColorPair;

/// A 2D buffer of terminal cells.
///
/// ```
/// use pk_term::buffer::FrameBuffer;
/// use pk_term::color::ColorPair;
///
/// let mut buf = FrameBuffer::new(10, 2);
/// buf.put_str(8, 0, "wrap", ColorPair::DEFAULT);
/// assert_eq!(buf.row_text(0), "        wr");
/// assert_eq!(buf.row_text(1), "ap        ");
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct FrameBuffer {
    width: u16,
    height: u16,
    cells: Vec<Cell>,
}

impl FrameBuffer {
    /// A buffer of empty cells.
    #[must_use]
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            width,
            height,
            cells: vec![Cell::EMPTY; usize::from(width) * usize::from(height)],
        }
    }

    // ─── Accessors ───────────────────────────────────────────────────────

    #[inline]
    #[must_use]
    pub const fn width(&self) -> u16 {
        self.width
    }

    #[inline]
    #[must_use]
    pub const fn height(&self) -> u16 {
        self.height
    }

    #[inline]
    #[must_use]
    pub const fn in_bounds(&self, x: u16, y: u16) -> bool {
        x < self.width && y < self.height
    }

    #[inline]
    const fn index(&self, x: u16, y: u16) -> usize {
        y as usize * self.width as usize + x as usize
    }

    #[inline]
    #[must_use]
    pub fn get(&self, x: u16, y: u16) -> Option<&Cell> {
        if self.in_bounds(x, y) {
            Some(&self.cells[self.index(x, y)])
        } else {
            None
        }
    }

    /// Bounds-checked raw write. Returns `true` if `(x, y)` was inside.
    #[inline]
    pub fn set(&mut self, x: u16, y: u16, cell: Cell) -> bool {
        if !self.in_bounds(x, y) {
            return false;
        }
        let idx = self.index(x, y);
        self.cells[idx] = cell;
        true
    }

    /// Iterate cells with their coordinates, row by row.
    #[allow(clippy::cast_possible_truncation)]
    pub fn iter(&self) -> impl Iterator<Item = (u16, u16, &Cell)> {
        let w = usize::from(self.width).max(1);
        self.cells.iter().enumerate().map(move |(i, cell)| {
            // x < width and y < height, both u16.
            ((i % w) as u16, (i / w) as u16, cell)
        })
    }

    /// The characters of row `y` as a string, continuation cells omitted.
    /// Empty for an out-of-range row.
    #[must_use]
    pub fn row_text(&self, y: u16) -> String {
        if y >= self.height {
            return String::new();
        }
        let start = self.index(0, y);
        self.cells[start..start + usize::from(self.width)]
            .iter()
            .filter_map(|cell| cell.character())
            .collect()
    }

    // ─── Clear & Resize ──────────────────────────────────────────────────

    pub fn clear(&mut self) {
        self.cells.fill(Cell::EMPTY);
    }

    /// Blank row `y` (no-op when out of range).
    pub fn clear_row(&mut self, y: u16) {
        if y < self.height {
            let start = self.index(0, y);
            self.cells[start..start + usize::from(self.width)].fill(Cell::EMPTY);
        }
    }

    /// Resize and clear.
    pub fn resize(&mut self, width: u16, height: u16) {
        self.width = width;
        self.height = height;
        self.cells.clear();
        self.cells
            .resize(usize::from(width) * usize::from(height), Cell::EMPTY);
    }

    // ─── Text ────────────────────────────────────────────────────────────

    /// Reduce signed coordinates onto the grid (Euclidean modulo).
    ///
    /// Returns `None` for a zero-sized buffer.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn wrap_position(&self, x: i32, y: i32) -> Option<(u16, u16)> {
        if self.width == 0 || self.height == 0 {
            return None;
        }
        // rem_euclid of a positive u16 modulus is in 0..modulus.
        let col = x.rem_euclid(i32::from(self.width)) as u16;
        let row = y.rem_euclid(i32::from(self.height)) as u16;
        Some((col, row))
    }

    /// Write `text` starting at the wrapped `(x, y)` position.
    ///
    /// Zero-width and control characters are skipped. A wide character
    /// that would straddle the right edge moves to the next row. Returns
    /// the number of columns written.
    pub fn put_str(&mut self, x: i32, y: i32, text: &str, pair: ColorPair) -> usize {
        let Some((mut col, mut row)) = self.wrap_position(x, y) else {
            return 0;
        };
        let mut written = 0;

        for ch in text.chars() {
            let w = ch.width().unwrap_or(0);
            if w == 0 {
                continue;
            }
            if w == 2 && col + 1 >= self.width {
                // No room for both halves on this row.
                if self.width < 2 {
                    continue;
                }
                col = 0;
                row += 1;
            }
            if row >= self.height {
                break;
            }

            self.break_wide_char_at(col, row);
            let idx = self.index(col, row);
            self.cells[idx] = Cell::with_pair(ch, pair);
            if w == 2 {
                self.break_wide_char_at(col + 1, row);
                let cont = self.index(col + 1, row);
                self.cells[cont] = Cell::continuation(pair);
            }

            written += w;
            // w is 1 or 2.
            #[allow(clippy::cast_possible_truncation)]
            let step = w as u16;
            col += step;
            if col >= self.width {
                col = 0;
                row += 1;
            }
        }

        written
    }

    /// Write each line one row below the previous, all starting at `x`.
    pub fn put_lines<S: AsRef<str>>(&mut self, x: i32, y: i32, lines: &[S], pair: ColorPair) {
        for (offset, line) in (0_i32..).zip(lines) {
            self.put_str(x, y.wrapping_add(offset), line.as_ref(), pair);
        }
    }

    /// Before overwriting `(x, y)`, turn any wide character that touches it
    /// into plain spaces so no half-character is left behind.
    fn break_wide_char_at(&mut self, x: u16, y: u16) {
        let idx = self.index(x, y);
        if self.cells[idx].is_continuation() && x > 0 {
            let owner = self.index(x - 1, y);
            self.cells[owner].ch = ' ';
        }
        if x + 1 < self.width {
            let next = self.index(x + 1, y);
            if self.cells[next].is_continuation() {
                self.cells[next] = Cell::EMPTY;
            }
        }
    }
}

impl std::fmt::Debug for FrameBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "FrameBuffer({}x{})", self.width, self.height)
    }
}

// ─── Text Width ─────────────────────────────────────────────────────────────

/// Display width of a string in terminal columns (wide characters count
/// two, control and zero-width characters zero).
///
/// ```
/// use pk_term::buffer::string_width;
///
/// assert_eq!(string_width("hello"), 5);
/// assert_eq!(string_width("中文"), 4);
/// ```
#[must_use]
pub fn string_width(s: &str) -> usize {
    s.chars().map(|ch| ch.width().unwrap_or(0)).sum()
}

// ─── Tests ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::palette;
    use pretty_assertions::assert_eq;

    // ── Construction ────────────────────────────────────────────────

    #[test]
    fn new_buffer_is_blank() {
        let buf = FrameBuffer::new(4, 2);
        assert_eq!(buf.row_text(0), "    ");
        assert_eq!(buf.row_text(1), "    ");
        assert_eq!(buf.row_text(2), "");
    }

    #[test]
    fn set_and_get() {
        let mut buf = FrameBuffer::new(4, 2);
        assert!(buf.set(3, 1, Cell::new('z')));
        assert!(!buf.set(4, 1, Cell::new('z')));
        assert_eq!(buf.get(3, 1).and_then(|c| c.character()), Some('z'));
        assert!(buf.get(0, 2).is_none());
    }

    #[test]
    fn iter_visits_every_cell_in_row_order() {
        let buf = FrameBuffer::new(3, 2);
        let coords: Vec<(u16, u16)> = buf.iter().map(|(x, y, _)| (x, y)).collect();
        assert_eq!(coords, vec![(0, 0), (1, 0), (2, 0), (0, 1), (1, 1), (2, 1)]);
    }

    // ── Wrapping ────────────────────────────────────────────────────

    #[test]
    fn positions_wrap_modulo_size() {
        let buf = FrameBuffer::new(80, 24);
        assert_eq!(buf.wrap_position(85, 30), Some((5, 6)));
        assert_eq!(buf.wrap_position(-1, -1), Some((79, 23)));
        assert_eq!(buf.wrap_position(0, 0), Some((0, 0)));
    }

    #[test]
    fn zero_sized_buffer_has_no_positions() {
        let mut buf = FrameBuffer::new(0, 0);
        assert_eq!(buf.wrap_position(1, 1), None);
        assert_eq!(buf.put_str(0, 0, "abc", ColorPair::DEFAULT), 0);
    }

    #[test]
    fn put_str_wrapped_start() {
        let mut buf = FrameBuffer::new(6, 2);
        buf.put_str(7, 3, "hi", ColorPair::DEFAULT);
        assert_eq!(buf.row_text(1), " hi   ");
    }

    #[test]
    fn put_str_continues_on_next_row() {
        let mut buf = FrameBuffer::new(4, 2);
        let written = buf.put_str(2, 0, "abcd", ColorPair::DEFAULT);
        assert_eq!(written, 4);
        assert_eq!(buf.row_text(0), "  ab");
        assert_eq!(buf.row_text(1), "cd  ");
    }

    #[test]
    fn put_str_stops_at_bottom_right() {
        let mut buf = FrameBuffer::new(3, 1);
        let written = buf.put_str(1, 0, "abcdef", ColorPair::DEFAULT);
        assert_eq!(written, 2);
        assert_eq!(buf.row_text(0), " ab");
    }

    #[test]
    fn put_str_skips_control_characters() {
        let mut buf = FrameBuffer::new(4, 1);
        buf.put_str(0, 0, "a\tb", ColorPair::DEFAULT);
        assert_eq!(buf.row_text(0), "ab  ");
    }

    #[test]
    fn put_str_applies_pair() {
        let mut buf = FrameBuffer::new(4, 1);
        let pair = ColorPair::from_palette(palette::YELLOW, palette::BLUE);
        buf.put_str(0, 0, "a", pair);
        assert_eq!(buf.get(0, 0).map(|c| c.pair()), Some(pair));
        assert_eq!(buf.get(1, 0).map(|c| c.pair()), Some(ColorPair::DEFAULT));
    }

    // ── Wide characters ─────────────────────────────────────────────

    #[test]
    fn wide_char_takes_two_columns() {
        let mut buf = FrameBuffer::new(4, 1);
        assert_eq!(buf.put_str(0, 0, "中a", ColorPair::DEFAULT), 3);
        assert!(buf.get(1, 0).is_some_and(|c| c.is_continuation()));
        assert_eq!(buf.row_text(0), "中a ");
    }

    #[test]
    fn wide_char_at_edge_moves_down() {
        let mut buf = FrameBuffer::new(3, 2);
        buf.put_str(2, 0, "中", ColorPair::DEFAULT);
        assert_eq!(buf.row_text(0), "   ");
        assert_eq!(buf.row_text(1), "中 ");
    }

    #[test]
    fn overwriting_half_a_wide_char_blanks_the_rest() {
        let mut buf = FrameBuffer::new(4, 1);
        buf.put_str(0, 0, "中", ColorPair::DEFAULT);
        buf.put_str(1, 0, "x", ColorPair::DEFAULT);
        assert_eq!(buf.row_text(0), " x  ");
    }

    // ── Lines & clearing ────────────────────────────────────────────

    #[test]
    fn put_lines_stacks_rows() {
        let mut buf = FrameBuffer::new(5, 3);
        buf.put_lines(1, 0, &["ab", "cd"], ColorPair::DEFAULT);
        assert_eq!(buf.row_text(0), " ab  ");
        assert_eq!(buf.row_text(1), " cd  ");
        assert_eq!(buf.row_text(2), "     ");
    }

    #[test]
    fn clear_row_only_touches_that_row() {
        let mut buf = FrameBuffer::new(3, 2);
        buf.put_lines(0, 0, &["abc", "def"], ColorPair::DEFAULT);
        buf.clear_row(1);
        assert_eq!(buf.row_text(0), "abc");
        assert_eq!(buf.row_text(1), "   ");
    }

    #[test]
    fn resize_clears() {
        let mut buf = FrameBuffer::new(3, 1);
        buf.put_str(0, 0, "abc", ColorPair::DEFAULT);
        buf.resize(2, 2);
        assert_eq!(buf.row_text(0), "  ");
        assert_eq!(buf.height(), 2);
    }

    #[test]
    fn string_width_counts_columns() {
        assert_eq!(string_width(""), 0);
        assert_eq!(string_width("a中b"), 4);
    }
}
