// SPDX-License-Identifier: MIT
//
// Label — padded, aligned, multi-line text.
//
// The label's box is computed once, when it is built:
//
//   width  = widest line + left + right padding
//   height = newline count + top + bottom padding
//
// The height formula counts newlines, not lines, so it is one row short
// of what `paint` draws; `painted_height` gives the real row count and is
// what construction validates. Packing uses the stored height.
//
// Painting reflows the *current* text every time: lines are aligned within
// the widest current line plus horizontal padding, and top/bottom padding
// rows are blank rows of that width. Replacing the text with `align_text`
// never changes the box. Margins are stored but not applied.

use pk_term::surface::Surface;
use unicode_width::UnicodeWidthStr;

use crate::element::Element;
use crate::error::{UiError, UiResult};
use crate::palette::{ColorRef, ColorRegistry};

// ─── Edges ──────────────────────────────────────────────────────────────────

/// Per-side spacing: top, right, bottom, left.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Edges {
    pub top: u16,
    pub right: u16,
    pub bottom: u16,
    pub left: u16,
}

impl Edges {
    pub const ZERO: Self = Self::uniform(0);

    #[must_use]
    pub const fn new(top: u16, right: u16, bottom: u16, left: u16) -> Self {
        Self {
            top,
            right,
            bottom,
            left,
        }
    }

    #[must_use]
    pub const fn uniform(n: u16) -> Self {
        Self::new(n, n, n, n)
    }

    /// Left + right.
    #[must_use]
    pub const fn horizontal(self) -> u16 {
        self.left.saturating_add(self.right)
    }
}

impl From<(u16, u16, u16, u16)> for Edges {
    fn from((top, right, bottom, left): (u16, u16, u16, u16)) -> Self {
        Self::new(top, right, bottom, left)
    }
}

// ─── Style ──────────────────────────────────────────────────────────────────

/// Horizontal placement of each line inside the label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextAlign {
    /// After the left padding.
    Left,
    /// Centered across the full padded width.
    #[default]
    Middle,
    /// Before the right padding.
    Right,
}

/// Construction options for [`Label::styled`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelStyle {
    pub padding: Edges,
    pub margin: Edges,
    pub align: TextAlign,
    pub color: ColorRef,
    pub traversable: bool,
}

impl Default for LabelStyle {
    /// Padding (1, 2, 1, 2), margin 1 all round, centered, default colors.
    fn default() -> Self {
        Self {
            padding: Edges::new(1, 2, 1, 2),
            margin: Edges::uniform(1),
            align: TextAlign::default(),
            color: ColorRef::default(),
            traversable: false,
        }
    }
}

// ─── Label ──────────────────────────────────────────────────────────────────

/// A text-bearing leaf node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Label {
    base: Element,
    text: String,
    padding: Edges,
    margin: Edges,
    align: TextAlign,
    color: ColorRef,
}

impl Label {
    /// A label with the default style.
    ///
    /// # Errors
    ///
    /// See [`Label::styled`].
    pub fn new(text: impl Into<String>) -> UiResult<Self> {
        Self::styled(text, LabelStyle::default())
    }

    /// A label with explicit padding, margin, alignment and color.
    ///
    /// ```
    /// use pk_ui::label::{Edges, Label, LabelStyle};
    ///
    /// let label = Label::styled("Hello\nWorld!", LabelStyle {
    ///     padding: Edges::new(1, 2, 1, 2),
    ///     ..LabelStyle::default()
    /// })?;
    /// assert_eq!(label.width(), 10);
    /// assert_eq!(label.height(), 3);
    /// assert_eq!(label.painted_height(), 4);
    /// # Ok::<(), pk_ui::UiError>(())
    /// ```
    ///
    /// # Errors
    ///
    /// `UiError::InvalidGeometry` when the painted box would be empty, which
    /// only happens for empty text without horizontal padding.
    pub fn styled(text: impl Into<String>, style: LabelStyle) -> UiResult<Self> {
        let text = text.into();
        let padding = style.padding;

        let width = clamp_u16(longest_line(&text)).saturating_add(padding.horizontal());
        let height = clamp_u16(newline_count(&text))
            .saturating_add(padding.top)
            .saturating_add(padding.bottom);

        let label = Self {
            base: Element {
                width,
                height,
                x: 0,
                y: 0,
                traversable: style.traversable,
            },
            text,
            padding,
            margin: style.margin,
            align: style.align,
            color: style.color,
        };

        if width == 0 {
            return Err(UiError::InvalidGeometry {
                width,
                height: label.painted_height(),
            });
        }
        Ok(label)
    }

    // ── Accessors ───────────────────────────────────────────────────

    #[must_use]
    pub const fn element(&self) -> &Element {
        &self.base
    }

    pub const fn element_mut(&mut self) -> &mut Element {
        &mut self.base
    }

    #[must_use]
    pub const fn width(&self) -> u16 {
        self.base.width
    }

    /// Stored height (newline count + vertical padding).
    #[must_use]
    pub const fn height(&self) -> u16 {
        self.base.height
    }

    /// Rows drawn by `paint` for the current text.
    #[must_use]
    pub fn painted_height(&self) -> u16 {
        clamp_u16(newline_count(&self.text))
            .saturating_add(1)
            .saturating_add(self.padding.top)
            .saturating_add(self.padding.bottom)
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[must_use]
    pub const fn align(&self) -> TextAlign {
        self.align
    }

    #[must_use]
    pub const fn padding(&self) -> Edges {
        self.padding
    }

    #[must_use]
    pub const fn margin(&self) -> Edges {
        self.margin
    }

    #[must_use]
    pub const fn color(&self) -> &ColorRef {
        &self.color
    }

    pub fn set_color(&mut self, color: impl Into<ColorRef>) {
        self.color = color.into();
    }

    pub const fn set_position(&mut self, x: u16, y: u16) {
        self.base.set_position(x, y);
    }

    // ── Content ─────────────────────────────────────────────────────

    /// Replace the text and/or the alignment. A missing or empty text keeps
    /// the current one. The box is not recomputed.
    pub fn align_text(&mut self, text: Option<&str>, align: Option<TextAlign>) {
        if let Some(text) = text.filter(|t| !t.is_empty()) {
            text.clone_into(&mut self.text);
        }
        if let Some(align) = align {
            self.align = align;
        }
    }

    /// The rows `paint` draws: blank padding rows around the aligned lines.
    #[must_use]
    pub fn render_lines(&self) -> Vec<String> {
        let left = usize::from(self.padding.left);
        let right = usize::from(self.padding.right);
        let target = longest_line(&self.text) + left + right;
        let blank = " ".repeat(target);

        let mut rows = Vec::with_capacity(usize::from(self.painted_height()));
        rows.extend((0..self.padding.top).map(|_| blank.clone()));
        rows.extend(
            self.text
                .split('\n')
                .map(|line| align_line(line, target, left, right, self.align)),
        );
        rows.extend((0..self.padding.bottom).map(|_| blank.clone()));
        rows
    }

    /// Draw at the label's position.
    ///
    /// # Errors
    ///
    /// `UiError::UnknownColor` when the color names an unregistered pair.
    pub fn paint(&self, surface: &mut dyn Surface, colors: &ColorRegistry) -> UiResult<()> {
        let color = colors.resolve(&self.color)?;
        let rows = self.render_lines();
        let refs: Vec<&str> = rows.iter().map(String::as_str).collect();
        surface.write_lines(i32::from(self.base.x), i32::from(self.base.y), &refs, color);
        Ok(())
    }
}

// ─── Helpers ────────────────────────────────────────────────────────────────

fn longest_line(text: &str) -> usize {
    text.split('\n').map(UnicodeWidthStr::width).max().unwrap_or(0)
}

fn newline_count(text: &str) -> usize {
    text.matches('\n').count()
}

fn clamp_u16(n: usize) -> u16 {
    u16::try_from(n).unwrap_or(u16::MAX)
}

/// Fit `line` into `target` columns.
///
/// Middle splits the slack in half; an odd slack puts the extra column on
/// the left only when `target` is odd too.
fn align_line(line: &str, target: usize, left: usize, right: usize, align: TextAlign) -> String {
    let width = line.width();
    let slack = target.saturating_sub(width);
    let before = match align {
        TextAlign::Left => left.min(slack),
        TextAlign::Right => slack.saturating_sub(right),
        TextAlign::Middle => slack / 2 + (slack & target & 1),
    };
    let after = slack - before;

    let mut out = String::with_capacity(line.len() + slack);
    out.extend(std::iter::repeat_n(' ', before));
    out.push_str(line);
    out.extend(std::iter::repeat_n(' ', after));
    out
}

// ─── Tests ───────────────────────────────────────────────────────────────────
