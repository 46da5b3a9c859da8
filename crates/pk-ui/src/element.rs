// SPDX-License-Identifier: MIT
//
// Element geometry and the node tree.
//
// `Element` is the positioned box every node carries. `Node` is the closed
// set of things that can sit in a panel or an application: a plain block,
// a label or a nested panel. Painting only writes to the surface; it never
// changes geometry.

use pk_term::surface::Surface;

use crate::error::{UiError, UiResult};
use crate::label::Label;
use crate::palette::ColorRegistry;
use crate::panel::Panel;

// ─── Rect ───────────────────────────────────────────────────────────────────

/// Position and size of a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rect {
    pub x: u16,
    pub y: u16,
    pub width: u16,
    pub height: u16,
}

impl Rect {
    /// First column past the right edge.
    #[inline]
    #[must_use]
    pub const fn right(self) -> u16 {
        self.x.saturating_add(self.width)
    }

    /// First row past the bottom edge.
    #[inline]
    #[must_use]
    pub const fn bottom(self) -> u16 {
        self.y.saturating_add(self.height)
    }
}

// ─── Element ────────────────────────────────────────────────────────────────

/// A positioned, sized box. Painted on its own it is a solid block of `x`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Element {
    pub width: u16,
    pub height: u16,
    pub x: u16,
    pub y: u16,
    /// Reserved for focus traversal.
    pub traversable: bool,
}

impl Element {
    /// A `width` × `height` element at the origin.
    ///
    /// # Errors
    ///
    /// `UiError::InvalidGeometry` if either dimension is 0.
    pub const fn new(width: u16, height: u16) -> UiResult<Self> {
        if width == 0 || height == 0 {
            return Err(UiError::InvalidGeometry { width, height });
        }
        Ok(Self {
            width,
            height,
            x: 0,
            y: 0,
            traversable: false,
        })
    }

    /// Move to `(x, y)`.
    #[must_use]
    pub const fn at(self, x: u16, y: u16) -> Self {
        Self { x, y, ..self }
    }

    #[inline]
    #[must_use]
    pub const fn bounds(&self) -> Rect {
        Rect {
            x: self.x,
            y: self.y,
            width: self.width,
            height: self.height,
        }
    }

    pub const fn set_position(&mut self, x: u16, y: u16) {
        self.x = x;
        self.y = y;
    }

    /// `height` rows of `width` `x` characters.
    pub fn paint(&self, surface: &mut dyn Surface) {
        let row = "x".repeat(usize::from(self.width));
        for dy in 0..self.height {
            surface.write_at(i32::from(self.x), i32::from(self.y) + i32::from(dy), &row, 0);
        }
    }
}

impl Default for Element {
    /// 1×1 at the origin.
    fn default() -> Self {
        Self {
            width: 1,
            height: 1,
            x: 0,
            y: 0,
            traversable: false,
        }
    }
}

// ─── Node ───────────────────────────────────────────────────────────────────

/// Anything that can be placed in a panel or an application.
#[derive(Debug, Clone)]
pub enum Node {
    Block(Element),
    Label(Label),
    Panel(Panel),
}

impl Node {
    /// Draw the node (and, for panels, its children in order).
    ///
    /// # Errors
    ///
    /// `UiError::UnknownColor` if a label names an unregistered pair.
    pub fn paint(&self, surface: &mut dyn Surface, colors: &ColorRegistry) -> UiResult<()> {
        match self {
            Self::Block(element) => {
                element.paint(surface);
                Ok(())
            }
            Self::Label(label) => label.paint(surface, colors),
            Self::Panel(panel) => panel.paint(surface, colors),
        }
    }

    /// The node's own box.
    #[must_use]
    pub const fn element(&self) -> &Element {
        match self {
            Self::Block(element) => element,
            Self::Label(label) => label.element(),
            Self::Panel(panel) => panel.element(),
        }
    }

    pub const fn element_mut(&mut self) -> &mut Element {
        match self {
            Self::Block(element) => element,
            Self::Label(label) => label.element_mut(),
            Self::Panel(panel) => panel.element_mut(),
        }
    }

    #[must_use]
    pub const fn bounds(&self) -> Rect {
        self.element().bounds()
    }

    /// Move the node. A panel's children stay put until it is packed again.
    pub const fn set_position(&mut self, x: u16, y: u16) {
        self.element_mut().set_position(x, y);
    }

    #[must_use]
    pub const fn as_label(&self) -> Option<&Label> {
        match self {
            Self::Label(label) => Some(label),
            _ => None,
        }
    }

    pub const fn as_label_mut(&mut self) -> Option<&mut Label> {
        match self {
            Self::Label(label) => Some(label),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_panel(&self) -> Option<&Panel> {
        match self {
            Self::Panel(panel) => Some(panel),
            _ => None,
        }
    }

    pub const fn as_panel_mut(&mut self) -> Option<&mut Panel> {
        match self {
            Self::Panel(panel) => Some(panel),
            _ => None,
        }
    }
}

impl From<Element> for Node {
    fn from(element: Element) -> Self {
        Self::Block(element)
    }
}

impl From<Label> for Node {
    fn from(label: Label) -> Self {
        Self::Label(label)
    }
}

impl From<Panel> for Node {
    fn from(panel: Panel) -> Self {
        Self::Panel(panel)
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
