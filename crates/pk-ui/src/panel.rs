// SPDX-License-Identifier: MIT
//
// Panel — an ordered container with one-shot packing.
//
// `pack` anchors the first child at the panel's position and chains every
// following child off the one before it:
//
//   row     next.x = prev.x + prev.width + spacing        next.y = prev.y
//   column  next.y = prev.y + prev.height + 1 + spacing   next.x = prev.x
//
// The extra row in column mode pairs with the label height formula, which
// is one row short of what a label paints. Packing is explicit and shallow:
// nested panels keep their own children where they were until they are
// packed themselves. The panel's own box is never resized.

use std::str::FromStr;

use pk_term::surface::Surface;

use crate::element::{Element, Node, Rect};
use crate::error::{UiError, UiResult};
use crate::palette::ColorRegistry;

// ─── PackMode ───────────────────────────────────────────────────────────────

/// How `pack` arranges children.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PackMode {
    Row,
    Column,
    /// Validated but not laid out: children stay where they are.
    Grid {
        gwidth: Option<u16>,
        gheight: Option<u16>,
    },
}

impl FromStr for PackMode {
    type Err = UiError;

    /// `"row"`, `"column"` or `"grid"` (with no grid options set).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "row" => Ok(Self::Row),
            "column" => Ok(Self::Column),
            "grid" => Ok(Self::Grid {
                gwidth: None,
                gheight: None,
            }),
            other => Err(UiError::UnknownPackMode(other.to_owned())),
        }
    }
}

// ─── Panel ──────────────────────────────────────────────────────────────────

/// Container node. Paints its children in insertion order.
#[derive(Debug, Clone, Default)]
pub struct Panel {
    base: Element,
    children: Vec<Node>,
}

impl Panel {
    /// An empty 1×1 panel at the origin.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// An empty panel anchored at `(x, y)`.
    #[must_use]
    pub fn at(x: u16, y: u16) -> Self {
        Self {
            base: Element::default().at(x, y),
            children: Vec::new(),
        }
    }

    #[must_use]
    pub const fn element(&self) -> &Element {
        &self.base
    }

    pub const fn element_mut(&mut self) -> &mut Element {
        &mut self.base
    }

    /// Move the anchor. Children follow on the next `pack`.
    pub const fn set_position(&mut self, x: u16, y: u16) {
        self.base.set_position(x, y);
    }

    /// Append a child.
    pub fn add(&mut self, node: impl Into<Node>) {
        self.children.push(node.into());
    }

    #[must_use]
    pub fn children(&self) -> &[Node] {
        &self.children
    }

    pub fn children_mut(&mut self) -> &mut [Node] {
        &mut self.children
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.children.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    /// Reposition the children.
    ///
    /// ```
    /// use pk_ui::{Element, PackMode, Panel};
    ///
    /// let mut panel = Panel::at(10, 10);
    /// for width in [5, 7, 4] {
    ///     panel.add(Element::new(width, 1)?);
    /// }
    /// panel.pack(PackMode::Row, 1)?;
    ///
    /// let xs: Vec<u16> = panel.children().iter().map(|c| c.bounds().x).collect();
    /// assert_eq!(xs, [10, 16, 24]);
    /// # Ok::<(), pk_ui::UiError>(())
    /// ```
    ///
    /// # Errors
    ///
    /// `UiError::MissingGridOption` when a grid mode lacks `gwidth` or
    /// `gheight`. Checked before anything else, even for an empty panel.
    pub fn pack(&mut self, mode: PackMode, spacing: u16) -> UiResult<()> {
        match mode {
            PackMode::Grid { gwidth, gheight } => {
                let gwidth = gwidth.ok_or(UiError::MissingGridOption("gwidth"))?;
                let gheight = gheight.ok_or(UiError::MissingGridOption("gheight"))?;
                tracing::debug!(gwidth, gheight, "grid packing leaves children in place");
                Ok(())
            }
            PackMode::Row => {
                self.chain(|prev| (prev.right().saturating_add(spacing), prev.y));
                Ok(())
            }
            PackMode::Column => {
                self.chain(|prev| {
                    let y = prev.bottom().saturating_add(1).saturating_add(spacing);
                    (prev.x, y)
                });
                Ok(())
            }
        }
    }

    /// Anchor the first child and place each next one relative to the
    /// previous child's box.
    fn chain(&mut self, next: impl Fn(Rect) -> (u16, u16)) {
        let Some((first, rest)) = self.children.split_first_mut() else {
            return;
        };

        first.set_position(self.base.x, self.base.y);
        let mut prev = first.bounds();
        for child in rest {
            let (x, y) = next(prev);
            child.set_position(x, y);
            prev = child.bounds();
        }

        tracing::debug!(
            children = self.children.len(),
            x = self.base.x,
            y = self.base.y,
            "panel packed"
        );
    }

    /// Paint every child in insertion order.
    ///
    /// # Errors
    ///
    /// Stops at the first child that fails to paint.
    pub fn paint(&self, surface: &mut dyn Surface, colors: &ColorRegistry) -> UiResult<()> {
        self.children
            .iter()
            .try_for_each(|child| child.paint(surface, colors))
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
