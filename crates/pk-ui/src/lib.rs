// SPDX-License-Identifier: MIT
//
// pk-ui — composition layer for panelkit.
//
// A tree of positioned, paintable nodes (blocks, labels, panels) drawn on
// a `pk_term::surface::Surface`, and an application loop that polls keys,
// dispatches them to registered shortcuts and repaints at a fixed rate.
//
// Layout is explicit: a label's box is fixed when it is built, and a
// panel only moves its children when `pack` is called.

pub mod app;
pub mod config;
pub mod element;
pub mod error;
pub mod label;
pub mod palette;
pub mod panel;
pub mod prompt;
pub mod shortcut;
pub mod timer;

pub use app::{Application, Context, Step, Update};
pub use config::AppConfig;
pub use element::{Element, Node};
pub use error::UiError;
pub use label::{Edges, Label, LabelStyle, TextAlign};
pub use palette::{ColorRef, ColorRegistry};
pub use panel::{PackMode, Panel};
pub use shortcut::{Binding, Command, Shortcuts};
pub use timer::RefreshTimer;
