// SPDX-License-Identifier: MIT
//
// pk-term — terminal driver for panelkit.
//
// Everything below the composition layer lives here: the cell grid that
// elements paint into, ANSI output, raw-mode terminal control, stdin
// polling and key parsing. The `surface` module is the seam: `pk-ui`
// talks to a `Surface` and never to termios or escape sequences.
//
// No TUI framework underneath. Frames are written in full on every flush;
// there is no diffing against a previous frame.

pub mod ansi;
pub mod buffer;
pub mod cell;
pub mod color;
pub mod input;
pub mod output;
pub mod reader;
pub mod screen;
pub mod surface;
pub mod terminal;
