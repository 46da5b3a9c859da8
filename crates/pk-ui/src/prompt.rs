// SPDX-License-Identifier: MIT
//
// Status-line messages and modal one-key prompts.
//
// Everything here writes to the last row of the surface, clearing it
// first so only one message is visible at a time. The one-key prompt is
// the only place the UI blocks: it switches the surface to blocking mode,
// waits for a single key and puts the previous mode back.

use std::io;

use pk_term::surface::Surface;

/// Row used for messages: the last row of the surface.
#[must_use]
pub fn status_row(surface: &dyn Surface) -> u16 {
    surface.dimensions().rows.saturating_sub(1)
}

/// Replace the status line with `msg`.
pub fn alert(surface: &mut dyn Surface, msg: &str) {
    let row = status_row(surface);
    surface.clear_row(row);
    surface.write_at(0, i32::from(row), msg, 0);
}

/// Show a question on the status line. Input is read separately.
pub fn prompt(surface: &mut dyn Surface, msg: &str) {
    alert(surface, msg);
}

/// Show `msg`, wait for one key and return its name.
///
/// The surface is flushed so the question is visible, then read in
/// blocking mode; the caller's blocking mode is restored afterwards.
///
/// # Errors
///
/// Returns an error if flushing or reading fails.
pub fn one_key_prompt(surface: &mut dyn Surface, msg: &str) -> io::Result<String> {
    alert(surface, msg);
    surface.flush()?;

    let was_blocking = surface.is_blocking();
    surface.set_blocking(true);
    let key = surface.read_key();
    surface.set_blocking(was_blocking);

    key?.map(|key| key.name())
        .ok_or_else(|| io::Error::new(io::ErrorKind::UnexpectedEof, "no key read"))
}

/// Ask a yes/no question. Shows `"<msg> (<Answers>)"` with `answers` in
/// title case and returns `true` iff the key pressed is the first
/// character of `answers`. Any other key is a no; there is no retry.
///
/// # Errors
///
/// See [`one_key_prompt`].
pub fn yesno(surface: &mut dyn Surface, msg: &str, answers: &str) -> io::Result<bool> {
    let key = one_key_prompt(surface, &question(msg, answers))?;

    Ok(answers
        .chars()
        .next()
        .is_some_and(|first| key == first.to_string()))
}

/// The text [`yesno`] shows: `"<msg> (<Answers>)"`.
#[must_use]
pub fn question(msg: &str, answers: &str) -> String {
    format!("{msg} ({})", title_case(answers))
}

/// Uppercase the first letter of every word, lowercase the rest.
fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut in_word = false;
    for ch in s.chars() {
        if ch.is_alphabetic() {
            if in_word {
                out.extend(ch.to_lowercase());
            } else {
                out.extend(ch.to_uppercase());
            }
            in_word = true;
        } else {
            out.push(ch);
            in_word = false;
        }
    }
    out
}

// ─── Tests ───────────────────────────────────────────────────────────────────
