// SPDX-License-Identifier: MIT
//
// Application — the key-dispatch and repaint loop.
//
// Lifecycle:
//
//   run ──► acquire ──► start ──► step … step ──► release
//
// `start` applies the configured input mode, installs the color pairs
// and draws the first frame unconditionally. Each `step`:
//
//   1. reads at most one key (non-blocking by default)
//   2. shows "You pressed <key>" on the status line
//   3. runs the key's binding; quit ends the loop, command errors go to
//      the status line
//   4. if the refresh timer has fired: update hook, paint, flush
//
// Handler faults never stop the loop. Only surface I/O (acquire, flush,
// release, or input that has gone away for good) ends `run` with an
// error, and the surface is released on every path out of it, unwinding
// included.

use std::io;
use std::thread;
use std::time::Instant;

use pk_term::surface::Surface;

use crate::config::AppConfig;
use crate::element::Node;
use crate::error::UiResult;
use crate::palette::ColorRegistry;
use crate::prompt;
use crate::shortcut::{Binding, Command, Shortcuts};
use crate::timer::RefreshTimer;

/// Text drawn by the default update hook at (10, 0).
pub const BANNER: &str = "Hello ! \nThis is a basic panelkit application.\n\nPress q to quit.";

/// Question asked before quitting when `confirm_quit` is set.
pub const QUIT_QUESTION: &str = "Are you sure you want to quit ?";

// ─── Context ────────────────────────────────────────────────────────────────

/// What commands and update hooks can touch.
pub struct Context<'a> {
    surface: &'a mut dyn Surface,
    elements: &'a mut Vec<Node>,
    colors: &'a mut ColorRegistry,
    status: &'a mut Option<String>,
}

impl<'a> Context<'a> {
    pub(crate) fn new(
        surface: &'a mut dyn Surface,
        elements: &'a mut Vec<Node>,
        colors: &'a mut ColorRegistry,
        status: &'a mut Option<String>,
    ) -> Self {
        Self {
            surface,
            elements,
            colors,
            status,
        }
    }

    pub fn surface(&mut self) -> &mut dyn Surface {
        &mut *self.surface
    }

    /// Join `parts` with `sep` and write the result at `(x, y)`.
    pub fn write(&mut self, x: i32, y: i32, parts: &[&str], sep: &str, color: u16) {
        self.surface.write_at(x, y, &parts.join(sep), color);
    }

    /// Write each line of `text` on its own row, starting at `(x, y)`.
    pub fn write_lines(&mut self, x: i32, y: i32, text: &str, color: u16) {
        let lines: Vec<&str> = text.split('\n').collect();
        self.surface.write_lines(x, y, &lines, color);
    }

    /// Replace the status line.
    pub fn alert(&mut self, msg: &str) {
        show_status(&mut *self.surface, &mut *self.status, msg);
    }

    pub fn prompt(&mut self, msg: &str) {
        prompt::prompt(&mut *self.surface, msg);
        *self.status = Some(msg.to_owned());
    }

    /// The message currently on the status line.
    #[must_use]
    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    /// See [`prompt::one_key_prompt`].
    ///
    /// # Errors
    ///
    /// Returns an error if the surface cannot flush or read.
    pub fn one_key_prompt(&mut self, msg: &str) -> io::Result<String> {
        *self.status = Some(msg.to_owned());
        prompt::one_key_prompt(&mut *self.surface, msg)
    }

    /// See [`prompt::yesno`].
    ///
    /// # Errors
    ///
    /// Returns an error if the surface cannot flush or read.
    pub fn yesno(&mut self, msg: &str, answers: &str) -> io::Result<bool> {
        *self.status = Some(prompt::question(msg, answers));
        prompt::yesno(&mut *self.surface, msg, answers)
    }

    #[must_use]
    pub fn elements(&self) -> &[Node] {
        self.elements.as_slice()
    }

    pub fn elements_mut(&mut self) -> &mut Vec<Node> {
        &mut *self.elements
    }

    #[must_use]
    pub fn colors(&self) -> &ColorRegistry {
        &*self.colors
    }

    /// Register a named color pair on the surface.
    ///
    /// # Errors
    ///
    /// `UiError::PairsExhausted` when no index is left.
    pub fn register_color(&mut self, name: &str, fg: u8, bg: u8) -> UiResult<u16> {
        self.colors.register(name, fg, bg, &mut *self.surface)
    }
}

// ─── Update hook ────────────────────────────────────────────────────────────

/// Runs before every repaint.
///
/// Implemented for every `FnMut(&mut Context) -> anyhow::Result<()>`.
pub trait Update {
    /// # Errors
    ///
    /// Any error is shown on the status line; the loop keeps running.
    fn update(&mut self, ctx: &mut Context<'_>) -> anyhow::Result<()>;
}

impl<F> Update for F
where
    F: FnMut(&mut Context<'_>) -> anyhow::Result<()>,
{
    fn update(&mut self, ctx: &mut Context<'_>) -> anyhow::Result<()> {
        self(ctx)
    }
}

/// The default hook: draws [`BANNER`].
#[derive(Debug, Clone, Copy, Default)]
pub struct Banner;

impl Update for Banner {
    fn update(&mut self, ctx: &mut Context<'_>) -> anyhow::Result<()> {
        ctx.write_lines(10, 0, BANNER, 0);
        Ok(())
    }
}

// ─── Application ────────────────────────────────────────────────────────────

/// Outcome of one loop iteration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// A key was handled or a frame was drawn.
    Continue,
    /// Nothing happened.
    Idle,
    /// The quit binding confirmed.
    Quit,
}

/// Element list, shortcut table and color registry, plus the loop that
/// drives them.
pub struct Application {
    elements: Vec<Node>,
    shortcuts: Shortcuts,
    colors: ColorRegistry,
    config: AppConfig,
    update: Option<Box<dyn Update>>,
    timer: RefreshTimer,
    status: Option<String>,
}

impl Application {
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(AppConfig::default())
    }

    /// An application configured by `config`. With `banner` off there is
    /// no update hook until one is set.
    #[must_use]
    pub fn with_config(config: AppConfig) -> Self {
        let update: Option<Box<dyn Update>> = config.banner.then(|| Box::new(Banner) as _);
        Self {
            elements: Vec::new(),
            shortcuts: Shortcuts::new(),
            colors: ColorRegistry::new(),
            timer: RefreshTimer::new(config.refresh_interval()),
            config,
            update,
            status: None,
        }
    }

    #[must_use]
    pub const fn config(&self) -> &AppConfig {
        &self.config
    }

    // ── Elements ────────────────────────────────────────────────────

    /// Append a node to the paint list.
    pub fn add(&mut self, node: impl Into<Node>) {
        self.elements.push(node.into());
    }

    #[must_use]
    pub fn elements(&self) -> &[Node] {
        &self.elements
    }

    pub fn elements_mut(&mut self) -> &mut Vec<Node> {
        &mut self.elements
    }

    #[must_use]
    pub const fn colors(&self) -> &ColorRegistry {
        &self.colors
    }

    /// Register a named color pair. The index is always above the
    /// standard pairs, and [`start`](Self::start) defines it again on the
    /// surface it runs on.
    ///
    /// # Errors
    ///
    /// `UiError::PairsExhausted` when no index is left.
    pub fn register_color(
        &mut self,
        name: &str,
        fg: u8,
        bg: u8,
        surface: &mut dyn Surface,
    ) -> UiResult<u16> {
        self.colors.register(name, fg, bg, surface)
    }

    // ── Shortcuts ───────────────────────────────────────────────────

    /// Bind `key` to `command`, replacing any previous binding.
    pub fn shortcut(&mut self, key: impl Into<String>, command: impl Command + 'static) {
        self.shortcuts.bind_command(key, command);
    }

    /// [`shortcut`](Self::shortcut) for closures, with the argument types
    /// spelled out so they need no annotations.
    pub fn shortcut_fn<F>(&mut self, key: impl Into<String>, f: F)
    where
        F: FnMut(&str, &mut Context<'_>) -> anyhow::Result<()> + 'static,
    {
        self.shortcuts.bind_command(key, f);
    }

    /// The message currently on the status line.
    #[must_use]
    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    /// What `key` is bound to.
    #[must_use]
    pub fn binding(&self, key: &str) -> Option<&Binding> {
        self.shortcuts.get(key)
    }

    pub const fn shortcuts_mut(&mut self) -> &mut Shortcuts {
        &mut self.shortcuts
    }

    // ── Update hook ─────────────────────────────────────────────────

    /// Replace the update hook.
    pub fn on_update(&mut self, hook: impl Update + 'static) {
        self.update = Some(Box::new(hook));
    }

    /// [`on_update`](Self::on_update) for closures.
    pub fn on_update_fn<F>(&mut self, f: F)
    where
        F: FnMut(&mut Context<'_>) -> anyhow::Result<()> + 'static,
    {
        self.update = Some(Box::new(f));
    }

    pub fn clear_update(&mut self) {
        self.update = None;
    }

    // ── Loop ────────────────────────────────────────────────────────

    /// Acquire the surface, run until quit, release the surface.
    ///
    /// # Errors
    ///
    /// `UiError::Io` if the surface cannot be acquired, flushed or
    /// released, or if its input is closed. The surface is released
    /// before the error is returned, and also when a handler panics.
    pub fn run(&mut self, surface: &mut dyn Surface) -> UiResult<()> {
        surface.acquire()?;
        tracing::info!(
            cols = surface.dimensions().cols,
            rows = surface.dimensions().rows,
            "application started"
        );

        let mut held = Held::new(surface);
        let result = self
            .start(held.surface(), Instant::now())
            .and_then(|()| self.run_loop(held.surface()));
        let released = held.release();

        match &result {
            Ok(()) => tracing::info!("application stopped"),
            Err(err) => tracing::error!(%err, "application stopped on error"),
        }
        result?;
        released?;
        Ok(())
    }

    /// Prepare an acquired surface: input mode, color pairs, first frame.
    /// The refresh interval starts at `now`.
    ///
    /// # Errors
    ///
    /// `UiError::Io` if the first flush fails.
    pub fn start(&mut self, surface: &mut dyn Surface, now: Instant) -> UiResult<()> {
        surface.set_blocking(!self.config.nonblocking);
        self.colors.install(surface);
        self.timer = RefreshTimer::starting_at(self.config.refresh_interval(), now);
        self.refresh(surface)
    }

    fn run_loop(&mut self, surface: &mut dyn Surface) -> UiResult<()> {
        let idle = self.config.idle_sleep();
        loop {
            match self.step(surface, Instant::now())? {
                Step::Quit => return Ok(()),
                Step::Idle if !idle.is_zero() => thread::sleep(idle),
                Step::Idle | Step::Continue => {}
            }
        }
    }

    /// One loop iteration, with `now` as the refresh timer's clock.
    ///
    /// # Errors
    ///
    /// `UiError::Io` if the input is closed or the flush fails.
    pub fn step(&mut self, surface: &mut dyn Surface, now: Instant) -> UiResult<Step> {
        let key = match surface.read_key() {
            Ok(key) => key.map(|key| key.name()),
            Err(err) if err.kind() == io::ErrorKind::UnexpectedEof => return Err(err.into()),
            Err(err) => {
                tracing::debug!(%err, "key read failed");
                None
            }
        };

        let handled = key.is_some();
        if let Some(key) = key {
            show_status(surface, &mut self.status, &format!("You pressed {key}"));
            if self.dispatch(surface, &key) {
                return Ok(Step::Quit);
            }
        }

        if !self.timer.fire_at(now) {
            return Ok(if handled { Step::Continue } else { Step::Idle });
        }

        self.refresh(surface)?;
        Ok(Step::Continue)
    }

    /// Run the binding for `key`. Returns `true` when the loop should end.
    fn dispatch(&mut self, surface: &mut dyn Surface, key: &str) -> bool {
        let Some(binding) = self.shortcuts.get_mut(key) else {
            return false;
        };
        tracing::debug!(key = %key.escape_debug(), ?binding, "dispatch");

        match binding {
            Binding::Quit => {
                if !self.config.confirm_quit {
                    return true;
                }
                self.status = Some(prompt::question(QUIT_QUESTION, "yn"));
                match prompt::yesno(surface, QUIT_QUESTION, "yn") {
                    Ok(confirmed) => confirmed,
                    Err(err) => {
                        report(surface, &mut self.status, "quit prompt", &err);
                        false
                    }
                }
            }
            Binding::Command(command) => {
                let result = {
                    let mut ctx = Context::new(
                        &mut *surface,
                        &mut self.elements,
                        &mut self.colors,
                        &mut self.status,
                    );
                    command.execute(key, &mut ctx)
                };
                if let Err(err) = result {
                    report(surface, &mut self.status, "command", &err);
                }
                false
            }
        }
    }

    /// Update hook, paint, flush. Hook and paint errors go to the status
    /// line.
    fn refresh(&mut self, surface: &mut dyn Surface) -> UiResult<()> {
        if let Some(hook) = self.update.as_mut() {
            let result = {
                let mut ctx = Context::new(
                    &mut *surface,
                    &mut self.elements,
                    &mut self.colors,
                    &mut self.status,
                );
                hook.update(&mut ctx)
            };
            if let Err(err) = result {
                report(surface, &mut self.status, "update hook", &err);
            }
        }

        for node in &self.elements {
            if let Err(err) = node.paint(surface, &self.colors) {
                report(surface, &mut self.status, "paint", &err);
            }
        }

        surface.flush()?;
        Ok(())
    }
}

impl Default for Application {
    fn default() -> Self {
        Self::new()
    }
}

/// An acquired surface. Released exactly once: by [`Held::release`] on
/// the normal path, by `Drop` when unwinding.
struct Held<'s> {
    surface: &'s mut dyn Surface,
    released: bool,
}

impl<'s> Held<'s> {
    fn new(surface: &'s mut dyn Surface) -> Self {
        Self {
            surface,
            released: false,
        }
    }

    fn surface(&mut self) -> &mut dyn Surface {
        &mut *self.surface
    }

    fn release(mut self) -> io::Result<()> {
        self.released = true;
        self.surface.release()
    }
}

impl Drop for Held<'_> {
    fn drop(&mut self) {
        if self.released {
            return;
        }
        if let Err(err) = self.surface.release() {
            tracing::error!(%err, "surface release failed while unwinding");
        }
    }
}

fn show_status(surface: &mut dyn Surface, status: &mut Option<String>, msg: &str) {
    prompt::alert(surface, msg);
    *status = Some(msg.to_owned());
}

/// Log a caught fault and put it on the status line.
fn report(
    surface: &mut dyn Surface,
    status: &mut Option<String>,
    source: &str,
    err: &dyn std::fmt::Display,
) {
    tracing::warn!(source, %err, "handler failed");
    show_status(surface, status, &err.to_string());
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::Element;
    use crate::error::UiError;
    use crate::label::{Edges, Label, LabelStyle};
    use anyhow::anyhow;
    use pk_term::color::{palette, ColorPair};
    use pk_term::surface::MemorySurface;
    use pretty_assertions::assert_eq;
    use std::panic::{self, AssertUnwindSafe};
    use std::time::Duration;

    const MS: Duration = Duration::from_millis(1);

    fn surface() -> MemorySurface {
        MemorySurface::new(60, 12)
    }

    fn status(surface: &MemorySurface) -> String {
        surface.row_text(11).trim_end().to_owned()
    }

    fn quiet_app() -> Application {
        Application::with_config(AppConfig {
            banner: false,
            ..AppConfig::default()
        })
    }

    /// A started app and surface with the timer anchored at the returned
    /// instant.
    fn started(mut app: Application) -> (Application, MemorySurface, Instant) {
        let mut s = surface();
        let t0 = Instant::now();
        app.start(&mut s, t0).unwrap();
        (app, s, t0)
    }

    // ── Lifecycle ───────────────────────────────────────────────────

    #[test]
    fn run_quits_on_q_and_releases() {
        let mut app = Application::new();
        let mut s = surface();
        s.push_chars("q");

        app.run(&mut s).unwrap();

        assert!(!s.is_acquired());
        assert_eq!(s.flush_count(), 1);
        assert_eq!(status(&s), "You pressed q");
    }

    #[test]
    fn panicking_command_still_releases() {
        let mut app = quiet_app();
        app.shortcut_fn("p", |_, _| panic!("command blew up"));
        let mut s = surface();
        s.push_chars("p");

        let outcome = panic::catch_unwind(AssertUnwindSafe(|| app.run(&mut s)));

        assert!(outcome.is_err());
        assert!(!s.is_acquired());
    }

    #[test]
    fn panicking_update_hook_still_releases() {
        let mut app = quiet_app();
        app.on_update_fn(|_| panic!("hook blew up"));
        let mut s = surface();

        let outcome = panic::catch_unwind(AssertUnwindSafe(|| app.run(&mut s)));

        assert!(outcome.is_err());
        assert!(!s.is_acquired());
    }

    #[test]
    fn start_draws_banner_and_installs_colors() {
        let (app, s, _) = started(Application::new());
        assert_eq!(s.row_text(0).trim_end(), "          Hello !");
        assert_eq!(s.row_text(3).trim_end(), "          Press q to quit.");
        assert_eq!(app.colors().lookup("inverse"), Some(34));
        assert_eq!(s.flush_count(), 1);
    }

    #[test]
    fn start_applies_input_mode() {
        let (_, s, _) = started(quiet_app());
        assert!(!s.is_blocking());

        let blocking = Application::with_config(AppConfig {
            nonblocking: false,
            ..AppConfig::default()
        });
        let (_, s, _) = started(blocking);
        assert!(s.is_blocking());
    }

    #[test]
    fn closed_input_ends_run_with_error_and_releases() {
        let mut app = Application::with_config(AppConfig {
            nonblocking: false,
            ..AppConfig::default()
        });
        let mut s = surface();
        s.push_chars("z");

        let err = app.run(&mut s).unwrap_err();

        assert!(matches!(err, UiError::Io(ref e) if e.kind() == io::ErrorKind::UnexpectedEof));
        assert!(!s.is_acquired());
    }

    // ── Key dispatch ────────────────────────────────────────────────

    #[test]
    fn unmapped_key_only_updates_status() {
        let (mut app, mut s, t0) = started(quiet_app());
        app.add(Element::new(2, 1).unwrap().at(3, 3));
        s.push_chars("z");

        assert_eq!(app.step(&mut s, t0).unwrap(), Step::Continue);

        assert_eq!(status(&s), "You pressed z");
        assert_eq!(app.status(), Some("You pressed z"));
        assert_eq!(s.flush_count(), 1);
        assert_eq!(app.elements()[0].bounds().x, 3);
        assert_eq!(s.row_text(3).trim(), "");
    }

    #[test]
    fn step_reads_one_key_at_a_time() {
        let (mut app, mut s, t0) = started(quiet_app());
        s.push_chars("abc");

        app.step(&mut s, t0).unwrap();

        assert_eq!(s.pending_keys(), 2);
        assert_eq!(status(&s), "You pressed a");
    }

    #[test]
    fn no_key_and_no_refresh_is_idle() {
        let (mut app, mut s, t0) = started(quiet_app());
        assert_eq!(app.step(&mut s, t0).unwrap(), Step::Idle);
    }

    #[test]
    fn command_receives_key() {
        let (mut app, mut s, t0) = started(quiet_app());
        app.shortcut_fn("x", |key, ctx| {
            ctx.write(0, 2, &["You pressed", key, "!"], " ", 0);
            Ok(())
        });
        s.push_chars("x");

        app.step(&mut s, t0).unwrap();

        assert_eq!(s.row_text(2).trim_end(), "You pressed x !");
    }

    #[test]
    fn command_error_goes_to_status_line() {
        let (mut app, mut s, t0) = started(quiet_app());
        app.shortcut_fn("e", |_, _| Err(anyhow!("boom")));
        s.push_chars("ez");

        assert_eq!(app.step(&mut s, t0).unwrap(), Step::Continue);
        assert_eq!(status(&s), "boom");
        assert_eq!(app.status(), Some("boom"));

        // The loop carries on.
        app.step(&mut s, t0).unwrap();
        assert_eq!(status(&s), "You pressed z");
    }

    #[test]
    fn command_alert_replaces_status() {
        let (mut app, mut s, t0) = started(quiet_app());
        app.shortcut_fn("a", |_, ctx| {
            ctx.alert("saved");
            Ok(())
        });
        s.push_chars("a");

        app.step(&mut s, t0).unwrap();

        assert_eq!(status(&s), "saved");
        assert_eq!(app.status(), Some("saved"));
    }

    #[test]
    fn commands_can_edit_elements() {
        let (mut app, mut s, t0) = started(quiet_app());
        app.add(Element::new(1, 1).unwrap());
        app.shortcut_fn("KEY_RIGHT", |_, ctx| {
            for node in ctx.elements_mut() {
                let x = node.bounds().x;
                node.set_position(x + 1, 0);
            }
            Ok(())
        });
        s.push_key(pk_term::input::KeyEvent::plain(pk_term::input::KeyCode::Right));

        app.step(&mut s, t0).unwrap();

        assert_eq!(app.elements()[0].bounds().x, 1);
    }

    #[test]
    fn binding_reads_back() {
        let mut app = quiet_app();
        app.shortcut_fn("x", |_, _| Ok(()));
        assert!(app.binding("q").is_some_and(Binding::is_quit));
        assert!(matches!(app.binding("x"), Some(Binding::Command(_))));
        assert!(app.binding("y").is_none());
    }

    // ── Quit confirmation ───────────────────────────────────────────

    fn confirming() -> Application {
        Application::with_config(AppConfig {
            confirm_quit: true,
            banner: false,
            ..AppConfig::default()
        })
    }

    #[test]
    fn declined_quit_keeps_running() {
        let (mut app, mut s, t0) = started(confirming());
        s.push_chars("qn");

        assert_eq!(app.step(&mut s, t0).unwrap(), Step::Continue);
        assert_eq!(status(&s), "Are you sure you want to quit ? (Yn)");
        assert_eq!(app.status(), Some("Are you sure you want to quit ? (Yn)"));
        assert_eq!(s.read_modes(), &[false, true]);
        assert!(!s.is_blocking());
    }

    #[test]
    fn confirmed_quit_stops() {
        let (mut app, mut s, t0) = started(confirming());
        s.push_chars("qy");
        assert_eq!(app.step(&mut s, t0).unwrap(), Step::Quit);
    }

    // ── Refresh ─────────────────────────────────────────────────────

    #[test]
    fn repaint_waits_for_the_timer() {
        let (mut app, mut s, t0) = started(quiet_app());

        app.step(&mut s, t0 + MS * 50).unwrap();
        assert_eq!(s.flush_count(), 1);

        assert_eq!(app.step(&mut s, t0 + MS * 150).unwrap(), Step::Continue);
        assert_eq!(s.flush_count(), 2);

        app.step(&mut s, t0 + MS * 200).unwrap();
        assert_eq!(s.flush_count(), 2);
    }

    #[test]
    fn refresh_paints_elements_in_order() {
        let mut app = quiet_app();
        app.add(Element::new(4, 1).unwrap().at(0, 1));
        app.add(
            Label::styled(
                "ab",
                LabelStyle {
                    padding: Edges::ZERO,
                    ..LabelStyle::default()
                },
            )
            .unwrap(),
        );
        app.elements_mut()[1].set_position(1, 1);

        let (_, s, _) = started(app);

        assert_eq!(s.row_text(1).trim_end(), "xabx");
    }

    #[test]
    fn update_hook_runs_before_paint() {
        let mut app = quiet_app();
        app.on_update_fn(|ctx| {
            ctx.write_lines(0, 0, "one\ntwo", 0);
            Ok(())
        });
        let (_, s, _) = started(app);
        assert_eq!(s.row_text(0).trim_end(), "one");
        assert_eq!(s.row_text(1).trim_end(), "two");
    }

    #[test]
    fn update_hook_error_goes_to_status_line() {
        let mut app = quiet_app();
        app.on_update_fn(|_| Err(anyhow!("hook failed")));
        let (_, s, _) = started(app);
        assert_eq!(status(&s), "hook failed");
    }

    #[test]
    fn paint_error_goes_to_status_line() {
        let mut app = quiet_app();
        let mut label = Label::new("x").unwrap();
        label.set_color("ghost");
        app.add(label);

        let (_, s, _) = started(app);

        assert_eq!(status(&s), "unknown color pair `ghost`");
        assert_eq!(s.flush_count(), 1);
    }

    #[test]
    fn registered_color_follows_standard_pairs() {
        let (mut app, mut s, _) = started(quiet_app());
        assert_eq!(app.register_color("accent", 2, 4, &mut s).unwrap(), 35);
    }

    #[test]
    fn color_registered_before_run_keeps_its_pair() {
        let mut app = quiet_app();
        let mut s = surface();
        let index = app
            .register_color("accent", palette::GREEN, palette::BLUE, &mut s)
            .unwrap();
        s.push_chars("q");

        app.run(&mut s).unwrap();

        assert_eq!(index, 35);
        assert_eq!(app.colors().lookup("accent"), Some(35));
        assert_eq!(
            s.pairs().resolve(35),
            ColorPair::from_palette(palette::GREEN, palette::BLUE)
        );
        assert_eq!(s.pairs().resolve(1), ColorPair::from_palette(palette::RED, palette::BLACK));
        assert_eq!(app.colors().index_of(palette::GREEN, palette::BLUE), Some(35));
    }
}
