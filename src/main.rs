// SPDX-License-Identifier: MIT
//
// panelkit — showcase program.
//
// Wires the crates together:
//
//   pk-term → terminal control, frame buffer, key parsing
//   pk-ui   → elements, labels, panels, shortcuts, application loop
//
// Startup order: config, logging, layout, shortcuts, run. Logs go to
// `panelkit.log` in the working directory, filtered by `PANELKIT_LOG`
// (default `info`), never to the terminal the UI owns.

use std::path::Path;

use anyhow::{Context as _, Result};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

use pk_term::screen::Screen;
use pk_ui::{
    AppConfig, Application, ColorRef, Edges, Label, LabelStyle, PackMode, Panel, config,
};

const LOG_FILE: &str = "panelkit.log";
const LOG_ENV: &str = "PANELKIT_LOG";

/// Install the file logger. The guard must live until exit so buffered
/// lines are written.
fn configure_logging() -> Option<WorkerGuard> {
    let log_dir = Path::new(".");
    let file_appender = tracing_appender::rolling::never(log_dir, LOG_FILE);
    let (writer, guard) = tracing_appender::non_blocking(file_appender);
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(false)
        .try_init()
        .ok()
        .map(|()| guard)
}

/// Twelve labels in a row; label `i` is drawn with pair `i + 1`.
fn label_row() -> Result<Panel> {
    let mut row = Panel::at(10, 10);
    for i in 1..=12_u16 {
        let style = LabelStyle {
            padding: Edges::new(0, 2, 0, 2),
            color: ColorRef::Index(i + 1),
            ..LabelStyle::default()
        };
        row.add(Label::styled(format!("[Label {i}]"), style)?);
    }
    row.pack(PackMode::Row, 1)?;
    Ok(row)
}

fn title_bar() -> Result<Panel> {
    let title_style = |color| LabelStyle {
        padding: Edges::new(0, 1, 1, 1),
        color: ColorRef::Index(color),
        ..LabelStyle::default()
    };

    let mut title = Panel::at(0, 0);
    title.add(Label::styled("Application 28.5", title_style(12))?);
    title.add(Label::styled("34.02.3", title_style(8))?);
    title.pack(PackMode::Row, 1)?;
    Ok(title)
}

fn build(config: AppConfig) -> Result<Application> {
    let mut app = Application::with_config(config);

    app.add(label_row().context("building label row")?);

    let mut inverse = Label::new("This inverted\n but better")?;
    inverse.set_color("inverse");
    inverse.set_position(30, 30);
    app.add(inverse);

    app.add(title_bar().context("building title bar")?);

    app.shortcut_fn("x", |_, ctx| {
        ctx.write(0, 20, &["You pressed X!"], " ", 0);
        Ok(())
    });

    Ok(app)
}

fn main() -> Result<()> {
    let _log_guard = configure_logging();

    let config = config::load_from(None).context("loading configuration")?;
    let mut app = build(config)?;

    let mut screen = Screen::new();
    app.run(&mut screen).context("running application")?;
    Ok(())
}

// ─── Tests ──────────────────────────────────────────────────────────────────
