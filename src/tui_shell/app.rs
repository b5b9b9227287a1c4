use std::io::{self, IsTerminal};
use std::path::PathBuf;
use std::sync::OnceLock;
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
    KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use crossterm::execute;
use crossterm::terminal::{
    self as term, EnterAlternateScreen, LeaveAlternateScreen, SetSize, disable_raw_mode,
    enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};

use crate::listing::{self, ListRequest, ListSource, Listing};
use crate::settings::GuiSettings;
use crate::tree::DatasetTree;

use time::OffsetDateTime;
use time::format_description::FormatItem;
use time::format_description::well_known::Rfc3339;

use super::views::DatasetsView;

mod event_loop;
mod lifecycle;
mod output;
mod refresh;
mod render;
mod time_utils;

use self::output::EntryKind;
use self::output::StatusEntry;
pub(super) use self::time_utils::fmt_clock;
use self::time_utils::now_ts;

pub(super) fn run(opts: crate::tui::TuiRunOptions) -> Result<()> {
    if !io::stdin().is_terminal() || !io::stdout().is_terminal() {
        anyhow::bail!("the viewer requires an interactive terminal (TTY); use --dump instead");
    }

    let mut app = App::new(opts);
    let original_size = term::size().ok();

    let mut stdout = io::stdout();
    enable_raw_mode().context("enable raw mode")?;
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)
        .context("enter alternate screen")?;
    let resized = app.restore_window_size();

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("create terminal")?;
    terminal.clear().ok();

    let res = event_loop::run_loop(&mut terminal, &mut app);

    if res.is_ok() {
        let size = terminal.size().ok().map(|s| (s.width, s.height));
        app.save_settings(size);
    }

    if resized && let Some((w, h)) = original_size {
        execute!(terminal.backend_mut(), SetSize(w, h)).ok();
    }
    disable_raw_mode().ok();
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )
    .ok();
    terminal.show_cursor().ok();

    res
}

/// Everything the viewer knows; passed to every handler, no globals.
pub(super) struct App {
    source: Box<dyn ListSource>,
    request: ListRequest,

    settings_path: Option<PathBuf>,
    settings: GuiSettings,

    view: DatasetsView,

    last_result: Option<StatusEntry>,

    // At most one fetch runs; requests while one is pending are dropped.
    pending_refresh: bool,

    screen: Rect,

    quit: bool,
}

impl App {
    fn title(&self) -> String {
        self.request
            .root
            .clone()
            .or_else(|| self.view.tree.nodes.first().map(|n| n.name().to_string()))
            .unwrap_or_else(|| "zfs list".to_string())
    }

    /// Track the terminal size and keep the selection on screen.
    pub(super) fn resize(&mut self, screen: Rect) {
        self.screen = screen;
        let body = render::table_area(render::layout(screen).main)
            .height
            .saturating_sub(1);
        self.view.ensure_visible(body as usize);
    }
}

#[cfg(test)]
#[path = "../tests/tui_shell/app_tests.rs"]
mod tests;
