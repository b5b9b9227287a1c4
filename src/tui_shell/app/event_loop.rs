use super::*;

pub(super) fn run_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> Result<()> {
    loop {
        let size = terminal.size().context("terminal size")?;
        app.resize(Rect::new(0, 0, size.width, size.height));

        terminal
            .draw(|f| super::render::draw(f, app))
            .context("draw")?;
        if app.quit {
            return Ok(());
        }

        // Blocks until zfs returns; the frame above already shows "refreshing".
        if app.pending_refresh {
            app.run_pending_refresh();
            continue;
        }

        if event::poll(Duration::from_millis(250)).context("poll")? {
            match event::read().context("read event")? {
                Event::Key(k) if k.kind == KeyEventKind::Press => handle_key(app, k),
                Event::Mouse(m) => handle_mouse(app, m),
                _ => {}
            }
        }
    }
}

pub(super) fn handle_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.quit = true;
        }
        KeyCode::Char('q') | KeyCode::Esc => {
            app.quit = true;
        }

        KeyCode::Up | KeyCode::Char('k') => app.view.move_up(),
        KeyCode::Down | KeyCode::Char('j') => app.view.move_down(),
        KeyCode::PageUp => {
            for _ in 0..page_size(app) {
                app.view.move_up();
            }
        }
        KeyCode::PageDown => {
            for _ in 0..page_size(app) {
                app.view.move_down();
            }
        }
        KeyCode::Home => {
            app.view.select_row(0);
        }
        KeyCode::End => {
            let last = app.view.visible_rows().len().saturating_sub(1);
            app.view.select_row(last);
        }

        KeyCode::Enter | KeyCode::Char(' ') => app.view.toggle_expanded(),
        KeyCode::Char('e') => app.view.expand_all(),
        KeyCode::Char('c') => app.view.collapse_all(),

        KeyCode::Left | KeyCode::Char('h') => app.view.select_column_left(),
        KeyCode::Right | KeyCode::Char('l') => app.view.select_column_right(),
        KeyCode::Char('s') => {
            let col = app.view.header_selected;
            app.view.click_header(col);
        }
        KeyCode::Char('0') => app.view.clear_sort(),
        KeyCode::Char(c @ '1'..='9') => {
            let col = c.to_digit(10).unwrap_or(1) as usize - 1;
            app.view.click_header(col);
        }
        KeyCode::Char('+') | KeyCode::Char('=') => app.view.widen_column(),
        KeyCode::Char('-') => app.view.narrow_column(),

        KeyCode::Char('r') | KeyCode::F(5) => app.request_refresh(),

        _ => {}
    }
}

pub(super) fn handle_mouse(app: &mut App, mouse: MouseEvent) {
    match mouse.kind {
        MouseEventKind::ScrollUp => app.view.move_up(),
        MouseEventKind::ScrollDown => app.view.move_down(),
        MouseEventKind::Down(MouseButton::Left) => click(app, mouse.column, mouse.row),
        _ => {}
    }
}

fn click(app: &mut App, x: u16, y: u16) {
    let areas = super::render::layout(app.screen);

    if y == areas.footer.y
        && x >= areas.footer.x
        && x < areas.footer.x + super::render::REFRESH_BUTTON.len() as u16
    {
        app.request_refresh();
        return;
    }

    let table = super::render::table_area(areas.main);
    if x < table.x || x >= table.x + table.width || y < table.y || y >= table.y + table.height {
        return;
    }
    let dx = x - table.x;

    if y == table.y {
        if let Some(col) = app.view.header_hit(dx, table.width) {
            app.view.click_header(col);
        }
        return;
    }

    let idx = app.view.scroll + (y - table.y - 1) as usize;
    if app.view.select_row(idx)
        && app.view.marker_hit(dx, table.width)
        && app.view.selected_is_dataset()
    {
        app.view.toggle_expanded();
    }
}

fn page_size(app: &App) -> usize {
    let body = super::render::table_area(super::render::layout(app.screen).main).height;
    (body.saturating_sub(1) as usize).max(1)
}
