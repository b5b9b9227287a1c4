use super::*;

pub(super) const REFRESH_BUTTON: &str = "[ Refresh ]";

const KEY_HINTS: &str =
    "enter expand · ←/→ column · s/1-9 sort · 0 unsort · +/- width · e/c expand/collapse all · r refresh · q quit";

#[derive(Clone, Copy, Debug)]
pub(super) struct Areas {
    pub(super) header: Rect,
    pub(super) main: Rect,
    pub(super) status: Rect,
    pub(super) footer: Rect,
}

pub(super) fn layout(area: Rect) -> Areas {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),
            Constraint::Min(0),
            Constraint::Length(3),
            Constraint::Length(1),
        ])
        .split(area);
    Areas {
        header: chunks[0],
        main: chunks[1],
        status: chunks[2],
        footer: chunks[3],
    }
}

/// The table's area inside the main view border.
pub(super) fn table_area(main: Rect) -> Rect {
    Block::default().borders(Borders::ALL).inner(main)
}

pub(super) fn draw(frame: &mut ratatui::Frame, app: &App) {
    let areas = layout(frame.area());

    // Header
    let mut spans = vec![
        Span::styled(
            "zfs-list-tui",
            Style::default().fg(Color::Black).bg(Color::White),
        ),
        Span::raw("  "),
        Span::raw(format!(
            "{} datasets  {} snapshots",
            app.view.tree.dataset_count(),
            app.view.tree.snapshot_count()
        )),
    ];
    if let (Some(col), Some(dir)) = (app.view.sort.column(), app.view.sort.direction())
        && let Some(p) = app.view.columns.get(col)
    {
        spans.push(Span::raw("  "));
        spans.push(Span::styled(
            format!("sort: {} {}", p, dir.arrow()),
            Style::default().fg(Color::Cyan),
        ));
    }
    if app.pending_refresh {
        spans.push(Span::raw("  "));
        spans.push(Span::styled(
            "refreshing",
            Style::default().fg(Color::Yellow),
        ));
    }
    let header = Paragraph::new(Line::from(spans)).block(Block::default().borders(Borders::BOTTOM));
    frame.render_widget(header, areas.header);

    // Main view
    app.view.render(frame, areas.main, &app.title());

    // Status / last result
    {
        let mut lines = Vec::new();
        if let Some(r) = &app.last_result {
            let style = match r.kind {
                EntryKind::Output => Style::default().fg(Color::White),
                EntryKind::Warning => Style::default().fg(Color::Yellow),
                EntryKind::Error => Style::default().fg(Color::Red),
            };
            for (i, l) in r.lines.iter().enumerate() {
                if i == 0 {
                    lines.push(Line::from(vec![
                        Span::styled(
                            format!("{} ", fmt_clock(&r.ts)),
                            Style::default().fg(Color::Gray),
                        ),
                        Span::styled(l.as_str(), style),
                    ]));
                } else {
                    lines.push(Line::from(Span::styled(l.as_str(), style)));
                }
            }
        }
        if lines.is_empty() {
            lines.push(Line::from(""));
        }
        frame.render_widget(
            Paragraph::new(lines)
                .wrap(Wrap { trim: false })
                .block(Block::default().borders(Borders::TOP).title("Last")),
            areas.status,
        );
    }

    // Footer
    let footer = Line::from(vec![
        Span::styled(
            REFRESH_BUTTON,
            Style::default()
                .fg(Color::Black)
                .bg(Color::Gray)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw("  "),
        Span::styled(KEY_HINTS, Style::default().fg(Color::Gray)),
    ]);
    frame.render_widget(Paragraph::new(footer), areas.footer);
}
