use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders};

/// Border around the dataset table: pool or root on the left, the refresh
/// time and requested properties on the right. Returns the inner area.
pub(super) fn render_dataset_chrome(
    frame: &mut ratatui::Frame,
    title: &str,
    properties: &str,
    updated_at: &str,
    area: Rect,
) -> Rect {
    let left = Line::from(vec![
        Span::raw(" "),
        Span::styled(
            title.to_string(),
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(" "),
    ]);

    let mut right = vec![Span::styled(
        format!(" -o {} ", properties),
        Style::default().fg(Color::Gray),
    )];
    if !updated_at.is_empty() {
        right.push(Span::styled(
            format!("updated {} ", super::fmt_clock(updated_at)),
            Style::default().fg(Color::DarkGray),
        ));
    }

    let outer = Block::default()
        .borders(Borders::ALL)
        .title(left)
        .title_top(Line::from(right).right_aligned());
    let inner = outer.inner(area);
    frame.render_widget(outer, area);
    inner
}
