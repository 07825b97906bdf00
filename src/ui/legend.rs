//! Equation legend.

use super::formatters::truncate_to_width;
use super::ThemeColors;
use crate::app::App;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem},
    Frame,
};

/// Draw one row per equation in draw order.
pub(super) fn draw_legend(f: &mut Frame<'_>, app: &App, area: Rect, colors: &ThemeColors) {
    let equations = app.model.equations();
    let failures = app.model.synchronizer().failures();
    // swatch, space, marker, space, borders
    let label_width = (area.width as usize).saturating_sub(8);

    let items: Vec<ListItem<'_>> = equations
        .iter()
        .enumerate()
        .map(|(idx, eq)| {
            let failed = failures.iter().any(|e| e.equation == eq.id());
            let (marker, marker_style) = if failed {
                ("!", Style::default().fg(colors.error))
            } else if eq.is_enabled() {
                (" ", Style::default())
            } else {
                ("-", Style::default().fg(colors.muted))
            };

            let label_style = if idx == app.legend_cursor {
                Style::default()
                    .fg(colors.cursor_fg)
                    .bg(colors.cursor_bg)
                    .add_modifier(Modifier::BOLD)
            } else if eq.is_enabled() {
                Style::default().fg(colors.text)
            } else {
                Style::default().fg(colors.muted)
            };

            ListItem::new(Line::from(vec![
                Span::styled("━━", Style::default().fg(eq.color())),
                Span::raw(" "),
                Span::styled(marker, marker_style),
                Span::raw(" "),
                Span::styled(truncate_to_width(eq.label(), label_width), label_style),
            ]))
        })
        .collect();

    let title = format!(
        " Equations {}/{} ",
        equations.enabled_count(),
        equations.len()
    );
    let list = List::new(items).block(
        Block::default()
            .title(title)
            .title_style(Style::default().fg(colors.heading))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(colors.border))
            .style(Style::default().bg(colors.bg)),
    );

    f.render_widget(list, area);
}
