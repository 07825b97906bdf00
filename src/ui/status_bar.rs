//! Status bar UI component.

use super::formatters::format_coord;
use crate::app::App;
use crate::ui::ThemeColors;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    widgets::Paragraph,
    Frame,
};

/// Right-hand readout: pointer, selection and range.
pub fn readout(app: &App) -> String {
    let mut parts = Vec::new();
    if let Some((x, y)) = app.pointer {
        parts.push(format!("({}, {})", format_coord(x), format_coord(y)));
    }
    if let Some(ref sel) = app.selection {
        parts.push(format!(
            "{} @ ({}, {})",
            sel.label,
            format_coord(sel.x),
            format_coord(sel.y)
        ));
    }
    parts.push(format!("x {}", app.model.current_range()));
    parts.join(" | ")
}

/// Draw the status bar.
pub fn draw_status(f: &mut Frame<'_>, area: Rect, app: &App, colors: &ThemeColors) {
    let style = Style::default().fg(colors.status_fg).bg(colors.status_bg);
    let right = readout(app);
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Min(10),
            Constraint::Length(right.chars().count() as u16 + 1),
        ])
        .split(area);

    let left = match app.error_message {
        Some(ref message) => {
            Paragraph::new(message.as_str()).style(style.fg(colors.error))
        },
        None => Paragraph::new(app.status.as_str()).style(style),
    };

    f.render_widget(left, chunks[0]);
    f.render_widget(Paragraph::new(right).style(style), chunks[1]);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GraphConfig;

    #[test]
    fn readout_lists_pointer_and_range() {
        let mut app = App::new(GraphConfig::default());
        assert_eq!(readout(&app), "x [-10, 10]");
        app.pointer = Some((1.0, -0.5));
        assert_eq!(readout(&app), "(1.00, -0.50) | x [-10, 10]");
    }
}
