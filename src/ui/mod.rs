//! User interface rendering.

pub mod formatters;
mod keymap_bar;
mod legend;
pub mod plot;
pub mod status_bar;
mod theme;

use crate::app::App;
use crate::file_browser::ui::draw_file_browser;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    Frame,
};

pub use theme::ThemeColors;

/// Width of the legend panel.
const LEGEND_WIDTH: u16 = 32;

/// Draw the UI.
pub fn draw(f: &mut Frame<'_>, app: &mut App) {
    let colors = ThemeColors::from_theme(&app.theme);

    // Main layout with status bar and key map bar
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(1), Constraint::Length(1)])
        .split(f.area());

    let content = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(20), Constraint::Length(LEGEND_WIDTH)])
        .split(chunks[0]);

    plot::draw_plot(f, app, content[0], &colors);
    legend::draw_legend(f, app, content[1], &colors);
    status_bar::draw_status(f, chunks[1], app, &colors);
    keymap_bar::draw_keymap(f, chunks[2], app.browse_mode.is_some(), &colors);

    if let Some(mode) = app.browse_mode {
        let area = centered_rect(70, 70, chunks[0]);
        draw_file_browser(f, &mut app.file_browser, area, mode.name(), &colors);
    }
}

fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::BrowseMode;
    use crate::config::GraphConfig;
    use ratatui::{backend::TestBackend, Terminal};

    fn render(app: &mut App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
        terminal.draw(|f| draw(f, app)).unwrap();
        let buffer = terminal.backend().buffer().clone();
        buffer.content().iter().map(|c| c.symbol()).collect()
    }

    #[test]
    fn empty_app_shows_welcome() {
        let mut app = App::new(GraphConfig::default());
        let screen = render(&mut app);
        assert!(screen.contains("No equations loaded"));
        assert!(app.chart.is_none());
    }

    #[test]
    fn loaded_equations_fill_legend_and_geometry() {
        let mut app = App::new(GraphConfig::default());
        app.model.load_from_str("sin(x)\nx^2").unwrap();
        let screen = render(&mut app);
        assert!(screen.contains("sin(x)= y"));
        assert!(screen.contains("Equations 2/2"));

        let chart = app.chart.unwrap();
        assert_eq!(chart.x_bounds, (-10.0, 10.0));
        assert!(chart.area.width > 0 && chart.area.height > 0);
    }

    #[test]
    fn browser_popup_is_drawn() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("curves.txt"), "x").unwrap();
        let mut app = App::new(GraphConfig::default());
        app.file_browser.current_dir = dir.path().to_path_buf();
        app.open_browser(BrowseMode::Append);
        let screen = render(&mut app);
        assert!(screen.contains("curves.txt"));
        assert!(screen.contains("Append:"));
    }
}
