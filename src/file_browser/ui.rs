//! File browser UI rendering.

use super::{EntryKind, FileBrowserState};
use crate::ui::ThemeColors;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Clear, List, ListItem},
    Frame,
};

/// Draw the file browser popup.
pub fn draw_file_browser(
    f: &mut Frame<'_>,
    state: &mut FileBrowserState,
    area: Rect,
    title: &str,
    colors: &ThemeColors,
) {
    // Subtract 2 for borders
    let viewport_height = area.height.saturating_sub(2) as usize;
    state.adjust_scroll(viewport_height);

    let mut items: Vec<ListItem<'_>> = state
        .entries
        .iter()
        .enumerate()
        .skip(state.scroll)
        .take(viewport_height)
        .map(|(idx, entry)| {
            let text = match entry.kind {
                EntryKind::Parent => "↑ ..".to_string(),
                EntryKind::Dir => format!("▸ {}/", entry.name),
                EntryKind::File => format!("  {}", entry.name),
            };

            let style = if idx == state.cursor {
                Style::default()
                    .fg(colors.cursor_fg)
                    .bg(colors.cursor_bg)
                    .add_modifier(Modifier::BOLD)
            } else if entry.kind == EntryKind::File {
                Style::default().fg(colors.text)
            } else {
                Style::default().fg(colors.heading)
            };

            ListItem::new(Line::from(text)).style(style)
        })
        .collect();

    if let Some(ref error) = state.error {
        items.push(ListItem::new(Line::from(error.as_str())).style(Style::default().fg(colors.error)));
    }

    let title = format!(" {}: {} ", title, state.current_dir.display());
    let list = List::new(items).block(
        Block::default()
            .title(title)
            .title_style(Style::default().fg(colors.heading))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(colors.border))
            .style(Style::default().bg(colors.bg)),
    );

    f.render_widget(Clear, area);
    f.render_widget(list, area);
}
