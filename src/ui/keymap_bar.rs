//! Keymap help bar UI component.

use crate::ui::ThemeColors;
use ratatui::{layout::Rect, style::Style, widgets::Paragraph, Frame};

/// Draw the keymap help bar.
pub(super) fn draw_keymap(f: &mut Frame<'_>, area: Rect, browser_open: bool, colors: &ThemeColors) {
    let keymap_text = if browser_open {
        "jk/↑↓:nav | Enter/l:select | h/Backspace:parent | Esc:close"
    } else {
        "q:quit | o:open | a:append | hl:pan | +-:zoom | 0:reset | jk:select | space:toggle | x:remove | []:probe | y:copy | r:refresh | T:theme"
    };

    let paragraph =
        Paragraph::new(keymap_text).style(Style::default().fg(colors.text).bg(colors.bg));

    f.render_widget(paragraph, area);
}
