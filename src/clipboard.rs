//! Clipboard integration.

use crate::error::Result;
use crate::graph::PointSelection;
use arboard::Clipboard;

/// Copy text to clipboard.
pub fn copy_to_clipboard(text: &str) -> Result<()> {
    let mut clipboard = Clipboard::new()?;
    clipboard.set_text(text)?;
    Ok(())
}

/// Tab-separated `label, x, y` line for a selected sample.
pub fn format_selection(selection: &PointSelection) -> String {
    format!("{}\t{}\t{}", selection.label, selection.x, selection.y)
}

/// Copy a selected sample to the clipboard.
pub fn copy_selection(selection: &PointSelection) -> Result<()> {
    copy_to_clipboard(&format_selection(selection))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::EquationId;

    #[test]
    fn selection_is_tab_separated() {
        let sel = PointSelection {
            equation: EquationId(3),
            label: "x^2= y".to_string(),
            x: 1.5,
            y: 2.25,
        };
        assert_eq!(format_selection(&sel), "x^2= y\t1.5\t2.25");
    }
}
