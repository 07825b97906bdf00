//! Line colors for newly loaded equations.

use ratatui::style::Color;

/// Default line palette, in hand-out order.
pub const DEFAULT_PALETTE: [Color; 12] = [
    Color::Rgb(205, 92, 92),
    Color::Rgb(0, 0, 255),
    Color::Rgb(255, 20, 147),
    Color::Rgb(128, 0, 128),
    Color::Rgb(255, 69, 0),
    Color::Rgb(250, 128, 114),
    Color::Rgb(255, 218, 185),
    Color::Rgb(255, 255, 0),
    Color::Rgb(0, 255, 0),
    Color::Rgb(154, 205, 50),
    Color::Rgb(102, 205, 170),
    Color::Rgb(0, 255, 255),
];

/// Cycles through a fixed palette.
///
/// Colors are never handed back: once the palette is exhausted it wraps and
/// equations start sharing colors.
#[derive(Debug, Clone)]
pub struct ColorAssigner {
    palette: Vec<Color>,
    cursor: usize,
}

impl ColorAssigner {
    /// Create an assigner over the default palette.
    pub fn new() -> Self {
        Self::with_palette(DEFAULT_PALETTE.to_vec())
    }

    /// Create an assigner over a custom palette. An empty palette falls back
    /// to the default one.
    pub fn with_palette(palette: Vec<Color>) -> Self {
        let palette = if palette.is_empty() {
            DEFAULT_PALETTE.to_vec()
        } else {
            palette
        };
        Self { palette, cursor: 0 }
    }

    /// Hand out the next color.
    pub fn next(&mut self) -> Color {
        if self.cursor >= self.palette.len() {
            self.cursor = 0;
        }
        let color = self.palette[self.cursor];
        self.cursor += 1;
        color
    }

    /// Number of distinct colors before wrapping.
    pub fn palette_len(&self) -> usize {
        self.palette.len()
    }
}

impl Default for ColorAssigner {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_palette_colors_are_distinct() {
        for (i, a) in DEFAULT_PALETTE.iter().enumerate() {
            for b in &DEFAULT_PALETTE[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn wraps_after_palette_is_exhausted() {
        let mut colors = ColorAssigner::new();
        let p = colors.palette_len();
        let first: Vec<Color> = (0..p).map(|_| colors.next()).collect();
        assert_eq!(first, DEFAULT_PALETTE.to_vec());

        // Reuse after wrapping is expected, colors are never released.
        assert_eq!(colors.next(), first[0]);
        assert_eq!(colors.next(), first[1]);
    }

    #[test]
    fn custom_palette() {
        let mut colors = ColorAssigner::with_palette(vec![Color::Red, Color::Green]);
        assert_eq!(colors.next(), Color::Red);
        assert_eq!(colors.next(), Color::Green);
        assert_eq!(colors.next(), Color::Red);

        let colors = ColorAssigner::with_palette(Vec::new());
        assert_eq!(colors.palette_len(), DEFAULT_PALETTE.len());
    }
}
