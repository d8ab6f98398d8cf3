//! Severity color palette.
//!
//! Maps each standard severity code to a foreground/background pair. The
//! palette is built once at startup and read-only afterwards; an unmapped
//! severity degrades to the default pair rather than failing.

use crate::record::severity;

/// Terminal-agnostic color names used by the palette.
///
/// The render sink translates these to its terminal backend's own color
/// type; the core crate never touches the terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Color {
    /// Black.
    Black,
    /// Dark red (used as the critical background).
    DarkRed,
    /// Bright red.
    Red,
    /// Bright green.
    Green,
    /// Yellow.
    Yellow,
    /// Bright cyan.
    Cyan,
    /// White.
    White,
}

/// Foreground/background pair applied to every row of one record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorPair {
    /// Text color.
    pub foreground: Color,
    /// Background color.
    pub background: Color,
}

impl ColorPair {
    const fn new(foreground: Color, background: Color) -> Self {
        Self { foreground, background }
    }
}

/// Default pair for severities the palette does not know.
const FALLBACK: ColorPair = ColorPair::new(Color::White, Color::Black);

/// Severity-to-color table.
#[derive(Debug, Clone)]
pub struct Palette {
    entries: Vec<(i64, ColorPair)>,
}

impl Palette {
    /// The standard six-severity highlight table.
    pub fn standard() -> Self {
        Self {
            entries: vec![
                (severity::NOTSET, ColorPair::new(Color::White, Color::Black)),
                (severity::DEBUG, ColorPair::new(Color::Green, Color::Black)),
                (severity::INFO, ColorPair::new(Color::Cyan, Color::Black)),
                (severity::WARNING, ColorPair::new(Color::Yellow, Color::Black)),
                (severity::ERROR, ColorPair::new(Color::Red, Color::Black)),
                (severity::CRITICAL, ColorPair::new(Color::Yellow, Color::DarkRed)),
            ],
        }
    }

    /// Pair for the given severity, or the default pair if unmapped.
    pub fn colors_for(&self, level_number: i64) -> ColorPair {
        self.entries
            .iter()
            .find(|(level, _)| *level == level_number)
            .map_or(FALLBACK, |(_, pair)| *pair)
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_maps_all_six_severities() {
        let palette = Palette::standard();

        assert_eq!(palette.colors_for(0), ColorPair::new(Color::White, Color::Black));
        assert_eq!(palette.colors_for(10), ColorPair::new(Color::Green, Color::Black));
        assert_eq!(palette.colors_for(20), ColorPair::new(Color::Cyan, Color::Black));
        assert_eq!(palette.colors_for(30), ColorPair::new(Color::Yellow, Color::Black));
        assert_eq!(palette.colors_for(40), ColorPair::new(Color::Red, Color::Black));
        assert_eq!(palette.colors_for(50), ColorPair::new(Color::Yellow, Color::DarkRed));
    }

    #[test]
    fn unmapped_severity_falls_back_to_default() {
        let palette = Palette::standard();

        assert_eq!(palette.colors_for(35), FALLBACK);
        assert_eq!(palette.colors_for(-1), FALLBACK);
    }
}
