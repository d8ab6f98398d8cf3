//! Console column geometry.
//!
//! Built once at startup from the terminal width and never mutated. A
//! terminal narrower than the minimum supported size clamps the message
//! column instead of failing; a width of zero never reaches the layout
//! engine.

use logcat_core::ColumnWidths;

/// Timestamp column width (`YYYY-MM-DD HH:MM:SS,mmm`).
pub const TIME_WIDTH: usize = 23;
/// Severity label column width.
pub const LEVEL_WIDTH: usize = 8;
/// Logger name column width.
pub const NAME_WIDTH: usize = 20;
/// Field separator between columns.
pub const SEPARATOR: &str = " | ";
/// Smallest message column we render into, however narrow the terminal.
pub const MIN_MESSAGE_WIDTH: usize = 20;
/// Assumed terminal width when the real one cannot be detected.
pub const DEFAULT_TERMINAL_WIDTH: u16 = 120;

/// Immutable console layout configuration.
#[derive(Debug, Clone)]
pub struct ConsoleConfig {
    /// Column widths handed to the layout engine.
    pub widths: ColumnWidths,
    /// Field separator.
    pub separator: &'static str,
}

impl ConsoleConfig {
    /// Configuration for a terminal of the given column count.
    ///
    /// The message column gets whatever remains after the three fixed
    /// columns and separators, clamped to [`MIN_MESSAGE_WIDTH`].
    pub fn for_terminal_width(terminal_width: u16) -> Self {
        let fixed = TIME_WIDTH + LEVEL_WIDTH + NAME_WIDTH + 3 * SEPARATOR.len();
        let message = (terminal_width as usize).saturating_sub(fixed).max(MIN_MESSAGE_WIDTH);

        Self {
            widths: ColumnWidths {
                time: TIME_WIDTH,
                level: LEVEL_WIDTH,
                name: NAME_WIDTH,
                message,
            },
            separator: SEPARATOR,
        }
    }

    /// Detect the terminal width and build a configuration from it.
    pub fn detect() -> Self {
        let width = crossterm::terminal::size()
            .map(|(columns, _rows)| columns)
            .unwrap_or(DEFAULT_TERMINAL_WIDTH);
        Self::for_terminal_width(width)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_terminal_yields_sixty_column_messages() {
        let config = ConsoleConfig::for_terminal_width(120);

        // 120 - 23 - 8 - 20 - 9 = 60
        assert_eq!(config.widths.message, 60);
    }

    #[test]
    fn narrow_terminal_clamps_to_minimum() {
        let config = ConsoleConfig::for_terminal_width(40);

        assert_eq!(config.widths.message, MIN_MESSAGE_WIDTH);
    }

    #[test]
    fn zero_width_terminal_never_yields_zero_columns() {
        let config = ConsoleConfig::for_terminal_width(0);

        assert!(config.widths.message >= MIN_MESSAGE_WIDTH);
    }
}
