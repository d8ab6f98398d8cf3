//! Color-coded record output.
//!
//! Applies the palette pair for a record's severity once per record (all
//! rows of one record share color) and writes each composed row as one
//! terminal line. Formatting problems degrade to the default color pair,
//! never to a crash mid-stream.

use std::io::{self, Write};

use crossterm::{
    queue,
    style::{Colors, Print, ResetColor, SetColors},
};
use logcat_core::{Color, LogRecord, Palette, compose_rows};

use crate::config::ConsoleConfig;

/// Consumer of merged log records.
///
/// Seam between the merge loop and the terminal so tests can drive the
/// runtime against an in-memory sink.
pub trait RecordSink {
    /// Render one record.
    fn render(&mut self, record: &LogRecord) -> io::Result<()>;
}

/// Translate a palette color to the terminal backend's color type.
fn terminal_color(color: Color) -> crossterm::style::Color {
    use crossterm::style::Color as Term;
    match color {
        Color::Black => Term::Black,
        Color::DarkRed => Term::DarkRed,
        Color::Red => Term::Red,
        Color::Green => Term::Green,
        Color::Yellow => Term::Yellow,
        Color::Cyan => Term::Cyan,
        Color::White => Term::White,
    }
}

/// Terminal sink writing color-coded rows to `W`.
#[derive(Debug)]
pub struct ColorSink<W: Write> {
    out: W,
    palette: Palette,
    config: ConsoleConfig,
}

impl<W: Write> ColorSink<W> {
    /// Create a sink over a writer, palette, and layout configuration.
    pub fn new(out: W, palette: Palette, config: ConsoleConfig) -> Self {
        Self { out, palette, config }
    }
}

impl<W: Write> RecordSink for ColorSink<W> {
    fn render(&mut self, record: &LogRecord) -> io::Result<()> {
        let pair = self.palette.colors_for(record.level_number);
        queue!(
            self.out,
            SetColors(Colors::new(
                terminal_color(pair.foreground),
                terminal_color(pair.background)
            ))
        )?;

        for row in compose_rows(record, &self.config.widths) {
            queue!(self.out, Print(row.to_line(self.config.separator)), Print("\n"))?;
        }

        queue!(self.out, ResetColor)?;
        self.out.flush()
    }
}
