//! Core types for the logcat console.
//!
//! This crate holds everything the rendering loop needs that is free of I/O:
//! the parsed log record shape, the severity color palette, and the
//! fixed-width layout engine that reflows long logger names and multi-line
//! messages into column-aligned terminal rows.
//!
//! No async, no terminal dependencies. Fully testable in isolation.

pub mod layout;
pub mod palette;
pub mod record;

pub use layout::{ColumnWidths, DisplayRow, compose_rows, wrap_message, wrap_name};
pub use palette::{Color, ColorPair, Palette};
pub use record::{LogRecord, severity};
