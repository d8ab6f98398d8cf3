//! Parsed log record shape.
//!
//! Records reach the console already decrypted and parsed; this module only
//! defines the shape they arrive in. A record is immutable once handed to
//! the layout engine.

use serde::{Deserialize, Serialize};

/// Standard severity codes.
///
/// The fixed six-value set every record's `level_number` is drawn from.
/// An unknown code is not an error at render time; the palette falls back
/// to a default color pair.
pub mod severity {
    /// Unset / trace-level diagnostics.
    pub const NOTSET: i64 = 0;
    /// Debug diagnostics.
    pub const DEBUG: i64 = 10;
    /// Informational events.
    pub const INFO: i64 = 20;
    /// Warnings.
    pub const WARNING: i64 = 30;
    /// Errors.
    pub const ERROR: i64 = 40;
    /// Critical failures.
    pub const CRITICAL: i64 = 50;
}

/// One decrypted, parsed log event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogRecord {
    /// Formatted timestamp text, fixed 23 characters
    /// (`YYYY-MM-DD HH:MM:SS,mmm`).
    pub timestamp: String,
    /// Integer severity, normally one of [`severity`]'s six codes.
    pub level_number: i64,
    /// Severity label, rendered right-truncated/padded to 8 characters.
    pub level_name: String,
    /// Dot-separated hierarchical logger identifier, arbitrary length.
    pub logger_name: String,
    /// Message text. May contain embedded newlines and paragraph breaks.
    pub message: String,
}

impl LogRecord {
    /// Create a record from its five fields.
    pub fn new(
        timestamp: impl Into<String>,
        level_number: i64,
        level_name: impl Into<String>,
        logger_name: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            timestamp: timestamp.into(),
            level_number,
            level_name: level_name.into(),
            logger_name: logger_name.into(),
            message: message.into(),
        }
    }
}
