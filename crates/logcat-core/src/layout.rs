//! Fixed-width multi-line layout engine.
//!
//! Converts one [`LogRecord`] into one or more column-aligned terminal rows
//! without truncating content. Logger names break preferentially on `.`
//! hierarchy boundaries; messages break on paragraph breaks, then single
//! newlines, then the last space in the current window, then hard-cut at
//! the column width.
//!
//! All operations are character-based, never byte-based, so arbitrary UTF-8
//! input cannot panic mid-stream.

use crate::record::LogRecord;

/// Column widths for one console layout.
///
/// Built once from the terminal geometry and never mutated afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnWidths {
    /// Timestamp column (23 chars for `YYYY-MM-DD HH:MM:SS,mmm`).
    pub time: usize,
    /// Severity label column.
    pub level: usize,
    /// Logger name column.
    pub name: usize,
    /// Message column.
    pub message: usize,
}

impl Default for ColumnWidths {
    fn default() -> Self {
        Self { time: 23, level: 8, name: 20, message: 60 }
    }
}

/// One physical terminal line of fixed-width fields.
///
/// Continuation rows carry blank padding in the time/level columns and in
/// whichever of name/message has been exhausted, preserving alignment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayRow {
    /// Timestamp field. Blank-padded on continuation rows.
    pub time: String,
    /// Severity field. Blank-padded on continuation rows.
    pub level: String,
    /// Logger name segment for this row.
    pub name: String,
    /// Message segment for this row.
    pub message: String,
}

impl DisplayRow {
    /// Join the four fields into one line with the given separator.
    pub fn to_line(&self, separator: &str) -> String {
        format!(
            "{time}{separator}{level}{separator}{name}{separator}{message}",
            time = self.time,
            level = self.level,
            name = self.name,
            message = self.message,
        )
    }
}

/// Right-align `text` in a field of `width` characters.
fn pad_left(text: &str, width: usize) -> String {
    format!("{text:>width$}")
}

/// Left-align `text` in a field of `width` characters.
fn pad_right(text: &str, width: usize) -> String {
    format!("{text:<width$}")
}

/// Last `width` characters of `text`.
fn char_tail(text: &str, width: usize) -> String {
    let chars: Vec<char> = text.chars().collect();
    chars[chars.len().saturating_sub(width)..].iter().collect()
}

/// Wrap a hierarchical logger name into segments of at most `width` chars.
///
/// A name that fits yields exactly one segment, right-aligned in the column.
/// Longer names are chunked, breaking after the last `.` inside each
/// `width`-char chunk when one exists past the first position; a chunk
/// without a usable separator is emitted whole. Re-joining the segments
/// (padding stripped) reconstructs the name exactly.
pub fn wrap_name(name: &str, width: usize) -> Vec<String> {
    let chars: Vec<char> = name.chars().collect();
    if chars.len() <= width {
        return vec![pad_left(name, width)];
    }

    let mut segments = Vec::new();
    let mut rest = chars.as_slice();
    while rest.len() > width {
        let chunk = &rest[..width];
        // Break after the last hierarchy separator in the chunk, if any.
        match chunk.iter().rposition(|&c| c == '.').filter(|&p| p > 0) {
            Some(p) => {
                let head: String = chunk[..=p].iter().collect();
                segments.push(pad_left(&head, width));
                rest = &rest[p + 1..];
            },
            None => {
                segments.push(chunk.iter().collect());
                rest = &rest[width..];
            },
        }
    }
    if !rest.is_empty() {
        let tail: String = rest.iter().collect();
        segments.push(pad_left(&tail, width));
    }
    segments
}

/// Position of the first `\n\n` inside `window`, if any.
fn find_paragraph_break(window: &[char]) -> Option<usize> {
    window.windows(2).position(|pair| pair == ['\n', '\n'])
}

/// Wrap a message into segments of at most `width` chars.
///
/// A message that fits is returned as a single unpadded segment. Longer
/// messages are cut by repeatedly inspecting only the next `width`-char
/// window (windowed lookahead, deliberately not a global scan): a paragraph
/// break cuts there and additionally emits an empty placeholder segment (a
/// blank visual line); a single newline cuts there; otherwise the last
/// space in the window is the cut point; otherwise the cut is exactly at
/// `width`. Cut prefixes are left-aligned and padded; a trailing remainder
/// that fits without a newline ends the loop unpadded.
pub fn wrap_message(message: &str, width: usize) -> Vec<String> {
    let chars: Vec<char> = message.chars().collect();
    if chars.len() <= width {
        return vec![message.to_string()];
    }

    let mut segments = Vec::new();
    let mut rest = chars.as_slice();
    while !rest.is_empty() {
        let window = &rest[..rest.len().min(width)];
        if let Some(p) = find_paragraph_break(window) {
            let prefix: String = window[..p].iter().collect();
            segments.push(pad_right(&prefix, width));
            segments.push(String::new());
            rest = &rest[p + 2..];
        } else if let Some(p) = window.iter().position(|&c| c == '\n') {
            let prefix: String = window[..p].iter().collect();
            segments.push(pad_right(&prefix, width));
            rest = &rest[p + 1..];
        } else if rest.len() <= width {
            segments.push(window.iter().collect());
            break;
        } else if let Some(p) = window.iter().rposition(|&c| c == ' ') {
            let prefix: String = window[..p].iter().collect();
            segments.push(pad_right(&prefix, width));
            rest = &rest[p + 1..];
        } else {
            segments.push(window.iter().collect());
            rest = &rest[width..];
        }
    }
    segments
}

/// Compose the full row sequence for one record.
///
/// Name and message segment sequences are zipped by index up to the longer
/// of the two. The first row carries the real timestamp and severity label
/// (right-truncated to the level column, then padded); every later row
/// carries blank time/level fields, and blank placeholders stand in for
/// whichever of name/message ran out first. Always yields at least one row.
pub fn compose_rows(record: &LogRecord, widths: &ColumnWidths) -> Vec<DisplayRow> {
    let names = wrap_name(&record.logger_name, widths.name);
    let messages = wrap_message(&record.message, widths.message);
    let count = names.len().max(messages.len()).max(1);

    let mut rows = Vec::with_capacity(count);
    for index in 0..count {
        let (time, level) = if index == 0 {
            (
                pad_right(&record.timestamp, widths.time),
                pad_right(&char_tail(&record.level_name, widths.level), widths.level),
            )
        } else {
            (" ".repeat(widths.time), " ".repeat(widths.level))
        };

        let name = names.get(index).cloned().unwrap_or_else(|| " ".repeat(widths.name));
        let message = match messages.get(index) {
            // Empty placeholder segments render as a blank padded line.
            Some(segment) if segment.is_empty() => " ".repeat(widths.message),
            Some(segment) => segment.clone(),
            None => " ".repeat(widths.message),
        };

        rows.push(DisplayRow { time, level, name, message });
    }
    rows
}
