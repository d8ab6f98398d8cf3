//! Property-based tests for the layout engine.
//!
//! Verifies the wrapping invariants hold for arbitrary logger names and
//! messages: no segment overflows its column, no content is ever dropped,
//! and composed rows keep their fixed shape.

use logcat_core::{ColumnWidths, LogRecord, compose_rows, wrap_message, wrap_name};
use proptest::prelude::*;

/// Dot-separated hierarchical names, 1 to 80 chars.
fn name_strategy() -> impl Strategy<Value = String> {
    proptest::collection::vec("[a-z][a-z0-9]{0,11}", 1..8).prop_map(|parts| parts.join("."))
}

/// Messages with spaces and occasional newlines.
fn message_strategy() -> impl Strategy<Value = String> {
    proptest::collection::vec(
        prop_oneof![
            4 => "[a-zA-Z0-9]{1,14}".prop_map(|w| format!("{w} ")),
            1 => Just("\n".to_string()),
        ],
        0..40,
    )
    .prop_map(|parts| parts.concat())
}

proptest! {
    #[test]
    fn prop_name_segments_never_exceed_width(name in name_strategy(), width in 4usize..32) {
        for segment in wrap_name(&name, width) {
            prop_assert!(segment.chars().count() <= width);
        }
    }

    #[test]
    fn prop_name_reconstructs_exactly(name in name_strategy(), width in 4usize..32) {
        let joined: String = wrap_name(&name, width)
            .iter()
            .map(|s| s.trim_start().to_string())
            .collect();
        prop_assert_eq!(joined, name);
    }

    #[test]
    fn prop_fitting_name_is_single_padded_segment(name in "[a-z.]{1,20}") {
        let segments = wrap_name(&name, 20);
        prop_assert_eq!(segments.len(), 1);
        prop_assert_eq!(segments[0].chars().count(), 20);
        prop_assert!(segments[0].ends_with(&name));
    }

    #[test]
    fn prop_message_segments_never_exceed_width(message in message_strategy(), width in 8usize..80) {
        for segment in wrap_message(&message, width) {
            prop_assert!(segment.chars().count() <= width);
        }
    }

    #[test]
    fn prop_fitting_breakless_message_is_identity(message in "[a-zA-Z0-9 ]{0,40}") {
        let segments = wrap_message(&message, 40);
        prop_assert_eq!(segments, vec![message]);
    }

    #[test]
    fn prop_spaceless_message_reconstructs(message in "[a-zA-Z0-9]{0,200}", width in 8usize..60) {
        // Hard cuts only, so concatenation is exact.
        prop_assert_eq!(wrap_message(&message, width).concat(), message);
    }

    #[test]
    fn prop_compose_shape_holds(
        name in name_strategy(),
        message in message_strategy(),
        level in 0i64..60,
    ) {
        let widths = ColumnWidths::default();
        let record = LogRecord::new("2024-03-01 12:00:00,123", level, "INFO", name, message);
        let rows = compose_rows(&record, &widths);

        prop_assert!(!rows.is_empty());
        prop_assert_eq!(
            rows.len(),
            wrap_name(&record.logger_name, widths.name)
                .len()
                .max(wrap_message(&record.message, widths.message).len())
        );
        prop_assert!(!rows[0].time.trim().is_empty());
        prop_assert!(!rows[0].level.trim().is_empty());
        let blank_time = " ".repeat(widths.time);
        let blank_level = " ".repeat(widths.level);
        for row in &rows[1..] {
            prop_assert_eq!(row.time.as_str(), blank_time.as_str());
            prop_assert_eq!(row.level.as_str(), blank_level.as_str());
        }
    }
}
