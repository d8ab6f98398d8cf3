//! Local bootstrap buffer.
//!
//! Diagnostics emitted before the remote connection exists must still reach
//! the console, in order. A [`BufferLayer`] installed next to the env
//! filter converts every tracing event into a [`LogRecord`] and sends it
//! into an unbounded FIFO channel; the merge loop drains that channel with
//! absolute precedence over live traffic.
//!
//! The buffer's sender is injected here explicitly at construction; nothing
//! introspects a handler list to find it.

use chrono::Local;
use logcat_core::{LogRecord, severity};
use tracing::{Event, Level, Subscriber, field::Visit};
use tracing_subscriber::layer::{Context, Layer};

/// Sender half of the local buffer.
pub type BufferSender = tokio::sync::mpsc::UnboundedSender<LogRecord>;
/// Receiver half of the local buffer.
pub type BufferReceiver = tokio::sync::mpsc::UnboundedReceiver<LogRecord>;

/// Create the local bootstrap buffer pair.
pub fn local_buffer() -> (BufferSender, BufferReceiver) {
    tokio::sync::mpsc::unbounded_channel()
}

/// Current wall-clock time as 23-char console timestamp text.
pub fn timestamp_now() -> String {
    Local::now().format("%Y-%m-%d %H:%M:%S,%3f").to_string()
}

/// Map a tracing level onto the standard severity set.
fn severity_of(level: &Level) -> (i64, &'static str) {
    if *level == Level::ERROR {
        (severity::ERROR, "ERROR")
    } else if *level == Level::WARN {
        (severity::WARNING, "WARNING")
    } else if *level == Level::INFO {
        (severity::INFO, "INFO")
    } else if *level == Level::DEBUG {
        (severity::DEBUG, "DEBUG")
    } else {
        (severity::NOTSET, "TRACE")
    }
}

/// Field visitor collecting the event message plus structured fields.
///
/// Non-text values are coerced through their `Debug` form; a malformed
/// field must never fail the console mid-stream.
#[derive(Default)]
struct MessageVisitor {
    message: String,
    fields: Vec<(&'static str, String)>,
}

impl MessageVisitor {
    fn into_message(self) -> String {
        let mut text = self.message;
        for (name, value) in self.fields {
            if !text.is_empty() {
                text.push(' ');
            }
            text.push_str(name);
            text.push('=');
            text.push_str(&value);
        }
        text
    }
}

impl Visit for MessageVisitor {
    fn record_str(&mut self, field: &tracing::field::Field, value: &str) {
        if field.name() == "message" {
            self.message = value.to_string();
        } else {
            self.fields.push((field.name(), value.to_string()));
        }
    }

    fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
        let rendered = format!("{value:?}");
        if field.name() == "message" {
            // Strip the quoting Debug adds around plain strings.
            self.message = rendered
                .strip_prefix('"')
                .and_then(|s| s.strip_suffix('"'))
                .map_or(rendered.clone(), ToString::to_string);
        } else {
            self.fields.push((field.name(), rendered));
        }
    }
}

/// Tracing layer feeding the local bootstrap buffer.
#[derive(Debug)]
pub struct BufferLayer {
    tx: BufferSender,
}

impl BufferLayer {
    /// Layer writing into the given buffer sender.
    pub fn new(tx: BufferSender) -> Self {
        Self { tx }
    }
}

impl<S: Subscriber> Layer<S> for BufferLayer {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let mut visitor = MessageVisitor::default();
        event.record(&mut visitor);

        let metadata = event.metadata();
        let (level_number, level_name) = severity_of(metadata.level());
        let record = LogRecord::new(
            timestamp_now(),
            level_number,
            level_name,
            metadata.target().to_string(),
            visitor.into_message(),
        );

        // Console gone means nowhere to report; drop silently.
        let _ = self.tx.send(record);
    }
}

#[cfg(test)]
mod tests {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    use super::*;

    #[test]
    fn timestamp_has_console_shape() {
        let stamp = timestamp_now();

        assert_eq!(stamp.len(), 23);
        assert_eq!(&stamp[4..5], "-");
        assert_eq!(&stamp[19..20], ",");
    }

    #[test]
    fn events_become_records_in_emission_order() {
        let (tx, mut rx) = local_buffer();
        let subscriber = tracing_subscriber::registry().with(BufferLayer::new(tx));
        let _guard = subscriber.set_default();

        tracing::info!(target: "console.boot", "first");
        tracing::warn!(target: "console.boot", attempts = 3, "second");

        let first = rx.try_recv().unwrap();
        assert_eq!(first.level_number, severity::INFO);
        assert_eq!(first.level_name, "INFO");
        assert_eq!(first.logger_name, "console.boot");
        assert_eq!(first.message, "first");

        let second = rx.try_recv().unwrap();
        assert_eq!(second.level_number, severity::WARNING);
        assert_eq!(second.message, "second attempts=3");
    }
}
