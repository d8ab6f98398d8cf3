//! Remote source boundary.
//!
//! The real decrypting server is an external collaborator; the console only
//! depends on this handle shape: connection/closed predicates, an
//! idempotent non-blocking `close`, a join, and a FIFO record queue.
//!
//! A simulated in-process source backs demos and integration tests: it
//! drives the same handle shape over channels, with no network involved,
//! so the merge loop sees exactly what a real server connection would
//! give it.

use std::{
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
    },
    time::Duration,
};

use logcat_core::{LogRecord, severity};
use rand::Rng;
use tokio::{sync::mpsc, task::JoinHandle};

use crate::buffer::timestamp_now;

/// Shared connection flags. Plain atomic writes; no compound invariant
/// spans the flags and the record queue.
#[derive(Debug, Default)]
struct SourceFlags {
    connected: AtomicBool,
    closed: AtomicBool,
}

/// Producer half of a source channel.
///
/// Owned by whatever drives the remote side (the simulated source here, a
/// network task in a full deployment).
#[derive(Debug, Clone)]
pub struct SourceRemote {
    records: mpsc::Sender<LogRecord>,
    flags: Arc<SourceFlags>,
}

impl SourceRemote {
    /// Report the connection as up or down.
    pub fn set_connected(&self, connected: bool) {
        self.flags.connected.store(connected, Ordering::Release);
    }

    /// Mark the source closed. Idempotent.
    pub fn close(&self) {
        self.flags.connected.store(false, Ordering::Release);
        self.flags.closed.store(true, Ordering::Release);
    }

    /// Whether close has been requested or reported.
    pub fn is_closed(&self) -> bool {
        self.flags.closed.load(Ordering::Acquire)
    }

    /// Deliver one record. Returns `false` if the console went away.
    pub async fn push(&self, record: LogRecord) -> bool {
        self.records.send(record).await.is_ok()
    }
}

/// Handle used by the signal listener to request close without owning the
/// full source handle.
#[derive(Debug, Clone)]
pub struct SourceCloser {
    flags: Arc<SourceFlags>,
}

impl SourceCloser {
    /// Non-blocking, idempotent close request.
    pub fn close(&self) {
        self.flags.connected.store(false, Ordering::Release);
        self.flags.closed.store(true, Ordering::Release);
    }
}

/// Consumer-side handle to a remote source.
#[derive(Debug)]
pub struct SourceHandle {
    /// Live FIFO output of decrypted records.
    pub records: mpsc::Receiver<LogRecord>,
    flags: Arc<SourceFlags>,
    task: Option<JoinHandle<()>>,
}

impl SourceHandle {
    /// Whether the remote reports an active connection.
    pub fn is_connected(&self) -> bool {
        self.flags.connected.load(Ordering::Acquire)
    }

    /// Whether the source has closed.
    pub fn is_closed(&self) -> bool {
        self.flags.closed.load(Ordering::Acquire)
    }

    /// Non-blocking, idempotent signal to terminate.
    pub fn close(&self) {
        self.flags.connected.store(false, Ordering::Release);
        self.flags.closed.store(true, Ordering::Release);
    }

    /// Detached close handle for the signal listener.
    pub fn closer(&self) -> SourceCloser {
        SourceCloser { flags: Arc::clone(&self.flags) }
    }

    /// Attach the background task driving the remote side.
    pub fn set_task(&mut self, task: JoinHandle<()>) {
        self.task = Some(task);
    }

    /// Wait for the background task to terminate.
    pub async fn join(&mut self) -> Result<(), tokio::task::JoinError> {
        match self.task.take() {
            Some(task) => task.await,
            None => Ok(()),
        }
    }
}

/// Create a connected producer/consumer pair with no task attached.
pub fn source_channel(capacity: usize) -> (SourceRemote, SourceHandle) {
    let (tx, rx) = mpsc::channel(capacity);
    let flags = Arc::new(SourceFlags::default());
    let remote = SourceRemote { records: tx, flags: Arc::clone(&flags) };
    let handle = SourceHandle { records: rx, flags, task: None };
    (remote, handle)
}

/// Knobs for the simulated source.
#[derive(Debug, Clone)]
pub struct SimulatedSourceConfig {
    /// Delay before the simulated connection comes up.
    pub connect_after: Duration,
    /// Number of records to emit before closing.
    pub count: usize,
}

impl Default for SimulatedSourceConfig {
    fn default() -> Self {
        Self { connect_after: Duration::from_millis(1500), count: 40 }
    }
}

/// Spawn an in-process source that connects after a delay, emits a scripted
/// batch of representative records with jittered pacing, then closes.
pub fn spawn_simulated_source(config: SimulatedSourceConfig) -> SourceHandle {
    let (remote, mut handle) = source_channel(64);

    let task = tokio::spawn(async move {
        tokio::time::sleep(config.connect_after).await;
        if remote.is_closed() {
            return;
        }
        remote.set_connected(true);

        for index in 0..config.count {
            if remote.is_closed() {
                break;
            }
            if !remote.push(sample_record(index)).await {
                break;
            }
            let pause = rand::rng().random_range(40..160);
            tokio::time::sleep(Duration::from_millis(pause)).await;
        }

        remote.close();
    });

    handle.set_task(task);
    handle
}

/// One scripted record. Cycles severities and exercises long names and
/// multi-paragraph messages so the layout engine's wrapping shows up in
/// demos.
fn sample_record(index: usize) -> LogRecord {
    const SCRIPT: &[(i64, &str, &str, &str)] = &[
        (severity::DEBUG, "DEBUG", "server.session", "handshake accepted"),
        (severity::INFO, "INFO", "server.pipeline.decrypt", "payload decrypted and parsed"),
        (
            severity::INFO,
            "INFO",
            "equipments.logging.handlers.pipeline",
            "record batch flushed to the console pipeline after the retry \
             window elapsed without further input",
        ),
        (severity::WARNING, "WARNING", "server.session", "peer idle, keeping connection open"),
        (
            severity::ERROR,
            "ERROR",
            "server.pipeline",
            "frame rejected\n\ninvalid authentication tag; the record was \
             dropped before parsing",
        ),
        (severity::CRITICAL, "CRITICAL", "server", "listener thread restarted"),
    ];

    let (level_number, level_name, logger_name, message) = SCRIPT[index % SCRIPT.len()];
    LogRecord::new(
        timestamp_now(),
        level_number,
        level_name,
        logger_name,
        format!("{message} (seq {index})"),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn close_is_idempotent_and_drops_connected() {
        let (remote, handle) = source_channel(8);
        remote.set_connected(true);
        assert!(handle.is_connected());

        handle.close();
        handle.close();
        assert!(handle.is_closed());
        assert!(!handle.is_connected());
        assert!(remote.is_closed());
    }

    #[test]
    fn closer_reaches_the_same_flags() {
        let (_remote, handle) = source_channel(8);
        let closer = handle.closer();

        closer.close();
        assert!(handle.is_closed());
    }

    #[tokio::test]
    async fn simulated_source_connects_emits_and_closes() {
        let config =
            SimulatedSourceConfig { connect_after: Duration::from_millis(10), count: 3 };
        let mut handle = spawn_simulated_source(config);

        let mut received = Vec::new();
        while let Some(record) = handle.records.recv().await {
            received.push(record);
        }

        assert_eq!(received.len(), 3);
        assert!(handle.is_closed());
        handle.join().await.unwrap();
    }
}
