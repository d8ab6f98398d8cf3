//! Dual-source merge loop.
//!
//! Produces one ordered record stream from the local bootstrap buffer and
//! the remote source's live queue and feeds it to the sink. The local
//! buffer has absolute precedence while non-empty, so early diagnostics are
//! never starved by live traffic; once both phases end, both queues are
//! drained again before exit so no record is ever discarded.
//!
//! The loop is single-threaded and cooperative: it never spawns workers,
//! only waits with a bounded timeout between empty-queue checks, which
//! bounds render latency to roughly one poll interval and keeps it
//! responsive to a `Closed` flag raised from the signal listener.

use std::io;

use logcat_core::LogRecord;
use thiserror::Error;
use tokio::time::timeout;

use crate::{
    buffer::BufferReceiver,
    indicator::Indicator,
    lifecycle::{IndicatorAction, Lifecycle, LifecycleEvent, WAITING_TEXT},
    sink::RecordSink,
    source::SourceHandle,
};

/// Poll interval while waiting for the first connection.
const WAITING_POLL: std::time::Duration = std::time::Duration::from_millis(200);
/// Bounded wait on the live queue between closed-flag checks.
const LIVE_POLL: std::time::Duration = std::time::Duration::from_millis(100);

/// Final status line printed at shutdown.
const TERMINATED_TEXT: &str = "Terminated!";

/// Runtime errors.
#[derive(Debug, Error)]
pub enum RuntimeError {
    /// I/O error from the sink.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Remote source task failed.
    #[error("source task failed: {0}")]
    SourceJoin(#[from] tokio::task::JoinError),
}

/// Merge loop over the local buffer and the remote live queue.
pub struct Runtime<S: RecordSink> {
    sink: S,
    lifecycle: Lifecycle,
    local: BufferReceiver,
    source: SourceHandle,
    indicator: Indicator,
}

impl<S: RecordSink> Runtime<S> {
    /// Wire a runtime from its collaborators.
    pub fn new(sink: S, local: BufferReceiver, source: SourceHandle, indicator: Indicator) -> Self {
        Self { sink, lifecycle: Lifecycle::new(), local, source, indicator }
    }

    /// Run to completion: wait for the connection, merge live traffic,
    /// drain on close, and leave a final status line.
    pub async fn run(mut self) -> Result<(), RuntimeError> {
        if self.wait_for_connection().await? {
            self.merge_live().await?;
        }
        self.shutdown().await
    }

    /// Waiting phase: local buffer only, spinner while idle.
    ///
    /// A bounded receive on the buffer renders pre-connection diagnostics
    /// on arrival; the timeout only paces the connection/closed flag
    /// checks. Returns `false` if the source closed before ever
    /// connecting.
    async fn wait_for_connection(&mut self) -> Result<bool, RuntimeError> {
        while !self.source.is_connected() {
            if self.source.is_closed() {
                return Ok(false);
            }
            match timeout(WAITING_POLL, self.local.recv()).await {
                Ok(Some(record)) => {
                    self.emit(&record)?;
                    self.drain_local()?;
                },
                // Buffer senders gone; only the flags can end this phase.
                Ok(None) => {
                    self.indicator.show(WAITING_TEXT);
                    tokio::time::sleep(WAITING_POLL).await;
                },
                Err(_elapsed) => self.indicator.show(WAITING_TEXT),
            }
        }
        self.apply(LifecycleEvent::RemoteConnected);
        Ok(true)
    }

    /// Live phase: local precedence while non-empty, otherwise a bounded
    /// wait across both queues until the source closes.
    async fn merge_live(&mut self) -> Result<(), RuntimeError> {
        while !self.source.is_closed() {
            tokio::select! {
                biased;

                // Local buffer first: absolute precedence while non-empty.
                Some(record) = self.local.recv() => {
                    self.emit(&record)?;
                }

                outcome = timeout(LIVE_POLL, self.source.records.recv()) => {
                    match outcome {
                        Ok(Some(record)) => self.emit(&record)?,
                        // Live queue finished; the closed flag follows.
                        Ok(None) => break,
                        Err(_elapsed) => {
                            // Nothing arrived within the poll bound; show
                            // the spinner again on a transient disconnect.
                            if self.source.is_connected() {
                                self.apply(LifecycleEvent::RemoteConnected);
                            } else {
                                self.apply(LifecycleEvent::RemoteDisconnected);
                            }
                        },
                    }
                }
            }
        }
        Ok(())
    }

    /// Closed phase: drain both queues, join the source, final status.
    async fn shutdown(&mut self) -> Result<(), RuntimeError> {
        self.apply(LifecycleEvent::RemoteClosed);

        self.drain_local()?;
        while let Ok(record) = self.source.records.try_recv() {
            self.emit(&record)?;
        }

        self.source.join().await?;
        self.indicator.finish(TERMINATED_TEXT);
        Ok(())
    }

    /// Render everything currently buffered locally. Returns the count.
    fn drain_local(&mut self) -> Result<usize, RuntimeError> {
        let mut drained = 0;
        while let Ok(record) = self.local.try_recv() {
            self.emit(&record)?;
            drained += 1;
        }
        Ok(drained)
    }

    /// Render one record, clearing the spinner out of the way first.
    fn emit(&mut self, record: &LogRecord) -> Result<(), RuntimeError> {
        if self.indicator.visible() {
            self.indicator.hide();
            println!();
        }
        self.sink.render(record)?;
        Ok(())
    }

    /// Feed an observation to the lifecycle machine and execute the
    /// indicator instructions it returns.
    fn apply(&mut self, event: LifecycleEvent) {
        for action in self.lifecycle.handle(event) {
            match action {
                IndicatorAction::Show { text } => self.indicator.show(text),
                IndicatorAction::Hide => self.indicator.hide(),
            }
        }
    }
}
