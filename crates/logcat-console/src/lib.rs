//! Rendering and consumption layer of the logcat console.
//!
//! Receives already-decrypted, already-parsed [`logcat_core::LogRecord`]s
//! from two sources - a local bootstrap buffer and a remote source's live
//! queue - and renders them column-aligned and color-coded, while tracking
//! the remote connection lifecycle and reacting to shutdown signals.
//!
//! Module map:
//! - [`config`]: column geometry derived from the terminal size.
//! - [`sink`]: color-coded row output.
//! - [`buffer`]: tracing layer feeding the local bootstrap buffer.
//! - [`source`]: remote source handle boundary plus a simulated source.
//! - [`lifecycle`]: connection state machine driving the busy indicator.
//! - [`indicator`]: spinner wrapper.
//! - [`runtime`]: the dual-source merge loop.

pub mod buffer;
pub mod config;
pub mod indicator;
pub mod lifecycle;
pub mod runtime;
pub mod signals;
pub mod sink;
pub mod source;

pub use buffer::{BufferLayer, local_buffer};
pub use config::ConsoleConfig;
pub use indicator::Indicator;
pub use lifecycle::{ConnectionState, IndicatorAction, Lifecycle, LifecycleEvent};
pub use runtime::{Runtime, RuntimeError};
pub use signals::{ShutdownGuard, spawn_signal_listener};
pub use sink::{ColorSink, RecordSink};
pub use source::{
    SimulatedSourceConfig, SourceCloser, SourceHandle, SourceRemote, source_channel,
    spawn_simulated_source,
};
