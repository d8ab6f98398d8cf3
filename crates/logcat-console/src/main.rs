//! Logcat console entry point.
//!
//! Bootstraps the color palette and column geometry, installs the local
//! bootstrap buffer as a tracing layer, spawns the (simulated) remote
//! source and the signal listener, then hands the main task to the merge
//! loop until the source closes or a shutdown signal arrives.

use std::io::stdout;

use clap::Parser;
use crossterm::{
    execute,
    style::{Color, Print, ResetColor, SetForegroundColor},
};
use logcat_console::{
    BufferLayer, ColorSink, ConsoleConfig, Indicator, Runtime, ShutdownGuard,
    SimulatedSourceConfig, local_buffer, spawn_signal_listener, spawn_simulated_source,
};
use logcat_core::Palette;
use tracing_subscriber::{EnvFilter, Layer, layer::SubscriberExt, util::SubscriberInitExt};

/// Color-coded console for a decrypted log stream
#[derive(Parser, Debug)]
#[command(name = "logcat-console")]
#[command(about = "Column-aligned, color-coded log tailing console")]
#[command(version)]
struct Args {
    /// Terminal width override (columns); autodetected when omitted
    #[arg(short, long)]
    width: Option<u16>,

    /// Log level for the console's own diagnostics
    #[arg(long, default_value = "debug")]
    log_level: String,

    /// Milliseconds before the simulated source connects
    #[arg(long, default_value = "1500")]
    connect_after_ms: u64,

    /// Number of records the simulated source emits before closing
    #[arg(long, default_value = "40")]
    count: usize,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let config = match args.width {
        Some(width) => ConsoleConfig::for_terminal_width(width),
        None => ConsoleConfig::detect(),
    };

    // The console's own diagnostics flow through the local buffer and come
    // back out of the merge loop, so no fmt layer writes to stdout.
    let (buffer_tx, buffer_rx) = local_buffer();
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level));
    tracing_subscriber::registry().with(BufferLayer::new(buffer_tx).with_filter(filter)).init();

    execute!(
        stdout(),
        SetForegroundColor(Color::Green),
        Print("\u{2714}  Steady"),
        ResetColor,
        Print("\n")
    )?;

    tracing::info!(target: "console", "logcat console starting");
    tracing::debug!(
        target: "console.layout",
        message_width = config.widths.message,
        "column geometry ready"
    );

    let source = spawn_simulated_source(SimulatedSourceConfig {
        connect_after: std::time::Duration::from_millis(args.connect_after_ms),
        count: args.count,
    });

    let indicator = Indicator::new();
    let guard = ShutdownGuard::new(indicator.clone(), source.closer());
    let _listener = spawn_signal_listener(guard);

    let sink = ColorSink::new(stdout(), Palette::standard(), config);
    Runtime::new(sink, buffer_rx, source, indicator).run().await?;

    Ok(())
}
