//! Modula Agent Binary
//!
//! Starts the HTTP bridge for a Modula storage controller.

use std::sync::Arc;

use clap::Parser;
use modula_bridge::network::Server;
use modula_bridge::notify::Notifier;
use modula_bridge::{Bridge, Config};
use tracing_subscriber::{fmt, EnvFilter};

/// Modula bridge agent
#[derive(Parser, Debug)]
#[command(name = "modula-agent")]
#[command(about = "HTTP-to-TCP bridge for Modula storage controllers")]
#[command(version)]
struct Args {
    /// Device hostname or IP address
    #[arg(long, default_value = "127.0.0.1")]
    device_host: String,

    /// Device TCP port
    #[arg(long, default_value = "11001")]
    device_port: u16,

    /// HTTP listen address (host:port)
    #[arg(short, long, default_value = "127.0.0.1:5000")]
    listen: String,

    /// Interval between CALL poll attempts, in milliseconds
    #[arg(long, default_value = "1000")]
    poll_interval_ms: u64,

    /// CALL attempt budget before timing out
    #[arg(long, default_value = "300")]
    max_attempts: u32,

    /// Maximum concurrent HTTP workers
    #[arg(short, long, default_value = "64")]
    max_connections: usize,

    /// Device socket timeout (connect/read/write), in milliseconds
    #[arg(long, default_value = "5000")]
    device_timeout_ms: u64,
}

fn main() {
    // Initialize tracing/logging
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,modula_bridge=debug"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(true)
        .init();

    let args = Args::parse();

    tracing::info!("Modula agent v{}", modula_bridge::VERSION);
    tracing::info!("Device: {}:{}", args.device_host, args.device_port);
    tracing::info!("Listen address: {}", args.listen);

    // Build config from args
    let config = Config::builder()
        .device_addr(&args.device_host, args.device_port)
        .listen_addr(&args.listen)
        .poll_interval(std::time::Duration::from_millis(args.poll_interval_ms))
        .max_attempts(args.max_attempts)
        .max_connections(args.max_connections)
        .connect_timeout_ms(args.device_timeout_ms)
        .read_timeout_ms(args.device_timeout_ms)
        .write_timeout_ms(args.device_timeout_ms)
        .build();

    // Notification channel; the notifier renders events as log records
    let (events, notifier) = Notifier::channel();
    notifier.spawn();

    let bridge = Arc::new(Bridge::new(&config).with_events(events));

    // Start server
    let server = Server::new(&config, bridge);
    if let Err(e) = server.run() {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
