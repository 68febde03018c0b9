//! Modula CLI
//!
//! Sends a single raw command straight to the device, bypassing the HTTP
//! layer, and prints the translated outcome. Useful for commissioning and
//! troubleshooting a controller.

use clap::Parser;
use modula_bridge::{Bridge, Config, Outcome};
use tracing_subscriber::{fmt, EnvFilter};

/// Modula device CLI
#[derive(Parser, Debug)]
#[command(name = "modula-cli")]
#[command(about = "Send one command to a Modula storage controller")]
#[command(version)]
struct Args {
    /// Device hostname or IP address
    #[arg(long, default_value = "127.0.0.1")]
    device_host: String,

    /// Device TCP port
    #[arg(long, default_value = "11001")]
    device_port: u16,

    /// Interval between CALL poll attempts, in milliseconds
    #[arg(long, default_value = "1000")]
    poll_interval_ms: u64,

    /// CALL attempt budget before timing out
    #[arg(long, default_value = "300")]
    max_attempts: u32,

    /// The raw pipe-delimited command, e.g. "01|02|CALL|10"
    command: String,
}

fn main() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    fmt().with_env_filter(filter).init();

    let args = Args::parse();

    let config = Config::builder()
        .device_addr(&args.device_host, args.device_port)
        .poll_interval(std::time::Duration::from_millis(args.poll_interval_ms))
        .max_attempts(args.max_attempts)
        .build();

    let bridge = Bridge::new(&config);
    let outcome = bridge.execute(&args.command);

    println!("{}", outcome);

    if !matches!(outcome, Outcome::Accepted { .. }) {
        std::process::exit(1);
    }
}
