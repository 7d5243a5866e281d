//! scandesk — operator console for a passport/ID document scanner.
//!
//! Connects to the scanner's REST API, reserves the device, runs
//! multi-sensor scans and prints the dispatched results. An `emulate`
//! subcommand serves the bundled device emulator for development without
//! hardware.

mod commands;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use scandesk_core::constants::{
    DEFAULT_BASE_URL, DEFAULT_EMULATOR_PORT, DEFAULT_RESERVATION_TIMEOUT_SECS,
};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "scandesk", version, about = "Operator console for a document scanner")]
struct Cli {
    #[command(flatten)]
    connection: ConnectionOpts,

    #[command(subcommand)]
    command: Command,
}

#[derive(Args)]
struct ConnectionOpts {
    /// Base URL of the scanner's REST API
    #[arg(long, env = "SCANDESK_BASE_URL", default_value = DEFAULT_BASE_URL, global = true)]
    base_url: String,

    /// API username
    #[arg(long, env = "SCANDESK_USERNAME", default_value = "operator", global = true)]
    username: String,

    /// API password
    #[arg(long, env = "SCANDESK_PASSWORD", default_value = "secret", global = true)]
    password: String,

    /// Reservation timeout requested from the device (seconds)
    #[arg(long, default_value_t = DEFAULT_RESERVATION_TIMEOUT_SECS, global = true)]
    timeout: u64,
}

#[derive(Subcommand)]
enum Command {
    /// Reserve the device, print its system information, release it
    Info,

    /// Reserve, scan, print the dispatched report, release
    Scan {
        /// Decode the captured JPEGs into this directory
        #[arg(long, value_name = "DIR")]
        save_images: Option<PathBuf>,
    },

    /// Poll until a document is on the glass, then scan it
    Watch {
        /// Poll interval in seconds
        #[arg(long, default_value_t = 2)]
        interval: u64,
    },

    /// Serve the bundled device emulator
    Emulate {
        /// Port to listen on
        #[arg(long, default_value_t = DEFAULT_EMULATOR_PORT)]
        port: u16,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Info => commands::info(&cli.connection).await,
        Command::Scan { save_images } => commands::scan(&cli.connection, save_images).await,
        Command::Watch { interval } => commands::watch(&cli.connection, interval).await,
        Command::Emulate { port } => {
            commands::emulate(&cli.connection.username, &cli.connection.password, port).await
        }
    }
}
