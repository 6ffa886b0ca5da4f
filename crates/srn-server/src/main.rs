//! srn console host binary.
//!
//! # Usage
//!
//! ```bash
//! # Roll as the console
//! echo "roll 1 20" | srn-server
//!
//! # Two players, one of them an operator
//! srn-server --player Steve@world:0,64,0 --player Alex@world:40,64,0 --op Steve
//! ```

use std::path::PathBuf;

use clap::Parser;
use srn_server::{BroadcastPolicy, Server, ServerRuntimeConfig};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// srn random number command host
#[derive(Parser, Debug)]
#[command(name = "srn-server")]
#[command(about = "Console host for the srn/roll random number command")]
#[command(version)]
struct Args {
    /// Path to the YAML config file (created if missing)
    #[arg(short, long, default_value = "config.yml")]
    config: PathBuf,

    /// Online player as name@world:x,y,z (repeatable)
    #[arg(short, long = "player")]
    players: Vec<String>,

    /// Player granted srn.admin (repeatable)
    #[arg(long = "op")]
    operators: Vec<String>,

    /// Only send nearby broadcasts to players in range, not the console
    #[arg(long)]
    quiet_console: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    log_level: String,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level));

    // Logs go to stderr so stdout carries only deliveries.
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    tracing::info!("srn server starting");

    let config = ServerRuntimeConfig {
        config_path: args.config,
        players: args.players,
        operators: args.operators,
        broadcast_policy: if args.quiet_console {
            BroadcastPolicy::AudienceOnly
        } else {
            BroadcastPolicy::EchoToConsole
        },
    };

    let server = Server::open(config)?;
    server.run().await?;

    Ok(())
}
