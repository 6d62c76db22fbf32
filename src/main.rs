#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::uninlined_format_args)]

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tokio_util::sync::CancellationToken;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

use dashclaw::config::Config;
use dashclaw::device::sim::{SimulatedDiscovery, SimulatedDriver};
use dashclaw::device::DeviceSession;
use dashclaw::{gateway, tools};

/// `dashclaw` - tool gateway for one Dash robot.
#[derive(Parser, Debug)]
#[command(name = "dashclaw", version, about)]
struct Cli {
    /// Path to config.toml (defaults to the user config directory)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Start the HTTP gateway (the default)
    Serve {
        /// Bind host, overriding the config
        #[arg(long)]
        host: Option<String>,
        /// Bind port, overriding the config
        #[arg(long)]
        port: Option<u16>,
    },
    /// Print the tool catalog as JSON
    Tools,
    /// Invoke one tool locally and print the result envelope
    Invoke {
        /// Tool name
        name: String,
        /// Arguments as a JSON object
        #[arg(default_value = "{}")]
        args: String,
    },
}

fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("dashclaw=info"));
    fmt().with_env_filter(filter).init();
}

/// Builds the session and registry. The session is the one process-wide
/// robot relationship, owned here and shared by reference everywhere else.
fn build_runtime(
    config: &Config,
    shutdown: CancellationToken,
) -> Result<(Arc<DeviceSession>, Arc<tools::ToolRegistry>)> {
    let driver = Arc::new(SimulatedDriver::with_delay(Duration::from_millis(
        config.device.sim_latency_ms,
    )));
    let discovery = Arc::new(SimulatedDiscovery::new(driver));
    let session = Arc::new(DeviceSession::new(
        discovery,
        Duration::from_secs(config.device.discovery_timeout_secs),
        shutdown,
    ));
    let registry = Arc::new(tools::build_registry(session.clone(), config)?);
    Ok((session, registry))
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();

    let cli = Cli::parse();
    let mut config = Config::load(cli.config.as_deref())?;

    let command = cli.command.unwrap_or(Commands::Serve {
        host: None,
        port: None,
    });

    match command {
        Commands::Serve { host, port } => {
            if let Some(host) = host {
                config.gateway.host = host;
            }
            if let Some(port) = port {
                config.gateway.port = port;
            }

            let shutdown = CancellationToken::new();
            let (session, registry) = build_runtime(&config, shutdown.clone())?;

            {
                let shutdown = shutdown.clone();
                tokio::spawn(async move {
                    if tokio::signal::ctrl_c().await.is_ok() {
                        info!("shutdown requested");
                        shutdown.cancel();
                    }
                });
            }

            gateway::serve(&config.gateway, registry, session.clone(), shutdown).await?;

            // In-flight turns have been cancelled; leave the robot stopped
            // and disconnected before exiting.
            session.shutdown().await;
            info!("goodbye");
        }
        Commands::Tools => {
            let shutdown = CancellationToken::new();
            let (_session, registry) = build_runtime(&config, shutdown)?;
            println!("{}", serde_json::to_string_pretty(&registry.catalog())?);
        }
        Commands::Invoke { name, args } => {
            let args: serde_json::Value = serde_json::from_str(&args)
                .map_err(|e| anyhow::anyhow!("arguments must be a JSON object: {e}"))?;

            let shutdown = CancellationToken::new();
            let (session, registry) = build_runtime(&config, shutdown)?;

            let result = registry.invoke(&name, args).await;
            println!("{}", serde_json::to_string_pretty(&result)?);

            session.shutdown().await;
        }
    }

    Ok(())
}
