use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context};
use clap::{Parser, Subcommand};
use ocean_notification::{config::NotificationConfig, NotificationServer};
use ocean_utils::{config::load_config, logging::setup_tracing};
use tracing::{error, info};

// CONSTANTS
// ================================================================================================

const CONFIG_FILE_PATH: &str = "oceand.toml";

const ENV_ENABLE_OTEL: &str = "OCEAN_ENABLE_OTEL";

// COMMANDS
// ================================================================================================

#[derive(Parser)]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Starts the notification service.
    Start {
        /// Read the configuration from this file. Missing values, or a missing file, fall back to
        /// the defaults.
        #[arg(short, long, value_name = "FILE", default_value = CONFIG_FILE_PATH)]
        config: PathBuf,

        /// Enables the exporting of traces for OpenTelemetry.
        ///
        /// This can be further configured using environment variables as defined in the official
        /// OpenTelemetry documentation.
        #[arg(long = "enable-otel", default_value_t = false, env = ENV_ENABLE_OTEL)]
        enable_otel: bool,
    },

    /// Prints the default configuration as TOML.
    DumpConfig,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Start { config, enable_otel } => {
            setup_tracing(enable_otel)?;
            start(&config).await
        },
        Command::DumpConfig => {
            println!("{}", dump_config()?);
            Ok(())
        },
    }
}

async fn start(config_path: &Path) -> anyhow::Result<()> {
    let config = read_config(config_path)?;
    info!(path = %config_path.display(), %config, "Configuration loaded");

    NotificationServer::init(config)
        .await
        .context("Loading notification service")?
        .serve_with_shutdown(shutdown_signal())
        .await
        .context("Serving notification service")
}

/// Completes on Ctrl+C, or on SIGTERM on unix.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            error!(%err, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            },
            Err(err) => {
                error!(%err, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            },
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => info!("Received Ctrl+C"),
        () = terminate => info!("Received SIGTERM"),
    }
}

fn read_config(path: &Path) -> anyhow::Result<NotificationConfig> {
    load_config(path)
        .map_err(|err| anyhow!("failed to load config file `{}`: {err}", path.display()))
}

fn dump_config() -> anyhow::Result<String> {
    toml::to_string_pretty(&NotificationConfig::default()).context("Serializing default config")
}

// TESTS
// ================================================================================================
