//! CLI argument parsing with clap derive

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::app::{AppContext, AppFlags, OutputFlags};
use crate::commands;

/// Device management agent for hotspot gateways
#[derive(Parser)]
#[command(
    name = "hotspot-agent",
    version,
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    /// Output in JSON format
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress non-error output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true, env = "NO_COLOR")]
    pub no_color: bool,

    /// Log progress to stderr (same as RUST_LOG=info)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Configuration file [default: /etc/hotspot-agent/config.yaml]
    #[arg(long, global = true, env = "HOTSPOT_AGENT_CONFIG", value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Show serial number, MAC addresses, firmware and uptime
    Identity,

    /// Show CPU, memory, storage and temperature
    Metrics,

    /// Run the network test
    Diagnostics,

    /// Reboot the device
    Reboot(commands::LifecycleArgs),

    /// Erase device configuration and data, then reboot
    FactoryReset(commands::LifecycleArgs),
}

impl Cli {
    /// Execute the CLI command.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration cannot be loaded or the command fails.
    pub async fn run(self) -> Result<()> {
        let Cli {
            json,
            quiet,
            no_color,
            verbose: _,
            config,
            command,
        } = self;

        let flags = AppFlags {
            output: OutputFlags {
                no_color,
                quiet,
                json,
            },
            config,
        };

        let app = AppContext::new(&flags)?;
        match command {
            Command::Identity => commands::identity::run(&app).await,
            Command::Metrics => commands::metrics::run(&app).await,
            Command::Diagnostics => commands::diagnostics::run(&app).await,
            Command::Reboot(args) => commands::reboot::run(&app, &args).await,
            Command::FactoryReset(args) => commands::factory_reset::run(&app, &args).await,
        }
    }
}
