//! Command implementations

pub mod diagnostics;
pub mod factory_reset;
pub mod identity;
pub mod metrics;
pub mod reboot;

use anyhow::Result;
use clap::Args;
use serde::Serialize;

use crate::app::AppContext;
use crate::output::json;

/// Arguments shared by the lifecycle commands.
#[derive(Args)]
pub struct LifecycleArgs {
    /// Skip the confirmation prompt
    #[arg(short, long)]
    pub yes: bool,
}

/// Print `value` as the single JSON document of this run.
pub(crate) fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", json::format_value(value)?);
    Ok(())
}

/// Confirm a lifecycle command unless `--yes` or the environment says not to ask.
pub(crate) fn confirmed(app: &AppContext, args: &LifecycleArgs, prompt: &str) -> Result<bool> {
    if args.yes {
        return Ok(true);
    }
    app.confirm(prompt, false)
}
