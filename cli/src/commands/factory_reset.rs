//! `factory-reset` command.
//!
//! Stops the gateway services, removes configuration, network settings,
//! logs and miner data, then reboots. Individual step failures do not stop
//! the sequence; they are listed in the report.

use anyhow::{Context, Result};

use crate::app::AppContext;
use crate::application::services::lifecycle;
use crate::commands::LifecycleArgs;
use crate::output::{SilentReporter, TerminalReporter};

/// Run the factory-reset command.
///
/// # Errors
///
/// Returns an error if the confirmation prompt fails or another lifecycle
/// operation holds the gate.
pub async fn run(app: &AppContext, args: &LifecycleArgs) -> Result<()> {
    if !super::confirmed(
        app,
        args,
        "Erase configuration, network settings, logs and miner data, then reboot?",
    )? {
        app.output.info("Factory reset cancelled.");
        return Ok(());
    }

    let gate = app.gate();
    let result = if app.is_json() {
        lifecycle::factory_reset(&app.runner, &app.fs, &gate, &app.config, &SilentReporter).await
    } else {
        app.output.header("Factory reset:");
        let reporter = TerminalReporter::new(&app.output);
        lifecycle::factory_reset(&app.runner, &app.fs, &gate, &app.config, &reporter).await
    };
    let report = result.context("factory reset refused")?;

    if app.is_json() {
        return super::print_json(&report);
    }
    app.human().render_lifecycle_report(&report);
    Ok(())
}
