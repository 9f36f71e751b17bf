//! `reboot` command.

use anyhow::{Context, Result};

use crate::app::AppContext;
use crate::application::services::lifecycle;
use crate::commands::LifecycleArgs;
use crate::output::{SilentReporter, TerminalReporter};

/// Run the reboot command.
///
/// # Errors
///
/// Returns an error if the confirmation prompt fails or another lifecycle
/// operation holds the gate.
pub async fn run(app: &AppContext, args: &LifecycleArgs) -> Result<()> {
    if !super::confirmed(app, args, "Reboot the device now?")? {
        app.output.info("Reboot cancelled.");
        return Ok(());
    }

    let gate = app.gate();
    let result = if app.is_json() {
        lifecycle::reboot(&app.runner, &gate, &app.config.commands, &SilentReporter).await
    } else {
        let reporter = TerminalReporter::new(&app.output);
        lifecycle::reboot(&app.runner, &gate, &app.config.commands, &reporter).await
    };
    let report = result.context("reboot refused")?;

    if app.is_json() {
        return super::print_json(&report);
    }
    app.human().render_lifecycle_report(&report);
    Ok(())
}
