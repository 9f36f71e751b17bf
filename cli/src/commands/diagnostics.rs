//! `diagnostics` command: run the network test and show its decoded result.

use anyhow::{Context, Result};

use crate::app::AppContext;
use crate::application::services::diagnostics::run_diagnostics;
use crate::output::progress;

/// Run the diagnostics command.
///
/// # Errors
///
/// Returns an error if the probe's output holds a malformed numeric value
/// and the configured policy is to abort.
pub async fn run(app: &AppContext) -> Result<()> {
    let probe = &app.config.commands.net_test;
    let policy = app.config.diagnostics.malformed_lines;

    let spinner = (app.output.show_progress() && !app.is_json())
        .then(|| progress::spinner("Running network test..."));

    let result = run_diagnostics(&app.runner, probe, policy).await;

    if let Some(pb) = &spinner {
        match &result {
            Ok(_) => progress::finish_ok(pb, "Network test complete"),
            Err(_) => progress::finish_error(pb, "Network test output unreadable"),
        }
    }
    let result = result.context("decoding network test output")?;

    if app.is_json() {
        return super::print_json(&result);
    }
    app.human().render_diagnostics(&result);
    Ok(())
}
