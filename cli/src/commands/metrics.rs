//! `metrics` command: CPU, memory, storage and temperature.

use anyhow::{Context, Result};

use crate::app::AppContext;
use crate::application::services::system_query;

/// Run the metrics command.
///
/// # Errors
///
/// Returns an error if any reading is unavailable.
pub async fn run(app: &AppContext) -> Result<()> {
    let metrics = system_query::resource_metrics(&app.probe, &app.config.resources)
        .await
        .context("collecting resource metrics")?;

    if app.is_json() {
        return super::print_json(&metrics);
    }
    app.human().render_metrics(&metrics);
    Ok(())
}
