//! `identity` command: serial number, interface addresses, firmware, uptime.

use anyhow::Result;

use crate::app::AppContext;
use crate::application::services::system_query;

/// Run the identity command. Never fails on the device side: unreadable
/// fields are reported as absent.
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub async fn run(app: &AppContext) -> Result<()> {
    let identity = system_query::device_identity(&app.runner, &app.fs, &app.config).await;

    if app.is_json() {
        return super::print_json(&identity);
    }
    app.human().render_identity(&identity);
    Ok(())
}
