//! Hotspot agent - device management for hotspot gateways

use clap::Parser;
use tracing_subscriber::EnvFilter;

use hotspot_agent::cli::Cli;
use hotspot_agent::domain::{ConfigError, DiagnosticsError, LifecycleError, MetricsError};
use hotspot_agent::output::json;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    let default_filter = if cli.verbose { "info" } else { "warn" };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .init();

    let json_errors = cli.json;
    if let Err(e) = cli.run().await {
        let message = format!("{e:#}");
        match json::format_error(&message, error_code(&e)) {
            Ok(body) if json_errors => println!("{body}"),
            _ => eprintln!("Error: {message}"),
        }
        std::process::exit(1);
    }
}

/// Stable machine-readable code for a failure.
fn error_code(e: &anyhow::Error) -> &'static str {
    for cause in e.chain() {
        if let Some(err) = cause.downcast_ref::<LifecycleError>() {
            return match err {
                LifecycleError::Busy => "LIFECYCLE_BUSY",
                LifecycleError::LockUnavailable { .. } => "LIFECYCLE_LOCK_UNAVAILABLE",
            };
        }
        if cause.is::<MetricsError>() {
            return "METRICS_UNAVAILABLE";
        }
        if cause.is::<DiagnosticsError>() {
            return "DIAGNOSTICS_MALFORMED";
        }
        if cause.is::<ConfigError>() {
            return "CONFIG_INVALID";
        }
    }
    "ERROR"
}
