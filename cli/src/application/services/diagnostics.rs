//! Application service: network diagnostics probe.

use crate::application::ports::CommandRunner;
use crate::domain::config::CommandSpec;
use crate::domain::diagnostics::{DiagnosticsResult, MalformedLinePolicy, parse_probe_output};
use crate::domain::DiagnosticsError;

/// Run the network test and decode its output.
///
/// A probe that cannot be spawned, times out, exits non-zero or prints
/// non-UTF-8 yields the all-absent result; that is never an error.
///
/// # Errors
///
/// Returns `DiagnosticsError` when the probe ran but a numeric line does not
/// decode and `policy` is `MalformedLinePolicy::Abort`.
pub async fn run_diagnostics(
    runner: &impl CommandRunner,
    probe: &CommandSpec,
    policy: MalformedLinePolicy,
) -> Result<DiagnosticsResult, DiagnosticsError> {
    tracing::info!(command = %probe.display(), "running network test");

    let output = match runner
        .run_with_timeout(&probe.program, &probe.argv(), probe.timeout())
        .await
    {
        Ok(output) if output.status.success() => output,
        Ok(output) => {
            tracing::warn!(status = %output.status, "network test failed");
            return Ok(DiagnosticsResult::default());
        }
        Err(e) => {
            tracing::warn!(error = %e, "network test could not run");
            return Ok(DiagnosticsResult::default());
        }
    };

    let Ok(stdout) = String::from_utf8(output.stdout) else {
        tracing::warn!("network test printed non-UTF-8 output");
        return Ok(DiagnosticsResult::default());
    };

    parse_probe_output(&stdout, policy)
}
