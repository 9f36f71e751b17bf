//! Application service: device identity and resource metrics.
//!
//! Identity is best-effort telemetry: every failure is logged and becomes an
//! absent field (or the placeholder serial). Resource metrics are not: a
//! failed reading is returned to the caller as a `MetricsError`.

use std::path::Path;

use crate::application::ports::{CommandRunner, LocalFs, ResourceProbe};
use crate::domain::config::{AgentConfig, CommandSpec, IdentityConfig, ResourcesConfig};
use crate::domain::identity::{self, DeviceIdentity, PLACEHOLDER_SERIAL};
use crate::domain::metrics::{ResourceMetrics, whole_degrees};
use crate::domain::MetricsError;

/// Collect the identity snapshot.
pub async fn device_identity(
    runner: &impl CommandRunner,
    fs: &impl LocalFs,
    cfg: &AgentConfig,
) -> DeviceIdentity {
    DeviceIdentity {
        serial_number: serial_number(fs, &cfg.identity),
        eth_mac: mac_address(fs, &cfg.identity.eth_address_path),
        wlan_mac: mac_address(fs, &cfg.identity.wlan_address_path),
        firmware_version: firmware_version(runner, &cfg.commands.firmware_version).await,
        uptime_seconds: uptime_seconds(runner, &cfg.commands.uptime).await,
    }
}

/// Serial number from the hardware descriptor, or `"00000000"`.
pub fn serial_number(fs: &impl LocalFs, cfg: &IdentityConfig) -> String {
    match fs.read_to_string(&cfg.cpuinfo_path) {
        Ok(descriptor) => identity::extract_serial(&descriptor, &cfg.serial_marker),
        Err(e) => {
            tracing::warn!(
                path = %cfg.cpuinfo_path.display(),
                error = %e,
                "hardware descriptor unreadable, using placeholder serial"
            );
            PLACEHOLDER_SERIAL.to_string()
        }
    }
}

/// Trimmed content of an interface address file, absent on any I/O error.
pub fn mac_address(fs: &impl LocalFs, path: &Path) -> Option<String> {
    match fs.read_to_string(path) {
        Ok(content) => Some(content.trim().to_string()),
        Err(e) => {
            tracing::debug!(path = %path.display(), error = %e, "interface address unavailable");
            None
        }
    }
}

pub async fn firmware_version(runner: &impl CommandRunner, spec: &CommandSpec) -> Option<String> {
    command_stdout(runner, spec)
        .await
        .map(|out| out.trim().to_string())
}

pub async fn uptime_seconds(runner: &impl CommandRunner, spec: &CommandSpec) -> Option<u64> {
    let output = command_stdout(runner, spec).await?;
    let uptime = identity::parse_uptime(&output);
    if uptime.is_none() {
        tracing::debug!(output = output.trim(), "uptime output has no leading digits");
    }
    uptime
}

/// Stdout of a best-effort command. `None` on spawn failure, timeout,
/// non-zero exit, or non-UTF-8 output. Stderr is ignored.
async fn command_stdout(runner: &impl CommandRunner, spec: &CommandSpec) -> Option<String> {
    let output = match runner
        .run_with_timeout(&spec.program, &spec.argv(), spec.timeout())
        .await
    {
        Ok(output) => output,
        Err(e) => {
            tracing::debug!(command = %spec.display(), error = %e, "command failed to run");
            return None;
        }
    };
    if !output.status.success() {
        tracing::debug!(command = %spec.display(), status = %output.status, "command failed");
        return None;
    }
    String::from_utf8(output.stdout).ok()
}

/// Collect the resource snapshot.
///
/// # Errors
///
/// Returns the first failing reading; nothing is defaulted.
pub async fn resource_metrics(
    probe: &impl ResourceProbe,
    cfg: &ResourcesConfig,
) -> Result<ResourceMetrics, MetricsError> {
    let cpu_usage_percent = probe.cpu_usage_percent().await?;
    let (memory_used_mb, memory_total_mb) = probe.memory().await?.in_mb();
    let (storage_used_mb, storage_total_mb) = probe.storage(&cfg.data_dir).await?.in_mb();
    let celsius = probe.temperature(&cfg.thermal_sensor).await?;
    if !celsius.is_finite() {
        return Err(MetricsError::InvalidTemperature {
            sensor: cfg.thermal_sensor.clone(),
            reading: celsius,
        });
    }

    Ok(ResourceMetrics {
        cpu_usage_percent,
        memory_used_mb,
        memory_total_mb,
        storage_used_mb,
        storage_total_mb,
        temperature_celsius: whole_degrees(celsius),
    })
}
